//! # 词典目录加载
//!
//! 从目录中读取六个 `.kws` 文件并构建 [`Keywords`]。
//! 缺失的文件按空文件处理并记录警告。

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, bail};
use spl_runtime::{KeywordSources, Keywords};
use tracing::{debug, warn};

/// 词典文件扩展名
pub const KWS_EXTENSION: &str = "kws";

/// 加载词典目录
pub fn load_keywords_dir(dir: &Path) -> anyhow::Result<Keywords> {
    if !dir.is_dir() {
        bail!("词典目录不存在: {}", dir.display());
    }

    let texts = KeywordSources::FILE_STEMS
        .iter()
        .map(|stem| read_kws(dir, stem))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let [
        outputs,
        inputs,
        operations,
        nouns,
        adjectives,
        personal_nouns,
    ] = texts.as_slice()
    else {
        bail!("词典文件数量不符: {}", texts.len());
    };

    let sources = KeywordSources {
        outputs,
        inputs,
        operations,
        nouns,
        adjectives,
        personal_nouns,
    };
    Keywords::from_sources(&sources).with_context(|| format!("词典目录无效: {}", dir.display()))
}

fn read_kws(dir: &Path, stem: &str) -> anyhow::Result<String> {
    let path = dir.join(stem).with_extension(KWS_EXTENSION);
    match fs::read_to_string(&path) {
        Ok(text) => {
            debug!(path = %path.display(), "已读取词典文件");
            Ok(text)
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "词典文件不存在，按空词典处理");
            Ok(String::new())
        }
        Err(err) => {
            Err(err).with_context(|| format!("词典文件读取失败: {}", path.display()))
        }
    }
}
