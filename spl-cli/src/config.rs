//! # Config 模块
//!
//! 命令行工具的配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件（`--config` 指定的 JSON）
//! 3. 默认值（最低）

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// 命令行工具配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// `.kws` 词典目录；未配置时使用内置词典
    #[serde(default)]
    pub keywords_dir: Option<PathBuf>,

    /// 日志详细程度（0 = warn，1 = debug，2 及以上 = trace）
    #[serde(default)]
    pub verbose: u8,
}

impl CliConfig {
    /// 加载配置文件
    ///
    /// 文件是显式指定的，读取或解析失败都直接报错。
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))
    }

    /// 用命令行参数覆盖配置
    ///
    /// `verbose` 为 0 视为命令行未指定。
    pub fn merge_cli(mut self, keywords_dir: Option<PathBuf>, verbose: u8) -> Self {
        if keywords_dir.is_some() {
            self.keywords_dir = keywords_dir;
        }
        if verbose > 0 {
            self.verbose = verbose;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.keywords_dir, None);
        assert_eq!(config.verbose, 0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CliConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CliConfig::default());

        let config: CliConfig = serde_json::from_str(r#"{"keywords_dir": "kws"}"#).unwrap();
        assert_eq!(config.keywords_dir, Some(PathBuf::from("kws")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = CliConfig {
            keywords_dir: Some(PathBuf::from("from-file")),
            verbose: 1,
        };

        let merged = config.clone().merge_cli(None, 0);
        assert_eq!(merged, config);

        let merged = config.merge_cli(Some(PathBuf::from("from-cli")), 2);
        assert_eq!(merged.keywords_dir, Some(PathBuf::from("from-cli")));
        assert_eq!(merged.verbose, 2);
    }
}
