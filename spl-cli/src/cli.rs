//! # CLI 模块
//!
//! 命令行参数定义与完整的执行流程。
//!
//! stdin 与 stdout 由调用方注入，`main` 传入真实终端，测试传入内存缓冲。

use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use spl_runtime::script::tokenizer::SENTINEL;
use spl_runtime::{Interpreter, Keywords, tokenize};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::keywords_dir::load_keywords_dir;
use crate::logging;

/// 剧本文件参数中表示 stdin 的值
pub const STDIN_PATH: &str = "-";

#[derive(Debug, Parser)]
#[command(name = "spl")]
#[command(about = "莎士比亚风格剧本解释器")]
#[command(version)]
pub struct Cli {
    /// 剧本文件；`-` 表示从 stdin 读取
    pub file: PathBuf,

    /// `.kws` 词典目录（默认使用内置词典）
    #[arg(short, long)]
    pub keywords: Option<PathBuf>,

    /// JSON 配置文件
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输出更详细的日志（-v = debug，-vv = trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 输出内容
    #[arg(long, value_enum, default_value_t = Emit::Output)]
    pub emit: Emit,
}

/// `--emit` 的取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// 执行剧本并输出结果
    Output,
    /// 输出解析后的 AST（JSON）
    Ast,
    /// 输出分词结果，每行一个 token
    Tokens,
}

impl Cli {
    /// 是否从 stdin 读取剧本
    pub fn reads_program_from_stdin(&self) -> bool {
        self.file.as_os_str() == STDIN_PATH
    }

    /// 合并配置文件与命令行参数
    pub fn resolve_config(&self) -> anyhow::Result<CliConfig> {
        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        Ok(config.merge_cli(self.keywords.clone(), self.verbose))
    }
}

/// 执行一次命令
///
/// 剧本来自 `stdin` 时，输入句只能读到空。
pub fn execute(cli: &Cli, mut stdin: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    logging::init(config.verbose);

    let keywords = match &config.keywords_dir {
        Some(dir) => load_keywords_dir(dir)?,
        None => Keywords::standard(),
    };

    let from_stdin = cli.reads_program_from_stdin();
    let source = if from_stdin {
        let mut source = String::new();
        stdin
            .read_to_string(&mut source)
            .context("从 stdin 读取剧本失败")?;
        source
    } else {
        read_source(&cli.file)?
    };
    info!(file = %cli.file.display(), bytes = source.len(), "已读取剧本");

    if cli.emit == Emit::Tokens {
        for token in tokenize(&source) {
            if token != SENTINEL {
                writeln!(out, "{token}")?;
            }
        }
        return Ok(());
    }

    let mut parser = spl_runtime::Parser::new(&keywords);
    let program = parser
        .parse(&source)
        .with_context(|| format!("解析失败: {}", cli.file.display()))?;
    for warning in parser.warnings() {
        warn!("{warning}");
    }

    if cli.emit == Emit::Ast {
        writeln!(out, "{}", program.to_json_pretty()?)?;
        return Ok(());
    }

    let mut interpreter = if from_stdin {
        Interpreter::with_input(&program, &keywords, io::empty())
    } else {
        Interpreter::with_input(&program, &keywords, stdin)
    };
    let result = interpreter.run();

    // 出错前已产生的输出照常写出
    out.write_all(interpreter.output())?;
    out.flush()?;
    result.with_context(|| format!("执行失败: {}", cli.file.display()))
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("剧本读取失败: {}", path.display()))
}
