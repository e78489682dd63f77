//! # SPL Runtime
//!
//! 莎士比亚风格剧本语言的核心运行时库。
//!
//! ## 架构概述
//!
//! `spl-runtime` 是纯逻辑核心，除了注入的输入源之外不做任何 IO：
//!
//! ```text
//! 源文本 ──► tokenize ──► Parser ──► Program ──► Interpreter ──► Vec<u8>
//!                           ▲                        ▲
//!                           └──────── Keywords ──────┘
//! ```
//!
//! ## 核心类型
//!
//! - [`Keywords`]：词典（名词、形容词、运算、输入输出等关键词）
//! - [`Parser`]：把源文本解析为 [`Program`]
//! - [`Interpreter`]：执行 [`Program`]，输出累积在 [`RuntimeState`] 中
//! - [`RuntimeState`]：可序列化的运行时状态
//!
//! ## 使用示例
//!
//! ```ignore
//! use spl_runtime::{Keywords, run};
//!
//! let output = run(source, &Keywords::standard())?;
//! print!("{}", String::from_utf8_lossy(&output));
//! ```
//!
//! ## 模块结构
//!
//! - [`keywords`]：词典与 `.kws` 格式
//! - [`state`]：RuntimeState、Role、Environment 定义
//! - [`error`]：错误类型定义
//! - [`script`]：剧本解析（分词、AST、Parser、求值）
//! - [`runtime`]：执行引擎

pub mod error;
pub mod keywords;
pub mod runtime;
pub mod script;
pub mod state;

use std::io::{self, BufRead};

// 重导出核心类型
pub use error::{EvalError, KeywordError, ParseError, RuntimeError, SplError, SplResult};
pub use keywords::{IoMode, KeywordSources, Keywords};
pub use runtime::Interpreter;
pub use script::tokenizer::tokenize;
pub use script::{Parser, Program, Sentence};
pub use state::{Environment, Role, RuntimeState};

/// 解析并执行剧本，输入源为空
pub fn run(text: &str, keywords: &Keywords) -> SplResult<Vec<u8>> {
    run_with_input(text, keywords, io::empty())
}

/// 解析并执行剧本，输入句从 `input` 读取
pub fn run_with_input(
    text: &str,
    keywords: &Keywords,
    input: impl BufRead,
) -> SplResult<Vec<u8>> {
    let program = Parser::new(keywords).parse(text)?;
    let mut interpreter = Interpreter::with_input(&program, keywords, input);
    interpreter.run()?;
    Ok(interpreter.into_output())
}
