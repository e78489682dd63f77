//! # Script 模块
//!
//! 剧本解析相关功能，包括分词、AST 定义、解析器和名词短语求值。
//!
//! ## 模块结构
//!
//! - [`tokenizer`]：分词
//! - [`ast`]：剧本抽象语法树定义
//! - [`parser`]：递归下降解析器
//! - [`expr`]：名词短语求值

pub mod ast;
pub mod expr;
pub mod parser;
pub mod tokenizer;

pub use ast::*;
pub use parser::Parser;
