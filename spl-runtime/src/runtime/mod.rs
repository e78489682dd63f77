//! # Runtime 模块
//!
//! 树遍历解释器，负责剧本执行和状态管理。
//!
//! ## 模块结构
//!
//! - [`engine`]：幕/场循环与跳转处理
//! - [`executor`]：单行与单句的执行

pub mod engine;
pub mod executor;

pub use engine::Interpreter;
