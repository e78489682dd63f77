//! # spl-cli
//!
//! `spl` 命令行工具的实现：参数与执行流程、配置、词典目录加载、日志初始化。
//!
//! 解析和执行都在 `spl-runtime` 中完成，这里只负责把磁盘和终端接到运行时上。

pub mod cli;
pub mod config;
pub mod keywords_dir;
pub mod logging;

pub use config::CliConfig;
pub use keywords_dir::load_keywords_dir;
