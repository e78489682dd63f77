//! # 日志初始化
//!
//! 日志写到 stderr，stdout 只留给剧本输出。

use tracing::Level;

/// `-v` 次数对应的日志级别
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// 安装全局 subscriber
///
/// 重复调用时保留第一次安装的 subscriber。
pub fn init(verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
