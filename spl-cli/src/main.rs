//! # spl
//!
//! 莎士比亚风格剧本解释器的命令行入口。
//!
//! ## 用法
//!
//! ```bash
//! spl hello.spl
//! spl --keywords dict/ hello.spl < input.txt
//! spl --emit ast hello.spl
//! cat hello.spl | spl -
//! spl -vv hello.spl
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use spl_cli::cli::{Cli, execute};

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("spl: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(&cli, io::stdin().lock(), &mut stdout.lock())
}
