//! Command-line parser for RustPad launch scenarios.
//! RustPad 啟動參數解析器。

pub mod logging;

use std::ffi::OsString;

use clap::{ArgAction, Parser};

pub use logging::{configure_logging, level_for_verbosity};

/// Parsed launch configuration derived from CLI arguments.
/// 從命令列參數解析出的啟動組態。
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "rustpad",
    about = "A Windows Notepad clone written in Rust.",
    version
)]
pub struct LaunchConfig {
    /// 提高日誌詳細程度（-v 資訊、-vv 除錯）。 / Change log level (-v info, -vv debug). Default: warnings only.
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl LaunchConfig {
    /// Arguments that reproduce this configuration in a child process.
    /// 產生可在子行程重現相同設定的參數。
    pub fn to_args(&self) -> Vec<String> {
        (0..self.verbose).map(|_| "-v".to_string()).collect()
    }
}

/// Parses command-line arguments into a [`LaunchConfig`].
/// 將命令列參數解析為 [`LaunchConfig`]。
pub fn parse<I, S>(args: I) -> Result<LaunchConfig, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    LaunchConfig::try_parse_from(args)
}
