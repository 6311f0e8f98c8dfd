//! CLI argument definitions using clap derive

use clap::error::ErrorKind;
use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  gputemps                Display and update table of GPU temperatures
  gputemps --json         Continuously output GPU temperatures in JSON format
  gputemps --once         Output temperatures once in table format
  gputemps --json --once  Output temperatures once in JSON format";

/// NVIDIA GPU temperature monitor
///
/// Shows core temperature from NVML alongside junction (hotspot) and VRAM
/// temperatures read directly from GPU registers. Requires root.
#[derive(Parser, Debug)]
#[command(name = "gputemps")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// Output temperatures in JSON format
    #[arg(long)]
    pub json: bool,

    /// Output temperatures once
    #[arg(long)]
    pub once: bool,

    /// Enable debug logging on stderr (best combined with --json)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(short, long, env = "GPUTEMPS_CONFIG")]
    pub config: Option<String>,

    /// Refresh interval in milliseconds
    #[arg(long, value_name = "MILLIS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

impl Cli {
    /// Output format selected by the flags
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Live, color-coded table redrawn in place
    #[default]
    Table,
    /// One JSON record per cycle
    Json,
}

/// Default `env_logger` filter when `RUST_LOG` is not set
pub fn log_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Process exit code for a failed parse
///
/// `--help` and `--version` are successful exits; anything else is a usage
/// error.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
