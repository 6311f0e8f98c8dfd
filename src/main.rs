//! gputemps - NVIDIA GPU temperature monitor
//!
//! Shows core, junction and VRAM temperatures for every NVIDIA GPU, either as
//! a live table or as a stream of JSON records.

use clap::Parser;
use gputemps::cli::{log_filter, parse_exit_code, Cli};
use gputemps::commands::run_watch;
use gputemps::config::ConfigBuilder;
use gputemps::error::{AppError, MemoryMapError, NvmlError};

fn main() {
    // Parse CLI arguments
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(&e));
        }
    };

    // The logger's filter is fixed at init, so the verbose setting has to be
    // known before it is built.
    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())
        .map(|builder| {
            builder
                .with_verbose(cli.verbose.then_some(true))
                .with_interval(cli.interval)
        })
        .and_then(ConfigBuilder::build);
    let verbose = match &config {
        Ok(config) => config.general.verbose,
        Err(_) => cli.verbose,
    };

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_filter(verbose)))
        .format_timestamp(None)
        .init();

    let result = config
        .map_err(AppError::from)
        .and_then(|config| run_watch(&config, cli.format(), cli.once));

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::PrivilegeRequired => {
            eprintln!();
            eprintln!("Hint: Run with sudo or as root.");
        }
        AppError::NvmlInit(NvmlError::LibraryNotFound) => {
            eprintln!();
            eprintln!("Hint: Make sure the NVIDIA driver is installed.");
            eprintln!("      On Linux, install the nvidia-utils package.");
        }
        AppError::NoGpusFound => {
            eprintln!();
            eprintln!("Hint: Make sure you have an NVIDIA GPU installed.");
            eprintln!("      Check 'nvidia-smi' for GPU detection.");
        }
        AppError::MemoryMap(MemoryMapError::Open { .. } | MemoryMapError::Map { .. }) => {
            eprintln!();
            eprintln!("Hint: The kernel may restrict /dev/mem access.");
            eprintln!("      Boot with 'iomem=relaxed' to allow mapping device registers.");
        }
        _ => {}
    }
}
