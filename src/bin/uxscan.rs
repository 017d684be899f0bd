use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use uxscan_core::cli::{self, Cli};
use uxscan_core::exit::UxscanExit;

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("uxscan_core=debug")
        } else {
            EnvFilter::new("uxscan_core=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> UxscanExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(UxscanExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            UxscanExit::Error
        }
    }
}
