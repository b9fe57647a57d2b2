//! CLI entry point for the summary generator.

use clap::Parser;
use github_summary::cli::{self, Cli};
use github_summary::config::Config;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the config's debug flag
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level())),
        )
        .with_target(false)
        .init();

    if let Err(e) = cli::run(&cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
