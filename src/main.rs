//! Pitwall - caching backend for a Formula 1 fan dashboard

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod refresh;
mod server;
mod stats;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--debug` selects debug, else info.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Serve { host, port } => cli::serve::run(&opts, host, port).await,
        Commands::Refresh => cli::refresh::run(&opts).await,
        Commands::Dossier { driver_id } => cli::dossier::run(&opts, driver_id.as_deref()).await,
        Commands::Scenarios { top } => cli::scenarios::run(&opts, top).await,
        Commands::Version => {
            println!("pitwall version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
