//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod dossier;
pub mod refresh;
pub mod scenarios;
pub mod serve;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// Pitwall - caching backend for a Formula 1 fan dashboard
#[derive(Parser, Debug)]
#[command(name = "pitwall")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format for one-shot commands (table, json)
    #[arg(
        long,
        global = true,
        env = "PITWALL_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "PITWALL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PITWALL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Override the Jolpica base URL
    #[arg(long, global = true, env = "PITWALL_JOLPICA_URL", hide_env = true)]
    pub jolpica_url: Option<String>,

    /// Override the OpenF1 base URL
    #[arg(long, global = true, env = "PITWALL_OPENF1_URL", hide_env = true)]
    pub openf1_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the API server with background refresh
    Serve {
        /// Address to bind
        #[arg(long, env = "PITWALL_HOST", hide_env = true)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, short = 'p', env = "PITWALL_PORT", hide_env = true)]
        port: Option<u16>,
    },

    /// Run one refresh cycle and report per-key outcomes
    Refresh,

    /// Show season statistics for a driver
    Dossier {
        /// Jolpica driver ID (defaults to the configured focus driver)
        driver_id: Option<String>,
    },

    /// Show what a win in the next race would do to the standings
    Scenarios {
        /// Number of leading drivers to simulate
        #[arg(long, short = 'n')]
        top: Option<usize>,
    },

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_from(["pitwall", "serve", "--host", "0.0.0.0", "-p", "8080"]);

        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pitwall", "dossier", "hamilton", "--format", "json"]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Dossier { driver_id: Some(ref id) } if id == "hamilton"
        ));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Cli::try_parse_from(["pitwall", "refresh", "--format", "xml"]);
        assert!(result.is_err());
    }
}
