//! CLI module for the countries tool
//!
//! Provides the command-line interface: one-shot listing, the interactive
//! search shell and configuration management.

mod commands;
mod output;
mod shell;

use clap::{Parser, Subcommand};

use crate::config::Config;

pub use output::{print_error, OutputFormat};

/// Countries - fetch and search a remote country list
#[derive(Parser, Debug)]
#[command(name = "countries")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Fetch from this URL instead of the configured source
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the list once and print it
    List {
        /// Only show countries whose name or capital contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print one descriptive sentence per country
        #[arg(long)]
        describe: bool,
    },

    /// Interactive search over the fetched list
    Shell,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    if let Some(url) = cli.url {
        tracing::debug!("Overriding source URL with {}", url);
        config.source.url = url;
    }

    match cli.command {
        Commands::List { search, describe } => {
            commands::list::run(&config, search.as_deref(), describe, format, quiet).await
        }
        Commands::Shell => shell::run(&config).await,
        Commands::Config { command } => commands::config::run(command, config, format, quiet).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_search() {
        let cli = Cli::try_parse_from(["countries", "list", "--search", "ca", "--json"]).unwrap();
        assert!(cli.output.json);
        match cli.command {
            Commands::List { search, describe } => {
                assert_eq!(search.as_deref(), Some("ca"));
                assert!(!describe);
            }
            other => panic!("Expected list command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_url() {
        let cli = Cli::try_parse_from(["countries", "shell", "--url", "http://localhost/c.json"])
            .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://localhost/c.json"));
        assert!(matches!(cli.command, Commands::Shell));
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["countries"]).is_err());
    }
}
