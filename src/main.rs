use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countries::cli::{self, Cli};
use countries::config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout stays clean for --json
    let default_filter = if cli.output.verbose {
        "countries=debug,info"
    } else {
        "countries=warn"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting countries v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
        Config::default()
    });

    if let Err(e) = cli::run(cli, config).await {
        cli::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
