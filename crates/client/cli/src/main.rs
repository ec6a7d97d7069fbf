//! Terminal battle driver entry point.
mod app;
mod command;
mod config;

use anyhow::Result;
use app::CliApp;
use config::{CliConfig, EnvFile};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before the subscriber so RUST_LOG can come from it
    let env_file = EnvFile::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
    env_file.log();

    let config = CliConfig::from_env();

    CliApp::load(config)?.run().await
}
