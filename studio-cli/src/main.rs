//! Binary crate for the `weather-studio` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Asking for credentials and location consent
//! - Drawing reading cards and animated text-mode skies

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod location;
mod render;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
