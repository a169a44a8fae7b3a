//! Binary crate for the `weather-proxy` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Mounting the `getData` handler over HTTP
//! - Logging setup

use clap::Parser;

mod cli;
mod http;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
