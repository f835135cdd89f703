//! Binary crate for the `weather-now` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive "enter a city" prompt
//! - Human-friendly output and the live clock line

use clap::Parser;

mod cli;
mod logging;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose);
    cmd.run().await
}
