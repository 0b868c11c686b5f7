//! Binary crate for the `iss` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Wiring the resolver pipeline from config
//! - Printing the report or a stage-tagged failure

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
