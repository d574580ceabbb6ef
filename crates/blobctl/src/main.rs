//! Celestia blob client.
//!
//! Submits a local file as a namespaced blob to a Celestia node and prints
//! the inclusion height and commitment, or fetches a blob by commitment and
//! height and writes it back to disk.

#![warn(missing_docs)]

mod cli;
mod config;
mod files;

use std::process::ExitCode;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the command's report.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    cli.run().await
}
