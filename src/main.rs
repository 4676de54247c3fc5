//! # popular-repos CLI
//!
//! Binary entry point for the `popular-repos` generator. Responsibilities:
//!
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate subcommand.
//! - Propagating errors so the process exits non-zero the moment any
//!   descriptor fails validation or discovery.
//!
//! The generation logic lives in the library crate; this binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
