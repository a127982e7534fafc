//! # nsat — namespace-aware attach CLI
//!
//! Opens a diagnostic channel to a running target process, containerized
//! or not, and prints the rendezvous socket path for downstream tools.

mod commands;

use clap::Parser;

use crate::commands::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    std::process::exit(commands::execute(cli));
}
