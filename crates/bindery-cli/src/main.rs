//! # bindery: module definition CLI
//!
//! Loads `.bind` module definitions, renders their canonical form, inspects
//! aspect weaving and saves or restores structural snapshots.

mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.global.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    commands::execute(cli)
}
