use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mancala_search::interface::{arguments::Arguments, cli::Interface};


fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    let default_level = if args.verbose { "mancala_search=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut interface = Interface::new(&args).context("could not set up the game")?;
    interface.init();
    return Ok(());
}
