//! CLI entry point for substitution tiling generation and analysis

use clap::Parser;
use inflatile::io::cli::{Cli, TilingRunner};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() -> inflatile::Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let runner = TilingRunner::new(cli);
    runner.process().map(|_summary| ())
}
