use clap::Parser;
use tracing_subscriber::EnvFilter;

use salesreview_lib::{run, Cli};

fn main() -> anyhow::Result<()> {
    // stdout carries the report; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    run(&cli)
}
