#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{self, stdout};

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use daybook::cli::{self, Cli};
use daybook::config::{Config, DEFAULT_LOG_FILTER};
use daybook::storage::LogStore;

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    let config = Config::from_env()?;
    init_tracing();

    let store = LogStore::open(&config.data_dir)?;
    let today = Local::now().date_naive();
    cli::run(args.command, &store, &mut stdout().lock(), today)?;
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
