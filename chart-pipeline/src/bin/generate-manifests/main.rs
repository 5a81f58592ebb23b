use crate::{common::error::Result, generate::generate_manifests, opts::CliArgs};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod common;
mod generate;
mod helm;
mod opts;
mod target;

fn main() -> Result<()> {
    init_logging();

    let opts = CliArgs::parse();

    generate_manifests(&opts).map_err(|error| {
        error!(%error, "Failed to generate deployment target manifests");
        error
    })
}

/// Initialize logging components -- tracing.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
