use crate::{common::error::Result, opts::CliArgs, publish::push_charts};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod chart;
mod common;
mod helm;
mod opts;
mod publish;
mod registry;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let opts = CliArgs::parse();

    push_charts(&opts).await.map_err(|error| {
        error!(%error, "Failed to publish Helm charts");
        error
    })
}

/// Initialize logging components -- tracing.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
