use crate::{operations::execute, opts::CliArgs};
use clap::Parser;
use helm_deploy::{common::logging::TracingTelemetry, Result};
use tracing::error;

mod operations;
mod opts;

#[tokio::main]
async fn main() -> Result<()> {
    let opts = CliArgs::parse();
    init_logging(&opts);

    execute(&opts).await.map_err(|error| {
        error!(%error, "Failed to run helm-deploy");
        error
    })
}

/// Initialize logging components -- tracing.
fn init_logging(opts: &CliArgs) {
    TracingTelemetry::builder()
        .with_style(opts.fmt_style())
        .with_colours(opts.ansi_colours())
        .init("helm-deploy");
}
