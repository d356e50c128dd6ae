mod cli;
mod error;
mod kubernetes;
mod scan;
mod scheduler;
mod types;
mod webhook;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use cli::Cli;
use kubernetes::KubeReader;
use types::ResourceKind;
use webhook::WebhookDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.scan_config();
    info!("incluster: {}", cli.incluster);
    for kind in ResourceKind::ALL {
        info!("{}Webhook: {}", kind, config.destinations.get(kind).unwrap_or(""));
    }
    info!("interval: {}s", config.interval.as_secs());

    let client = kubernetes::connect(&cli.cluster_source()).await?;
    let reader = KubeReader::new(client);
    let dispatcher = WebhookDispatcher::new(config.webhook_timeout)?;

    // The loop only sees the stop request between cycles; an in-flight cycle
    // is dropped when main returns.
    let (stop_tx, stop_rx) = watch::channel(false);
    let scanner = tokio::spawn(scheduler::run(reader, dispatcher, config, stop_rx));
    scheduler::run_until_shutdown(scanner, scheduler::shutdown_signal(), stop_tx).await?;

    info!("exited");
    Ok(())
}
