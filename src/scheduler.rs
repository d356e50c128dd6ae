use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::Error;
use crate::kubernetes::ClusterReader;
use crate::scan::run_cycle;
use crate::types::ScanConfig;
use crate::webhook::WebhookDispatcher;

/// Run cycles back to back with `config.interval` between them.
///
/// `stop` is checked before each cycle and raced against the sleep; a cycle
/// that has started always runs to completion. Returns `Ok` once stopped and
/// the first cycle error otherwise.
pub async fn run<R>(
    reader: R,
    dispatcher: WebhookDispatcher,
    config: ScanConfig,
    mut stop: watch::Receiver<bool>,
) -> Result<(), Error>
where
    R: ClusterReader,
{
    loop {
        if *stop.borrow() {
            break;
        }

        info!("Do...");
        if let Err(e) = run_cycle(&reader, &dispatcher, &config.destinations).await {
            error!(error = %e, "Scan cycle failed");
            return Err(e);
        }

        info!("Sleep {} seconds", config.interval.as_secs());
        tokio::select! {
            _ = tokio::time::sleep(config.interval) => {}
            // A dropped sender also means nobody wants more cycles.
            _ = stop.changed() => break,
        }
    }
    info!("Scan loop stopped");
    Ok(())
}

/// Wait for `shutdown` or for the scan loop to end by itself.
///
/// On shutdown the stop request is sent and this returns right away, without
/// waiting for an in-flight cycle. A loop that ends on its own has failed, and
/// its error is returned.
pub async fn run_until_shutdown<S>(
    mut scanner: JoinHandle<Result<(), Error>>,
    shutdown: S,
    stop: watch::Sender<bool>,
) -> anyhow::Result<()>
where
    S: Future<Output = ()>,
{
    tokio::select! {
        _ = shutdown => {
            let _ = stop.send(true);
        }
        result = &mut scanner => {
            result??;
        }
    }
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = ?e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = ?e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, exiting..."),
        _ = terminate => info!("Received SIGTERM, exiting..."),
    }
}
