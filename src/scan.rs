use tracing::info;

use crate::error::Error;
use crate::kubernetes::ClusterReader;
use crate::types::{Destinations, ResourceKind};
use crate::webhook::WebhookDispatcher;

/// One pass: list every kind, then post each list to its webhook.
///
/// All reads happen before any write. The first error ends the cycle and
/// nothing after it runs.
pub async fn run_cycle(
    reader: &dyn ClusterReader,
    dispatcher: &WebhookDispatcher,
    destinations: &Destinations,
) -> Result<(), Error> {
    let services = reader.list_services().await?;
    let pods = reader.list_pods().await?;
    let events = reader.list_events().await?;

    info!("post to svc webhook");
    dispatcher
        .dispatch(
            ResourceKind::Services,
            &services,
            destinations.get(ResourceKind::Services),
        )
        .await?;

    info!("post to pod webhook");
    dispatcher
        .dispatch(ResourceKind::Pods, &pods, destinations.get(ResourceKind::Pods))
        .await?;

    info!("post to event webhook");
    dispatcher
        .dispatch(
            ResourceKind::Events,
            &events,
            destinations.get(ResourceKind::Events),
        )
        .await?;

    Ok(())
}
