use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::{ClusterSource, Destinations, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "kube-scan-hook")]
#[command(about = "Periodically post cluster services, pods and events to webhooks")]
pub struct Cli {
    /// Path to kubeconfig
    #[arg(long, env = "KUBECONFIG_PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Use in-cluster config (takes priority over --kubeconfig)
    #[arg(long, env = "SCAN_INCLUSTER")]
    pub incluster: bool,

    /// Webhook for services (empty disables)
    #[arg(long, alias = "svcWebhook", env = "SVC_WEBHOOK")]
    pub svc_webhook: Option<String>,

    /// Webhook for pods (empty disables)
    #[arg(long, alias = "podWebhook", env = "POD_WEBHOOK")]
    pub pod_webhook: Option<String>,

    /// Webhook for events (empty disables)
    #[arg(long, alias = "eventWebhook", env = "EVENT_WEBHOOK")]
    pub event_webhook: Option<String>,

    /// Interval in seconds between scans
    #[arg(long, env = "SCAN_INTERVAL", default_value_t = 900,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Webhook request timeout in seconds
    #[arg(long, env = "WEBHOOK_TIMEOUT", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub webhook_timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn cluster_source(&self) -> ClusterSource {
        if self.incluster {
            ClusterSource::InCluster
        } else if let Some(path) = self.kubeconfig.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            ClusterSource::Kubeconfig(path.clone())
        } else {
            ClusterSource::Infer
        }
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            interval: Duration::from_secs(self.interval),
            webhook_timeout: Duration::from_secs(self.webhook_timeout),
            destinations: Destinations::new(
                self.svc_webhook.clone(),
                self.pod_webhook.clone(),
                self.event_webhook.clone(),
            ),
        }
    }
}
