use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The three resource kinds forwarded every cycle, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Services,
    Pods,
    Events,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Services,
        ResourceKind::Pods,
        ResourceKind::Events,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Services => "svc",
            ResourceKind::Pods => "pod",
            ResourceKind::Events => "event",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Webhook URLs, one per kind. `None` disables dispatch for that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Destinations {
    pub services: Option<String>,
    pub pods: Option<String>,
    pub events: Option<String>,
}

impl Destinations {
    /// Build from raw flag values; empty strings count as unset.
    pub fn new(services: Option<String>, pods: Option<String>, events: Option<String>) -> Self {
        fn normalize(url: Option<String>) -> Option<String> {
            url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
        }
        Self {
            services: normalize(services),
            pods: normalize(pods),
            events: normalize(events),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Services => self.services.as_deref(),
            ResourceKind::Pods => self.pods.as_deref(),
            ResourceKind::Events => self.events.as_deref(),
        }
    }
}

/// Where the cluster credentials come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterSource {
    InCluster,
    Kubeconfig(PathBuf),
    /// `$KUBECONFIG` / `~/.kube/config`, falling back to in-cluster.
    Infer,
}

/// Immutable settings for the scan loop, built once at startup.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub interval: Duration,
    pub webhook_timeout: Duration,
    pub destinations: Destinations,
}
