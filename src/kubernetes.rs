use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Event, Pod, Service};
use kube::api::ListParams;
use kube::core::ObjectList;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::fmt::Debug;
use tracing::{debug, info};

use crate::error::Error;
use crate::types::{ClusterSource, ResourceKind};

/// Read side of a scan: full, unfiltered collections across all namespaces.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    async fn list_services(&self) -> Result<ObjectList<Service>, Error>;
    async fn list_pods(&self) -> Result<ObjectList<Pod>, Error>;
    async fn list_events(&self) -> Result<ObjectList<Event>, Error>;
}

/// `ClusterReader` backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeReader {
    client: Client,
}

impl KubeReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn list_all<T>(&self, kind: ResourceKind) -> Result<ObjectList<T>, Error>
    where
        T: k8s_openapi::Resource<Scope = k8s_openapi::NamespaceResourceScope>
            + k8s_openapi::Metadata<Ty = k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta>
            + serde::de::DeserializeOwned
            + serde::Serialize
            + Clone
            + Debug
            + Send
            + Sync,
    {
        let api: Api<T> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|source| Error::ClusterQuery { kind, source })?;
        debug!(kind = %kind, count = list.items.len(), "Listed resources");
        Ok(list)
    }
}

#[async_trait]
impl ClusterReader for KubeReader {
    async fn list_services(&self) -> Result<ObjectList<Service>, Error> {
        self.list_all(ResourceKind::Services).await
    }

    async fn list_pods(&self) -> Result<ObjectList<Pod>, Error> {
        self.list_all(ResourceKind::Pods).await
    }

    async fn list_events(&self) -> Result<ObjectList<Event>, Error> {
        self.list_all(ResourceKind::Events).await
    }
}

/// Load credentials for `source` and build a client from them.
pub async fn connect(source: &ClusterSource) -> Result<Client, Error> {
    let config = match source {
        ClusterSource::InCluster => {
            info!("Using in-cluster config");
            Config::incluster().map_err(Error::config)?
        }
        ClusterSource::Kubeconfig(path) => {
            info!("Using kubeconfig {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path).map_err(Error::config)?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .map_err(Error::config)?
        }
        ClusterSource::Infer => {
            info!("No kubeconfig given, inferring cluster config");
            Config::infer().await.map_err(Error::config)?
        }
    };
    Client::try_from(config).map_err(Error::Client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_connect_missing_kubeconfig_is_config_error() {
        let source = ClusterSource::Kubeconfig(PathBuf::from("/nonexistent/kubeconfig"));
        let result = connect(&source).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
