use crate::types::ResourceKind;

/// Every failure the scanner can hit. All of them are fatal: nothing retries,
/// the process exits and its supervisor restarts it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to get cluster config: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("unable to get k8s client: {0}")]
    Client(#[source] kube::Error),

    #[error("unable to build webhook http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("unable to list {kind}: {source}")]
    ClusterQuery {
        kind: ResourceKind,
        #[source]
        source: kube::Error,
    },

    #[error("unable to encode {kind} as json: {source}")]
    Encode {
        kind: ResourceKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to post {kind} webhook {url}: {source}")]
    Delivery {
        kind: ResourceKind,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    pub fn config(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Config(Box::new(err))
    }
}
