//! POSTs resource collections as JSON to webhook endpoints.
//!
//! Any HTTP response counts as delivered: status and body are only logged.
//! Only a failure to get a response at all is an error.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::types::ResourceKind;

/// Connection timeout in seconds
const CONNECT_TIMEOUT_SECS: u64 = 10;

pub struct WebhookDispatcher {
    client: Client,
}

impl WebhookDispatcher {
    /// Create a dispatcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self { client })
    }

    /// Post `collection` to `destination`.
    ///
    /// Returns `Ok(None)` without sending anything when the destination is
    /// unset or empty, otherwise the status the endpoint answered with.
    pub async fn dispatch<T>(
        &self,
        kind: ResourceKind,
        collection: &T,
        destination: Option<&str>,
    ) -> Result<Option<StatusCode>, Error>
    where
        T: Serialize + ?Sized,
    {
        let Some(url) = destination.filter(|u| !u.is_empty()) else {
            debug!(kind = %kind, "No webhook configured, skipping");
            return Ok(None);
        };

        let body =
            serde_json::to_vec(collection).map_err(|source| Error::Encode { kind, source })?;

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| Error::Delivery {
                kind,
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        info!(kind = %kind, url = %url, status = %status, "status code: {}", status.as_u16());
        // Drain the body so the connection is released even for error statuses.
        match response.text().await {
            Ok(body) => info!(kind = %kind, "{}", body),
            Err(e) => warn!(kind = %kind, url = %url, error = %e, "Failed to read webhook response body"),
        }
        Ok(Some(status))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tests::support::{MockWebhook, empty_list};

    fn dispatcher() -> WebhookDispatcher {
        WebhookDispatcher::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_skips_unset_destination() {
        let server = MockWebhook::start().await;
        let d = dispatcher();

        let list = empty_list("ServiceList");
        assert_eq!(d.dispatch(ResourceKind::Services, &list, None).await.unwrap(), None);
        assert_eq!(d.dispatch(ResourceKind::Pods, &list, Some("")).await.unwrap(), None);

        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_posts_json() {
        let server = MockWebhook::start().await;
        let d = dispatcher();
        let list = empty_list("EventList");

        let status = d
            .dispatch(ResourceKind::Events, &list, Some(server.url("events").as_str()))
            .await
            .unwrap();
        assert_eq!(status, Some(StatusCode::OK));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/hook/events");
        assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, list);
    }

    #[tokio::test]
    async fn test_dispatch_accepts_error_statuses() {
        let server = MockWebhook::start().await;
        let d = dispatcher();
        let list = empty_list("PodList");

        for code in [404u16, 500] {
            let status = d
                .dispatch(ResourceKind::Pods, &list, Some(server.status_url(code).as_str()))
                .await
                .unwrap();
            assert_eq!(status.map(|s| s.as_u16()), Some(code));
        }
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_connection_refused_is_delivery_error() {
        let d = dispatcher();
        let list = empty_list("PodList");

        let err = d
            .dispatch(ResourceKind::Pods, &list, Some("http://127.0.0.1:1/pods"))
            .await
            .unwrap_err();
        match err {
            Error::Delivery { kind, url, .. } => {
                assert_eq!(kind, ResourceKind::Pods);
                assert_eq!(url, "http://127.0.0.1:1/pods");
            }
            other => panic!("expected delivery error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_times_out_on_silent_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (socket, _) = listener.accept().await.unwrap();
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(socket);
            }
        });

        let d = WebhookDispatcher::new(Duration::from_millis(200)).unwrap();
        let list = empty_list("ServiceList");
        let url = format!("http://{}/svc", addr);

        let start = std::time::Instant::now();
        let result = d.dispatch(ResourceKind::Services, &list, Some(url.as_str())).await;
        assert!(matches!(result, Err(Error::Delivery { .. })));
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
