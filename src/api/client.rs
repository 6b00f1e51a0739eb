use std::time::Duration;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::model::{parse_resources, PageEnvelope, Query, Resource, ResourceKind};

use super::links::absolute_url;

/// Issues GET requests and hands back the parsed JSON body.
///
/// `url` is either absolute or relative to the service root. Implementations
/// never hold component state; every call is independent.
pub trait Fetcher: Send + Sync {
    fn get(&self, url: &str, params: Vec<(String, String)>) -> BoxFuture<'static, Result<Value, FetchError>>;
}

/// `Fetcher` backed by reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Fetcher for HttpFetcher {
    fn get(&self, url: &str, params: Vec<(String, String)>) -> BoxFuture<'static, Result<Value, FetchError>> {
        let client = self.client.clone();
        let url = absolute_url(&self.base_url, url);
        Box::pin(async move {
            debug!(%url, ?params, "GET");
            let resp = client
                .get(&url)
                .header(reqwest::header::ACCEPT, "application/hal+json, application/json")
                .query(&params)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;
            let status = resp.status();
            if !status.is_success() {
                warn!(%url, %status, "non-success response");
                return Err(FetchError::Status { status: status.as_u16(), url });
            }
            resp.json::<Value>()
                .await
                .map_err(|e| FetchError::malformed(format!("invalid JSON from {}: {}", url, e)))
        })
    }
}

/// Service path of the collection endpoint for `kind`.
pub fn collection_path(kind: ResourceKind) -> String {
    format!("/api/v3/{}", kind.path())
}

/// Fetches one page of `kind` matching `query`. Empty query values are not sent.
pub async fn fetch_collection(
    fetcher: &dyn Fetcher,
    kind: ResourceKind,
    query: &Query,
) -> Result<PageEnvelope, FetchError> {
    let body = fetcher.get(&collection_path(kind), query.request_params()).await?;
    PageEnvelope::parse(kind, body)
}

/// Follows a resource hyperlink (`self`, `clusters`, ...).
pub async fn fetch_resources(fetcher: &dyn Fetcher, href: &str) -> Result<Vec<Resource>, FetchError> {
    let body = fetcher.get(href, Vec::new()).await?;
    parse_resources(body)
}
