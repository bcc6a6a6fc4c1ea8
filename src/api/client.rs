use reqwest::{StatusCode, Url};

use super::models::{HealthResponse, SearchRequest};
use super::{HEALTH_PATH, SEARCH_PATH, SearchBackend};
use crate::data_models::{Query, SearchResult};
use crate::error::SearchError;

/// HTTP client for the knowledge-base backend.
///
/// One request per call: no retries, no timeout, no cancellation.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    search_url: Url,
    health_url: Url,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Result<SearchClient, SearchError> {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Useful when the caller wants to share a connection pool.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
    ) -> Result<SearchClient, SearchError> {
        Ok(SearchClient {
            http,
            search_url: endpoint(base_url, SEARCH_PATH)?,
            health_url: endpoint(base_url, HEALTH_PATH)?,
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub async fn search(&self, query: &Query) -> Result<SearchResult, SearchError> {
        let request = SearchRequest {
            query: query.as_str().to_string(),
        };
        tracing::debug!(url = %self.search_url, query = %query, "issuing search request");

        let res = self
            .http
            .post(self.search_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "error sending search request to {}: {:#}",
                    self.search_url,
                    e
                );
                SearchError::from(e)
            })?;

        let body = read_success_body(res).await?;
        let result = serde_json::from_slice::<SearchResult>(&body).map_err(|e| {
            tracing::error!("error decoding search response: {:#}", e);
            SearchError::from(e)
        })?;
        Ok(result)
    }

    /// Asks the backend whether it is up and returns the status it reports.
    pub async fn health(&self) -> Result<String, SearchError> {
        let res = self
            .http
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    "error sending health request to {}: {:#}",
                    self.health_url,
                    e
                );
                SearchError::from(e)
            })?;

        let body = read_success_body(res).await?;
        let health = serde_json::from_slice::<HealthResponse>(&body).map_err(|e| {
            tracing::error!("error decoding health response: {:#}", e);
            SearchError::from(e)
        })?;
        Ok(health.status)
    }
}

impl SearchBackend for SearchClient {
    async fn search(&self, query: &Query) -> Result<SearchResult, SearchError> {
        SearchClient::search(self, query).await
    }
}

async fn read_success_body(res: reqwest::Response) -> Result<Vec<u8>, SearchError> {
    let status = res.status();
    if !status.is_success() {
        tracing::error!("backend answered {} for {}", status, res.url());
        return Err(status_error(status));
    }
    let body = res.bytes().await.map_err(|e| {
        tracing::error!("error reading response body: {:#}", e);
        SearchError::from(e)
    })?;
    Ok(body.to_vec())
}

fn status_error(status: StatusCode) -> SearchError {
    SearchError::Status {
        status: status.as_u16(),
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, SearchError> {
    let base = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{base}{path}")).map_err(|e| SearchError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SearchError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    Ok(url)
}
