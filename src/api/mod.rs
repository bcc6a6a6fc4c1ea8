use std::future::Future;

use crate::data_models::{Query, SearchResult};
use crate::error::SearchError;

pub mod client;
pub mod models;

pub use client::SearchClient;

/// Path of the search endpoint, appended to the configured base address.
pub const SEARCH_PATH: &str = "/api/search-query";
pub const HEALTH_PATH: &str = "/api/health";

/// Anything that can answer a query. The UI only talks to this, so it can
/// be driven without a network in tests.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        query: &Query,
    ) -> impl Future<Output = Result<SearchResult, SearchError>> + Send;
}
