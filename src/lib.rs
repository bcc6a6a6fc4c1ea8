pub mod api;
pub mod config;
pub mod coordinator;
pub mod data_models;
pub mod error;
pub mod logging;
pub mod ui;

pub use api::{SearchBackend, SearchClient};
pub use coordinator::{Coordinator, InteractionState, SEARCH_FAILED_MESSAGE};
pub use data_models::{Article, Query, SearchResult};
pub use error::SearchError;
