use crate::api::SearchBackend;
use crate::data_models::{Query, SearchResult};
use crate::error::SearchError;

/// The only failure text a user ever sees. The underlying cause goes to the log.
pub const SEARCH_FAILED_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Where the current interaction stands. Exactly one holds at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Loading {
        query: Query,
    },
    Success(SearchResult),
    Failed(String),
}

impl InteractionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, InteractionState::Loading { .. })
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            InteractionState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            InteractionState::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Loading { .. } => "loading",
            InteractionState::Success(_) => "success",
            InteractionState::Failed(_) => "failed",
        }
    }
}

/// Owns the interaction state and routes submissions to a [`SearchBackend`].
///
/// At most one search is in flight: a submission made while loading is
/// refused here, independently of whether the input disabled itself.
#[derive(Debug, Default)]
pub struct Coordinator {
    state: InteractionState,
}

impl Coordinator {
    pub fn new() -> Coordinator {
        Coordinator::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// True while a request is outstanding; drives the input's busy flag.
    pub fn is_busy(&self) -> bool {
        self.state.is_loading()
    }

    /// Moves to Loading, dropping any previous result or error.
    ///
    /// Returns `false` (and changes nothing) when a search is already running.
    pub fn begin(&mut self, query: &Query) -> bool {
        if let InteractionState::Loading { query: running } = &self.state {
            tracing::debug!(running = %running, refused = %query, "search already in flight");
            return false;
        }
        self.transition(InteractionState::Loading {
            query: query.clone(),
        });
        true
    }

    /// Applies the outcome of the search started by [`Coordinator::begin`].
    pub fn finish(&mut self, outcome: Result<SearchResult, SearchError>) {
        if !self.state.is_loading() {
            tracing::warn!(state = self.state.name(), "ignoring search outcome outside of loading");
            return;
        }
        let next = match outcome {
            Ok(result) => InteractionState::Success(result),
            Err(e) => {
                tracing::debug!("search failed: {:#}", e);
                InteractionState::Failed(SEARCH_FAILED_MESSAGE.to_string())
            }
        };
        self.transition(next);
    }

    /// Runs one full search against `backend`: begin, await, finish.
    ///
    /// Returns `false` if the submission was refused because one is running.
    pub async fn submit<B>(&mut self, backend: &B, query: Query) -> bool
    where
        B: SearchBackend,
    {
        if !self.begin(&query) {
            return false;
        }
        let outcome = backend.search(&query).await;
        self.finish(outcome);
        true
    }

    fn transition(&mut self, next: InteractionState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "state transition");
        self.state = next;
    }
}
