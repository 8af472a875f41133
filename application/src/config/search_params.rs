//! Search parameters: use case execution control.
//!
//! [`SearchParams`] groups the static parameters that control one run of
//! [`RunSearchUseCase`](crate::use_cases::run_search::RunSearchUseCase).
//! These are application-layer concerns, not part of the search request.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upper bound for one search, including process startup.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Execution control for a single search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Overall timeout for the gateway call. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_SEARCH_TIMEOUT),
        }
    }
}

impl SearchParams {
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Some(Duration::from_secs(secs)))
    }
}
