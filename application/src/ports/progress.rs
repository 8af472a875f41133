//! Progress notification port
//!
//! Defines the interface for reporting progress during a search.

/// Callback for progress updates during a search
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain log lines, etc.)
pub trait SearchProgressNotifier: Send + Sync {
    /// Called before the provider is contacted
    fn on_search_start(&self, query: &str);

    /// Called when results were parsed successfully
    fn on_search_complete(&self, total_results: usize);

    /// Called when the search failed for any reason
    fn on_search_failed(&self, error: &str);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl SearchProgressNotifier for NoProgress {
    fn on_search_start(&self, _query: &str) {}
    fn on_search_complete(&self, _total_results: usize) {}
    fn on_search_failed(&self, _error: &str) {}
}
