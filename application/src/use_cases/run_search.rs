//! Run Search use case
//!
//! Validates a request, sends it through the [`SearchGateway`] under a
//! timeout, and parses whatever the provider returned into a
//! [`SearchOutput`].

use crate::config::SearchParams;
use crate::ports::progress::{NoProgress, SearchProgressNotifier};
use crate::ports::search_gateway::{GatewayError, SearchGateway};
use std::sync::Arc;
use std::time::Instant;
use tavily_domain::{DomainError, ProviderPayload, SearchOutput, SearchRequest, parse_provider_payload};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a search
#[derive(Error, Debug)]
pub enum RunSearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Search timed out")]
    Timeout,

    #[error("Operation cancelled")]
    Cancelled,
}

impl RunSearchError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunSearchError::Cancelled)
    }

    /// Check if this error is a timeout, at either the use case or the gateway
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            RunSearchError::Timeout | RunSearchError::Gateway(GatewayError::Timeout)
        )
    }
}

impl From<DomainError> for RunSearchError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Provider(message) => RunSearchError::Provider(message),
            DomainError::Cancelled => RunSearchError::Cancelled,
            other => RunSearchError::InvalidInput(other),
        }
    }
}

/// Input for the RunSearch use case
#[derive(Debug, Clone)]
pub struct RunSearchInput {
    /// The request forwarded to the provider
    pub request: SearchRequest,
    /// Execution control
    pub params: SearchParams,
}

impl RunSearchInput {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            request,
            params: SearchParams::default(),
        }
    }

    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }
}

impl From<SearchRequest> for RunSearchInput {
    fn from(request: SearchRequest) -> Self {
        Self::new(request)
    }
}

/// Use case for running a single web search
pub struct RunSearchUseCase<G: SearchGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: SearchGateway + 'static> Clone for RunSearchUseCase<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: SearchGateway + 'static> RunSearchUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunSearchInput) -> Result<SearchOutput, RunSearchError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunSearchInput,
        progress: &dyn SearchProgressNotifier,
    ) -> Result<SearchOutput, RunSearchError> {
        self.run(input, progress, None).await
    }

    /// Execute the use case, aborting as soon as `token` is cancelled
    pub async fn execute_with_cancellation(
        &self,
        input: RunSearchInput,
        progress: &dyn SearchProgressNotifier,
        token: CancellationToken,
    ) -> Result<SearchOutput, RunSearchError> {
        self.run(input, progress, Some(token)).await
    }

    async fn run(
        &self,
        input: RunSearchInput,
        progress: &dyn SearchProgressNotifier,
        token: Option<CancellationToken>,
    ) -> Result<SearchOutput, RunSearchError> {
        input.request.validate().map_err(RunSearchError::InvalidInput)?;
        if let Some(token) = &token
            && token.is_cancelled()
        {
            return Err(RunSearchError::Cancelled);
        }

        info!(
            "Searching: {:?} (max_results={}, depth={})",
            input.request.query,
            input.request.max_results,
            input.request.search_depth.as_str()
        );
        progress.on_search_start(&input.request.query);
        let started = Instant::now();

        let result = match self.fetch(&input, token.as_ref()).await {
            Ok(payload) => {
                debug!(
                    "Provider answered with {} text block(s), structured={}",
                    payload.text_blocks.len(),
                    payload.structured.is_some()
                );
                parse_provider_payload(&input.request.query, &payload).map_err(RunSearchError::from)
            }
            Err(e) => Err(e),
        };

        match &result {
            Ok(output) => {
                info!(
                    "Search returned {} result(s) in {} ms",
                    output.total_results,
                    started.elapsed().as_millis()
                );
                progress.on_search_complete(output.total_results);
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                progress.on_search_failed(&e.to_string());
            }
        }

        result
    }

    async fn fetch(
        &self,
        input: &RunSearchInput,
        token: Option<&CancellationToken>,
    ) -> Result<ProviderPayload, RunSearchError> {
        let call = async {
            let search = self.gateway.search(&input.request);
            match input.params.timeout {
                Some(limit) => match tokio::time::timeout(limit, search).await {
                    Ok(result) => result.map_err(RunSearchError::from),
                    Err(_) => Err(RunSearchError::Timeout),
                },
                None => search.await.map_err(RunSearchError::from),
            }
        };

        match token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(RunSearchError::Cancelled),
                    result = call => result,
                }
            }
            None => call.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock gateway that returns a scripted answer after an optional delay
    struct MockGateway {
        answer: Mutex<Option<Result<ProviderPayload, GatewayError>>>,
        delay: Option<Duration>,
        requests: Mutex<Vec<SearchRequest>>,
    }

    impl MockGateway {
        fn answering(answer: Result<ProviderPayload, GatewayError>) -> Self {
            Self {
                answer: Mutex::new(Some(answer)),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SearchGateway for MockGateway {
        async fn search(&self, request: &SearchRequest) -> Result<ProviderPayload, GatewayError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.answer
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(GatewayError::TransportClosed))
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    /// Records progress callbacks in order
    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl SearchProgressNotifier for RecordingProgress {
        fn on_search_start(&self, query: &str) {
            self.events.lock().unwrap().push(format!("start:{}", query));
        }

        fn on_search_complete(&self, total_results: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("complete:{}", total_results));
        }

        fn on_search_failed(&self, _error: &str) {
            self.events.lock().unwrap().push("failed".to_string());
        }
    }

    fn two_results() -> ProviderPayload {
        ProviderPayload::from_structured(json!({
            "results": [
                {"title": "Tokio", "url": "https://tokio.rs", "content": "runtime"},
                {"title": "async-std", "url": "https://async.rs", "content": "runtime"}
            ]
        }))
    }

    fn request(query: &str) -> RunSearchInput {
        RunSearchInput::new(SearchRequest::new(query).unwrap())
    }

    #[tokio::test]
    async fn test_execute_success() {
        let gateway = Arc::new(MockGateway::answering(Ok(two_results())));
        let use_case = RunSearchUseCase::new(Arc::clone(&gateway));
        let progress = RecordingProgress::default();

        let output = use_case
            .execute_with_progress(request("rust async runtime"), &progress)
            .await
            .unwrap();

        assert_eq!(output.query, "rust async runtime");
        assert_eq!(output.total_results, 2);
        assert_eq!(gateway.calls(), 1);
        assert_eq!(
            *progress.events.lock().unwrap(),
            vec!["start:rust async runtime", "complete:2"]
        );
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_gateway() {
        let gateway = Arc::new(MockGateway::answering(Ok(two_results())));
        let use_case = RunSearchUseCase::new(Arc::clone(&gateway));

        let mut input = request("q");
        input.request.query = "  ".to_string();
        let err = use_case.execute(input).await.unwrap_err();

        assert!(matches!(
            err,
            RunSearchError::InvalidInput(DomainError::InvalidArgument { ref field, .. }) if field == "query"
        ));
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_payload() {
        let gateway = Arc::new(MockGateway::answering(Ok(ProviderPayload::error(
            "Invalid API key",
        ))));
        let use_case = RunSearchUseCase::new(gateway);
        let progress = RecordingProgress::default();

        let err = use_case
            .execute_with_progress(request("q"), &progress)
            .await
            .unwrap_err();

        assert!(matches!(err, RunSearchError::Provider(ref m) if m == "Invalid API key"));
        assert_eq!(progress.events.lock().unwrap().last().unwrap(), "failed");
    }

    #[tokio::test]
    async fn test_gateway_error_is_wrapped() {
        let gateway = Arc::new(MockGateway::answering(Err(GatewayError::ToolNotFound(
            "tavily-search".to_string(),
        ))));
        let use_case = RunSearchUseCase::new(gateway);

        let err = use_case.execute(request("q")).await.unwrap_err();
        assert!(matches!(err, RunSearchError::Gateway(GatewayError::ToolNotFound(_))));
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_timeout() {
        let gateway = Arc::new(
            MockGateway::answering(Ok(two_results())).with_delay(Duration::from_secs(5)),
        );
        let use_case = RunSearchUseCase::new(gateway);
        let input = request("q").with_params(
            SearchParams::default().with_timeout(Some(Duration::from_millis(20))),
        );

        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(err, RunSearchError::Timeout));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_gateway_timeout_counts_as_timeout() {
        let err = RunSearchError::from(GatewayError::Timeout);
        assert!(err.is_timeout());
        assert!(!err.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let gateway = Arc::new(MockGateway::answering(Ok(two_results())));
        let use_case = RunSearchUseCase::new(Arc::clone(&gateway));
        let token = CancellationToken::new();
        token.cancel();

        let err = use_case
            .execute_with_cancellation(request("q"), &NoProgress, token)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_while_waiting() {
        let gateway = Arc::new(
            MockGateway::answering(Ok(two_results())).with_delay(Duration::from_secs(5)),
        );
        let use_case = RunSearchUseCase::new(Arc::clone(&gateway));
        let token = CancellationToken::new();

        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = use_case
            .execute_with_cancellation(request("q"), &NoProgress, token)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_payload_is_not_an_error() {
        let gateway = Arc::new(MockGateway::answering(Ok(ProviderPayload::from_text(
            "No results found.",
        ))));
        let use_case = RunSearchUseCase::new(gateway);

        let output = use_case.execute(request("obscure")).await.unwrap();
        assert_eq!(output.total_results, 0);
    }
}
