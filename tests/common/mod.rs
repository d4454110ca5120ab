//! Shared test helpers and mock provider.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use loanline::error::LoanlineError;
use loanline::provider::CompletionProvider;
use loanline::types::{GenerationSettings, Turn};

/// What the mock should do for one call.
pub enum MockOutcome {
    /// Reply with this text.
    Text(String),
    /// Fail with this HTTP status.
    Status(u16),
    /// Never resolve (exercises the gateway deadline).
    Hang,
}

/// A mock provider that returns queued outcomes in FIFO order and records
/// the prompt sequences it was called with.
pub struct MockProvider {
    outcomes: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<Vec<Turn>>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a text reply.
    pub fn queue_response(&self, text: &str) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Text(text.to_string()));
    }

    /// Queue a failure with an HTTP status.
    pub fn queue_status(&self, status: u16) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Status(status));
    }

    /// Queue a call that never completes.
    pub fn queue_hang(&self) {
        self.outcomes.lock().unwrap().push_back(MockOutcome::Hang);
    }

    /// Number of completed calls.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The prompt sequence of the most recent call.
    pub fn last_request(&self) -> Option<Vec<Turn>> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle that lets a test keep inspecting a mock after the gateway has
/// taken ownership of it.
pub struct SharedMock(pub std::sync::Arc<MockProvider>);

#[async_trait]
impl CompletionProvider for SharedMock {
    fn name(&self) -> &str {
        self.0.name()
    }

    async fn complete(
        &self,
        messages: &[Turn],
        settings: &GenerationSettings,
    ) -> Result<String, LoanlineError> {
        self.0.complete(messages, settings).await
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[Turn],
        _settings: &GenerationSettings,
    ) -> Result<String, LoanlineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(messages.to_vec());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Text(text)) => Ok(text),
            Some(MockOutcome::Status(status)) => {
                Err(LoanlineError::api(status, "mock provider failure"))
            }
            Some(MockOutcome::Hang) => {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
                Err(LoanlineError::Timeout(3_600_000))
            }
            None => Ok("mock default reply".to_string()),
        }
    }
}
