//! Mock model client for testing.

use async_trait::async_trait;
use quill_error::{ModelError, ModelErrorKind};
use quill_models::{ModelClient, ModelRequest, ModelResult, ProbeOutcome};
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockBehavior {
    /// Always return success with the given text
    Success(String),
    /// Always time out
    Timeout,
    /// Always return the specified error
    Error(ModelErrorKind),
    /// Return responses in order, repeating the last one when exhausted
    Sequence(Vec<MockResponse>),
}

/// A single mock response.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum MockResponse {
    Success(String),
    Timeout,
    Error(ModelErrorKind),
}

impl MockResponse {
    fn into_result(self) -> ModelResult {
        match self {
            Self::Success(text) => ModelResult::Success(text),
            Self::Timeout => ModelResult::Timeout,
            Self::Error(kind) => ModelResult::Error(ModelError::new(kind)),
        }
    }
}

/// Mock model client that records every prompt it receives.
pub struct MockModelClient {
    behavior: MockBehavior,
    probe: ProbeOutcome,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl MockModelClient {
    /// Create a mock client with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            probe: ProbeOutcome::Ready,
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always succeeds with `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_with_behavior(MockBehavior::Success(text.into()))
    }

    /// Always times out.
    pub fn new_timeout() -> Self {
        Self::new_with_behavior(MockBehavior::Timeout)
    }

    /// Always fails with `kind`.
    pub fn new_error(kind: ModelErrorKind) -> Self {
        Self::new_with_behavior(MockBehavior::Error(kind))
    }

    /// Responses in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Outcome returned by `probe`.
    pub fn with_probe(mut self, probe: ProbeOutcome) -> Self {
        self.probe = probe;
        self
    }

    /// Number of times `call` was invoked.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_response(&self) -> ModelResult {
        let mut count = self.call_count.lock().unwrap();
        let current = *count;
        *count += 1;

        match &self.behavior {
            MockBehavior::Success(text) => ModelResult::Success(text.clone()),
            MockBehavior::Timeout => ModelResult::Timeout,
            MockBehavior::Error(kind) => ModelResult::Error(ModelError::new(kind.clone())),
            MockBehavior::Sequence(responses) => responses
                .get(current)
                .or_else(|| responses.last())
                .cloned()
                .map(MockResponse::into_result)
                .unwrap_or(ModelResult::Timeout),
        }
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn call(&self, request: &ModelRequest) -> ModelResult {
        self.prompts.lock().unwrap().push(request.prompt().clone());
        self.next_response()
    }

    async fn probe(&self) -> ProbeOutcome {
        self.probe.clone()
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
