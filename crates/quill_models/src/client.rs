//! Model client contract.

use async_trait::async_trait;
use quill_core::MAX_TIMEOUT_SECONDS;
use quill_error::{ConfigError, ModelError};
use std::time::Duration;

/// One prompt with its bound.
///
/// # Examples
///
/// ```
/// use quill_models::ModelRequest;
/// use std::time::Duration;
///
/// let request = ModelRequest::new("Olá", Duration::from_secs(3600))?;
/// assert_eq!(request.timeout(), Duration::from_secs(600));
/// assert!(ModelRequest::new("  ", Duration::from_secs(5)).is_err());
/// # Ok::<(), quill_error::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct ModelRequest {
    /// Prompt text
    prompt: String,
    /// Bound for the whole call
    #[getter(skip)]
    timeout: Duration,
    /// Maximum tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
}

impl ModelRequest {
    /// Create a request.
    ///
    /// The timeout is clamped to the hard ceiling of
    /// [`MAX_TIMEOUT_SECONDS`](quill_core::MAX_TIMEOUT_SECONDS).
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt is blank or the timeout is zero.
    pub fn new(prompt: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(ConfigError::new("Model prompt must not be empty"));
        }
        if timeout.is_zero() {
            return Err(ConfigError::new("Model timeout must be positive"));
        }
        Ok(Self {
            prompt,
            timeout: timeout.min(Duration::from_secs(MAX_TIMEOUT_SECONDS)),
            max_tokens: None,
            temperature: None,
        })
    }

    /// Set the token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Bound for the whole call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Outcome of a single model call.
#[derive(Debug, Clone)]
pub enum ModelResult {
    /// Raw generated text
    Success(String),
    /// The bound elapsed before an answer arrived
    Timeout,
    /// The call failed for a classified reason
    Error(ModelError),
}

impl ModelResult {
    /// Whether the call produced text.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Result of a reachability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Server is up and the configured model is installed
    Ready,
    /// Server is up but the configured model is missing
    ModelMissing {
        /// Models the server does have
        available: Vec<String>,
    },
    /// Server could not be reached
    Unreachable(String),
}

/// Core trait that all model backends implement.
///
/// Implementations make exactly one attempt per [`call`](ModelClient::call)
/// and hold no state between calls.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Submit a prompt and wait at most the request's timeout.
    async fn call(&self, request: &ModelRequest) -> ModelResult;

    /// Check that the server is up and the model is installed.
    async fn probe(&self) -> ProbeOutcome {
        ProbeOutcome::Ready
    }

    /// Provider name (e.g., "ollama").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "llama3.1").
    fn model_name(&self) -> &str;
}
