//! Ollama HTTP client.

use super::dto::{GenerateBody, GenerateOptions, GenerateReply, TagsReply};
use crate::{LlmMetrics, ModelClient, ModelRequest, ModelResult, ProbeOutcome};
use quill_core::ProviderConfig;
use quill_error::{HttpError, ModelError, ModelErrorKind, QuillResult};
use reqwest::StatusCode;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Where `ollama serve` listens by default.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama client for local model execution.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// HTTP client instance
    client: reqwest::Client,

    /// Model tag (e.g., "llama3.1", "mistral")
    model_name: String,

    /// Ollama server URL without trailing slash
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the default localhost server.
    #[instrument(name = "ollama_client_new", skip_all)]
    pub fn new(model_name: impl Into<String>) -> QuillResult<Self> {
        Self::new_with_url(model_name, DEFAULT_OLLAMA_URL)
    }

    /// Create a client for a custom server URL.
    #[instrument(name = "ollama_client_new_with_url", skip_all)]
    pub fn new_with_url(
        model_name: impl Into<String>,
        base_url: impl Into<String>,
    ) -> QuillResult<Self> {
        let model_name = model_name.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        info!(
            model = %model_name,
            url = %base_url,
            "Creating Ollama client"
        );

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| {
                HttpError::new(&base_url, format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            model_name,
            base_url,
        })
    }

    /// Create a client from provider settings.
    pub fn from_config(provider: &ProviderConfig) -> QuillResult<Self> {
        Self::new_with_url(provider.model().as_str(), provider.base_url().as_str())
    }

    /// Server base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Names of the models installed on the server.
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> Result<Vec<String>, ModelError> {
        let url = format!("{}/api/tags", self.base_url);
        debug!(%url, "Listing local models");

        let response = self
            .client
            .get(&url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ModelError::new(ModelErrorKind::Unreachable(e.to_string())))?;

        if !response.status().is_success() {
            return Err(ModelError::new(ModelErrorKind::Unknown(format!(
                "Server returned {} for {}",
                response.status(),
                url
            ))));
        }

        let tags: TagsReply = response
            .json()
            .await
            .map_err(|e| ModelError::new(ModelErrorKind::MalformedResponse(e.to_string())))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Whether an installed model name refers to the configured model.
    ///
    /// `llama3.1` matches `llama3.1` and any tag of it such as `llama3.1:8b`.
    pub fn matches_model(&self, installed: &str) -> bool {
        installed == self.model_name
            || installed
                .strip_prefix(self.model_name.as_str())
                .is_some_and(|rest| rest.starts_with(':'))
    }

    async fn send_generate(&self, request: &ModelRequest) -> ModelResult {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateBody {
            model: &self.model_name,
            prompt: request.prompt(),
            stream: false,
            options: GenerateOptions {
                num_predict: *request.max_tokens(),
                temperature: *request.temperature(),
                top_p: 0.9,
                top_k: 40,
            },
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(response) => response,
            Err(e) => return classify_transport(e),
        };

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return ModelResult::Error(classify_status(status, &text, &self.model_name));
        }

        match response.json::<GenerateReply>().await {
            Ok(GenerateReply {
                response: Some(text),
                ..
            }) => ModelResult::Success(text),
            Ok(GenerateReply {
                error: Some(message),
                ..
            }) => ModelResult::Error(ModelError::new(ModelErrorKind::Unknown(message))),
            Ok(_) => ModelResult::Error(ModelError::new(ModelErrorKind::MalformedResponse(
                "Reply has no response field".to_string(),
            ))),
            Err(e) if e.is_timeout() => ModelResult::Timeout,
            Err(e) => ModelResult::Error(ModelError::new(ModelErrorKind::MalformedResponse(
                e.to_string(),
            ))),
        }
    }
}

fn classify_transport(error: reqwest::Error) -> ModelResult {
    if error.is_timeout() {
        ModelResult::Timeout
    } else if error.is_connect() {
        ModelResult::Error(ModelError::new(ModelErrorKind::Unreachable(
            error.to_string(),
        )))
    } else if error.is_decode() {
        ModelResult::Error(ModelError::new(ModelErrorKind::MalformedResponse(
            error.to_string(),
        )))
    } else {
        ModelResult::Error(ModelError::new(ModelErrorKind::Unknown(error.to_string())))
    }
}

fn classify_status(status: StatusCode, body: &str, model: &str) -> ModelError {
    let lowered = body.to_lowercase();
    let missing_model = lowered.contains("model") && lowered.contains("not found");
    if status == StatusCode::NOT_FOUND || missing_model {
        ModelError::new(ModelErrorKind::ModelNotFound(model.to_string()))
    } else {
        ModelError::new(ModelErrorKind::Unknown(format!(
            "Server returned {}: {}",
            status,
            body.trim()
        )))
    }
}

#[async_trait::async_trait]
impl ModelClient for OllamaClient {
    #[instrument(skip(self, request), fields(model = %self.model_name, prompt_length = request.prompt().len()))]
    async fn call(&self, request: &ModelRequest) -> ModelResult {
        let started = Instant::now();
        debug!(timeout_secs = request.timeout().as_secs_f64(), "Generating with Ollama");

        let result = tokio::time::timeout(request.timeout(), self.send_generate(request))
            .await
            .unwrap_or(ModelResult::Timeout);

        let metrics = LlmMetrics::get();
        metrics.record_request(
            self.provider_name(),
            &self.model_name,
            started.elapsed().as_secs_f64(),
        );
        match &result {
            ModelResult::Success(text) => {
                debug!(response_length = text.len(), "Received response from Ollama");
            }
            ModelResult::Timeout => {
                warn!(elapsed_ms = started.elapsed().as_millis() as u64, "Ollama call timed out");
                metrics.record_timeout(self.provider_name(), &self.model_name);
            }
            ModelResult::Error(e) => {
                warn!(error = %e.kind, "Ollama call failed");
                metrics.record_error(self.provider_name(), &self.model_name, &e.kind);
            }
        }
        result
    }

    #[instrument(skip(self), fields(model = %self.model_name))]
    async fn probe(&self) -> ProbeOutcome {
        match self.list_models().await {
            Ok(models) => {
                if models.iter().any(|name| self.matches_model(name)) {
                    debug!("Ollama server and model available");
                    ProbeOutcome::Ready
                } else {
                    warn!(available = ?models, "Model not found locally");
                    ProbeOutcome::ModelMissing { available: models }
                }
            }
            Err(e) => {
                warn!(error = %e.kind, "Failed to reach Ollama server");
                ProbeOutcome::Unreachable(e.kind.to_string())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
