//! Generation configuration.
//!
//! A [`GenerationConfig`] is built once (usually by the `quill` crate's
//! loader) and then shared read-only by every stage of every run.

use crate::StageName;
use quill_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hard ceiling for any model call, in seconds.
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Model provider connection settings.
///
/// ```toml
/// [provider]
/// name = "ollama"
/// model = "llama3.1"
/// base_url = "http://localhost:11434"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ProviderConfig {
    /// Provider identifier
    #[serde(default = "default_provider_name")]
    name: String,
    /// Model tag to request
    #[serde(default = "default_model")]
    model: String,
    /// Server base URL
    #[serde(default = "default_base_url")]
    base_url: String,
}

fn default_provider_name() -> String {
    "ollama".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl ProviderConfig {
    /// Create provider settings.
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }
}

/// Retry settings for model calls within a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetrySettings {
    /// Total attempts per stage, first call included
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
    /// Pause between attempts in milliseconds
    #[serde(default = "default_backoff_ms")]
    backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    2
}

fn default_backoff_ms() -> u64 {
    250
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl RetrySettings {
    /// Create retry settings.
    pub fn new(max_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            max_attempts,
            backoff_ms,
        }
    }
}

/// Sampling parameters for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StageTuning {
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
}

impl StageTuning {
    /// Create stage tuning.
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

/// Sampling parameters for all stages.
///
/// ```toml
/// [stages.writer]
/// max_tokens = 800
/// temperature = 0.8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StageSettings {
    /// Planner sampling
    #[serde(default = "default_planner_tuning")]
    planner: StageTuning,
    /// Writer sampling
    #[serde(default = "default_writer_tuning")]
    writer: StageTuning,
    /// Editor sampling
    #[serde(default = "default_editor_tuning")]
    editor: StageTuning,
}

fn default_planner_tuning() -> StageTuning {
    StageTuning::new(400, 0.7)
}

fn default_writer_tuning() -> StageTuning {
    StageTuning::new(800, 0.8)
}

fn default_editor_tuning() -> StageTuning {
    StageTuning::new(900, 0.4)
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            planner: default_planner_tuning(),
            writer: default_writer_tuning(),
            editor: default_editor_tuning(),
        }
    }
}

impl StageSettings {
    /// Tuning for a stage.
    pub fn for_stage(&self, stage: StageName) -> &StageTuning {
        match stage {
            StageName::Planner => &self.planner,
            StageName::Writer => &self.writer,
            StageName::Editor => &self.editor,
        }
    }
}

/// Immutable settings for generation runs.
///
/// # Examples
///
/// ```
/// use quill_core::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .ai_enabled(false)
///     .timeout_seconds(30u64)
///     .build()
///     .unwrap();
/// assert!(!config.ai_enabled());
/// assert_eq!(config.timeout().as_secs(), 30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(default, setter(into))]
pub struct GenerationConfig {
    /// Model provider settings
    #[serde(default)]
    provider: ProviderConfig,
    /// Bound for a single model call in seconds
    #[serde(default = "default_timeout_seconds")]
    #[getter(skip)]
    timeout_seconds: u64,
    /// Whether stages may call the model at all
    #[serde(default = "default_true")]
    #[getter(skip)]
    ai_enabled: bool,
    /// Check server reachability before a run and skip the model if it is down
    #[serde(default = "default_true")]
    #[getter(skip)]
    probe_before_run: bool,
    /// Shortest model answer accepted for prose stages
    #[serde(default = "default_min_response_chars")]
    #[getter(skip)]
    min_response_chars: usize,
    /// Retry behaviour within a stage
    #[serde(default)]
    retry: RetrySettings,
    /// Admission limit for concurrent runs started by one caller
    #[serde(default = "default_max_concurrent")]
    #[getter(skip)]
    max_concurrent_generations: usize,
    /// Per-stage sampling parameters
    #[serde(default)]
    stages: StageSettings,
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_min_response_chars() -> usize {
    50
}

fn default_max_concurrent() -> usize {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            timeout_seconds: default_timeout_seconds(),
            ai_enabled: true,
            probe_before_run: true,
            min_response_chars: default_min_response_chars(),
            retry: RetrySettings::default(),
            max_concurrent_generations: default_max_concurrent(),
            stages: StageSettings::default(),
        }
    }
}

impl GenerationConfig {
    /// Creates a new config builder.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Whether stages may call the model.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// Whether to probe the server before a run.
    pub fn probe_before_run(&self) -> bool {
        self.probe_before_run
    }

    /// Shortest accepted prose answer, in characters.
    pub fn min_response_chars(&self) -> usize {
        self.min_response_chars
    }

    /// Admission limit for concurrent runs, never below one.
    pub fn max_concurrent_generations(&self) -> usize {
        self.max_concurrent_generations.max(1)
    }

    /// Per-call bound, clamped to [`MAX_TIMEOUT_SECONDS`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.clamp(1, MAX_TIMEOUT_SECONDS))
    }

    /// Copy with AI switched on or off.
    pub fn with_ai_enabled(mut self, enabled: bool) -> Self {
        self.ai_enabled = enabled;
        self
    }

    /// Copy with a different model tag.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.provider.model = model.into();
        self
    }

    /// Copy with a different per-call bound.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::invalid_setting("provider.model", "must not be empty"));
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_setting("provider.base_url", "must not be empty"));
        }
        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::invalid_setting(
                "timeout_seconds",
                format!("must be in 1..={}, got {}", MAX_TIMEOUT_SECONDS, self.timeout_seconds),
            ));
        }
        if !(1..=5).contains(&self.retry.max_attempts) {
            return Err(ConfigError::invalid_setting(
                "retry.max_attempts",
                format!("must be in 1..=5, got {}", self.retry.max_attempts),
            ));
        }
        for stage in StageName::ORDER {
            let tuning = self.stages.for_stage(stage);
            if tuning.max_tokens == 0 {
                return Err(ConfigError::invalid_setting(
                    format!("stages.{}.max_tokens", stage),
                    "must be positive",
                ));
            }
            if !(0.0..=2.0).contains(&tuning.temperature) {
                return Err(ConfigError::invalid_setting(
                    format!("stages.{}.temperature", stage),
                    format!("must be in 0.0..=2.0, got {}", tuning.temperature),
                ));
            }
        }
        Ok(())
    }
}
