//! Generation report types.
//!
//! Every stage appends exactly one [`StageReport`] to the run's
//! [`GenerationReport`]. Entries are never edited after they are recorded.

use crate::{Provenance, StageName};
use quill_error::{PipelineError, PipelineErrorKind};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Why a stage took the fallback path.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureCause {
    /// Model did not answer within the bound
    Timeout,
    /// Model server could not be reached
    Unreachable,
    /// Configured model is not installed
    ModelNotFound,
    /// Server reply was not a generation response
    MalformedResponse,
    /// Model text did not match the stage's grammar
    ParseError,
    /// Any other failure
    Unknown,
    /// The fallback itself produced unusable output and was replaced
    FallbackExhausted,
}

/// Terminal failure recorded for a stage that fell back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StageFailure {
    /// Classified cause
    cause: FailureCause,
    /// Human-readable detail from the last attempt
    detail: String,
}

impl StageFailure {
    /// Create a failure record.
    pub fn new(cause: FailureCause, detail: impl Into<String>) -> Self {
        Self {
            cause,
            detail: detail.into(),
        }
    }
}

/// What happened in one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StageReport {
    /// Stage this entry describes
    stage: StageName,
    /// Path that produced the stage output
    path: Provenance,
    /// Wall time spent in the stage
    #[serde(rename = "latency_ms", with = "duration_millis")]
    latency: Duration,
    /// Number of model calls made
    attempts: u32,
    /// Present only when the stage fell back because of a failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<StageFailure>,
}

impl StageReport {
    /// Report for a stage whose model output was used.
    pub fn ai(stage: StageName, latency: Duration, attempts: u32) -> Self {
        Self {
            stage,
            path: Provenance::Ai,
            latency,
            attempts,
            error: None,
        }
    }

    /// Report for a stage that used the fallback.
    ///
    /// `error` is `None` when the model path was skipped on purpose (AI disabled).
    pub fn fallback(
        stage: StageName,
        latency: Duration,
        attempts: u32,
        error: Option<StageFailure>,
    ) -> Self {
        Self {
            stage,
            path: Provenance::Fallback,
            latency,
            attempts,
            error,
        }
    }

    /// Shortcut for the recorded failure cause.
    pub fn cause(&self) -> Option<FailureCause> {
        self.error.as_ref().map(|failure| failure.cause)
    }
}

/// Append-only, ordered record of a pipeline run.
///
/// # Examples
///
/// ```
/// use quill_core::{GenerationReport, StageName, StageReport};
/// use std::time::Duration;
///
/// let mut report = GenerationReport::default();
/// report.record(StageReport::fallback(StageName::Planner, Duration::ZERO, 0, None))?;
/// assert!(report.record(StageReport::ai(StageName::Planner, Duration::ZERO, 1)).is_err());
/// assert_eq!(report.entries().len(), 1);
/// # Ok::<(), quill_error::PipelineError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    entries: Vec<StageReport>,
}

impl GenerationReport {
    /// Append the next stage's entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is not for the next stage in pipeline order.
    pub fn record(&mut self, entry: StageReport) -> Result<(), PipelineError> {
        match StageName::ORDER.get(self.entries.len()) {
            Some(expected) if *expected == entry.stage => {
                self.entries.push(entry);
                Ok(())
            }
            _ => Err(PipelineError::new(PipelineErrorKind::ReportOutOfOrder {
                stage: entry.stage.to_string(),
            })),
        }
    }

    /// Entries in pipeline order.
    pub fn entries(&self) -> &[StageReport] {
        &self.entries
    }

    /// Entry for a stage, if recorded.
    pub fn get(&self, stage: StageName) -> Option<&StageReport> {
        self.entries.iter().find(|entry| entry.stage == stage)
    }

    /// All three stages are recorded.
    pub fn is_complete(&self) -> bool {
        self.entries.len() == StageName::ORDER.len()
    }

    /// Number of stages whose model output was used.
    pub fn ai_stage_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.path == Provenance::Ai)
            .count()
    }

    /// Every recorded stage used the fallback.
    pub fn is_fully_fallback(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.path == Provenance::Fallback)
    }

    /// Sum of stage latencies.
    pub fn total_latency(&self) -> Duration {
        self.entries.iter().map(|entry| entry.latency).sum()
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
