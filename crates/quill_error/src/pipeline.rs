//! Pipeline run errors.

/// Conditions that stop a generation run without producing a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Caller cancelled the run between stages
    #[display("Generation cancelled after the {} stage", after)]
    Cancelled {
        /// Name of the last stage that completed
        after: String,
    },
    /// A stage report was recorded twice or out of pipeline order
    #[display("Stage report for {} recorded out of order", stage)]
    ReportOutOfOrder {
        /// Name of the offending stage
        stage: String,
    },
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
