//! Model endpoint errors.

/// Classified failure of a single model call.
///
/// Timeouts are not represented here: an elapsed bound is an expected outcome
/// and has its own variant on the model result type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelErrorKind {
    /// Model server could not be reached
    #[display("Model server unreachable: {}", _0)]
    Unreachable(String),

    /// Server answered with something that is not a generation response
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),

    /// Requested model is not installed on the server
    #[display("Model not found: {}", _0)]
    ModelNotFound(String),

    /// Any other failure, including unexpected HTTP status codes
    #[display("Unknown model error: {}", _0)]
    Unknown(String),
}

/// Model error with location tracking.
///
/// # Examples
///
/// ```
/// use quill_error::{ModelError, ModelErrorKind};
///
/// let err = ModelError::new(ModelErrorKind::ModelNotFound("llama3.1".into()));
/// assert!(!err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at {}:{}", kind, file, line)]
pub struct ModelError {
    /// The specific error kind
    pub kind: ModelErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelError {
    /// Create a new model error.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether repeating the same request could succeed.
    ///
    /// A missing model stays missing; everything else may be transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(self.kind, ModelErrorKind::ModelNotFound(_))
    }
}
