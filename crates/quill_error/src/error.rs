//! Top-level error wrapper types.

use crate::{BriefError, ConfigError, HttpError, ModelError, PipelineError, ProjectError};

/// Every error a Quill operation can return.
///
/// # Examples
///
/// ```
/// use quill_error::{QuillError, ConfigError};
///
/// let err: QuillError = ConfigError::new("missing model").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum QuillErrorKind {
    /// Invalid brief input
    #[from(BriefError)]
    Brief(BriefError),
    /// Pipeline run stopped
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Model endpoint error (diagnostics only; stages absorb these)
    #[from(ModelError)]
    Model(ModelError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// HTTP client error
    #[from(HttpError)]
    Http(HttpError),
    /// Project data or output file error
    #[from(ProjectError)]
    Project(ProjectError),
}

/// Quill error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Quill Error: {}", _0)]
pub struct QuillError(Box<QuillErrorKind>);

impl QuillError {
    /// Create a new error from a kind.
    pub fn new(kind: QuillErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QuillErrorKind {
        &self.0
    }

    /// Whether this error is a brief validation failure.
    pub fn is_invalid_brief(&self) -> bool {
        matches!(self.kind(), QuillErrorKind::Brief(_))
    }
}

impl<T> From<T> for QuillError
where
    T: Into<QuillErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Quill operations.
pub type QuillResult<T> = std::result::Result<T, QuillError>;
