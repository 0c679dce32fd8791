//! HTTP error types.

/// The HTTP client for a model server could not be set up.
///
/// Failed requests to the model endpoint are reported through
/// [`ModelError`](crate::ModelError) instead.
///
/// # Examples
///
/// ```
/// use quill_error::HttpError;
///
/// let err = HttpError::new("http://localhost:11434", "TLS backend unavailable");
/// assert!(err.to_string().contains("localhost:11434"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} (server {}) at line {} in {}", message, base_url, line, file)]
pub struct HttpError {
    /// The underlying error message
    pub message: String,
    /// Server the client was meant for
    pub base_url: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// Record a client setup failure for `base_url`.
    #[track_caller]
    pub fn new(base_url: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            base_url: base_url.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
