//! Project data and output file errors.

/// Specific error conditions for project file operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProjectErrorKind {
    /// Failed to read a style guide, canon, or brief file
    #[display("Failed to read {}: {}", path, message)]
    Read {
        /// Path that could not be read
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Failed to write a generated scene or report
    #[display("Failed to write {}: {}", path, message)]
    Write {
        /// Path that could not be written
        path: String,
        /// Underlying I/O message
        message: String,
    },
    /// Failed to serialize a report
    #[display("Serialization error: {}", _0)]
    Serialization(String),
}

/// Project error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Project Error: {} at line {} in {}", kind, line, file)]
pub struct ProjectError {
    /// The specific error condition
    pub kind: ProjectErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProjectError {
    /// Create a new ProjectError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProjectErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
