//! Brief validation errors.

/// Reasons a brief is rejected before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BriefErrorKind {
    /// Brief text is empty or whitespace only
    #[display("Brief text is empty")]
    Empty,
    /// Brief text exceeds the accepted length
    #[display("Brief is {} characters long, maximum is {}", length, max)]
    TooLong {
        /// Length of the submitted brief in characters
        length: usize,
        /// Maximum accepted length
        max: usize,
    },
}

/// Invalid brief error with location tracking.
///
/// # Examples
///
/// ```
/// use quill_error::{BriefError, BriefErrorKind};
///
/// let err = BriefError::new(BriefErrorKind::Empty);
/// assert!(format!("{}", err).contains("empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Brief Error: {} at line {} in {}", kind, line, file)]
pub struct BriefError {
    /// The specific validation failure
    pub kind: BriefErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl BriefError {
    /// Create a new BriefError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BriefErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
