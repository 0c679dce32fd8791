//! Brief input type.

use quill_error::{BriefError, BriefErrorKind};
use serde::{Deserialize, Serialize};

/// Longest brief accepted by the pipeline, in characters.
pub const MAX_BRIEF_CHARS: usize = 4000;

/// Optional structured hints that accompany a brief.
///
/// Hints take precedence over anything the fallback generator detects in the
/// brief text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct BriefHints {
    /// Where the scene takes place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    /// Named characters present in the scene
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    characters: Vec<String>,
    /// Emotional register of the scene
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mood: Option<String>,
}

impl BriefHints {
    /// Set the location hint.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a character hint.
    pub fn with_character(mut self, name: impl Into<String>) -> Self {
        self.characters.push(name.into());
        self
    }

    /// Set the mood hint.
    pub fn with_mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = Some(mood.into());
        self
    }

    /// Whether no hint is set.
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.characters.is_empty() && self.mood.is_none()
    }
}

/// A free-text scene request.
///
/// Construction never fails; [`Brief::validate`] is called by the
/// orchestrator before any stage runs.
///
/// # Examples
///
/// ```
/// use quill_core::{Brief, BriefHints};
///
/// let brief = Brief::new("Um encontro tenso no MASP")
///     .with_hints(BriefHints::default().with_mood("tenso"));
/// assert!(brief.validate().is_ok());
/// assert!(Brief::new("   ").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Brief {
    /// Natural-language scene request
    text: String,
    /// Structured hints
    #[serde(default)]
    hints: BriefHints,
}

impl Brief {
    /// Create a brief with no hints.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hints: BriefHints::default(),
        }
    }

    /// Attach structured hints.
    pub fn with_hints(mut self, hints: BriefHints) -> Self {
        self.hints = hints;
        self
    }

    /// Check that the brief can be processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank or longer than [`MAX_BRIEF_CHARS`].
    pub fn validate(&self) -> Result<(), BriefError> {
        if self.text.trim().is_empty() {
            return Err(BriefError::new(BriefErrorKind::Empty));
        }
        let length = self.text.chars().count();
        if length > MAX_BRIEF_CHARS {
            return Err(BriefError::new(BriefErrorKind::TooLong {
                length,
                max: MAX_BRIEF_CHARS,
            }));
        }
        Ok(())
    }
}
