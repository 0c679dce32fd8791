//! Configuration error types.

/// Invalid or unreadable generation settings.
///
/// Validation failures name the offending setting (for example
/// `stages.writer.temperature`) so the CLI can point at the right key.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Dotted setting path, when the error concerns a single key
    pub setting: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Error not tied to one setting, such as a layer that failed to load.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            setting: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for a setting whose value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_error::ConfigError;
    ///
    /// let err = ConfigError::invalid_setting("retry.max_attempts", "must be in 1..=5, got 9");
    /// assert_eq!(err.setting.as_deref(), Some("retry.max_attempts"));
    /// assert_eq!(err.message, "retry.max_attempts must be in 1..=5, got 9");
    /// ```
    #[track_caller]
    pub fn invalid_setting(setting: impl Into<String>, reason: impl AsRef<str>) -> Self {
        let location = std::panic::Location::caller();
        let setting = setting.into();
        Self {
            message: format!("{} {}", setting, reason.as_ref()),
            setting: Some(setting),
            line: location.line(),
            file: location.file(),
        }
    }
}
