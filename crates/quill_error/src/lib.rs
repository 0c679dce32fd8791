//! Error types for the Quill library.
//!
//! This crate provides the foundation error types used throughout the Quill workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Generation failures inside a pipeline stage (timeouts, unreachable model,
//! unparseable responses) are *not* errors at this level. They are absorbed by
//! the stage and recorded in the generation report. The errors here are the
//! conditions a caller actually has to handle.
//!
//! # Examples
//!
//! ```
//! use quill_error::{BriefError, BriefErrorKind, QuillResult};
//!
//! fn check(text: &str) -> QuillResult<()> {
//!     if text.trim().is_empty() {
//!         Err(BriefError::new(BriefErrorKind::Empty))?
//!     }
//!     Ok(())
//! }
//!
//! assert!(check("").is_err());
//! assert!(check("Uma cena").is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod config;
mod error;
mod http;
mod model;
mod pipeline;
mod project;

pub use brief::{BriefError, BriefErrorKind};
pub use config::ConfigError;
pub use error::{QuillError, QuillErrorKind, QuillResult};
pub use http::HttpError;
pub use model::{ModelError, ModelErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use project::{ProjectError, ProjectErrorKind};
