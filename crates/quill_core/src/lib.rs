//! Core data types for the Quill scene generation pipeline.
//!
//! This crate provides the values that flow between the pipeline stages:
//! the caller's [`Brief`], the Planner's [`Plan`], the Writer's [`Draft`],
//! the Editor's [`FinalScene`], and the [`GenerationReport`] that records
//! which path each stage took. It also holds the immutable
//! [`GenerationConfig`] and the optional [`ProjectContext`] that get threaded
//! through a run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod config;
mod context;
mod plan;
mod report;
mod scene;
mod stage;

pub use brief::{Brief, BriefHints, MAX_BRIEF_CHARS};
pub use config::{
    GenerationConfig, GenerationConfigBuilder, MAX_TIMEOUT_SECONDS, ProviderConfig, RetrySettings,
    StageSettings, StageTuning,
};
pub use context::ProjectContext;
pub use plan::{Beat, Plan};
pub use report::{FailureCause, GenerationReport, StageFailure, StageReport};
pub use scene::{Draft, FinalScene, GenerationTrace};
pub use stage::{Provenance, StageName};
