//! Three-stage scene generation for Quill.
//!
//! A [`PipelineOrchestrator`] runs a Planner, a Writer and an Editor in
//! order. Each stage asks the model first and falls back to the
//! deterministic [`FallbackGenerator`] on any failure, recording what
//! happened in the scene's [`GenerationReport`](quill_core::GenerationReport).
//!
//! # Example
//!
//! ```no_run
//! use quill_core::{Brief, GenerationConfig};
//! use quill_models::OllamaClient;
//! use quill_narrative::PipelineOrchestrator;
//! use std::sync::Arc;
//!
//! # async fn example() -> quill_error::QuillResult<()> {
//! let config = GenerationConfig::default().with_ai_enabled(false);
//! let client = Arc::new(OllamaClient::from_config(config.provider())?);
//! let scene = PipelineOrchestrator::new(client, config)
//!     .generate(&Brief::new("Um diálogo emotivo na biblioteca"))
//!     .await?;
//! assert!(scene.report().is_fully_fallback());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fallback;
mod orchestrator;
mod parse;
mod prompts;
mod retry;
mod stage;

pub use fallback::{
    FallbackGenerator, Interaction, Mood, SceneElements, SceneFallback, Setting, TimeOfDay,
    Weather, placeholder_plan, placeholder_prose,
};
pub use orchestrator::{PipelineBuilder, PipelineOrchestrator};
pub use parse::{MAX_BEATS, parse_beats, parse_prose};
pub use prompts::{editor_prompt, planner_prompt, writer_prompt};
pub use retry::RetryPolicy;
pub use stage::{
    AgentStage, Availability, EditorInput, EditorRole, PlannerRole, StageOutcome, StageRole,
    WriterInput, WriterRole, failure_from_model_error,
};
