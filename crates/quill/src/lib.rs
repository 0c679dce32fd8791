//! Quill - hybrid scene generation for Portuguese fiction
//!
//! Quill turns a short scene brief into finished prose through three
//! stages (Planner, Writer, Editor). Each stage asks a local Ollama model
//! first and falls back to deterministic rule-based writing on any failure,
//! so a valid brief always yields a scene together with a report of which
//! path produced each stage.
//!
//! # Quick Start
//!
//! ```no_run
//! use quill::{Brief, OllamaClient, PipelineOrchestrator, QuillConfig, load_project_context};
//! use std::sync::Arc;
//!
//! # async fn example() -> quill::QuillResult<()> {
//! let config = QuillConfig::load(None)?;
//! let client = Arc::new(OllamaClient::from_config(config.generation().provider())?);
//! let context = load_project_context(config.paths().data_dir())?;
//!
//! let orchestrator = PipelineOrchestrator::builder(client, config.generation().clone())
//!     .context(context)
//!     .build();
//! let scene = orchestrator
//!     .generate(&Brief::new("Um encontro tenso no MASP, noite chuvosa"))
//!     .await?;
//! println!("{}", scene.content());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - `quill_error` - Error types
//! - `quill_core` - Briefs, plans, drafts, reports and configuration
//! - `quill_models` - `ModelClient` trait and the Ollama client
//! - `quill_narrative` - Stages, fallback generator and orchestrator
//!
//! This crate re-exports all of them and adds configuration loading,
//! project data loading and output writing.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod output;
mod project;

pub use config::{PathSettings, QuillConfig};
pub use output::{
    OutputOptions, WrittenScene, render_markdown, render_report_table, scene_file_stem,
    write_scene,
};
pub use project::{load_project_context, read_briefs};

pub use quill_core::*;
pub use quill_error::*;
pub use quill_models::*;
pub use quill_narrative::*;
