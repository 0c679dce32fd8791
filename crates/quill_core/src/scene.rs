//! Draft and final scene types.

use crate::{GenerationReport, Plan, Provenance};
use serde::{Deserialize, Serialize};

/// Scene prose produced by the Writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Draft {
    /// Scene text
    content: String,
    /// Which path produced the draft
    provenance: Provenance,
}

impl Draft {
    /// Create a draft.
    pub fn new(content: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            content: content.into(),
            provenance,
        }
    }

    /// Content carries text.
    pub fn is_well_formed(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// The edited scene returned to the caller, with its generation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct FinalScene {
    /// Final scene text
    content: String,
    /// Which path produced the final edit
    provenance: Provenance,
    /// Per-stage record of the run
    report: GenerationReport,
}

impl FinalScene {
    /// Create a final scene.
    pub fn new(content: impl Into<String>, provenance: Provenance, report: GenerationReport) -> Self {
        Self {
            content: content.into(),
            provenance,
            report,
        }
    }
}

/// A final scene together with the intermediate plan and draft.
///
/// Used by callers that want to show or save every stage's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerationTrace {
    /// Planner output
    plan: Plan,
    /// Writer output
    draft: Draft,
    /// Editor output and report
    scene: FinalScene,
}

impl GenerationTrace {
    /// Bundle the outputs of a run.
    pub fn new(plan: Plan, draft: Draft, scene: FinalScene) -> Self {
        Self { plan, draft, scene }
    }

    /// Drop the intermediates and keep the scene.
    pub fn into_scene(self) -> FinalScene {
        self.scene
    }
}
