//! Scene plan produced by the Planner.

use crate::Provenance;
use serde::{Deserialize, Serialize};

/// A single narrative beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Beat {
    /// What happens in this beat
    description: String,
    /// Target tone for the beat
    tone: String,
}

impl Beat {
    /// Create a beat.
    pub fn new(description: impl Into<String>, tone: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tone: tone.into(),
        }
    }

    /// Both fields carry text.
    pub fn is_well_formed(&self) -> bool {
        !self.description.trim().is_empty() && !self.tone.trim().is_empty()
    }
}

/// Ordered beats plus provenance.
///
/// A well-formed plan has at least one well-formed beat.
///
/// # Examples
///
/// ```
/// use quill_core::{Beat, Plan, Provenance};
///
/// let plan = Plan::new(vec![Beat::new("Ivana chega ao museu", "tenso")], Provenance::Ai);
/// assert!(plan.is_well_formed());
/// assert_eq!(plan.render(), "BEAT: Ivana chega ao museu | tenso");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Plan {
    /// Beats in narrative order
    beats: Vec<Beat>,
    /// Which path produced the plan
    provenance: Provenance,
}

impl Plan {
    /// Create a plan.
    pub fn new(beats: Vec<Beat>, provenance: Provenance) -> Self {
        Self { beats, provenance }
    }

    /// Non-empty and every beat carries text.
    pub fn is_well_formed(&self) -> bool {
        !self.beats.is_empty() && self.beats.iter().all(Beat::is_well_formed)
    }

    /// Line-prefixed text form, one `BEAT: description | tone` per line.
    ///
    /// This is the same grammar the Planner asks the model to answer in.
    pub fn render(&self) -> String {
        self.beats
            .iter()
            .map(|beat| format!("BEAT: {} | {}", beat.description, beat.tone))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
