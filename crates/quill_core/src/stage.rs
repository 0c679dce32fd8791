//! Stage identity and provenance tags.

use serde::{Deserialize, Serialize};

/// The three pipeline roles, in execution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageName {
    /// Turns the brief into beats
    Planner,
    /// Turns the plan into scene prose
    Writer,
    /// Polishes the draft into the final scene
    Editor,
}

impl StageName {
    /// Pipeline order.
    pub const ORDER: [StageName; 3] = [StageName::Planner, StageName::Writer, StageName::Editor];
}

/// Which path produced a stage's output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provenance {
    /// Generated by the language model
    Ai,
    /// Generated by the rule-based fallback
    Fallback,
}
