//! Project context appended to prompts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Style guide and canon documents for a writing project.
///
/// The pipeline treats every document as opaque text and appends it verbatim
/// under a labelled heading. Canon documents are keyed by name and rendered in
/// name order so prompts are stable across runs.
///
/// # Examples
///
/// ```
/// use quill_core::ProjectContext;
///
/// let context = ProjectContext::default()
///     .with_style_guide("Frases curtas.")
///     .with_canon("personagens", "Ivana: arquivista.");
/// let rendered = context.render();
/// assert!(rendered.starts_with("GUIA DE ESTILO:\nFrases curtas."));
/// assert!(rendered.contains("PERSONAGENS:\nIvana: arquivista."));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    style_guide: Option<String>,
    canon: BTreeMap<String, String>,
}

impl ProjectContext {
    /// Set the style guide text.
    pub fn with_style_guide(mut self, text: impl Into<String>) -> Self {
        self.style_guide = Some(text.into());
        self
    }

    /// Add a canon document.
    pub fn with_canon(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.canon.insert(name.into(), text.into());
        self
    }

    /// Style guide text, if any.
    pub fn style_guide(&self) -> Option<&str> {
        self.style_guide.as_deref()
    }

    /// Canon documents by name.
    pub fn canon(&self) -> &BTreeMap<String, String> {
        &self.canon
    }

    /// No document carries text.
    pub fn is_empty(&self) -> bool {
        self.style_guide
            .as_deref()
            .is_none_or(|text| text.trim().is_empty())
            && self.canon.values().all(|text| text.trim().is_empty())
    }

    /// Labelled sections joined by blank lines; empty documents are skipped.
    pub fn render(&self) -> String {
        let style = self
            .style_guide
            .iter()
            .filter(|text| !text.trim().is_empty())
            .map(|text| format!("GUIA DE ESTILO:\n{}", text.trim()));
        let canon = self
            .canon
            .iter()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(name, text)| format!("{}:\n{}", name.to_uppercase(), text.trim()));
        style.chain(canon).collect::<Vec<_>>().join("\n\n")
    }
}
