//! Wire types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options understood by Ollama.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub top_p: f32,
    pub top_k: u32,
}

/// Non-streaming reply of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GenerateReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TagsReply {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TagEntry {
    pub name: String,
}
