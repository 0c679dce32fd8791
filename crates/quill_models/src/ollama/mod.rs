//! Ollama client implementation.

mod client;
mod dto;

pub use client::{DEFAULT_OLLAMA_URL, OllamaClient};
