//! Local language model clients for Quill.
//!
//! The pipeline talks to a model only through the [`ModelClient`] trait. A
//! call is a single bounded attempt that always resolves to a [`ModelResult`]:
//! the text, a timeout, or a classified error. Retrying is left to the caller.
//!
//! # Example
//!
//! ```no_run
//! use quill_models::{ModelClient, ModelRequest, ModelResult, OllamaClient};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new("llama3.1")?;
//! let request = ModelRequest::new("Escreva uma frase sobre a chuva.", Duration::from_secs(60))?;
//! match client.call(&request).await {
//!     ModelResult::Success(text) => println!("{text}"),
//!     ModelResult::Timeout => println!("model too slow"),
//!     ModelResult::Error(e) => println!("model failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod metrics;
mod ollama;

pub use client::{ModelClient, ModelRequest, ModelResult, ProbeOutcome};
pub use metrics::LlmMetrics;
pub use ollama::{DEFAULT_OLLAMA_URL, OllamaClient};
