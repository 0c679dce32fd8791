//! Test utilities for pipeline tests.

pub mod mock_model;

#[allow(unused_imports)]
pub use mock_model::{MockBehavior, MockModelClient, MockResponse};

use quill_core::{GenerationConfig, RetrySettings};

/// Planner answer with four well-formed beats.
#[allow(dead_code)]
pub const BEATS_RESPONSE: &str = "BEAT: Ivana espera sob o vão do MASP | tenso\n\
BEAT: Dr. Manoel chega encharcado | frio\n\
BEAT: Os dois discutem o quadro desaparecido | crescente\n\
BEAT: Ivana vai embora sem olhar para trás | suspenso";

/// Prose long enough to pass the minimum length check.
#[allow(dead_code)]
pub const PROSE_RESPONSE: &str = "A chuva batia no concreto do MASP quando Ivana viu Dr. Manoel \
atravessar a avenida. Ele não pediu desculpas pelo atraso, e ela não perguntou.";

/// Config with AI on, no probe, and no backoff between attempts.
#[allow(dead_code)]
pub fn fast_config() -> GenerationConfig {
    GenerationConfig::builder()
        .probe_before_run(false)
        .retry(RetrySettings::new(2, 0))
        .build()
        .expect("valid test config")
}
