//! Tests for the Ollama client against a mock HTTP server.

use quill_error::ModelErrorKind;
use quill_models::{ModelClient, ModelRequest, ModelResult, OllamaClient, ProbeOutcome};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(timeout: Duration) -> ModelRequest {
    ModelRequest::new("Escreva uma frase simples sobre o tempo.", timeout)
        .expect("valid request")
        .with_max_tokens(50)
        .with_temperature(0.7)
}

#[tokio::test]
async fn success_returns_response_text() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3.1",
            "stream": false,
            "options": { "num_predict": 50 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "response": "A chuva não parou a noite inteira.",
            "done": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaClient::new_with_url("llama3.1", server.uri())?;
    match client.call(&request(Duration::from_secs(5))).await {
        ModelResult::Success(text) => assert_eq!(text, "A chuva não parou a noite inteira."),
        other => panic!("expected success, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn slow_server_is_a_timeout() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "tarde demais" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = OllamaClient::new_with_url("llama3.1", server.uri())?;
    let result = client.call(&request(Duration::from_millis(200))).await;
    assert!(matches!(result, ModelResult::Timeout), "got {:?}", result);
    Ok(())
}

#[tokio::test]
async fn missing_model_is_classified() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "model \"llama3.1\" not found, try pulling it first"
        })))
        .mount(&server)
        .await;

    let client = OllamaClient::new_with_url("llama3.1", server.uri())?;
    match client.call(&request(Duration::from_secs(5))).await {
        ModelResult::Error(e) => {
            assert!(matches!(e.kind, ModelErrorKind::ModelNotFound(_)));
            assert!(!e.is_retryable());
        }
        other => panic!("expected error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn server_error_is_unknown() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
        .mount(&server)
        .await;

    let client = OllamaClient::new_with_url("llama3.1", server.uri())?;
    match client.call(&request(Duration::from_secs(5))).await {
        ModelResult::Error(e) => assert!(matches!(e.kind, ModelErrorKind::Unknown(_))),
        other => panic!("expected error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn unrelated_not_found_stays_retryable() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("blob file not found"))
        .mount(&server)
        .await;

    let client = OllamaClient::new_with_url("llama3.1", server.uri())?;
    match client.call(&request(Duration::from_secs(5))).await {
        ModelResult::Error(e) => {
            assert!(matches!(e.kind, ModelErrorKind::Unknown(_)));
            assert!(e.is_retryable());
        }
        other => panic!("expected error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn garbage_body_is_malformed()-> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let client = OllamaClient::new_with_url("llama3.1", server.uri())?;
    match client.call(&request(Duration::from_secs(5))).await {
        ModelResult::Error(e) => {
            assert!(matches!(e.kind, ModelErrorKind::MalformedResponse(_)))
        }
        other => panic!("expected error, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn closed_port_is_unreachable() -> anyhow::Result<()> {
    let client = OllamaClient::new_with_url("llama3.1", "http://127.0.0.1:1")?;
    match client.call(&request(Duration::from_secs(5))).await {
        ModelResult::Error(e) => assert!(matches!(e.kind, ModelErrorKind::Unreachable(_))),
        other => panic!("expected error, got {:?}", other),
    }
    assert!(matches!(client.probe().await, ProbeOutcome::Unreachable(_)));
    Ok(())
}

#[tokio::test]
async fn probe_checks_installed_models() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "llama3.1:latest", "size": 4_661_224_676u64 },
                { "name": "mistral:7b", "size": 4_113_301_824u64 }
            ]
        })))
        .mount(&server)
        .await;

    let ready = OllamaClient::new_with_url("llama3.1", server.uri())?;
    assert_eq!(ready.probe().await, ProbeOutcome::Ready);

    let missing = OllamaClient::new_with_url("qwen2", server.uri())?;
    match missing.probe().await {
        ProbeOutcome::ModelMissing { available } => {
            assert_eq!(available, vec!["llama3.1:latest", "mistral:7b"]);
        }
        other => panic!("expected missing model, got {:?}", other),
    }
    Ok(())
}

#[test]
fn model_name_matching_respects_tags() -> anyhow::Result<()> {
    let client = OllamaClient::new("llama3.1")?;
    assert!(client.matches_model("llama3.1"));
    assert!(client.matches_model("llama3.1:8b"));
    assert!(!client.matches_model("llama3.10"));
    assert!(!client.matches_model("llama3"));
    Ok(())
}

#[tokio::test]
#[ignore] // Requires Ollama running locally with llama3.1 pulled
async fn live_ollama_generation() -> anyhow::Result<()> {
    let client = OllamaClient::new("llama3.1")?;
    assert_eq!(client.probe().await, ProbeOutcome::Ready);
    let result = client.call(&request(Duration::from_secs(120))).await;
    assert!(result.is_success(), "got {:?}", result);
    Ok(())
}
