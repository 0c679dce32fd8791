//! Ollama diagnostic command handler.

use quill::{ModelClient, ModelRequest, ModelResult, OllamaClient, QuillConfig, QuillResult};
use std::time::Instant;
use tracing::instrument;

const TEST_PROMPT: &str = "Escreva uma frase curta sobre a chuva em São Paulo.";

fn print_recommendations(model: &str) {
    println!("\nComo resolver:");
    println!("  1. Inicie o servidor: ollama serve");
    println!("  2. Instale o modelo: ollama pull {model}");
    println!("  3. Confira os modelos instalados: ollama list");
    println!("  4. Teste o modelo direto: ollama run {model}");
    println!("  5. Se a geração for lenta, use um modelo menor ou aumente timeout_seconds");
    println!("  6. Logs do Ollama ficam em ~/.ollama/logs");
}

/// Run every check and print the results. Returns whether all checks passed.
#[instrument(skip_all)]
pub async fn run_diagnose(config: &QuillConfig, skip_generation: bool) -> QuillResult<bool> {
    let provider = config.generation().provider();
    let client = OllamaClient::from_config(provider)?;
    let model = provider.model();

    println!("Diagnóstico do Ollama");
    println!("Servidor: {}", client.base_url());
    println!("Modelo configurado: {model}\n");

    let installed = match client.list_models().await {
        Ok(installed) => {
            println!("[ok] Servidor respondendo");
            installed
        }
        Err(e) => {
            println!("[falha] Servidor inacessível: {}", e.kind);
            print_recommendations(model);
            return Ok(false);
        }
    };

    if installed.is_empty() {
        println!("[aviso] Nenhum modelo instalado");
    } else {
        println!("[ok] {} modelo(s) instalado(s):", installed.len());
        for name in &installed {
            println!("       - {name}");
        }
    }

    if installed.iter().any(|name| client.matches_model(name)) {
        println!("[ok] Modelo {model} disponível");
    } else {
        println!("[falha] Modelo {model} não encontrado");
        print_recommendations(model);
        return Ok(false);
    }

    if skip_generation {
        return Ok(true);
    }

    let request = ModelRequest::new(TEST_PROMPT, config.generation().timeout())?
        .with_max_tokens(50)
        .with_temperature(0.7);
    let started = Instant::now();
    let healthy = match client.call(&request).await {
        ModelResult::Success(text) => {
            let preview: String = text.trim().chars().take(100).collect();
            println!(
                "[ok] Geração de teste em {:.1}s: {preview}",
                started.elapsed().as_secs_f64()
            );
            true
        }
        ModelResult::Timeout => {
            println!(
                "[falha] Sem resposta em {}s; o modelo pode estar sobrecarregado",
                request.timeout().as_secs()
            );
            false
        }
        ModelResult::Error(e) => {
            println!("[falha] Erro na geração de teste: {}", e.kind);
            false
        }
    };

    if !healthy {
        print_recommendations(model);
    }
    Ok(healthy)
}
