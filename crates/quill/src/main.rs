//! Quill CLI binary.
//!
//! - Generate one scene from a brief
//! - Generate many scenes from a file of briefs
//! - Diagnose the local Ollama installation

use clap::Parser;
use quill::QuillConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_batch, run_diagnose, run_generate};

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = QuillConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate(args) => {
            run_generate(config, args).await?;
        }
        Commands::Batch(args) => {
            run_batch(config, args).await?;
        }
        Commands::Diagnose { skip_generation } => {
            if !run_diagnose(&config, skip_generation).await? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
