//! Shared setup for commands that run the pipeline.

use super::commands::PipelineArgs;
use quill::{
    GenerationConfig, OllamaClient, OutputOptions, PathSettings, PipelineOrchestrator,
    QuillConfig, QuillResult, load_project_context,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Everything a command needs to generate and save scenes.
pub struct Session {
    pub orchestrator: PipelineOrchestrator,
    pub paths: PathSettings,
    pub options: OutputOptions,
    pub cancel: Arc<AtomicBool>,
}

/// Apply command-line overrides on top of loaded configuration.
pub fn apply_overrides(config: QuillConfig, args: &PipelineArgs) -> QuillResult<QuillConfig> {
    let mut generation: GenerationConfig = config.generation().clone();
    if args.no_ai {
        generation = generation.with_ai_enabled(false);
    }
    if let Some(model) = &args.model {
        generation = generation.with_model(model.clone());
    }
    if let Some(timeout) = args.timeout {
        generation = generation.with_timeout_seconds(timeout);
    }
    generation.validate()?;

    let mut paths = config.paths().clone();
    if let Some(dir) = &args.data_dir {
        paths = paths.with_data_dir(dir.clone());
    }
    if let Some(dir) = &args.output_dir {
        paths = paths.with_output_dir(dir.clone());
    }

    Ok(config.with_generation(generation).with_paths(paths))
}

/// Build the orchestrator and install a Ctrl-C handler that cancels between stages.
pub fn open(config: QuillConfig, args: &PipelineArgs) -> QuillResult<Session> {
    let config = apply_overrides(config, args)?;
    let generation = config.generation().clone();

    let client = Arc::new(OllamaClient::from_config(generation.provider())?);
    let context = load_project_context(config.paths().data_dir())?;
    if context.is_empty() {
        debug!("No style guide or canon found");
    }

    info!(
        model = %generation.provider().model(),
        ai_enabled = generation.ai_enabled(),
        "Pipeline ready"
    );

    let orchestrator = PipelineOrchestrator::builder(client, generation)
        .context(context)
        .build();

    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after the current stage");
            flag.store(true, Ordering::SeqCst);
        }
    });

    let options = OutputOptions::default()
        .with_plan(!args.no_plan)
        .with_draft(!args.no_draft)
        .with_report(args.report);

    Ok(Session {
        orchestrator,
        paths: config.paths().clone(),
        options,
        cancel,
    })
}
