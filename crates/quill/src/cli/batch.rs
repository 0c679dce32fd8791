//! Batch generation command handler.

use super::commands::BatchArgs;
use super::session;
use futures::future::join_all;
use quill::{QuillConfig, QuillResult, read_briefs, scene_file_stem, write_scene};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, instrument};

/// Generate one scene per brief, at most `max_concurrent_generations` at a time.
#[instrument(skip_all, fields(input = %args.input.display()))]
pub async fn run_batch(config: QuillConfig, args: BatchArgs) -> QuillResult<()> {
    let briefs = read_briefs(&args.input)?;
    let limit = args
        .concurrency
        .unwrap_or_else(|| config.generation().max_concurrent_generations())
        .max(1);
    let session = session::open(config, &args.pipeline)?;
    let semaphore = Arc::new(Semaphore::new(limit));
    let started = chrono::Local::now();

    info!(briefs = briefs.len(), limit, "Starting batch");

    let runs = briefs.iter().enumerate().map(|(index, brief)| {
        let semaphore = Arc::clone(&semaphore);
        let session = &session;
        async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire().await.ok();
            let trace = session
                .orchestrator
                .generate_traced_with_cancel(brief, &session.cancel)
                .await?;
            let stem = scene_file_stem(started, Some(index + 1));
            let written = write_scene(
                session.paths.output_dir(),
                &stem,
                brief,
                &trace,
                &session.options,
            )?;
            QuillResult::Ok((trace.scene().report().ai_stage_count(), written))
        }
    });

    let results = join_all(runs).await;

    let mut failed = 0;
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok((ai_stages, written)) => println!(
                "[{:03}] {} ({ai_stages}/3 etapas com IA)",
                index + 1,
                written.markdown.display()
            ),
            Err(e) => {
                failed += 1;
                error!(brief = index + 1, error = %e, "Scene failed");
                println!("[{:03}] falhou: {e}", index + 1);
            }
        }
    }

    info!(total = briefs.len(), failed, "Batch complete");
    Ok(())
}
