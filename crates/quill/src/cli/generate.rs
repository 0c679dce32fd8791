//! Single scene generation command handler.

use super::commands::GenerateArgs;
use super::session;
use quill::{
    Brief, BriefHints, ProjectError, ProjectErrorKind, QuillConfig, QuillResult, render_report_table,
    scene_file_stem, write_scene,
};
use std::path::Path;
use tracing::instrument;

fn read_brief(args: &GenerateArgs) -> QuillResult<Brief> {
    let text = match (&args.brief, &args.brief_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
            ProjectError::new(ProjectErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?,
        (None, None) => String::new(),
    };

    let mut hints = BriefHints::default();
    if let Some(location) = &args.location {
        hints = hints.with_location(location.clone());
    }
    for name in &args.characters {
        hints = hints.with_character(name.clone());
    }
    if let Some(mood) = &args.mood {
        hints = hints.with_mood(mood.clone());
    }

    Ok(Brief::new(text.trim()).with_hints(hints))
}

/// Generate one scene, print it and save it.
#[instrument(skip_all)]
pub async fn run_generate(config: QuillConfig, args: GenerateArgs) -> QuillResult<()> {
    let brief = read_brief(&args)?;
    let session = session::open(config, &args.pipeline)?;

    let trace = session
        .orchestrator
        .generate_traced_with_cancel(&brief, &session.cancel)
        .await?;

    let (dir, stem) = match &args.output {
        Some(path) => (
            path.parent().unwrap_or(Path::new(".")).to_path_buf(),
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("scene")
                .to_string(),
        ),
        None => (
            session.paths.output_dir().clone(),
            scene_file_stem(chrono::Local::now(), None),
        ),
    };
    let written = write_scene(&dir, &stem, &brief, &trace, &session.options)?;

    println!("{}\n", trace.scene().content());
    println!("{}", render_report_table(trace.scene().report()));
    println!("Cena salva em: {}", written.markdown.display());
    if let Some(report) = written.report {
        println!("Relatório salvo em: {}", report.display());
    }
    Ok(())
}
