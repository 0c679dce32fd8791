//! Tests for scene file writing, driven by a fallback-only pipeline.

use quill::{
    Brief, GenerationConfig, OllamaClient, OutputOptions, PipelineOrchestrator, render_markdown,
    scene_file_stem, write_scene,
};
use chrono::TimeZone;
use std::fs;
use std::sync::Arc;

async fn fallback_trace(brief: &Brief) -> anyhow::Result<quill::GenerationTrace> {
    let config = GenerationConfig::default().with_ai_enabled(false);
    let client = Arc::new(OllamaClient::new_with_url("llama3.1", "http://127.0.0.1:1")?);
    Ok(PipelineOrchestrator::new(client, config)
        .generate_traced(brief)
        .await?)
}

#[tokio::test]
async fn markdown_has_every_section() -> anyhow::Result<()> {
    let brief = Brief::new("Um encontro tenso no MASP entre Ivana e Dr. Manoel, noite chuvosa.");
    let trace = fallback_trace(&brief).await?;

    let doc = render_markdown(&brief, &trace, &OutputOptions::default());

    assert!(doc.starts_with("# Cena Gerada"));
    assert!(doc.contains("**Brief:** Um encontro tenso no MASP"));
    assert!(doc.contains("## Plano da Cena"));
    assert!(doc.contains("BEAT: "));
    assert!(doc.contains("## Primeira Versão"));
    assert!(doc.contains("## Versão Final"));
    assert!(doc.contains("## Relatório"));
    assert!(doc.contains("| planner | fallback | 0 |"));
    Ok(())
}

#[tokio::test]
async fn optional_sections_can_be_left_out() -> anyhow::Result<()> {
    let brief = Brief::new("Uma conversa no café");
    let trace = fallback_trace(&brief).await?;
    let options = OutputOptions::default().with_plan(false).with_draft(false);

    let doc = render_markdown(&brief, &trace, &options);

    assert!(!doc.contains("## Plano da Cena"));
    assert!(!doc.contains("## Primeira Versão"));
    assert!(doc.contains("## Versão Final"));
    Ok(())
}

#[tokio::test]
async fn writes_scene_and_report_files() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("output");
    let brief = Brief::new("Uma perseguição no metrô");
    let trace = fallback_trace(&brief).await?;
    let options = OutputOptions::default().with_report(true);

    let written = write_scene(&out, "scene_test", &brief, &trace, &options)?;

    assert_eq!(written.markdown, out.join("scene_test.md"));
    let markdown = fs::read_to_string(&written.markdown)?;
    assert!(markdown.contains(trace.scene().content().trim()));

    let report_path = written.report.expect("report requested");
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report_path)?)?;
    let entries = json["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["stage"], "planner");
    assert_eq!(entries[0]["path"], "fallback");
    Ok(())
}

#[test]
fn file_stems_are_timestamped() {
    let at = chrono::Local
        .with_ymd_and_hms(2024, 5, 17, 21, 3, 9)
        .single()
        .expect("unambiguous time");
    assert_eq!(scene_file_stem(at, None), "scene_20240517_210309");
    assert_eq!(scene_file_stem(at, Some(7)), "scene_20240517_210309_007");
}
