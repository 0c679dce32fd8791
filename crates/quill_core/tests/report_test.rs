use quill_core::{
    FailureCause, GenerationReport, Provenance, StageFailure, StageName, StageReport,
};
use std::time::Duration;

fn full_report() -> anyhow::Result<GenerationReport> {
    let mut report = GenerationReport::default();
    report.record(StageReport::ai(
        StageName::Planner,
        Duration::from_millis(120),
        1,
    ))?;
    report.record(StageReport::ai(
        StageName::Writer,
        Duration::from_millis(800),
        2,
    ))?;
    report.record(StageReport::fallback(
        StageName::Editor,
        Duration::from_millis(30),
        2,
        Some(StageFailure::new(FailureCause::Timeout, "no answer in 120s")),
    ))?;
    Ok(report)
}

#[test]
fn report_keeps_pipeline_order() -> anyhow::Result<()> {
    let report = full_report()?;
    let stages: Vec<_> = report.entries().iter().map(|e| *e.stage()).collect();
    assert_eq!(stages, StageName::ORDER.to_vec());
    assert!(report.is_complete());
    Ok(())
}

#[test]
fn report_rejects_out_of_order_entries() {
    let mut report = GenerationReport::default();
    let writer_first = StageReport::ai(StageName::Writer, Duration::ZERO, 1);
    assert!(report.record(writer_first).is_err());
    assert!(report.entries().is_empty());
}

#[test]
fn report_rejects_entries_after_completion() -> anyhow::Result<()> {
    let mut report = full_report()?;
    let extra = StageReport::ai(StageName::Editor, Duration::ZERO, 1);
    assert!(report.record(extra).is_err());
    assert_eq!(report.entries().len(), 3);
    Ok(())
}

#[test]
fn report_summaries() -> anyhow::Result<()> {
    let report = full_report()?;
    assert_eq!(report.ai_stage_count(), 2);
    assert!(!report.is_fully_fallback());
    assert_eq!(report.total_latency(), Duration::from_millis(950));
    assert_eq!(
        report.get(StageName::Editor).and_then(StageReport::cause),
        Some(FailureCause::Timeout)
    );
    assert_eq!(
        *report.get(StageName::Planner).map(|e| e.path()).unwrap(),
        Provenance::Ai
    );
    Ok(())
}

#[test]
fn report_serializes_with_lowercase_tags() -> anyhow::Result<()> {
    let report = full_report()?;
    let json = serde_json::to_value(&report)?;
    let editor = &json["entries"][2];
    assert_eq!(editor["stage"], "editor");
    assert_eq!(editor["path"], "fallback");
    assert_eq!(editor["latency_ms"], 30);
    assert_eq!(editor["error"]["cause"], "timeout");
    assert!(json["entries"][0].get("error").is_none());
    Ok(())
}
