//! Writing generated scenes to disk.

use chrono::{DateTime, Local};
use quill_core::{Brief, GenerationReport, GenerationTrace};
use quill_error::{ProjectError, ProjectErrorKind, QuillResult};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Which optional sections go into the scene file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    include_plan: bool,
    include_draft: bool,
    write_report: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            include_plan: true,
            include_draft: true,
            write_report: false,
        }
    }
}

impl OutputOptions {
    /// Include the plan section.
    pub fn with_plan(mut self, include: bool) -> Self {
        self.include_plan = include;
        self
    }

    /// Include the first draft section.
    pub fn with_draft(mut self, include: bool) -> Self {
        self.include_draft = include;
        self
    }

    /// Also write the report as JSON next to the scene.
    pub fn with_report(mut self, write: bool) -> Self {
        self.write_report = write;
        self
    }

    /// Whether the plan section is written.
    pub fn include_plan(&self) -> bool {
        self.include_plan
    }

    /// Whether the draft section is written.
    pub fn include_draft(&self) -> bool {
        self.include_draft
    }

    /// Whether a JSON report file is written.
    pub fn write_report(&self) -> bool {
        self.write_report
    }
}

/// Paths of the files written for one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenScene {
    /// Markdown scene file
    pub markdown: PathBuf,
    /// JSON report, when requested
    pub report: Option<PathBuf>,
}

/// File stem for a scene written at `at`; `index` disambiguates batch runs.
pub fn scene_file_stem(at: DateTime<Local>, index: Option<usize>) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    match index {
        Some(index) => format!("scene_{stamp}_{index:03}"),
        None => format!("scene_{stamp}"),
    }
}

/// Markdown document for a generated scene.
pub fn render_markdown(brief: &Brief, trace: &GenerationTrace, options: &OutputOptions) -> String {
    let mut doc = format!("# Cena Gerada\n\n**Brief:** {}\n\n", brief.text().trim());

    if options.include_plan {
        let _ = write!(
            doc,
            "## Plano da Cena\n\n*Origem: {}*\n\n{}\n\n",
            trace.plan().provenance(),
            trace.plan().render()
        );
    }
    if options.include_draft {
        let _ = write!(
            doc,
            "## Primeira Versão\n\n*Origem: {}*\n\n{}\n\n",
            trace.draft().provenance(),
            trace.draft().content().trim()
        );
    }

    let scene = trace.scene();
    let _ = write!(doc, "## Versão Final\n\n{}\n\n", scene.content().trim());
    doc.push_str(&render_report_table(scene.report()));
    doc
}

/// Markdown table summarising each stage.
pub fn render_report_table(report: &GenerationReport) -> String {
    let mut table = String::from(
        "## Relatório\n\n| Etapa | Caminho | Tentativas | Latência (ms) | Causa |\n|---|---|---|---|---|\n",
    );
    for entry in report.entries() {
        let cause = entry
            .error()
            .as_ref()
            .map(|failure| format!("{}: {}", failure.cause(), failure.detail()))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            table,
            "| {} | {} | {} | {} | {} |",
            entry.stage(),
            entry.path(),
            entry.attempts(),
            entry.latency().as_millis(),
            cause.replace('|', "/")
        );
    }
    table
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> ProjectError {
    ProjectError::new(ProjectErrorKind::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write `<stem>.md` (and `<stem>_report.json` when requested) into `output_dir`.
#[instrument(skip(brief, trace, options), fields(output_dir = %output_dir.display()))]
pub fn write_scene(
    output_dir: &Path,
    stem: &str,
    brief: &Brief,
    trace: &GenerationTrace,
    options: &OutputOptions,
) -> QuillResult<WrittenScene> {
    fs::create_dir_all(output_dir).map_err(|e| write_error(output_dir, e))?;

    let markdown = output_dir.join(format!("{stem}.md"));
    fs::write(&markdown, render_markdown(brief, trace, options))
        .map_err(|e| write_error(&markdown, e))?;

    let report = if options.write_report {
        let path = output_dir.join(format!("{stem}_report.json"));
        let json = serde_json::to_string_pretty(trace.scene().report()).map_err(|e| {
            ProjectError::new(ProjectErrorKind::Serialization(e.to_string()))
        })?;
        fs::write(&path, json).map_err(|e| write_error(&path, e))?;
        Some(path)
    } else {
        None
    };

    info!(path = %markdown.display(), "Scene written");
    Ok(WrittenScene { markdown, report })
}
