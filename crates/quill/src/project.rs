//! Reading project data and brief files from disk.

use quill_core::{Brief, ProjectContext};
use quill_error::{ProjectError, ProjectErrorKind, QuillResult};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

fn read_error(path: &Path, e: std::io::Error) -> ProjectError {
    ProjectError::new(ProjectErrorKind::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load `style_guide.md` and every `canon/*.md` under `data_dir`.
///
/// Missing files and directories are skipped; canon entries are keyed by
/// file stem and therefore sorted.
#[instrument(skip(data_dir), fields(data_dir = %data_dir.display()))]
pub fn load_project_context(data_dir: &Path) -> QuillResult<ProjectContext> {
    let mut context = ProjectContext::default();

    let style_guide = data_dir.join("style_guide.md");
    if style_guide.is_file() {
        let text = fs::read_to_string(&style_guide).map_err(|e| read_error(&style_guide, e))?;
        context = context.with_style_guide(text);
    }

    let canon_dir = data_dir.join("canon");
    if canon_dir.is_dir() {
        let entries = fs::read_dir(&canon_dir).map_err(|e| read_error(&canon_dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| read_error(&canon_dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let text = fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
            context = context.with_canon(stem, text);
        }
    }

    debug!(
        has_style_guide = context.style_guide().is_some(),
        canon_entries = context.canon().len(),
        "Project context loaded"
    );
    Ok(context)
}

/// Read one brief per non-empty line; lines starting with `#` are comments.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn read_briefs(path: &Path) -> QuillResult<Vec<Brief>> {
    let text = fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let briefs: Vec<Brief> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(Brief::new)
        .collect();
    debug!(count = briefs.len(), "Briefs read");
    Ok(briefs)
}
