//! Tests for project data and brief file loading.

use quill::{load_project_context, read_briefs};
use std::fs;

#[test]
fn loads_style_guide_and_sorted_canon() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("style_guide.md"), "Frases curtas.")?;
    fs::create_dir(dir.path().join("canon"))?;
    fs::write(dir.path().join("canon/personagens.md"), "Ivana, restauradora.")?;
    fs::write(dir.path().join("canon/mundo.md"), "São Paulo, 2031.")?;
    fs::write(dir.path().join("canon/notas.txt"), "ignorado")?;

    let context = load_project_context(dir.path())?;

    assert_eq!(context.style_guide(), Some("Frases curtas."));
    let names: Vec<&String> = context.canon().keys().collect();
    assert_eq!(names, ["mundo", "personagens"]);
    let rendered = context.render();
    assert!(rendered.contains("Frases curtas."));
    assert!(rendered.contains("São Paulo, 2031."));
    assert!(!rendered.contains("ignorado"));
    Ok(())
}

#[test]
fn missing_data_dir_gives_empty_context() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let context = load_project_context(&dir.path().join("nada"))?;
    assert!(context.is_empty());
    Ok(())
}

#[test]
fn briefs_skip_blank_lines_and_comments() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("briefs.txt");
    fs::write(
        &path,
        "# cenas do capítulo 3\nUm encontro tenso no MASP\n\n  Um diálogo na biblioteca  \n",
    )?;

    let briefs = read_briefs(&path)?;

    assert_eq!(briefs.len(), 2);
    assert_eq!(briefs[1].text(), "Um diálogo na biblioteca");
    Ok(())
}

#[test]
fn unreadable_brief_file_is_an_error() {
    assert!(read_briefs(std::path::Path::new("/definitely/not/here.txt")).is_err());
}
