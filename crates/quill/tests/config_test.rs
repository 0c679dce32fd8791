//! Tests for layered configuration loading.

use quill::QuillConfig;
use std::fs;
use std::path::PathBuf;

#[test]
fn bundled_matches_built_in_defaults() -> anyhow::Result<()> {
    let bundled = QuillConfig::bundled()?;
    assert_eq!(bundled, QuillConfig::default());
    assert_eq!(bundled.generation().provider().model(), "llama3.1");
    assert_eq!(bundled.paths().output_dir(), &PathBuf::from("output"));
    Ok(())
}

#[test]
fn file_overrides_merge_over_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quill.toml");
    fs::write(
        &path,
        "[generation]\nai_enabled = false\ntimeout_seconds = 30\n\n\
         [generation.provider]\nmodel = \"mistral\"\n\n\
         [generation.stages.writer]\ntemperature = 1.1\n\n\
         [paths]\noutput_dir = \"cenas\"\n",
    )?;

    let config = QuillConfig::from_file(&path)?;
    let generation = config.generation();

    assert!(!generation.ai_enabled());
    assert_eq!(generation.timeout().as_secs(), 30);
    assert_eq!(generation.provider().model(), "mistral");
    assert_eq!(generation.provider().base_url(), "http://localhost:11434");
    assert!((generation.stages().writer().temperature() - 1.1).abs() < 1e-6);
    assert_eq!(*generation.stages().writer().max_tokens(), 800);
    assert_eq!(config.paths().output_dir(), &PathBuf::from("cenas"));
    assert_eq!(config.paths().data_dir(), &PathBuf::from("data"));
    Ok(())
}

#[test]
fn invalid_values_are_rejected() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quill.toml");
    fs::write(&path, "[generation]\ntimeout_seconds = 0\n")?;

    assert!(QuillConfig::from_file(&path).is_err());
    Ok(())
}

#[test]
fn missing_explicit_file_is_an_error() {
    assert!(QuillConfig::from_file("/definitely/not/here/quill.toml").is_err());
}
