//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Quill - hybrid AI and rule-based scene generation
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Generate fiction scenes with a local LLM and a rule-based fallback", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Extra configuration file, applied over the user files
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one scene from a brief
    Generate(GenerateArgs),

    /// Generate one scene per line of a brief file
    Batch(BatchArgs),

    /// Check the Ollama server, installed models and a test generation
    Diagnose {
        /// Skip the test generation
        #[arg(long)]
        skip_generation: bool,
    },
}

/// Settings shared by `generate` and `batch`.
#[derive(Args, Debug, Clone, Default)]
pub struct PipelineArgs {
    /// Use only the rule-based fallback
    #[arg(long)]
    pub no_ai: bool,

    /// Model name, overriding configuration
    #[arg(long)]
    pub model: Option<String>,

    /// Per-call timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory holding style_guide.md and canon/
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory for generated scenes
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Leave the plan out of the scene file
    #[arg(long)]
    pub no_plan: bool,

    /// Leave the first draft out of the scene file
    #[arg(long)]
    pub no_draft: bool,

    /// Also write the generation report as JSON
    #[arg(long)]
    pub report: bool,
}

/// Arguments for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Scene brief
    #[arg(short, long, conflicts_with = "brief_file", required_unless_present = "brief_file")]
    pub brief: Option<String>,

    /// Read the brief from a file
    #[arg(long)]
    pub brief_file: Option<PathBuf>,

    /// Where the scene happens
    #[arg(long)]
    pub location: Option<String>,

    /// Character name (repeatable)
    #[arg(long = "character")]
    pub characters: Vec<String>,

    /// Emotional register
    #[arg(long)]
    pub mood: Option<String>,

    /// Output file, instead of a timestamped file in the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Shared pipeline settings
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}

/// Arguments for `batch`.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File with one brief per line (`#` starts a comment)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Scenes generated at the same time, overriding configuration
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Shared pipeline settings
    #[command(flatten)]
    pub pipeline: PipelineArgs,
}
