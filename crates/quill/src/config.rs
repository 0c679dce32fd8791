//! Layered configuration loading.
//!
//! Sources, later ones winning:
//! 1. Bundled defaults (`quill.toml` shipped with the crate)
//! 2. `~/.config/quill/quill.toml`
//! 3. `./quill.toml`
//! 4. An explicit file passed by the caller
//! 5. `QUILL__*` environment variables (`QUILL__GENERATION__PROVIDER__MODEL=mistral`)

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use quill_core::GenerationConfig;
use quill_error::{ConfigError, QuillResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../quill.toml");

/// Filesystem locations used by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PathSettings {
    /// Holds `style_guide.md` and `canon/`
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
    /// Where scenes are written
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl PathSettings {
    /// Override the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Override the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

/// Everything the `quill` binary reads from configuration.
///
/// # Example
///
/// ```no_run
/// use quill::QuillConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = QuillConfig::load(None)?;
/// println!("model: {}", config.generation().provider().model());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct QuillConfig {
    /// Pipeline settings
    #[serde(default)]
    generation: GenerationConfig,
    /// Filesystem locations
    #[serde(default)]
    paths: PathSettings,
}

impl QuillConfig {
    /// Assemble from parts.
    pub fn new(generation: GenerationConfig, paths: PathSettings) -> Self {
        Self { generation, paths }
    }

    /// Bundled defaults only.
    #[instrument]
    pub fn bundled() -> QuillResult<Self> {
        finish(Self::defaults())
    }

    /// Bundled defaults overlaid with one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unparseable or invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> QuillResult<Self> {
        debug!("Loading configuration from file");
        finish(Self::defaults().add_source(File::from(path.as_ref())))
    }

    /// Load with full precedence, optionally topped by `explicit`.
    ///
    /// User files are skipped silently when absent; `explicit` must exist.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> QuillResult<Self> {
        debug!("Loading configuration: env > explicit > current dir > home dir > bundled");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/quill/quill.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("quill").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("QUILL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    /// Replace the generation settings.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Replace the path settings.
    pub fn with_paths(mut self, paths: PathSettings) -> Self {
        self.paths = paths;
        self
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> QuillResult<QuillConfig> {
    let config: QuillConfig = builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    config.generation.validate()?;
    Ok(config)
}
