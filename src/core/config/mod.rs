//! Generator configuration read from `ghaflow.toml`.

pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;

use crate::core::render::{OutputFormat, DEFAULT_HEADER, DEFAULT_INDENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "ghaflow.toml";

/// Settings for the `[generate]` section of `ghaflow.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding workflow definition files, relative to the root.
    pub src_dir: PathBuf,

    /// Directory generated workflow files are written to.
    pub out_dir: PathBuf,

    /// Appended to each definition's normalised name.
    pub suffix: String,

    /// Comment block written at the top of every generated file.
    pub header: String,

    pub format: OutputFormat,

    pub indent: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            src_dir: PathBuf::from(".github/workflows-src"),
            out_dir: PathBuf::from(".github/workflows"),
            suffix: ".generated.yml".to_string(),
            header: DEFAULT_HEADER.to_string(),
            format: OutputFormat::Yaml,
            indent: DEFAULT_INDENT,
        }
    }
}

impl GeneratorConfig {
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.src_dir)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.out_dir)
    }
}

/// Whole-file view of `ghaflow.toml`; other sections are ignored here.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub generate: Option<GeneratorConfig>,
}
