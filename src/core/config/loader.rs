use super::{ConfigFile, ConfigValidator, GeneratorConfig, CONFIG_FILE_NAME};
use crate::core::error::{FlowError, FlowResult};
use std::env;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from `<root>/ghaflow.toml`, then apply environment
    /// overrides and validate. A missing file yields the defaults.
    pub fn load_from_root(root: &Path) -> FlowResult<GeneratorConfig> {
        let config_path = root.join(CONFIG_FILE_NAME);
        let mut config = Self::load_from_file(&config_path)?.unwrap_or_default();
        Self::apply_overrides(&mut config, |key| env::var(key).ok());
        ConfigValidator::validate(&config).map_err(|message| FlowError::Config {
            path: config_path,
            message,
        })?;
        Ok(config)
    }

    /// Returns `Ok(None)` if the file doesn't exist or has no `[generate]` section.
    pub fn load_from_file(path: &Path) -> FlowResult<Option<GeneratorConfig>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|err| FlowError::io(path, err))?;
        let file: ConfigFile = toml::from_str(&content).map_err(|err| FlowError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        Ok(file.generate)
    }

    /// Overrides from `GHAFLOW_*` variables; `lookup` is `env::var` outside tests.
    pub fn apply_overrides<F>(config: &mut GeneratorConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(src_dir) = lookup("GHAFLOW_SRC_DIR").filter(|v| !v.trim().is_empty()) {
            config.src_dir = PathBuf::from(src_dir);
        }

        if let Some(out_dir) = lookup("GHAFLOW_OUT_DIR").filter(|v| !v.trim().is_empty()) {
            config.out_dir = PathBuf::from(out_dir);
        }

        if let Some(format) = lookup("GHAFLOW_FORMAT") {
            if let Ok(format) = format.parse() {
                config.format = format;
            }
        }
    }

    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "GHAFLOW_SRC_DIR - Override the workflow definition directory",
            "GHAFLOW_OUT_DIR - Override the generated workflow directory",
            "GHAFLOW_FORMAT - Override the output format (yaml/json)",
            "GHAFLOW_LOG - Tracing filter directive, e.g. ghaflow=debug",
        ]
    }
}
