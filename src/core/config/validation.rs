use super::GeneratorConfig;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Returns the first problem found, as a message for `FlowError::Config`.
    pub fn validate(config: &GeneratorConfig) -> Result<(), String> {
        if config.suffix.trim().is_empty() {
            return Err("generate.suffix cannot be empty".to_string());
        }

        if config.suffix.contains(|c: char| c == '/' || c == '\\') {
            return Err("generate.suffix cannot contain path separators".to_string());
        }

        if !(config.suffix.ends_with(".yml") || config.suffix.ends_with(".yaml")) {
            return Err("generate.suffix must end in .yml or .yaml".to_string());
        }

        if !(1..=8).contains(&config.indent) {
            return Err("generate.indent must be between 1 and 8".to_string());
        }

        Ok(())
    }
}
