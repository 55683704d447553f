//! Config file loading

use crate::domain::Config;
use crate::error::IngestError;
use std::fs;
use std::path::Path;

/// Section name that may wrap the settings in a shared config file.
const SECTION: &str = "repo-ingest";

/// Load settings from an explicitly requested config file.
///
/// Without a path the defaults are returned; no file is ever discovered
/// implicitly. A file that cannot be read or parsed is an error.
pub fn load_config(config_path: Option<&Path>) -> Result<Config, IngestError> {
    let Some(config_file) = config_path else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(config_file)
        .map_err(|e| config_error(config_file, format!("Failed reading config file: {e}")))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, config_file)?,
        "yaml" | "yml" => parse_yaml_config(&content, config_file)?,
        other => {
            return Err(config_error(
                config_file,
                format!("Unsupported config extension '.{other}'"),
            ))
        }
    };

    tracing::debug!("Loaded config from {}", config_file.display());
    Ok(parsed)
}

/// Parse TOML config, supporting a nested [repo-ingest] section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config, IngestError> {
    let raw: toml::Value = toml::from_str(content)
        .map_err(|e| config_error(config_file, format!("Invalid TOML syntax: {e}")))?;

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val
        .try_into()
        .map_err(|e: toml::de::Error| config_error(config_file, format!("Invalid TOML config: {e}")))
}

/// Parse YAML config, supporting a nested repo-ingest section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config, IngestError> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| config_error(config_file, format!("Invalid YAML syntax: {e}")))?;

    // An empty document parses as null
    if raw.is_null() {
        return Ok(Config::default());
    }

    let config_val = match raw.get(SECTION) {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .map_err(|e| config_error(config_file, format!("Invalid YAML config: {e}")))
}

fn config_error(path: &Path, message: String) -> IngestError {
    IngestError::Config { path: path.to_path_buf(), message }
}
