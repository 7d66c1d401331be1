//! Parsing of JSON arguments given on the command line.

use crate::error::{CliError, CliResult};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Parse `--input`: inline JSON when it looks like an object or array,
/// otherwise a path to a JSON file (a leading `~` means the home directory).
pub fn parse_run_input(raw: &str) -> CliResult<Value> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| CliError::InvalidInput(format!("input is not valid JSON: {}", e)));
    }

    let path = expand_home(trimmed);
    if !path.exists() {
        return Err(CliError::FileNotFound(trimmed.to_string()));
    }

    let contents = std::fs::read_to_string(&path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidInput(format!("{} is not valid JSON: {}", path.display(), e))
    })
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Parse `--config` into a JSON object, adding `"gpu": true` when requested.
pub fn parse_deploy_config(raw: Option<&str>, gpu: bool) -> CliResult<Map<String, Value>> {
    let mut config = match raw {
        Some(raw) => match serde_json::from_str(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(CliError::InvalidInput(
                    "config must be a JSON object".into(),
                ))
            }
            Err(e) => {
                return Err(CliError::InvalidInput(format!(
                    "config is not valid JSON: {}",
                    e
                )))
            }
        },
        None => Map::new(),
    };

    if gpu {
        config.insert("gpu".into(), Value::Bool(true));
    }
    Ok(config)
}
