//! Playbook parser.
//!
//! Parses YAML playbook files and keeps the first play.

use std::path::Path;

use serde_yaml::Value;

use super::{LoadedPlaybook, Play};
use crate::core::{AapError, AapResult};

/// Parse a playbook from a file.
pub fn load_playbook(path: &Path) -> AapResult<LoadedPlaybook> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| AapError::Io { path: path.to_path_buf(), source })?;
    tracing::debug!(path = ?path, bytes = content.len(), "Read playbook");
    parse_playbook_str(&content)
}

/// Parse a playbook from a string.
pub fn parse_playbook_str(content: &str) -> AapResult<LoadedPlaybook> {
    let document: Value = serde_yaml::from_str(content)
        .map_err(|e| AapError::Parse(format!("failed to parse playbook YAML: {e}")))?;

    let first = match document {
        Value::Sequence(plays) => plays.into_iter().next(),
        _ => None,
    }
    .ok_or_else(|| AapError::Parse("Playbook must contain at least one play".to_string()))?;

    let Value::Mapping(mapping) = first else {
        return Err(AapError::Parse("first play must be a mapping".to_string()));
    };

    let play = Play::from_mapping(mapping)?;
    tracing::debug!(play = %play.name, vars = play.vars.len(), "Parsed first play");

    Ok(LoadedPlaybook { play, raw: content.to_string() })
}
