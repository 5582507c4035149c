//! Ansible playbook loading and variable extraction.
//!
//! Only the first play of a playbook is consulted. Its `vars` mapping is the
//! source of every survey question; the raw file text is kept alongside the
//! parsed play so that comments can be recovered later.

mod parser;
mod variables;

pub use parser::{load_playbook, parse_playbook_str};
pub use variables::{
    extract_variables, find_comment, infer_field_type, SurveyFieldType, VariableDescriptor,
    TEXTAREA_THRESHOLD,
};

use serde_yaml::{Mapping, Value};

use crate::core::{AapError, AapResult};

/// Name used when the first play has none.
pub const UNNAMED_PLAYBOOK: &str = "Unnamed Playbook";

/// The first play of a playbook, with the attributes we consume pulled out.
#[derive(Debug, Clone, PartialEq)]
pub struct Play {
    /// Play name
    pub name: String,

    /// Target host pattern
    pub hosts: String,

    /// Privilege escalation flag
    pub become_enabled: bool,

    /// Declared variables in document order
    pub vars: Vec<(String, Value)>,

    /// The play exactly as parsed
    mapping: Mapping,
}

impl Play {
    /// Build a play from its parsed mapping.
    pub fn from_mapping(mapping: Mapping) -> AapResult<Self> {
        let name = mapping
            .get("name")
            .and_then(scalar_to_string)
            .unwrap_or_else(|| UNNAMED_PLAYBOOK.to_string());

        let hosts = match mapping.get("hosts") {
            Some(Value::Sequence(patterns)) => {
                patterns.iter().filter_map(scalar_to_string).collect::<Vec<_>>().join(",")
            }
            Some(value) => scalar_to_string(value).unwrap_or_else(|| "all".to_string()),
            None => "all".to_string(),
        };

        let become_enabled = mapping.get("become").and_then(Value::as_bool).unwrap_or(false);

        let vars = match mapping.get("vars") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Mapping(vars)) => {
                let mut out = Vec::with_capacity(vars.len());
                for (key, value) in vars {
                    let key = scalar_to_string(key).ok_or_else(|| {
                        AapError::Parse("variable names in 'vars' must be scalars".to_string())
                    })?;
                    out.push((key, value.clone()));
                }
                out
            }
            Some(_) => {
                return Err(AapError::Parse("play 'vars' must be a mapping".to_string()));
            }
        };

        Ok(Self { name, hosts, become_enabled, vars, mapping })
    }

    /// The play as it appeared in the document.
    pub fn as_mapping(&self) -> &Mapping {
        &self.mapping
    }
}

/// A parsed playbook: its first play plus the original text.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlaybook {
    pub play: Play,

    /// Raw file contents, used for comment recovery
    pub raw: String,
}

impl LoadedPlaybook {
    /// Extract survey variables from the first play.
    pub fn variables(&self) -> Vec<VariableDescriptor> {
        extract_variables(&self.raw, &self.play.vars)
    }
}

/// Render a YAML scalar as text. Returns `None` for null and collections.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
