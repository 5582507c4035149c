//! Variable extraction.
//!
//! Walks the first play's `vars`, infers a survey field type for each value
//! and tries to recover a human-readable label from the comments around the
//! variable's declaration.
//!
//! Comment recovery is a line-oriented heuristic over the raw text, not a
//! structural mapping. The first line anywhere in the file that looks like
//! `<name>:` is taken as the declaration, so a task key or a second play
//! that reuses the name can steal the label, and comments attached to
//! multi-line values are not associated with their variable.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Sequences with at least this many elements become a textarea.
pub const TEXTAREA_THRESHOLD: usize = 10;

/// Survey field type inferred from a variable's default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyFieldType {
    /// Boolean, offered as a true/false choice
    MultipleChoice,
    Integer,
    Float,
    /// Short list, each element a selectable choice
    MultiSelect,
    /// Long list, edited as free text
    Textarea,
    Text,
}

impl SurveyFieldType {
    /// The controller's name for this field type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiplechoice",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::MultiSelect => "multiselect",
            Self::Textarea => "textarea",
            Self::Text => "text",
        }
    }

    /// Whether questions of this type carry a `choices` list.
    pub const fn has_choices(&self) -> bool {
        matches!(self, Self::MultipleChoice | Self::MultiSelect)
    }
}

impl fmt::Display for SurveyFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared playbook variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDescriptor {
    /// Variable name
    pub name: String,

    /// Default value as declared
    pub default: Value,

    /// Inferred survey field type
    pub field_type: SurveyFieldType,

    /// Recovered comment, or `Variable: <name>`
    pub description: String,
}

impl VariableDescriptor {
    /// Describe a variable, recovering its label from the raw playbook text.
    pub fn new(name: impl Into<String>, default: Value, raw: &str) -> Self {
        let name = name.into();
        let field_type = infer_field_type(&default);
        let description = find_comment(raw, &name).unwrap_or_else(|| fallback_description(&name));
        Self { name, default, field_type, description }
    }
}

/// The description used when no comment is found.
pub(crate) fn fallback_description(name: &str) -> String {
    format!("Variable: {name}")
}

/// Infer the survey field type for a value.
///
/// Booleans are matched before numbers.
pub fn infer_field_type(value: &Value) -> SurveyFieldType {
    match value {
        Value::Bool(_) => SurveyFieldType::MultipleChoice,
        Value::Number(n) if n.is_i64() || n.is_u64() => SurveyFieldType::Integer,
        Value::Number(_) => SurveyFieldType::Float,
        Value::Sequence(items) if items.len() < TEXTAREA_THRESHOLD => SurveyFieldType::MultiSelect,
        Value::Sequence(_) => SurveyFieldType::Textarea,
        _ => SurveyFieldType::Text,
    }
}

/// Find the comment describing `name` in the raw playbook text.
///
/// The inline comment on the declaration line wins over a `#` comment on the
/// nearest non-blank line above it.
pub fn find_comment(raw: &str, name: &str) -> Option<String> {
    let pattern = Regex::new(&format!(r"^\s*{}\s*:", regex::escape(name))).ok()?;
    let lines: Vec<&str> = raw.lines().collect();
    let (index, line) = lines.iter().enumerate().find(|(_, line)| pattern.is_match(line))?;

    let mut comment = lines[..index]
        .iter()
        .rev()
        .map(|prev| prev.trim())
        .find(|prev| !prev.is_empty())
        .filter(|prev| prev.starts_with('#'))
        .map(|prev| prev.trim_start_matches('#').trim().to_string())
        .filter(|text| !text.is_empty());

    if let Some((_, inline)) = line.split_once('#') {
        let inline = inline.trim();
        if !inline.is_empty() {
            comment = Some(inline.to_string());
        }
    }

    comment
}

/// Describe every variable in declaration order.
pub fn extract_variables(raw: &str, vars: &[(String, Value)]) -> Vec<VariableDescriptor> {
    vars.iter()
        .map(|(name, value)| {
            let descriptor = VariableDescriptor::new(name.clone(), value.clone(), raw);
            tracing::debug!(
                variable = %descriptor.name,
                field_type = %descriptor.field_type,
                description = %descriptor.description,
                "Extracted variable"
            );
            descriptor
        })
        .collect()
}
