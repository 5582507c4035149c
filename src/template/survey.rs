//! Survey specification built from playbook variables.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::playbook::{SurveyFieldType, VariableDescriptor};

/// Choices offered for boolean variables.
pub const BOOLEAN_CHOICES: [&str; 2] = ["true", "false"];

/// A single survey question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyQuestion {
    /// Label shown to the user (the recovered comment)
    pub question_name: String,

    /// Secondary text, always `Variable: <name>`
    pub question_description: String,

    /// Extra variable the answer is bound to
    pub variable: String,

    /// Field type
    #[serde(rename = "type")]
    pub field_type: SurveyFieldType,

    pub required: bool,

    /// Selectable values for multiplechoice/multiselect questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Pre-filled answer
    pub default: String,
}

/// A survey attached to a job template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySpec {
    pub name: String,
    pub description: String,
    pub spec: Vec<SurveyQuestion>,
}

impl SurveySpec {
    /// Number of questions in the survey.
    pub fn len(&self) -> usize {
        self.spec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spec.is_empty()
    }
}

/// Convert one variable into a survey question.
pub fn build_question(variable: &VariableDescriptor) -> SurveyQuestion {
    let (choices, default) = match (variable.field_type, &variable.default) {
        (SurveyFieldType::MultipleChoice, value) => (
            Some(BOOLEAN_CHOICES.iter().map(|c| (*c).to_string()).collect()),
            stringify_value(value).to_lowercase(),
        ),
        (SurveyFieldType::MultiSelect, Value::Sequence(items)) => (
            Some(items.iter().map(stringify_value).collect()),
            items.first().map(stringify_value).unwrap_or_default(),
        ),
        (_, value) => (None, stringify_value(value)),
    };

    SurveyQuestion {
        question_name: variable.description.clone(),
        question_description: format!("Variable: {}", variable.name),
        variable: variable.name.clone(),
        field_type: variable.field_type,
        required: false,
        choices,
        default,
    }
}

/// Build a survey from variables, or `None` when there are none.
pub fn build_survey(
    name: impl Into<String>,
    description: impl Into<String>,
    variables: &[VariableDescriptor],
) -> Option<SurveySpec> {
    if variables.is_empty() {
        return None;
    }

    Some(SurveySpec {
        name: name.into(),
        description: description.into(),
        spec: variables.iter().map(build_question).collect(),
    })
}

/// Render a variable value as survey text.
///
/// Sequences become one element per line; mappings become compact JSON.
pub fn stringify_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items.iter().map(stringify_value).collect::<Vec<_>>().join("\n"),
        Value::Mapping(_) | Value::Tagged(_) => serde_json::to_string(value)
            .or_else(|_| serde_yaml::to_string(value).map(|s| s.trim_end().to_string()))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(name: &str, yaml: &str) -> VariableDescriptor {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        VariableDescriptor::new(name, value, "")
    }

    #[test]
    fn test_boolean_question() {
        let question = build_question(&variable("enabled", "true"));
        assert_eq!(question.field_type, SurveyFieldType::MultipleChoice);
        assert_eq!(question.choices, Some(vec!["true".to_string(), "false".to_string()]));
        assert_eq!(question.default, "true");

        let question = build_question(&variable("debug", "false"));
        assert_eq!(question.default, "false");
    }

    #[test]
    fn test_multiselect_question() {
        let question = build_question(&variable("tags", "[web, 2, true]"));
        assert_eq!(
            question.choices,
            Some(vec!["web".to_string(), "2".to_string(), "true".to_string()])
        );
        assert_eq!(question.default, "web");
    }

    #[test]
    fn test_empty_multiselect_defaults_to_empty_string() {
        let question = build_question(&variable("tags", "[]"));
        assert_eq!(question.field_type, SurveyFieldType::MultiSelect);
        assert_eq!(question.choices, Some(Vec::new()));
        assert_eq!(question.default, "");
    }

    #[test]
    fn test_scalar_questions_have_no_choices() {
        let question = build_question(&variable("retries", "3"));
        assert_eq!(question.choices, None);
        assert_eq!(question.default, "3");

        let question = build_question(&variable("ratio", "0.25"));
        assert_eq!(question.field_type, SurveyFieldType::Float);
        assert_eq!(question.default, "0.25");

        let question = build_question(&variable("greeting", "hello world"));
        assert_eq!(question.field_type, SurveyFieldType::Text);
        assert_eq!(question.default, "hello world");
    }

    #[test]
    fn test_textarea_default_is_one_element_per_line() {
        let question = build_question(&variable("hosts", "[a, b, c, d, e, f, g, h, i, j]"));
        assert_eq!(question.field_type, SurveyFieldType::Textarea);
        assert_eq!(question.choices, None);
        assert_eq!(question.default, "a\nb\nc\nd\ne\nf\ng\nh\ni\nj");
    }

    #[test]
    fn test_question_labels() {
        let var = VariableDescriptor::new(
            "port",
            Value::from(8080),
            "vars:\n  port: 8080 # Listen port\n",
        );
        let question = build_question(&var);
        assert_eq!(question.question_name, "Listen port");
        assert_eq!(question.question_description, "Variable: port");
        assert_eq!(question.variable, "port");
        assert!(!question.required);
    }

    #[test]
    fn test_null_and_mapping_defaults() {
        assert_eq!(build_question(&variable("empty", "~")).default, "");
        assert_eq!(build_question(&variable("opts", "{a: 1}")).default, r#"{"a":1}"#);
    }

    #[test]
    fn test_choices_only_for_choice_types() {
        for yaml in ["true", "3", "1.5", "[a]", "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]", "text"] {
            let question = build_question(&variable("v", yaml));
            assert_eq!(question.choices.is_some(), question.field_type.has_choices(), "{yaml}");
        }
    }

    #[test]
    fn test_build_survey_empty_is_none() {
        assert!(build_survey("x", "y", &[]).is_none());
    }

    #[test]
    fn test_build_survey_keeps_order() {
        let vars = vec![variable("b", "1"), variable("a", "2")];
        let survey = build_survey("Playbook Variables", "desc", &vars).unwrap();
        assert_eq!(survey.len(), 2);
        assert_eq!(survey.spec[0].variable, "b");
        assert_eq!(survey.spec[1].variable, "a");
    }

    #[test]
    fn test_question_json_shape() {
        let question = build_question(&variable("retries", "3"));
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["type"], "integer");
        assert_eq!(json["default"], "3");
        assert!(json.get("choices").is_none());
    }
}
