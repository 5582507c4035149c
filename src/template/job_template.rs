//! Job template assembly.
//!
//! [`playbook_to_job_template`] is the network-free entry point: it turns raw
//! playbook text into a configuration-as-code job template definition.
//! [`JobTemplateDraft`] is the shared intermediate used by both that function
//! and the controller submitter.

use serde::{Deserialize, Serialize};

use super::survey::{build_survey, SurveySpec};
use crate::core::AapResult;
use crate::playbook::{parse_playbook_str, LoadedPlaybook, VariableDescriptor};

/// The only job type we create.
pub const JOB_TYPE_RUN: &str = "run";

/// A job template definition referencing project and inventory by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTemplateSpec {
    pub name: String,
    pub job_type: String,
    pub inventory: String,
    pub project: String,
    pub playbook: String,
    pub ask_variables_on_launch: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey: Option<SurveySpec>,
}

/// Create/update payload for the controller's job template endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobTemplateRequest {
    pub name: String,
    pub job_type: String,
    pub inventory: u64,
    pub project: u64,
    pub playbook: String,
    pub ask_variables_on_launch: bool,
}

/// What a playbook contributes to a job template.
#[derive(Debug, Clone, PartialEq)]
pub struct JobTemplateDraft {
    /// Template name (the first play's name)
    pub name: String,

    /// Playbook filename relative to the project
    pub playbook: String,

    /// Survey variables in declaration order
    pub variables: Vec<VariableDescriptor>,
}

impl JobTemplateDraft {
    /// Build a draft from a parsed playbook.
    pub fn from_playbook(loaded: &LoadedPlaybook, playbook: impl Into<String>) -> Self {
        Self {
            name: loaded.play.name.clone(),
            playbook: playbook.into(),
            variables: loaded.variables(),
        }
    }

    /// The survey for this draft, if it has variables.
    pub fn survey(&self, name: &str, description: &str) -> Option<SurveySpec> {
        build_survey(name, description, &self.variables)
    }

    /// Name-referencing definition with an embedded survey.
    pub fn to_spec(
        &self,
        project: &str,
        inventory: &str,
        survey_name: &str,
        survey_description: &str,
    ) -> JobTemplateSpec {
        let survey = self.survey(survey_name, survey_description);
        JobTemplateSpec {
            name: self.name.clone(),
            job_type: JOB_TYPE_RUN.to_string(),
            inventory: inventory.to_string(),
            project: project.to_string(),
            playbook: self.playbook.clone(),
            ask_variables_on_launch: true,
            survey_enabled: survey.as_ref().map(|_| true),
            survey,
        }
    }

    /// ID-referencing payload for the controller API.
    pub fn to_request(&self, project_id: u64, inventory_id: u64) -> JobTemplateRequest {
        JobTemplateRequest {
            name: self.name.clone(),
            job_type: JOB_TYPE_RUN.to_string(),
            inventory: inventory_id,
            project: project_id,
            playbook: self.playbook.clone(),
            ask_variables_on_launch: true,
        }
    }
}

/// Convert raw playbook text into a job template definition.
///
/// No network I/O is performed. The survey, when present, has an empty name
/// and description.
pub fn playbook_to_job_template(
    content: &str,
    playbook: &str,
    project: &str,
    inventory: &str,
) -> AapResult<JobTemplateSpec> {
    let loaded = parse_playbook_str(content)?;
    let draft = JobTemplateDraft::from_playbook(&loaded, playbook);
    Ok(draft.to_spec(project, inventory, "", ""))
}
