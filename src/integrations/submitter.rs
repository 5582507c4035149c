//! Job template submission.
//!
//! Resolves project and inventory names to ids, creates or updates the job
//! template by name, and uploads its survey. Calls are made one at a time;
//! a failure part-way through leaves whatever was already written in place.

use std::fmt;

use super::controller::{ControllerClient, NamedResource};
use crate::core::AapResult;
use crate::template::JobTemplateDraft;

/// Whether the template was created or an existing one was updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Where and how to submit a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTarget {
    /// Project name
    pub project: String,

    /// Inventory name; the first available inventory when `None`
    pub inventory: Option<String>,

    /// Survey name
    pub survey_name: String,

    /// Survey description
    pub survey_description: String,
}

/// What a submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReport {
    pub template_id: u64,
    pub template_name: String,
    pub outcome: UpsertOutcome,
    pub project_id: u64,
    pub inventory_id: u64,
    pub inventory_name: String,

    /// Number of survey questions uploaded (0 when no survey was sent)
    pub survey_questions: usize,
}

/// Pushes job template drafts to a controller.
pub struct JobTemplateSubmitter<'a> {
    client: &'a ControllerClient,
}

impl<'a> JobTemplateSubmitter<'a> {
    pub fn new(client: &'a ControllerClient) -> Self {
        Self { client }
    }

    /// Resolve the inventory named by the target, or the first one available.
    fn resolve_inventory(&self, target: &SubmitTarget) -> AapResult<NamedResource> {
        match &target.inventory {
            Some(name) => self.client.find_inventory(name),
            None => {
                let inventory = self.client.first_inventory()?;
                tracing::info!(inventory = %inventory.name, "No inventory given, using first available");
                Ok(inventory)
            }
        }
    }

    /// Create or update the job template, then attach its survey.
    pub fn submit(&self, draft: &JobTemplateDraft, target: &SubmitTarget) -> AapResult<SubmitReport> {
        let project = self.client.find_project(&target.project)?;
        let inventory = self.resolve_inventory(target)?;

        let request = draft.to_request(project.id, inventory.id);

        let (template, outcome) = match self.client.find_job_template(&draft.name)? {
            Some(existing) => {
                tracing::info!(id = existing.id, name = %existing.name, "Job template exists, updating");
                self.client.update_job_template(existing.id, &request)?;
                (existing, UpsertOutcome::Updated)
            }
            None => {
                let created = self.client.create_job_template(&request)?;
                tracing::info!(id = created.id, name = %created.name, "Job template created");
                (created, UpsertOutcome::Created)
            }
        };

        let survey_questions = match draft.survey(&target.survey_name, &target.survey_description) {
            Some(survey) => {
                self.client.create_survey(template.id, &survey)?;
                self.client.enable_survey(template.id)?;
                tracing::info!(id = template.id, questions = survey.len(), "Survey created and enabled");
                survey.len()
            }
            None => 0,
        };

        Ok(SubmitReport {
            template_id: template.id,
            template_name: template.name,
            outcome,
            project_id: project.id,
            inventory_id: inventory.id,
            inventory_name: inventory.name,
            survey_questions,
        })
    }
}
