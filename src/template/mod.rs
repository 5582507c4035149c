//! Job template and survey assembly.

mod job_template;
mod survey;

pub use job_template::{
    playbook_to_job_template, JobTemplateDraft, JobTemplateRequest, JobTemplateSpec, JOB_TYPE_RUN,
};
pub use survey::{
    build_question, build_survey, stringify_value, SurveyQuestion, SurveySpec, BOOLEAN_CHOICES,
};
