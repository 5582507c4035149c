//! # aap-jobgen
//!
//! Turn Ansible playbooks into automation controller job templates.
//!
//! The first play's `vars` become survey questions: each variable gets a field
//! type inferred from its default value and a label recovered from the comment
//! next to its declaration.
//!
//! ## Features
//!
//! - **Offline rendering**: [`playbook_to_job_template`] produces a
//!   configuration-as-code job template definition from raw playbook text
//! - **Controller upload**: the `controller` feature adds a blocking REST
//!   client that creates or updates the template by name and attaches the survey
//!
//! ## Quick Start
//!
//! ```bash
//! export AAP_HOSTNAME=https://aap.example.com AAP_TOKEN=...
//! create_job_template site.yml --project infra --inventory Production
//!
//! # Or just print the definition
//! create_job_template site.yml --dry-run
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod core;
pub mod playbook;
pub mod template;

#[cfg(feature = "controller")]
pub mod integrations;

#[cfg(feature = "controller")]
pub use integrations::{
    ControllerClient, ControllerConfig, Credentials, JobTemplateSubmitter, SubmitReport,
    SubmitTarget, UpsertOutcome,
};

// Re-export commonly used types
pub use crate::core::{AapError, AapResult, Config};
pub use playbook::{
    load_playbook, parse_playbook_str, LoadedPlaybook, Play, SurveyFieldType, VariableDescriptor,
};
pub use template::{
    playbook_to_job_template, JobTemplateDraft, JobTemplateSpec, SurveyQuestion, SurveySpec,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "aap-jobgen";
