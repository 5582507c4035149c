//! Automation controller integration.
//!
//! Provides the REST client and the job template submitter used by the CLI.

pub mod controller;
pub mod submitter;

pub use controller::{
    ControllerClient, ControllerConfig, Credentials, ListResponse, NamedResource, ENV_HOSTNAME,
    ENV_PASSWORD, ENV_TOKEN, ENV_USERNAME,
};
pub use submitter::{JobTemplateSubmitter, SubmitReport, SubmitTarget, UpsertOutcome};
