//! Core types shared across aap-jobgen.
//!
//! This module contains configuration, the error type and the secret
//! wrapper used for controller credentials.

mod config;
mod error;
mod secret;

pub use config::{
    Config, ControllerSection, DefaultsConfig, SurveyConfig, DEFAULT_INVENTORY, DEFAULT_PROJECT,
};
pub use error::{AapError, AapResult};
pub use secret::SecretValue;
