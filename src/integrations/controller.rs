//! Automation controller REST client.
//!
//! A small blocking client for the `/api/v2` endpoints we need: name lookups
//! for projects, inventories and job templates, job template create/update,
//! and survey upload. Connection details are passed in explicitly through
//! [`ControllerConfig`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{AapError, AapResult, SecretValue};
use crate::template::{JobTemplateRequest, SurveySpec};

/// Environment variable holding the controller URL.
pub const ENV_HOSTNAME: &str = "AAP_HOSTNAME";
/// Environment variable holding an OAuth/personal access token.
pub const ENV_TOKEN: &str = "AAP_TOKEN";
/// Environment variable holding the basic-auth user.
pub const ENV_USERNAME: &str = "AAP_USERNAME";
/// Environment variable holding the basic-auth password.
pub const ENV_PASSWORD: &str = "AAP_PASSWORD";

/// How requests are authenticated.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`
    Token(SecretValue),
    /// HTTP basic auth
    Basic { username: String, password: SecretValue },
}

/// Where the controller lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    hostname: String,
    credentials: Credentials,
}

impl ControllerConfig {
    /// Create a config; trailing slashes are stripped from the hostname.
    pub fn new(hostname: impl Into<String>, credentials: Credentials) -> AapResult<Self> {
        let hostname = hostname.into().trim().trim_end_matches('/').to_string();
        if hostname.is_empty() {
            return Err(AapError::Config(format!("{ENV_HOSTNAME} environment variable is required")));
        }
        Ok(Self { hostname, credentials })
    }

    /// Read the config from the process environment.
    ///
    /// `fallback_hostname` is used when `AAP_HOSTNAME` is unset.
    pub fn from_env(fallback_hostname: Option<&str>) -> AapResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), fallback_hostname)
    }

    /// Read the config through an arbitrary lookup. Empty values count as unset.
    ///
    /// A token takes precedence over username/password.
    pub fn from_lookup<F>(lookup: F, fallback_hostname: Option<&str>) -> AapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let hostname = get(ENV_HOSTNAME)
            .or_else(|| fallback_hostname.map(str::to_string))
            .ok_or_else(|| {
                AapError::Config(format!("{ENV_HOSTNAME} environment variable is required"))
            })?;

        let credentials = match (get(ENV_TOKEN), get(ENV_USERNAME), get(ENV_PASSWORD)) {
            (Some(token), _, _) => Credentials::Token(SecretValue::new(token)),
            (None, Some(username), Some(password)) => {
                Credentials::Basic { username, password: SecretValue::new(password) }
            }
            _ => {
                return Err(AapError::Config(format!(
                    "Either {ENV_TOKEN} or both {ENV_USERNAME} and {ENV_PASSWORD} are required"
                )));
            }
        };

        Self::new(hostname, credentials)
    }

    /// Controller URL without a trailing slash.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL of the REST API.
    pub fn api_base(&self) -> String {
        format!("{}/api/v2", self.hostname)
    }

    /// Browser URL of a job template.
    pub fn template_url(&self, template_id: u64) -> String {
        format!("{}/#/templates/job_template/{template_id}", self.hostname)
    }
}

/// A paginated list response. Only the first page is read.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub count: u64,
    pub results: Vec<T>,
}

/// Any controller object we only need the id and name of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub id: u64,
    pub name: String,
}

/// Blocking client for the automation controller API.
pub struct ControllerClient {
    config: ControllerConfig,

    /// HTTP client
    client: reqwest::blocking::Client,
}

impl ControllerClient {
    /// Create a new controller client.
    pub fn new(config: ControllerConfig) -> AapResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("aap-jobgen/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.api_base(), endpoint.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, endpoint: &str) -> reqwest::blocking::RequestBuilder {
        let url = self.url(endpoint);
        tracing::debug!(%method, %url, "Controller request");

        let builder = self.client.request(method, url).header("Accept", "application/json");
        match &self.config.credentials {
            Credentials::Token(token) => builder.bearer_auth(token.expose()),
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose()))
            }
        }
    }

    /// Send a request and turn non-2xx statuses into errors.
    fn send(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> AapResult<reqwest::blocking::Response> {
        let response = builder.send()?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_else(|e| {
            tracing::debug!(status = status.as_u16(), error = %e, "Failed to read error body");
            String::new()
        });
        let message = error_message(&body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        tracing::debug!(status = status.as_u16(), body = %body, "Controller error response");
        Err(AapError::Http { status: status.as_u16(), message })
    }

    fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> AapResult<T> {
        response.json().map_err(|e| AapError::InvalidResponse(e.to_string()))
    }

    /// Make an authenticated GET request.
    pub fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> AapResult<T> {
        let response = self.send(self.request(reqwest::Method::GET, endpoint).query(query))?;
        Self::decode(response)
    }

    /// Make an authenticated POST request and decode the response.
    pub fn post<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: &B) -> AapResult<T> {
        let response = self.send(self.request(reqwest::Method::POST, endpoint).json(body))?;
        Self::decode(response)
    }

    /// POST where the response body is not needed.
    pub fn post_unit<B: Serialize>(&self, endpoint: &str, body: &B) -> AapResult<()> {
        self.send(self.request(reqwest::Method::POST, endpoint).json(body))?;
        Ok(())
    }

    /// PATCH where the response body is not needed.
    pub fn patch_unit<B: Serialize>(&self, endpoint: &str, body: &B) -> AapResult<()> {
        self.send(self.request(reqwest::Method::PATCH, endpoint).json(body))?;
        Ok(())
    }

    /// Look up a resource by exact name, or take the first one when `name` is `None`.
    ///
    /// When several objects match, the first in API order is returned.
    pub fn lookup(&self, endpoint: &str, name: Option<&str>) -> AapResult<Option<NamedResource>> {
        let query: Vec<(&str, &str)> = name.map(|n| vec![("name", n)]).unwrap_or_default();
        let list: ListResponse<NamedResource> = self.get(endpoint, &query)?;

        let first = list.results.into_iter().next();
        if let (Some(found), true) = (&first, list.count > 1) {
            tracing::warn!(
                endpoint,
                name = name.unwrap_or("*"),
                matches = list.count,
                chosen_id = found.id,
                "Several objects matched, using the first"
            );
        }
        Ok(first)
    }

    /// Find a project by name.
    pub fn find_project(&self, name: &str) -> AapResult<NamedResource> {
        self.lookup("projects/", Some(name))?
            .ok_or_else(|| AapError::NotFound(format!("Project '{name}' not found in AAP")))
    }

    /// Find an inventory by name.
    pub fn find_inventory(&self, name: &str) -> AapResult<NamedResource> {
        self.lookup("inventories/", Some(name))?
            .ok_or_else(|| AapError::NotFound(format!("Inventory '{name}' not found in AAP")))
    }

    /// The first inventory the user can see.
    pub fn first_inventory(&self) -> AapResult<NamedResource> {
        self.lookup("inventories/", None)?.ok_or_else(|| {
            AapError::NotFound("No inventories found in AAP. Please specify --inventory".to_string())
        })
    }

    /// Find a job template by name, if one exists.
    pub fn find_job_template(&self, name: &str) -> AapResult<Option<NamedResource>> {
        self.lookup("job_templates/", Some(name))
    }

    /// Create a job template.
    pub fn create_job_template(&self, request: &JobTemplateRequest) -> AapResult<NamedResource> {
        self.post("job_templates/", request)
    }

    /// Update an existing job template in place.
    pub fn update_job_template(&self, template_id: u64, request: &JobTemplateRequest) -> AapResult<()> {
        self.patch_unit(&format!("job_templates/{template_id}/"), request)
    }

    /// Replace a job template's survey.
    pub fn create_survey(&self, template_id: u64, survey: &SurveySpec) -> AapResult<()> {
        self.post_unit(&format!("job_templates/{template_id}/survey_spec/"), survey)
    }

    /// Turn the survey on.
    pub fn enable_survey(&self, template_id: u64) -> AapResult<()> {
        self.patch_unit(
            &format!("job_templates/{template_id}/"),
            &serde_json::json!({ "survey_enabled": true }),
        )
    }
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => Some(
            json.get("detail")
                .and_then(|d| d.as_str())
                .map(String::from)
                .unwrap_or_else(|| json.to_string()),
        ),
        Err(_) => Some(body.to_string()),
    }
}
