//! Error types shared by the playbook pipeline and the controller client.

use std::path::PathBuf;

/// Result type for aap-jobgen operations.
pub type AapResult<T> = Result<T, AapError>;

/// Errors that can occur while turning a playbook into a job template.
#[derive(Debug, thiserror::Error)]
pub enum AapError {
    /// Missing or unusable controller configuration/credentials.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or structurally invalid playbook document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A named project, inventory or job template does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The controller answered with a non-2xx status.
    #[error("Controller API error: {message} (status: {status})")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[cfg(feature = "controller")]
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The controller answered 2xx with a body we could not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reading the playbook from disk failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AapError {
    /// Short machine-friendly name of the error kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Parse(_) => "parse",
            Self::NotFound(_) => "not_found",
            Self::Http { .. } => "http",
            #[cfg(feature = "controller")]
            Self::Request(_) => "http",
            Self::InvalidResponse(_) => "http",
            Self::Io { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = AapError::Http { status: 400, message: "bad payload".to_string() };
        assert_eq!(err.to_string(), "Controller API error: bad payload (status: 400)");
        assert_eq!(err.kind(), "http");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = AapError::Io {
            path: PathBuf::from("site.yml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("site.yml"));
        assert_eq!(err.kind(), "io");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(AapError::Config("x".into()).kind(), "config");
        assert_eq!(AapError::Parse("x".into()).kind(), "parse");
        assert_eq!(AapError::NotFound("x".into()).kind(), "not_found");
    }
}
