//! Error types for Linode API operations.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the `errors` array returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorReason {
    /// Human readable reason.
    pub reason: String,

    /// The request field the reason refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for ApiErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => write!(f, "[{field}] {}", self.reason),
            _ => f.write_str(&self.reason),
        }
    }
}

/// Errors that can occur during Linode API operations.
#[derive(Debug, Error)]
pub enum LinodeError {
    /// Configuration is missing or incomplete.
    #[error("Linode configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration is present but invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The configuration file could not be read or parsed.
    #[error("failed to load config file: {0}")]
    ConfigFile(#[from] ini::Error),

    /// The requested configuration profile does not exist.
    #[error("unable to find profile {0} in config")]
    ProfileNotFound(String),

    /// The API rejected the request.
    #[error("[{status:03}] {message}")]
    Api {
        status: u16,
        message: String,
        reasons: Vec<ApiErrorReason>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid caller input, e.g. an unparsable ID on the command line.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A wait helper gave up before the resource reached the desired state.
    #[error("timed out after {elapsed:?} waiting for {what}")]
    Timeout { what: String, elapsed: Duration },

    /// An awaited event finished unsuccessfully.
    #[error("event {id} ({action}) failed")]
    EventFailed { id: u64, action: String },
}

impl LinodeError {
    /// Build an API error from a status code and the reasons in the body.
    pub fn from_reasons(status: u16, reasons: Vec<ApiErrorReason>) -> Self {
        let message = reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Self::Api {
            status,
            message,
            reasons,
        }
    }

    /// The HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this error is a 404 from the API.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether this error carries any of the given HTTP statuses.
    pub fn has_status(&self, codes: &[u16]) -> bool {
        self.status().is_some_and(|s| codes.contains(&s))
    }

    /// The API error reasons, empty for non-API errors.
    pub fn reasons(&self) -> &[ApiErrorReason] {
        match self {
            Self::Api { reasons, .. } => reasons,
            _ => &[],
        }
    }
}

/// Result type alias for Linode operations.
pub type Result<T> = core::result::Result<T, LinodeError>;
