//! Retry policy for transient API failures.
//!
//! A request is retried when any configured [`RetryCondition`] matches the
//! failed response. The wait between attempts grows exponentially from
//! `base_delay` up to `max_delay`; a `Retry-After` header overrides it.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER, SERVER};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::ApiErrorReason;

/// Default number of retries before the last response is returned.
pub const DEFAULT_RETRY_COUNT: u32 = 1000;

/// Upper bound on the wait between two attempts.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

const MAINTENANCE_MODE_HEADER: &str = "X-Maintenance-Mode";

/// A non-success response whose body has already been read.
#[derive(Debug, Clone)]
pub struct FailedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl FailedResponse {
    /// Content type of the response with parameters stripped.
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .unwrap_or_default()
    }

    /// Error reasons from a JSON error body, empty if there are none.
    pub fn reasons(&self) -> Vec<ApiErrorReason> {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            errors: Vec<ApiErrorReason>,
        }

        serde_json::from_str::<ErrorBody>(&self.body)
            .map(|b| b.errors)
            .unwrap_or_default()
    }

    /// The `Retry-After` delay, if the server sent one in seconds.
    pub fn retry_after(&self) -> Option<Duration> {
        self.headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

/// Decides whether a failed response is worth another attempt.
pub type RetryCondition = fn(&FailedResponse) -> bool;

/// 429 Too Many Requests.
pub fn too_many_requests(resp: &FailedResponse) -> bool {
    resp.status == StatusCode::TOO_MANY_REQUESTS
}

/// 503 Service Unavailable, except during announced maintenance.
pub fn service_unavailable(resp: &FailedResponse) -> bool {
    if resp.status != StatusCode::SERVICE_UNAVAILABLE {
        return false;
    }
    if resp.headers.contains_key(MAINTENANCE_MODE_HEADER) {
        tracing::info!(
            "API is in maintenance mode: {}",
            resp.headers
                .get(MAINTENANCE_MODE_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
        );
        return false;
    }
    true
}

/// 408 Request Timeout.
pub fn request_timeout(resp: &FailedResponse) -> bool {
    resp.status == StatusCode::REQUEST_TIMEOUT
}

/// 400 whose error says the Linode is busy with another operation.
pub fn linode_busy(resp: &FailedResponse) -> bool {
    resp.status == StatusCode::BAD_REQUEST
        && resp.reasons().iter().any(|r| r.reason == "Linode busy.")
}

/// 400 served as HTML by the nginx edge rather than by the API.
pub fn request_nginx_retry(resp: &FailedResponse) -> bool {
    if resp.status != StatusCode::BAD_REQUEST {
        return false;
    }
    let server = resp
        .headers
        .get(SERVER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    server == "nginx" && resp.content_type() == "text/html"
}

/// Retry settings for a [`LinodeClient`](crate::LinodeClient).
#[derive(Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub conditions: Vec<RetryCondition>,
}

impl fmt::Debug for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_RETRY_COUNT,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            conditions: vec![
                too_many_requests,
                service_unavailable,
                request_timeout,
                linode_busy,
                request_nginx_retry,
            ],
        }
    }
}

impl RetryConfig {
    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            conditions: Vec::new(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_delays(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: RetryCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Whether `attempt` (0-based) may be followed by another one.
    pub fn should_retry(&self, attempt: u32, resp: &FailedResponse) -> bool {
        attempt < self.max_retries && self.conditions.iter().any(|cond| cond(resp))
    }

    /// How long to wait after the given 0-based attempt failed.
    pub fn delay_for(&self, attempt: u32, resp: &FailedResponse) -> Duration {
        if let Some(after) = resp.retry_after() {
            return after.min(self.max_delay);
        }
        let factor = 2u32.saturating_pow(attempt.min(16));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}
