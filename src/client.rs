//! Linode API client.
//!
//! Low-level HTTP client that handles authentication, retries and raw
//! requests. Higher-level operations are implemented via traits on entity
//! types and free functions in the model modules.

use std::borrow::Cow;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::{self, ConfigProfile, LoadConfigOptions};
use crate::error::{LinodeError, Result};
use crate::pagination::{ListOptions, Page};
use crate::retry::{FailedResponse, RetryConfig};

const USER_AGENT: &str = concat!("linodeapi/", env!("CARGO_PKG_VERSION"));
const FILTER_HEADER: &str = "X-Filter";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Percent-encode a string used as a single path segment.
pub fn escape(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Low-level Linode API client.
///
/// Handles authentication and HTTP requests. Entity-specific operations
/// are implemented via the `Get`, `List`, `Create`, `Update` and `Delete`
/// traits on model types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use linodeapi::LinodeClient;
///
/// # async fn example() -> linodeapi::Result<()> {
/// // Create from environment variables (or ~/.config/linode)
/// let client = LinodeClient::from_env()?;
///
/// // Or configure manually
/// let client = LinodeClient::new("your-token", "https://api.linode.com/v4")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LinodeClient {
    http: Client,
    base_url: Arc<Url>,
    token: String,
    retry: Arc<RetryConfig>,
    poll_interval: Duration,
}

impl std::fmt::Debug for LinodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinodeClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", &self.retry)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl LinodeClient {
    /// Create a client from environment variables.
    ///
    /// Uses `LINODE_TOKEN` for authentication, `LINODE_URL` for the API host
    /// (defaults to `api.linode.com`) and `LINODE_API_VERSION` (defaults to
    /// `v4`). Without `LINODE_TOKEN` the profile named by `LINODE_PROFILE`
    /// is read from `~/.config/linode`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token can be found.
    pub fn from_env() -> Result<Self> {
        let host = env::var("LINODE_URL").unwrap_or_else(|_| config::DEFAULT_API_HOST.to_string());
        let version =
            env::var("LINODE_API_VERSION").unwrap_or_else(|_| config::DEFAULT_API_VERSION.to_string());

        if let Ok(token) = env::var("LINODE_TOKEN") {
            return Self::new(&token, &config::build_base_url(&host, &version));
        }

        let options = LoadConfigOptions {
            path: None,
            profile: env::var("LINODE_PROFILE").ok(),
        };
        Self::from_config(&options).map_err(|e| {
            LinodeError::ConfigMissing(format!(
                "LINODE_TOKEN environment variable not set and no usable config profile: {e}"
            ))
        })
    }

    /// Create a client from a profile in the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the profile is missing
    /// or incomplete.
    pub fn from_config(options: &LoadConfigOptions) -> Result<Self> {
        let profile = config::load_profile(options)?;
        Self::from_profile(&profile)
    }

    /// Create a client from an already loaded profile.
    pub fn from_profile(profile: &ConfigProfile) -> Result<Self> {
        Self::new(&profile.api_token, &profile.base_url())
    }

    /// Create a new client with the provided token and base URL.
    ///
    /// # Arguments
    ///
    /// * `token` - Linode personal access token
    /// * `base_url` - API base URL including the version (e.g., `https://api.linode.com/v4`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            token: token.to_string(),
            retry: Arc::new(RetryConfig::default()),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Arc::new(retry);
        self
    }

    /// Set how often the `wait_for_*` helpers poll.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the wait helper poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(ACCEPT, HeaderValue::from_static("application/json")))
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let request = self.request(reqwest::Method::GET, path)?;
        self.execute(request).await
    }

    /// Make a GET request with query parameters and an optional `X-Filter`.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        filter: Option<&str>,
    ) -> Result<Response> {
        let mut request = self.request(reqwest::Method::GET, path)?.query(query);
        if let Some(filter) = filter {
            request = request.header(FILTER_HEADER, filter);
        }
        self.execute(request).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(reqwest::Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let request = self.request(reqwest::Method::POST, path)?.json(body);
        self.execute(request).await
    }

    /// Make a POST request without a body.
    #[tracing::instrument(skip(self))]
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        let request = self.request(reqwest::Method::POST, path)?;
        self.execute(request).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let request = self.request(reqwest::Method::DELETE, path)?;
        self.execute(request).await
    }

    /// GET and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        decode(self.get(path).await?).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(self.post(path, body).await?).await
    }

    /// POST a JSON body and discard the response.
    pub async fn post_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.post(path, body).await?;
        Ok(())
    }

    /// PUT a JSON body and decode the JSON response.
    pub async fn put_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(self.put(path, body).await?).await
    }

    /// Fetch one page of a list endpoint.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        opts: &ListOptions,
    ) -> Result<Page<T>> {
        let response = self
            .get_with_query(path, opts, opts.filter.as_deref())
            .await?;
        decode(response).await
    }

    /// Send a request, retrying while the retry policy allows it.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        let mut attempt = 0;

        loop {
            let attempt_request = request.try_clone().ok_or_else(|| {
                LinodeError::InvalidRequest("request body cannot be cloned for retries".to_string())
            })?;

            tracing::debug!(method = %attempt_request.method(), url = %attempt_request.url(), attempt, "sending request");
            let response = self.http.execute(attempt_request).await?;

            if response.status().is_success() {
                return Ok(response);
            }

            let failed = read_failure(response).await;
            if !self.retry.should_retry(attempt, &failed) {
                return Err(check_response(&failed));
            }

            let delay = self.retry.delay_for(attempt, &failed);
            tracing::warn!(
                status = failed.status.as_u16(),
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Decode a JSON response body.
pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn read_failure(response: Response) -> FailedResponse {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await.unwrap_or_default();
    FailedResponse {
        status,
        headers,
        body,
    }
}

/// Convert a failed response into the error it represents.
pub fn check_response(failed: &FailedResponse) -> LinodeError {
    let status = failed.status.as_u16();
    let content_type = failed.content_type();

    if failed.status == StatusCode::BAD_GATEWAY && content_type == "text/html" {
        return LinodeError::Api {
            status,
            message: "Bad Gateway".to_string(),
            reasons: Vec::new(),
        };
    }

    if content_type != "application/json" {
        return LinodeError::Api {
            status,
            message: format!(
                "Unexpected Content-Type: Expected: application/json, Received: {content_type}\nResponse body: {}",
                failed.body
            ),
            reasons: Vec::new(),
        };
    }

    let reasons = failed.reasons();
    if reasons.is_empty() {
        return LinodeError::Api {
            status,
            message: failed
                .status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
            reasons,
        };
    }

    LinodeError::from_reasons(status, reasons)
}

#[cfg(test)]
mod tests {
    use reqwest::header::{HeaderMap, CONTENT_TYPE};

    use super::*;

    fn failed(status: u16, content_type: &'static str, body: &str) -> FailedResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        FailedResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_client_debug() {
        let client = LinodeClient::new("test-token", "https://api.linode.com/v4").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("LinodeClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = LinodeClient::new("token", "https://api.linode.com/v4").unwrap();
        let client2 = LinodeClient::new("token", "https://api.linode.com/v4/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
        assert_eq!(
            client1.base_url().join("linode/instances").unwrap().as_str(),
            "https://api.linode.com/v4/linode/instances"
        );
    }

    #[test]
    fn test_escape_path_segment() {
        assert_eq!(escape("my bucket/name"), "my%20bucket%2Fname");
        assert_eq!(escape("us-east-1"), "us-east-1");
    }

    #[test]
    fn test_json_error_reasons() {
        let err = check_response(&failed(
            400,
            "application/json",
            r#"{"errors":[{"reason":"Invalid label","field":"label"},{"reason":"Bad region"}]}"#,
        ));
        assert_eq!(err.to_string(), "[400] [label] Invalid label; Bad region");
        assert_eq!(err.reasons().len(), 2);
    }

    #[test]
    fn test_bad_gateway_html() {
        let err = check_response(&failed(502, "text/html", "<html>bad gateway</html>"));
        assert_eq!(err.to_string(), "[502] Bad Gateway");
    }

    #[test]
    fn test_unexpected_content_type() {
        let err = check_response(&failed(500, "text/plain", "oops"));
        assert_eq!(
            err.to_string(),
            "[500] Unexpected Content-Type: Expected: application/json, Received: text/plain\nResponse body: oops"
        );
    }

    #[test]
    fn test_json_error_without_reasons() {
        let err = check_response(&failed(500, "application/json", "{}"));
        assert_eq!(err.to_string(), "[500] Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }
}
