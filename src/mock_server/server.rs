//! Mock Linode API server.
//!
//! Provides an axum-based HTTP server that simulates the Linode API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers::{self, ApiError, SharedState};
use super::state::MockState;

/// A mock Linode API server for testing.
///
/// The server runs in the background and can be used to test the Linode
/// client against a stateful API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: SharedState,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `LinodeClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();
        for instance in scenario.instances {
            state = state.with_instance(instance);
        }
        for volume in scenario.volumes {
            state = state.with_volume(volume);
        }
        for event in scenario.events {
            state = state.with_event(event);
        }
        state
    }

    /// Build the axum router with all routes.
    pub(crate) fn router(state: SharedState) -> Router {
        let api = Router::new()
            // Instance routes
            .route("/linode/instances", get(handlers::list_instances))
            .route(
                "/linode/instances/:id",
                get(handlers::get_instance)
                    .put(handlers::update_instance)
                    .delete(handlers::delete_instance),
            )
            .route("/linode/instances/:id/boot", post(handlers::boot_instance))
            .route("/linode/instances/:id/reboot", post(handlers::reboot_instance))
            .route(
                "/linode/instances/:id/shutdown",
                post(handlers::shutdown_instance),
            )
            .route(
                "/linode/instances/:id/volumes",
                get(handlers::list_instance_volumes),
            )
            // Volume routes
            .route("/volumes", get(handlers::list_volumes))
            .route(
                "/volumes/:id",
                get(handlers::get_volume).delete(handlers::delete_volume),
            )
            .route("/volumes/:id/attach", post(handlers::attach_volume))
            .route("/volumes/:id/detach", post(handlers::detach_volume))
            // Event routes
            .route("/account/events", get(handlers::list_events))
            .route("/account/events/:id", get(handlers::get_event))
            .route("/account/events/:id/seen", post(handlers::mark_event_seen))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

        api.route("/health", get(health_check)).with_state(state)
    }
}

/// Reject requests without the configured bearer token.
async fn require_token(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let authorized = {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.read().await.is_authorized(header)
    };

    if authorized {
        next.run(request).await
    } else {
        ApiError::unauthorized().into_response()
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Get, Instance, LinodeClient, List, ListOptions, RetryConfig};
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_instance_with_linode_client() {
        let server = MockServer::start().await;
        let client = LinodeClient::new("test-token", server.url()).unwrap();

        let instance = Instance::get(&client, 101)
            .await
            .expect("Failed to get instance");

        assert_eq!(instance.label, "web-1");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_instances_page() {
        let server = MockServer::start().await;
        let client = LinodeClient::new("test-token", server.url()).unwrap();

        let page = Instance::list_page(&client, &(), &ListOptions::for_page(1).with_page_size(2))
            .await
            .expect("Failed to list instances");

        assert_eq!(page.len(), 2);
        assert_eq!(page.pages, 2);
        assert_eq!(page.results, 3);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_instance_is_not_found() {
        let server = MockServer::start_empty().await;
        let client = LinodeClient::new("test-token", server.url()).unwrap();

        let err = Instance::get(&client, 999).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "[404] Not found");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token_rejects_other_tokens() {
        let state = MockState::new()
            .with_instance(Fixtures::instance(1, "web", "us-east"))
            .with_required_token("right");
        let server = MockServer::with_state(state).await;

        let client = LinodeClient::new("wrong", server.url())
            .unwrap()
            .with_retry(RetryConfig::none());
        let err = Instance::get(&client, 1).await.unwrap_err();
        assert_eq!(err.status(), Some(401));

        let client = LinodeClient::new("right", server.url()).unwrap();
        assert!(Instance::get(&client, 1).await.is_ok());

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_rejects_bad_filter_header() {
        let app = MockServer::router(MockServer::default_state().shared());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/linode/instances")
                    .header("X-Filter", "{not json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_router_rejects_oversized_page() {
        let app = MockServer::router(MockServer::default_state().shared());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/volumes?page_size=501")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
