//! Mock Linode API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates a subset of
//! the Linode API (instances, volumes and account events) for integration
//! and end-to-end testing. Unlike wiremock which mocks at the HTTP level
//! per-test, this server maintains state across requests, so attaching a
//! volume is visible to the next `GET` and to the wait helpers.
//!
//! # Example
//!
//! ```ignore
//! use linodeapi::mock_server::MockServer;
//! use linodeapi::{Get, Instance, LinodeClient};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = LinodeClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let instance = Instance::get(&client, 101).await.unwrap();
//!     assert_eq!(instance.label, "web-1");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
