//! Linode API client library.
//!
//! A Rust library for the Linode REST API (v4) using a trait-based
//! architecture where each operation (Get, List, Create, Update, Delete)
//! is defined as a trait that entity types implement. Actions and nested
//! collections are plain async functions.
//!
//! # Quick Start
//!
//! ```no_run
//! use linodeapi::{Filter, Get, Instance, LinodeClient, List, ListOptions, Volume};
//!
//! #[tokio::main]
//! async fn main() -> linodeapi::Result<()> {
//!     // Create client from environment variables or ~/.config/linode
//!     let client = LinodeClient::from_env()?;
//!
//!     // Get an instance by ID
//!     let instance = Instance::get(&client, 123).await?;
//!     println!("Instance: {} ({:?})", instance.label, instance.status);
//!
//!     // List every instance in a region, following pagination
//!     let opts = ListOptions::default().with_filter(&Filter::eq("region", "us-east"));
//!     let instances = Instance::list_all(&client, &(), Some(&opts)).await?;
//!     println!("Found {} instances", instances.len());
//!
//!     // Volumes attached to it
//!     let volumes = linodeapi::list_instance_volumes(&client, instance.id, None).await?;
//!     println!("Found {} volumes", volumes.len());
//!
//!     // A single page
//!     let page = Volume::list_page(&client, &(), &ListOptions::for_page(1)).await?;
//!     println!("Page {}/{}", page.page, page.pages);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `LINODE_TOKEN` - Personal access token
//! - `LINODE_URL` (optional) - API host (defaults to `api.linode.com`)
//! - `LINODE_API_VERSION` (optional) - API version (defaults to `v4`)
//!
//! Without `LINODE_TOKEN`, the profile named by `LINODE_PROFILE` (default
//! `default`) is read from `~/.config/linode`. See [`config`].

mod client;
pub mod config;
pub mod decode;
mod error;
mod filter;
mod models;
mod pagination;
pub mod retry;
mod traits;
mod wait;

pub mod cli;
pub mod output;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{check_response, escape, LinodeClient};
pub use config::{ConfigProfile, LinodeConfig, LoadConfigOptions};
pub use error::{ApiErrorReason, LinodeError, Result};
pub use filter::{Comparison, ComparisonOperator, Filter, FilterNode, LogicalOperator, Order};
pub use pagination::{list_all, ListOptions, Page};
pub use retry::RetryConfig;

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update};

// Re-export models and their convenience functions
pub use models::*;

pub use output::PrettyPrint;

pub use wait::{
    wait_for_event_finished, wait_for_instance_status, wait_for_lke_cluster_status,
    wait_for_volume_linode_id, wait_for_volume_status,
};
