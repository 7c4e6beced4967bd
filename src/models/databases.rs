//! Managed database models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{escape, LinodeClient};
use crate::decode::timestamp;
use crate::error::Result;
use crate::traits::List;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Provisioning,
    Active,
    Deleting,
    Deleted,
    Suspending,
    Suspended,
    Resuming,
    Restoring,
    Failed,
    Degraded,
    Updating,
    Backing,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseHost {
    #[serde(default)]
    pub primary: Option<String>,
    #[serde(default)]
    pub secondary: Option<String>,
}

/// A managed database instance (any engine).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub id: u64,
    pub label: String,
    pub status: DatabaseStatus,
    /// `mysql` or `postgresql`.
    pub engine: String,
    pub version: String,
    pub region: String,
    #[serde(rename = "type")]
    pub database_type: String,
    #[serde(default)]
    pub cluster_size: u32,
    #[serde(default)]
    pub hosts: DatabaseHost,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub allow_list: Vec<String>,
    #[serde(default)]
    pub ssl_connection: bool,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

impl List for Database {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "databases/instances".to_string()
    }
}

/// Fetch a database through its engine-specific endpoint.
pub async fn get_database(client: &LinodeClient, engine: &str, id: u64) -> Result<Database> {
    client
        .get_json(&format!("databases/{}/instances/{id}", escape(engine)))
        .await
}
