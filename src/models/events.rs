//! Account event model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::decode::{time_remaining, timestamp};
use crate::error::Result;
use crate::traits::{Get, List};

const ENDPOINT: &str = "account/events";

/// Progress of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Failed,
    Finished,
    Notification,
    Scheduled,
    Started,
    #[serde(other)]
    Unknown,
}

impl EventStatus {
    /// Whether the event will not change anymore.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Finished | Self::Notification)
    }
}

/// The object an event is about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntity {
    /// Numeric for most entities, a string for some (e.g. buckets).
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub label: Option<String>,
    /// Entity type, e.g. `linode` or `volume`.
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl EventEntity {
    /// The entity ID when it is numeric.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.as_u64()
    }
}

/// Something that happened on the account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,

    /// Event kind, e.g. `linode_boot`.
    pub action: String,

    pub status: EventStatus,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub entity: Option<EventEntity>,

    #[serde(default)]
    pub secondary_entity: Option<EventEntity>,

    #[serde(default)]
    pub percent_complete: Option<u32>,

    #[serde(default)]
    pub rate: Option<String>,

    #[serde(default)]
    pub read: bool,

    #[serde(default)]
    pub seen: bool,

    /// Estimated seconds until the event completes.
    #[serde(default, with = "time_remaining")]
    pub time_remaining: Option<u64>,

    /// Seconds the event took.
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
}

#[async_trait]
impl Get for Event {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for Event {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

/// Mark an event and every older event as seen.
pub async fn mark_event_seen(client: &LinodeClient, id: u64) -> Result<()> {
    client.post_empty(&format!("{ENDPOINT}/{id}/seen")).await?;
    Ok(())
}
