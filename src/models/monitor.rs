//! Monitoring services and alert definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{escape, LinodeClient};
use crate::decode::timestamp;
use crate::error::Result;
use crate::pagination::{self, ListOptions};
use crate::traits::List;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorServiceAlert {
    #[serde(default)]
    pub polling_interval_seconds: Vec<u32>,
    #[serde(default)]
    pub evaluation_period_seconds: Vec<u32>,
    #[serde(default)]
    pub scope: Vec<String>,
}

/// A service type that can be monitored, e.g. `dbaas`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorService {
    pub label: String,
    pub service_type: String,
    #[serde(default)]
    pub alert: Option<MonitorServiceAlert>,
}

impl List for MonitorService {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "monitor/services".to_string()
    }
}

/// Fetch a monitor service by its type.
pub async fn get_monitor_service(client: &LinodeClient, service_type: &str) -> Result<MonitorService> {
    client
        .get_json(&format!("monitor/services/{}", escape(service_type)))
        .await
}

/// A channel notified when an alert fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertChannelEnvelope {
    pub id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub channel_type: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlertDefinitionStatus {
    #[serde(rename = "enabled")]
    Enabled,
    #[serde(rename = "disabled")]
    Disabled,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "failed")]
    Failed,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

/// An alert rule for a monitored service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDefinition {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub severity: u8,
    /// `system` or `user`.
    #[serde(rename = "type", default)]
    pub alert_type: String,
    pub service_type: String,
    #[serde(default)]
    pub status: AlertDefinitionStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub entity_ids: Vec<String>,
    #[serde(default)]
    pub rule_criteria: Option<serde_json::Value>,
    #[serde(default)]
    pub trigger_conditions: Option<serde_json::Value>,
    #[serde(default)]
    pub alert_channels: Vec<AlertChannelEnvelope>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

fn alert_definitions_path(service_type: &str) -> String {
    format!("monitor/services/{}/alert-definitions", escape(service_type))
}

/// Alert definitions of one service type.
pub async fn list_alert_definitions(
    client: &LinodeClient,
    service_type: &str,
    opts: Option<&ListOptions>,
) -> Result<Vec<AlertDefinition>> {
    pagination::list_all(client, &alert_definitions_path(service_type), opts).await
}

pub async fn get_alert_definition(
    client: &LinodeClient,
    service_type: &str,
    id: u64,
) -> Result<AlertDefinition> {
    client
        .get_json(&format!("{}/{id}", alert_definitions_path(service_type)))
        .await
}
