//! Compute instance (Linode) model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::models::volumes::Volume;
use crate::pagination::{self, ListOptions};
use crate::traits::{Create, Delete, Get, List, Update};

const ENDPOINT: &str = "linode/instances";

/// Lifecycle state of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Booting,
    Running,
    Offline,
    ShuttingDown,
    Rebooting,
    Provisioning,
    Deleting,
    Migrating,
    Rebuilding,
    Cloning,
    Restoring,
    Resizing,
    #[serde(other)]
    Unknown,
}

/// A compute instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: u64,
    pub label: String,

    pub status: InstanceStatus,

    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,

    /// Plan ID, e.g. `g6-standard-1`.
    #[serde(rename = "type", default)]
    pub instance_type: Option<String>,

    pub region: String,

    /// Image the instance was deployed from, if any.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub ipv4: Vec<String>,

    #[serde(default)]
    pub ipv6: Option<String>,

    #[serde(default)]
    pub hypervisor: Option<String>,

    #[serde(default)]
    pub specs: Option<InstanceSpec>,

    #[serde(default)]
    pub alerts: Option<InstanceAlert>,

    #[serde(default)]
    pub backups: Option<InstanceBackup>,

    #[serde(default)]
    pub watchdog_enabled: bool,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub host_uuid: Option<String>,
}

impl Instance {
    pub fn is_running(&self) -> bool {
        self.status == InstanceStatus::Running
    }

    /// First public IPv4 address.
    pub fn primary_ipv4(&self) -> Option<&str> {
        self.ipv4.first().map(String::as_str)
    }
}

/// Hardware resources of an instance (sizes in MB, transfer in GB).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceSpec {
    #[serde(default)]
    pub disk: u64,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub vcpus: u32,
    #[serde(default)]
    pub gpus: u32,
    #[serde(default)]
    pub transfer: u64,
}

/// Alert thresholds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceAlert {
    #[serde(default)]
    pub cpu: u32,
    #[serde(default)]
    pub io: u32,
    #[serde(default)]
    pub network_in: u32,
    #[serde(default)]
    pub network_out: u32,
    #[serde(default)]
    pub transfer_quota: u32,
}

/// Backup service state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceBackup {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub schedule: BackupSchedule,
    #[serde(default, with = "timestamp")]
    pub last_successful: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupSchedule {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
}

/// Fields for creating an instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceCreateOptions {
    pub region: String,

    #[serde(rename = "type")]
    pub instance_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_pass: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorized_keys: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stackscript_id: Option<u64>,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub stackscript_data: HashMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub booted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_ip: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Fields for updating an instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alerts: Option<InstanceAlert>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub watchdog_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl From<&Instance> for InstanceUpdateOptions {
    fn from(instance: &Instance) -> Self {
        Self {
            label: Some(instance.label.clone()),
            group: Some(instance.group.clone()),
            alerts: instance.alerts.clone(),
            watchdog_enabled: Some(instance.watchdog_enabled),
            tags: Some(instance.tags.clone()),
        }
    }
}

/// Fields for resizing an instance to another plan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceResizeOptions {
    #[serde(rename = "type")]
    pub instance_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_auto_disk_resize: Option<bool>,

    /// `cold` or `warm`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migration_type: Option<String>,
}

/// Fields for cloning an instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceCloneOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    /// Clone onto an existing instance instead of creating one.
    #[serde(rename = "linode_id", skip_serializing_if = "Option::is_none")]
    pub target_linode_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups_enabled: Option<bool>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disks: Vec<u64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub configs: Vec<u64>,
}

/// Fields for rebuilding an instance from an image.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstanceRebuildOptions {
    pub image: String,

    pub root_pass: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authorized_keys: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub booted: Option<bool>,
}

#[derive(Debug, Default, Serialize)]
struct BootOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_id: Option<u64>,
}

#[async_trait]
impl Get for Instance {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for Instance {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

#[async_trait]
impl Create for Instance {
    type Options = InstanceCreateOptions;

    #[tracing::instrument(skip(client, options), fields(region = %options.region))]
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(ENDPOINT, options).await
    }
}

#[async_trait]
impl Update for Instance {
    type Id = u64;
    type Params = InstanceUpdateOptions;

    #[tracing::instrument(skip(client))]
    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{ENDPOINT}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for Instance {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{ENDPOINT}/{id}")).await?;
        Ok(())
    }
}

/// Boot an instance, optionally into a specific config profile.
pub async fn boot_instance(client: &LinodeClient, id: u64, config_id: Option<u64>) -> Result<()> {
    client
        .post_no_content(&format!("{ENDPOINT}/{id}/boot"), &BootOptions { config_id })
        .await
}

/// Reboot an instance, optionally into a specific config profile.
pub async fn reboot_instance(client: &LinodeClient, id: u64, config_id: Option<u64>) -> Result<()> {
    client
        .post_no_content(&format!("{ENDPOINT}/{id}/reboot"), &BootOptions { config_id })
        .await
}

/// Shut an instance down.
pub async fn shutdown_instance(client: &LinodeClient, id: u64) -> Result<()> {
    client.post_empty(&format!("{ENDPOINT}/{id}/shutdown")).await?;
    Ok(())
}

/// Move an instance to another plan.
pub async fn resize_instance(
    client: &LinodeClient,
    id: u64,
    options: &InstanceResizeOptions,
) -> Result<()> {
    client
        .post_no_content(&format!("{ENDPOINT}/{id}/resize"), options)
        .await
}

/// Clone an instance and return the new (or target) instance.
pub async fn clone_instance(
    client: &LinodeClient,
    id: u64,
    options: &InstanceCloneOptions,
) -> Result<Instance> {
    client.post_json(&format!("{ENDPOINT}/{id}/clone"), options).await
}

/// Rebuild an instance from an image, wiping its disks.
pub async fn rebuild_instance(
    client: &LinodeClient,
    id: u64,
    options: &InstanceRebuildOptions,
) -> Result<Instance> {
    client
        .post_json(&format!("{ENDPOINT}/{id}/rebuild"), options)
        .await
}

/// Volumes attached to an instance.
pub async fn list_instance_volumes(
    client: &LinodeClient,
    id: u64,
    opts: Option<&ListOptions>,
) -> Result<Vec<Volume>> {
    pagination::list_all(client, &format!("{ENDPOINT}/{id}/volumes"), opts).await
}

/// State of an instance disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskStatus {
    Ready,
    NotReady,
    Deleting,
    #[serde(other)]
    Unknown,
}

/// A disk belonging to an instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDisk {
    pub id: u64,
    pub label: String,
    pub status: DiskStatus,
    /// Size in MB.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub filesystem: Option<String>,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

impl List for InstanceDisk {
    /// Instance ID.
    type Parent = u64;

    fn endpoint(linode_id: &u64) -> String {
        format!("{ENDPOINT}/{linode_id}/disks")
    }
}

/// Fetch one disk of an instance.
pub async fn get_instance_disk(
    client: &LinodeClient,
    linode_id: u64,
    disk_id: u64,
) -> Result<InstanceDisk> {
    client
        .get_json(&format!("{ENDPOINT}/{linode_id}/disks/{disk_id}"))
        .await
}
