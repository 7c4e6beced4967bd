//! Block storage volume model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::traits::{Create, Delete, Get, List, Update};

const ENDPOINT: &str = "volumes";

/// State of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeStatus {
    Creating,
    Active,
    Resizing,
    ContactSupport,
    #[serde(other)]
    Unknown,
}

/// A block storage volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub id: u64,
    pub label: String,
    pub status: VolumeStatus,
    pub region: String,

    /// Size in GB.
    pub size: u32,

    /// Instance the volume is attached to; `None` when detached.
    #[serde(default)]
    pub linode_id: Option<u64>,

    #[serde(default)]
    pub linode_label: Option<String>,

    #[serde(default)]
    pub filesystem_path: String,

    #[serde(default)]
    pub hardware_type: Option<String>,

    #[serde(default)]
    pub encryption: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

impl Volume {
    pub fn is_attached(&self) -> bool {
        self.linode_id.is_some()
    }
}

/// Fields for creating a volume. Either `region` or `linode_id` is required.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeCreateOptions {
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linode_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<u64>,

    /// Size in GB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
}

/// Fields for updating a volume.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Fields for attaching a volume to an instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeAttachOptions {
    pub linode_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_across_boots: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ResizeBody {
    size: u32,
}

#[derive(Debug, Serialize)]
struct CloneBody<'a> {
    label: &'a str,
}

#[async_trait]
impl Get for Volume {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for Volume {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

#[async_trait]
impl Create for Volume {
    type Options = VolumeCreateOptions;

    #[tracing::instrument(skip(client, options), fields(label = %options.label))]
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(ENDPOINT, options).await
    }
}

#[async_trait]
impl Update for Volume {
    type Id = u64;
    type Params = VolumeUpdateOptions;

    #[tracing::instrument(skip(client))]
    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{ENDPOINT}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for Volume {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{ENDPOINT}/{id}")).await?;
        Ok(())
    }
}

/// Attach a volume to an instance and return the updated volume.
#[tracing::instrument(skip(client, options), fields(linode_id = options.linode_id))]
pub async fn attach_volume(
    client: &LinodeClient,
    id: u64,
    options: &VolumeAttachOptions,
) -> Result<Volume> {
    client
        .post_json(&format!("{ENDPOINT}/{id}/attach"), options)
        .await
}

/// Detach a volume from its instance.
pub async fn detach_volume(client: &LinodeClient, id: u64) -> Result<()> {
    client.post_empty(&format!("{ENDPOINT}/{id}/detach")).await?;
    Ok(())
}

/// Grow a volume. Volumes cannot shrink.
pub async fn resize_volume(client: &LinodeClient, id: u64, size: u32) -> Result<()> {
    client
        .post_no_content(&format!("{ENDPOINT}/{id}/resize"), &ResizeBody { size })
        .await
}

/// Clone a volume under a new label.
pub async fn clone_volume(client: &LinodeClient, id: u64, label: &str) -> Result<Volume> {
    client
        .post_json(&format!("{ENDPOINT}/{id}/clone"), &CloneBody { label })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_volume() {
        let volume: Volume = serde_json::from_value(serde_json::json!({
            "id": 42,
            "label": "data",
            "status": "active",
            "region": "us-east",
            "size": 20,
            "linode_id": null,
            "filesystem_path": "/dev/disk/by-id/scsi-0Linode_Volume_data",
            "created": "2018-01-01T00:01:01",
            "updated": "2018-01-01T00:01:01"
        }))
        .unwrap();
        assert!(!volume.is_attached());
        assert_eq!(volume.status, VolumeStatus::Active);
    }

    #[test]
    fn test_attach_options_body() {
        let options = VolumeAttachOptions {
            linode_id: 123,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&options).unwrap(),
            r#"{"linode_id":123}"#
        );
    }
}
