//! Disk image model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{escape, LinodeClient};
use crate::decode::timestamp;
use crate::error::Result;
use crate::traits::{Delete, Get, List, Update};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    Creating,
    PendingUpload,
    Available,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A public distribution image or a private custom image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    /// e.g. `linode/debian12` or `private/1234`.
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    /// `manual` or `automatic`.
    #[serde(rename = "type", default)]
    pub image_type: String,
    #[serde(default)]
    pub status: ImageStatus,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub deprecated: bool,
    /// Size in MB.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub eol: Option<DateTime<Utc>>,
}

/// Fields for updating a private image.
///
/// `description` distinguishes "leave unchanged" (`None`) from "clear it"
/// (`Some(None)`, sent as JSON `null`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[async_trait]
impl Get for Image {
    type Id = String;

    async fn get(client: &LinodeClient, id: String) -> Result<Self> {
        client.get_json(&format!("images/{}", escape(&id))).await
    }
}

impl List for Image {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "images".to_string()
    }
}

#[async_trait]
impl Update for Image {
    type Id = String;
    type Params = ImageUpdateOptions;

    async fn update(client: &LinodeClient, id: String, params: Self::Params) -> Result<Self> {
        client
            .put_json(&format!("images/{}", escape(&id)), &params)
            .await
    }
}

#[async_trait]
impl Delete for Image {
    type Id = String;

    async fn delete(client: &LinodeClient, id: String) -> Result<()> {
        client.delete(&format!("images/{}", escape(&id))).await?;
        Ok(())
    }
}
