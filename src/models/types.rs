//! Instance plan (type) catalog.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{escape, LinodeClient};
use crate::error::Result;
use crate::traits::{Get, List};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinodePrice {
    #[serde(default)]
    pub hourly: f64,
    #[serde(default)]
    pub monthly: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinodeAddons {
    #[serde(default)]
    pub backups: Option<LinodeAddonBackups>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinodeAddonBackups {
    #[serde(default)]
    pub price: LinodePrice,
}

/// An instance plan, e.g. `g6-standard-2`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinodeType {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// `nanode`, `standard`, `dedicated`, `gpu` or `highmem`.
    #[serde(default)]
    pub class: String,
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
    #[serde(default)]
    pub network_out: u64,
    #[serde(default)]
    pub price: LinodePrice,
    #[serde(default)]
    pub addons: LinodeAddons,
    #[serde(default)]
    pub successor: Option<String>,
}

#[async_trait]
impl Get for LinodeType {
    type Id = String;

    async fn get(client: &LinodeClient, id: String) -> Result<Self> {
        client
            .get_json(&format!("linode/types/{}", escape(&id)))
            .await
    }
}

impl List for LinodeType {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "linode/types".to_string()
    }
}
