//! Region catalog.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::{escape, LinodeClient};
use crate::error::Result;
use crate::traits::{Get, List};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionResolvers {
    #[serde(default)]
    pub ipv4: String,
    #[serde(default)]
    pub ipv6: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionStatus {
    Ok,
    Outage,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A data center region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub country: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub status: RegionStatus,
    #[serde(default)]
    pub site_type: Option<String>,
    #[serde(default)]
    pub resolvers: RegionResolvers,
}

impl Region {
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities
            .iter()
            .any(|c| c.eq_ignore_ascii_case(capability))
    }
}

#[async_trait]
impl Get for Region {
    type Id = String;

    async fn get(client: &LinodeClient, id: String) -> Result<Self> {
        client.get_json(&format!("regions/{}", escape(&id))).await
    }
}

impl List for Region {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "regions".to_string()
    }
}
