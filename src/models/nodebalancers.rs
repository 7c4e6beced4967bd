//! NodeBalancer (load balancer) model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::traits::{Create, Delete, Get, List, Update};

const ENDPOINT: &str = "nodebalancers";

/// Monthly transfer in MB.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeBalancerTransfer {
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(rename = "out", default)]
    pub outbound: Option<f64>,
    #[serde(rename = "in", default)]
    pub inbound: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeBalancer {
    pub id: u64,
    #[serde(default)]
    pub label: Option<String>,
    pub region: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    /// Connections per second allowed from one client.
    #[serde(default)]
    pub client_conn_throttle: u32,
    #[serde(default)]
    pub transfer: NodeBalancerTransfer,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeBalancerCreateOptions {
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_conn_throttle: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_id: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeBalancerUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_conn_throttle: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[async_trait]
impl Get for NodeBalancer {
    type Id = u64;

    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for NodeBalancer {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

#[async_trait]
impl Create for NodeBalancer {
    type Options = NodeBalancerCreateOptions;

    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(ENDPOINT, options).await
    }
}

#[async_trait]
impl Update for NodeBalancer {
    type Id = u64;
    type Params = NodeBalancerUpdateOptions;

    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{ENDPOINT}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for NodeBalancer {
    type Id = u64;

    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{ENDPOINT}/{id}")).await?;
        Ok(())
    }
}
