//! VPC and subnet models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::pagination::ListOptions;
use crate::traits::{Create, Delete, Get, List, Update};

const ENDPOINT: &str = "vpcs";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcSubnetLinodeInterface {
    pub id: u64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub config_id: Option<u64>,
}

/// An instance with interfaces in a subnet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcSubnetLinode {
    pub id: u64,
    #[serde(default)]
    pub interfaces: Vec<VpcSubnetLinodeInterface>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VpcSubnet {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub linodes: Vec<VpcSubnetLinode>,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vpc {
    pub id: u64,
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub region: String,
    #[serde(default)]
    pub subnets: Vec<VpcSubnet>,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpcSubnetCreateOptions {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpcCreateOptions {
    pub label: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subnets: Vec<VpcSubnetCreateOptions>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VpcUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[async_trait]
impl Get for Vpc {
    type Id = u64;

    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for Vpc {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

#[async_trait]
impl Create for Vpc {
    type Options = VpcCreateOptions;

    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(ENDPOINT, options).await
    }
}

#[async_trait]
impl Update for Vpc {
    type Id = u64;
    type Params = VpcUpdateOptions;

    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{ENDPOINT}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for Vpc {
    type Id = u64;

    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{ENDPOINT}/{id}")).await?;
        Ok(())
    }
}

impl List for VpcSubnet {
    /// VPC ID.
    type Parent = u64;

    fn endpoint(vpc_id: &u64) -> String {
        format!("{ENDPOINT}/{vpc_id}/subnets")
    }
}

/// All subnets of a VPC.
pub async fn list_vpc_subnets(
    client: &LinodeClient,
    vpc_id: u64,
    opts: Option<&ListOptions>,
) -> Result<Vec<VpcSubnet>> {
    VpcSubnet::list_all(client, &vpc_id, opts).await
}

/// Add a subnet to a VPC.
pub async fn create_vpc_subnet(
    client: &LinodeClient,
    vpc_id: u64,
    options: &VpcSubnetCreateOptions,
) -> Result<VpcSubnet> {
    client
        .post_json(&VpcSubnet::endpoint(&vpc_id), options)
        .await
}
