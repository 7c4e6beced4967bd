//! Kubernetes (LKE) cluster and node pool models.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::serde_as;

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::pagination::{self, ListOptions};
use crate::traits::{Create, Delete, Get, List, Update};

const ENDPOINT: &str = "lke/clusters";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LkeClusterStatus {
    Ready,
    NotReady,
    #[serde(other)]
    Unknown,
}

/// Readiness of one node in a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LkeNodeStatus {
    Ready,
    NotReady,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LkeControlPlane {
    #[serde(default)]
    pub high_availability: bool,
}

/// A managed Kubernetes cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LkeCluster {
    pub id: u64,
    pub label: String,
    pub region: String,
    pub status: LkeClusterStatus,
    pub k8s_version: String,
    /// `standard` or `enterprise`.
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub control_plane: LkeControlPlane,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LkeNodePoolAutoscaler {
    pub enabled: bool,
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LkeNodePoolLinode {
    pub id: String,
    #[serde(default)]
    pub instance_id: Option<u64>,
    pub status: LkeNodeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LkeNodePool {
    pub id: u64,
    pub count: u32,
    #[serde(rename = "type")]
    pub pool_type: String,
    #[serde(default)]
    pub nodes: Vec<LkeNodePoolLinode>,
    #[serde(default)]
    pub autoscaler: Option<LkeNodePoolAutoscaler>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl LkeNodePool {
    /// Number of nodes reporting ready.
    pub fn ready_nodes(&self) -> usize {
        self.nodes.iter().filter(|n| n.status == LkeNodeStatus::Ready).count()
    }
}

/// Node pool fields used when creating a cluster or adding a pool.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LkeNodePoolCreateOptions {
    pub count: u32,
    #[serde(rename = "type")]
    pub pool_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoscaler: Option<LkeNodePoolAutoscaler>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LkeClusterCreateOptions {
    pub label: String,
    pub region: String,
    pub k8s_version: String,
    pub node_pools: Vec<LkeNodePoolCreateOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<LkeControlPlane>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LkeClusterUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k8s_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_plane: Option<LkeControlPlane>,
}

/// A cluster's kubeconfig, decoded from the base64 the API returns.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LkeKubeconfig {
    #[serde_as(as = "Base64")]
    pub kubeconfig: Vec<u8>,
}

impl LkeKubeconfig {
    /// The kubeconfig as YAML text.
    pub fn as_str(&self) -> std::result::Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.kubeconfig)
    }
}

#[async_trait]
impl Get for LkeCluster {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for LkeCluster {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

#[async_trait]
impl Create for LkeCluster {
    type Options = LkeClusterCreateOptions;

    #[tracing::instrument(skip(client, options), fields(label = %options.label))]
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(ENDPOINT, options).await
    }
}

#[async_trait]
impl Update for LkeCluster {
    type Id = u64;
    type Params = LkeClusterUpdateOptions;

    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{ENDPOINT}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for LkeCluster {
    type Id = u64;

    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{ENDPOINT}/{id}")).await?;
        Ok(())
    }
}

impl List for LkeNodePool {
    /// Cluster ID.
    type Parent = u64;

    fn endpoint(cluster_id: &u64) -> String {
        format!("{ENDPOINT}/{cluster_id}/pools")
    }
}

/// Fetch and decode a cluster's kubeconfig.
pub async fn get_lke_cluster_kubeconfig(client: &LinodeClient, id: u64) -> Result<LkeKubeconfig> {
    client
        .get_json(&format!("{ENDPOINT}/{id}/kubeconfig"))
        .await
}

/// All node pools of a cluster.
pub async fn list_lke_node_pools(
    client: &LinodeClient,
    cluster_id: u64,
    opts: Option<&ListOptions>,
) -> Result<Vec<LkeNodePool>> {
    LkeNodePool::list_all(client, &cluster_id, opts).await
}

/// Add a node pool to a cluster.
pub async fn create_lke_node_pool(
    client: &LinodeClient,
    cluster_id: u64,
    options: &LkeNodePoolCreateOptions,
) -> Result<LkeNodePool> {
    client
        .post_json(&LkeNodePool::endpoint(&cluster_id), options)
        .await
}

/// Kubernetes versions available for new clusters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LkeVersion {
    pub id: String,
}

pub async fn list_lke_versions(client: &LinodeClient) -> Result<Vec<LkeVersion>> {
    pagination::list_all(client, "lke/versions", None).await
}
