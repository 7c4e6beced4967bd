//! Object storage buckets, bucket contents and access keys.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{decode, escape, LinodeClient};
use crate::decode::timestamp;
use crate::error::Result;
use crate::pagination::{self, ListOptions};
use crate::traits::{Create, Delete, Get, List, Update};

const BUCKETS: &str = "object-storage/buckets";
const KEYS: &str = "object-storage/keys";

fn bucket_path(region: &str, label: &str) -> String {
    format!("{BUCKETS}/{}/{}", escape(region), escape(label))
}

/// Canned access control list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectStorageAcl {
    Private,
    PublicRead,
    AuthenticatedRead,
    PublicReadWrite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageBucket {
    pub label: String,
    pub region: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub s3_endpoint: Option<String>,
    /// Endpoint generation, e.g. `E1` or `E3`.
    #[serde(default)]
    pub endpoint_type: Option<String>,
    #[serde(default)]
    pub objects: u64,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectStorageBucketCreateOptions {
    pub label: String,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<ObjectStorageAcl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectStorageBucketUpdateAccessOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<ObjectStorageAcl>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors_enabled: Option<bool>,
}

/// Query parameters for listing objects in a bucket.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BucketContentsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageObject {
    pub name: String,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default, with = "timestamp")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// One page of bucket contents. Continue with `next_marker` while
/// `is_truncated` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageBucketContent {
    #[serde(default)]
    pub data: Vec<ObjectStorageObject>,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub next_marker: Option<String>,
}

/// Bucket identified by region and label.
pub type BucketId = (String, String);

#[async_trait]
impl Get for ObjectStorageBucket {
    type Id = BucketId;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LinodeClient, id: BucketId) -> Result<Self> {
        let (region, label) = id;
        client.get_json(&bucket_path(&region, &label)).await
    }
}

impl List for ObjectStorageBucket {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        BUCKETS.to_string()
    }
}

#[async_trait]
impl Create for ObjectStorageBucket {
    type Options = ObjectStorageBucketCreateOptions;

    #[tracing::instrument(skip(client, options), fields(label = %options.label))]
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(BUCKETS, options).await
    }
}

#[async_trait]
impl Delete for ObjectStorageBucket {
    type Id = BucketId;

    async fn delete(client: &LinodeClient, id: BucketId) -> Result<()> {
        let (region, label) = id;
        client.delete(&bucket_path(&region, &label)).await?;
        Ok(())
    }
}

/// Buckets in one region.
pub async fn list_buckets_in_region(
    client: &LinodeClient,
    region: &str,
    opts: Option<&ListOptions>,
) -> Result<Vec<ObjectStorageBucket>> {
    pagination::list_all(client, &format!("{BUCKETS}/{}", escape(region)), opts).await
}

/// Change a bucket's ACL or CORS setting.
pub async fn update_bucket_access(
    client: &LinodeClient,
    region: &str,
    label: &str,
    options: &ObjectStorageBucketUpdateAccessOptions,
) -> Result<()> {
    client
        .post_no_content(&format!("{}/access", bucket_path(region, label)), options)
        .await
}

/// One page of objects in a bucket.
#[tracing::instrument(skip(client))]
pub async fn list_bucket_contents(
    client: &LinodeClient,
    region: &str,
    label: &str,
    params: &BucketContentsParams,
) -> Result<ObjectStorageBucketContent> {
    let path = format!("{}/object-list", bucket_path(region, label));
    let response = client.get_with_query(&path, params, None).await?;
    decode(response).await
}

/// Bucket permissions granted to a limited key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectStorageKeyBucketAccess {
    pub region: String,
    pub bucket_name: String,
    /// `read_only` or `read_write`.
    pub permissions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageKeyRegion {
    pub id: String,
    #[serde(default)]
    pub s3_endpoint: Option<String>,
}

/// An S3 access key pair.
#[derive(Clone, Serialize, Deserialize)]
pub struct ObjectStorageKey {
    pub id: u64,
    pub label: String,
    pub access_key: String,
    /// Only present in the create response; `[REDACTED]` afterwards.
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub limited: bool,
    #[serde(default)]
    pub bucket_access: Option<Vec<ObjectStorageKeyBucketAccess>>,
    #[serde(default)]
    pub regions: Vec<ObjectStorageKeyRegion>,
}

impl std::fmt::Debug for ObjectStorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStorageKey")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("access_key", &self.access_key)
            .field("limited", &self.limited)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectStorageKeyCreateOptions {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_access: Option<Vec<ObjectStorageKeyBucketAccess>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectStorageKeyUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
}

#[async_trait]
impl Get for ObjectStorageKey {
    type Id = u64;

    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{KEYS}/{id}")).await
    }
}

impl List for ObjectStorageKey {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        KEYS.to_string()
    }
}

#[async_trait]
impl Create for ObjectStorageKey {
    type Options = ObjectStorageKeyCreateOptions;

    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(KEYS, options).await
    }
}

#[async_trait]
impl Update for ObjectStorageKey {
    type Id = u64;
    type Params = ObjectStorageKeyUpdateOptions;

    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{KEYS}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for ObjectStorageKey {
    type Id = u64;

    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{KEYS}/{id}")).await?;
        Ok(())
    }
}
