//! User profile and SSH key models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::traits::{Create, Delete, Get, List, Update};

const SSH_KEYS: &str = "profile/sshkeys";

/// The user the token belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub uid: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub two_factor_auth: bool,
    /// Keys added to new instances by default; `null` when unset.
    #[serde(default)]
    pub authorized_keys: Option<Vec<String>>,
}

/// Fetch the profile of the current user.
pub async fn get_profile(client: &LinodeClient) -> Result<Profile> {
    client.get_json("profile").await
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKey {
    pub id: u64,
    pub label: String,
    pub ssh_key: String,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SshKeyCreateOptions {
    pub label: String,
    pub ssh_key: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SshKeyUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[async_trait]
impl Get for SshKey {
    type Id = u64;

    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{SSH_KEYS}/{id}")).await
    }
}

impl List for SshKey {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        SSH_KEYS.to_string()
    }
}

#[async_trait]
impl Create for SshKey {
    type Options = SshKeyCreateOptions;

    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(SSH_KEYS, options).await
    }
}

#[async_trait]
impl Update for SshKey {
    type Id = u64;
    type Params = SshKeyUpdateOptions;

    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{SSH_KEYS}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for SshKey {
    type Id = u64;

    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{SSH_KEYS}/{id}")).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_authorized_keys() {
        let profile: Profile = serde_json::from_value(serde_json::json!({
            "uid": 1234,
            "username": "exampleUser",
            "email": "example-user@gmail.com",
            "authorized_keys": null
        }))
        .unwrap();
        assert!(profile.authorized_keys.is_none());
    }

    #[test]
    fn test_ssh_key_create_body() {
        let options = SshKeyCreateOptions {
            label: "laptop".to_string(),
            ssh_key: "ssh-ed25519 AAAA user@host".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"label": "laptop", "ssh_key": "ssh-ed25519 AAAA user@host"})
        );
    }
}
