//! Cloud firewall model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::client::LinodeClient;
use crate::decode::timestamp;
use crate::error::Result;
use crate::traits::{Create, Delete, Get, List, Update};

const ENDPOINT: &str = "networking/firewalls";

/// Transport protocol a rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NetworkProtocol {
    #[default]
    Tcp,
    Udp,
    Icmp,
    Ipencap,
}

/// IPv4 and IPv6 address lists (may contain prefix list tokens).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkAddresses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Vec<String>>,
}

/// A single allow/deny rule, or a reference to a shared rule set.
///
/// A rule with a `ruleset` is serialized as `{"ruleset": <id>}` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FirewallRule {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ports: Option<String>,
    #[serde(default)]
    pub protocol: NetworkProtocol,
    #[serde(default)]
    pub addresses: NetworkAddresses,
    #[serde(default)]
    pub ruleset: Option<u64>,
}

impl Serialize for FirewallRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct RuleSetRef {
            ruleset: u64,
        }

        #[derive(Serialize)]
        struct Rule<'a> {
            action: &'a str,
            label: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            ports: Option<&'a str>,
            protocol: NetworkProtocol,
            addresses: &'a NetworkAddresses,
        }

        match self.ruleset {
            Some(ruleset) if ruleset != 0 => RuleSetRef { ruleset }.serialize(serializer),
            _ => Rule {
                action: &self.action,
                label: &self.label,
                description: self.description.as_deref(),
                ports: self.ports.as_deref(),
                protocol: self.protocol,
                addresses: &self.addresses,
            }
            .serialize(serializer),
        }
    }
}

impl FirewallRule {
    /// A reference to a shared rule set.
    pub fn ruleset(id: u64) -> Self {
        Self {
            ruleset: Some(id),
            ..Default::default()
        }
    }
}

/// Inbound and outbound rules with their default policies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRuleSet {
    #[serde(default)]
    pub inbound: Vec<FirewallRule>,
    #[serde(default)]
    pub inbound_policy: String,
    #[serde(default)]
    pub outbound: Vec<FirewallRule>,
    #[serde(default)]
    pub outbound_policy: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirewallStatus {
    Enabled,
    Disabled,
    Deleted,
    #[serde(other)]
    Unknown,
}

/// A cloud firewall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firewall {
    pub id: u64,
    pub label: String,
    pub status: FirewallStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub rules: FirewallRuleSet,
    #[serde(default, with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated: Option<DateTime<Utc>>,
}

/// Entities a new firewall is assigned to.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DevicesCreationOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub linodes: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodebalancers: Vec<u64>,
}

/// Fields for creating a firewall.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FirewallCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub rules: FirewallRuleSet,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub devices: DevicesCreationOptions,
}

/// Fields for updating a firewall.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FirewallUpdateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FirewallStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[async_trait]
impl Get for Firewall {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("{ENDPOINT}/{id}")).await
    }
}

impl List for Firewall {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        ENDPOINT.to_string()
    }
}

#[async_trait]
impl Create for Firewall {
    type Options = FirewallCreateOptions;

    #[tracing::instrument(skip(client, options))]
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json(ENDPOINT, options).await
    }
}

#[async_trait]
impl Update for Firewall {
    type Id = u64;
    type Params = FirewallUpdateOptions;

    #[tracing::instrument(skip(client))]
    async fn update(client: &LinodeClient, id: u64, params: Self::Params) -> Result<Self> {
        client.put_json(&format!("{ENDPOINT}/{id}"), &params).await
    }
}

#[async_trait]
impl Delete for Firewall {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &LinodeClient, id: u64) -> Result<()> {
        client.delete(&format!("{ENDPOINT}/{id}")).await?;
        Ok(())
    }
}

/// Fetch the rules of a firewall.
pub async fn get_firewall_rules(client: &LinodeClient, id: u64) -> Result<FirewallRuleSet> {
    client.get_json(&format!("{ENDPOINT}/{id}/rules")).await
}

/// Replace the rules of a firewall.
pub async fn update_firewall_rules(
    client: &LinodeClient,
    id: u64,
    rules: &FirewallRuleSet,
) -> Result<FirewallRuleSet> {
    client.put_json(&format!("{ENDPOINT}/{id}/rules"), rules).await
}
