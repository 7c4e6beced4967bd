//! Account, maintenance and billing models.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::client::LinodeClient;
use crate::decode::{timestamp, NumberOrString};
use crate::error::Result;
use crate::traits::{Create, Get, List};

/// The account the token belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub balance_uninvoiced: f64,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub euuid: Option<String>,
    #[serde(default)]
    pub credit_card: Option<CreditCard>,
    #[serde(default, with = "timestamp")]
    pub active_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    #[serde(default)]
    pub last_four: String,
    #[serde(default)]
    pub expiry: String,
}

/// Fetch the account.
pub async fn get_account(client: &LinodeClient) -> Result<Account> {
    client.get_json("account").await
}

/// The entity affected by a maintenance window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEntity {
    pub id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub entity_type: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Pending,
    Scheduled,
    Started,
    InProgress,
    Completed,
    Canceled,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Scheduled or in-progress maintenance on an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMaintenance {
    #[serde(default)]
    pub entity: Option<MaintenanceEntity>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    /// e.g. `reboot`, `cold_migration`, `live_migration`.
    #[serde(rename = "type", default)]
    pub maintenance_type: String,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default, with = "timestamp")]
    pub when: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub until: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub not_before: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub complete_time: Option<DateTime<Utc>>,
}

impl List for AccountMaintenance {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "account/maintenance".to_string()
    }
}

/// A payment made to the account.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,

    /// Amount in US dollars.
    #[serde_as(as = "NumberOrString")]
    pub usd: f64,

    #[serde(default, with = "timestamp")]
    pub date: Option<DateTime<Utc>>,
}

/// Fields for making a payment.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentCreateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,

    #[serde_as(as = "NumberOrString")]
    pub usd: f64,
}

#[async_trait]
impl Get for Payment {
    type Id = u64;

    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("account/payments/{id}")).await
    }
}

impl List for Payment {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "account/payments".to_string()
    }
}

#[async_trait]
impl Create for Payment {
    type Options = PaymentCreateOptions;

    #[tracing::instrument(skip(client, options))]
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self> {
        client.post_json("account/payments", options).await
    }
}

/// A billing invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default, with = "timestamp")]
    pub date: Option<DateTime<Utc>>,
}

#[async_trait]
impl Get for Invoice {
    type Id = u64;

    async fn get(client: &LinodeClient, id: u64) -> Result<Self> {
        client.get_json(&format!("account/invoices/{id}")).await
    }
}

impl List for Invoice {
    type Parent = ();

    fn endpoint(_: &()) -> String {
        "account/invoices".to_string()
    }
}
