//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::LinodeClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use linodeapi::{LinodeClient, Instance, Get};
///
/// let client = LinodeClient::from_env()?;
/// let instance = Instance::get(&client, 123).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (numeric ID, label or region slug).
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &LinodeClient, id: Self::Id) -> Result<Self>;
}
