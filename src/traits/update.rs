//! Update trait for modifying entities.

use async_trait::async_trait;

use crate::client::LinodeClient;
use crate::error::Result;

/// Update an existing entity.
///
/// # Example
///
/// ```ignore
/// use linodeapi::{LinodeClient, Volume, Update, VolumeUpdateOptions};
///
/// let client = LinodeClient::from_env()?;
/// let updated = Volume::update(
///     &client,
///     42,
///     VolumeUpdateOptions {
///         label: Some("data".to_string()),
///         ..Default::default()
///     },
/// ).await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Parameters for the update.
    type Params: Send;

    /// Update the entity and return the updated version.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn update(client: &LinodeClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
