//! Create trait for provisioning entities.

use async_trait::async_trait;

use crate::client::LinodeClient;
use crate::error::Result;

/// Create a new entity from typed options.
#[async_trait]
pub trait Create: Sized {
    /// Fields accepted by the create endpoint.
    type Options: Send + Sync;

    /// Create the entity and return it as the API reports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the options or the request fails.
    async fn create(client: &LinodeClient, options: &Self::Options) -> Result<Self>;
}
