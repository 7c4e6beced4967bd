//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::LinodeClient;
use crate::error::Result;
use crate::pagination::{self, ListOptions, Page};

/// List entities of a collection endpoint with pagination support.
///
/// Top-level collections use `()` as their parent; nested collections
/// (disks of an instance, pools of a cluster) use the parent's ID.
///
/// # Example
///
/// ```ignore
/// use linodeapi::{LinodeClient, Instance, List, ListOptions};
///
/// let client = LinodeClient::from_env()?;
///
/// // Fetch a single page
/// let page = Instance::list_page(&client, &(), &ListOptions::for_page(1)).await?;
///
/// // Fetch all pages
/// let all = Instance::list_all(&client, &(), None).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send + DeserializeOwned {
    /// Identifies the collection the entities belong to.
    type Parent: Sync;

    /// Collection path relative to the API base URL.
    fn endpoint(parent: &Self::Parent) -> String;

    /// Fetch one page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn list_page(
        client: &LinodeClient,
        parent: &Self::Parent,
        opts: &ListOptions,
    ) -> Result<Page<Self>> {
        client.get_page(&Self::endpoint(parent), opts).await
    }

    /// Fetch every page, or only `opts.page` when it is set.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(
        client: &LinodeClient,
        parent: &Self::Parent,
        opts: Option<&ListOptions>,
    ) -> Result<Vec<Self>> {
        pagination::list_all(client, &Self::endpoint(parent), opts).await
    }
}
