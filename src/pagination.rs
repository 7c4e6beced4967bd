//! Pagination utilities for Linode API list endpoints.
//!
//! Every collection endpoint returns the same envelope:
//! `{"data": [...], "page": 1, "pages": 3, "results": 250}`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::LinodeClient;
use crate::error::Result;
use crate::filter::Filter;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// A page of results from the Linode API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: u32,
    /// Total number of pages.
    #[serde(default)]
    pub pages: u32,
    /// Total number of items across all pages.
    #[serde(default)]
    pub results: u64,
}

impl<T> Page<T> {
    /// Whether pages after this one exist.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.pages
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            pages: self.pages,
            results: self.results,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Pagination and filtering for list requests.
///
/// `page` and `page_size` travel as query parameters, the filter as the
/// `X-Filter` header. Leaving `page` unset (or zero) asks [`list_all`] to
/// fetch every page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListOptions {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page (the API accepts 25 to 500).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Raw JSON filter expression, sent as `X-Filter`.
    #[serde(skip)]
    pub filter: Option<String>,
}

impl ListOptions {
    /// Options for a specific page with an optional raw filter.
    #[must_use]
    pub fn new(page: u32, filter: Option<String>) -> Self {
        Self {
            page: Some(page),
            page_size: None,
            filter,
        }
    }

    /// Options for a specific page.
    #[must_use]
    pub fn for_page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Default::default()
        }
    }

    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the filter from a typed [`Filter`].
    #[must_use]
    pub fn with_filter(mut self, filter: &Filter) -> Self {
        self.filter = Some(filter.to_json());
        self
    }

    /// The explicitly requested page, treating zero as unset.
    pub fn requested_page(&self) -> Option<u32> {
        self.page.filter(|p| *p > 0)
    }
}

/// Fetch a list endpoint, following pagination unless a page is pinned.
///
/// With `opts.page` set to a positive number only that page is returned.
/// Otherwise the first page is fetched and then every remaining page the
/// first response reports, reusing the page size and filter.
///
/// # Errors
///
/// Returns the first error any page request produces.
#[tracing::instrument(skip(client, opts))]
pub async fn list_all<T>(
    client: &LinodeClient,
    path: &str,
    opts: Option<&ListOptions>,
) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let base = opts.cloned().unwrap_or_default();

    if let Some(page) = base.requested_page() {
        let result: Page<T> = client.get_page(path, &ListOptions { page: Some(page), ..base }).await?;
        return Ok(result.data);
    }

    let first: Page<T> = client
        .get_page(path, &ListOptions { page: Some(1), ..base.clone() })
        .await?;

    let pages = if first.pages > MAX_PAGES {
        tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
        MAX_PAGES
    } else {
        first.pages
    };

    let mut all_items = first.data;
    for page in 2..=pages {
        let next: Page<T> = client
            .get_page(path, &ListOptions { page: Some(page), ..base.clone() })
            .await?;
        all_items.extend(next.data);
    }

    Ok(all_items)
}
