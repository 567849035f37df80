use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::entity::{CollectionItem, CollectionResponse};
use crate::cursor::Cursor;
use crate::http::{get_json, FetchError, GetService};

/// Cursor over a paginated collection endpoint.
///
/// Each instance holds the items of one page plus the URL of the page after
/// it. Resolving the next cursor performs the network request, so
/// `fetch_page` only hands back what is already held.
pub struct CollectionRepository<E> {
    items: Vec<CollectionItem<E>>,
    next_url: Option<Url>,
    service: Arc<dyn GetService>,
}

impl<E> CollectionRepository<E> {
    /// Initial cursor for a query URL. Holds no items; the first
    /// `resolve_next` fetches page one.
    pub fn new(url: Url, service: Arc<dyn GetService>) -> Self {
        Self::with_items(Vec::new(), Some(url), service)
    }

    /// Cursor for an already-decoded page.
    pub fn with_items(
        items: Vec<CollectionItem<E>>,
        next_url: Option<Url>,
        service: Arc<dyn GetService>,
    ) -> Self {
        Self {
            items,
            next_url,
            service,
        }
    }

    pub fn items(&self) -> &[CollectionItem<E>] {
        &self.items
    }

    pub fn next_url(&self) -> Option<&Url> {
        self.next_url.as_ref()
    }
}

#[async_trait]
impl<E> Cursor for CollectionRepository<E>
where
    E: DeserializeOwned + Clone + Send + Sync + 'static,
{
    type Item = CollectionItem<E>;

    async fn fetch_page(&self) -> Result<Vec<CollectionItem<E>>, FetchError> {
        Ok(self.items.clone())
    }

    async fn resolve_next(&self) -> Result<Option<Self>, FetchError> {
        let Some(url) = &self.next_url else {
            return Ok(None);
        };

        let response: CollectionResponse<E> = get_json(self.service.as_ref(), url).await?;
        let collection = response.collection;
        let next_url = collection.next_link().map(|link| link.href.url().clone());

        tracing::debug!(
            url = %url,
            items = collection.items.len(),
            has_next = next_url.is_some(),
            "Resolved collection page"
        );

        Ok(Some(Self::with_items(
            collection.items,
            next_url,
            Arc::clone(&self.service),
        )))
    }
}

impl<E> Clone for CollectionRepository<E>
where
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            next_url: self.next_url.clone(),
            service: Arc::clone(&self.service),
        }
    }
}

/// Equal when the held items and next URL match. The service is not compared.
impl<E> PartialEq for CollectionRepository<E>
where
    E: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.next_url == other.next_url
    }
}

impl<E> fmt::Debug for CollectionRepository<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRepository")
            .field("items", &self.items)
            .field("next_url", &self.next_url.as_ref().map(Url::as_str))
            .finish()
    }
}
