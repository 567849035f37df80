use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::Cursor;
use crate::http::FetchError;

type MockFetch<T> = Arc<dyn Fn() -> Result<Vec<T>, FetchError> + Send + Sync>;
type MockNext<T> = Arc<dyn Fn() -> Result<Option<MockCursor<T>>, FetchError> + Send + Sync>;

/// Closure-backed cursor for tests and demos.
///
/// Two mock cursors are equal when their ids match. Without configuration,
/// `fetch_page` fails and `resolve_next` reports the end of the sequence.
pub struct MockCursor<T> {
    id: String,
    fetch: MockFetch<T>,
    next: MockNext<T>,
    latency: Duration,
}

impl<T: 'static> MockCursor<T> {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fetch: Arc::new(|| {
                Err(FetchError::ResourceUnavailable(
                    "mock cursor has no page".to_string(),
                ))
            }),
            next: Arc::new(|| Ok(None)),
            latency: Duration::ZERO,
        }
    }

    /// Replaces the page fetch behaviour.
    pub fn on_fetch<F>(mut self, fetch: F) -> Self
    where
        F: Fn() -> Result<Vec<T>, FetchError> + Send + Sync + 'static,
    {
        self.fetch = Arc::new(fetch);
        self
    }

    /// Replaces the next-cursor resolution behaviour.
    pub fn on_next<F>(mut self, next: F) -> Self
    where
        F: Fn() -> Result<Option<MockCursor<T>>, FetchError> + Send + Sync + 'static,
    {
        self.next = Arc::new(next);
        self
    }

    /// Delays both operations, so cancellation can be observed mid-flight.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<T> MockCursor<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Cursor whose page holds `items`.
    pub fn page(items: Vec<T>) -> Self {
        Self::new().on_fetch(move || Ok(items.clone()))
    }
}

impl<T: 'static> Default for MockCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for MockCursor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            fetch: Arc::clone(&self.fetch),
            next: Arc::clone(&self.next),
            latency: self.latency,
        }
    }
}

impl<T> PartialEq for MockCursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> fmt::Debug for MockCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockCursor").field("id", &self.id).finish()
    }
}

#[async_trait]
impl<T> Cursor for MockCursor<T>
where
    T: Send + Sync + 'static,
{
    type Item = T;

    async fn fetch_page(&self) -> Result<Vec<T>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.fetch)()
    }

    async fn resolve_next(&self) -> Result<Option<Self>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        (self.next)()
    }
}
