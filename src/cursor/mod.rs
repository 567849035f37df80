//! Cursor abstraction over a paginated remote sequence.
//!
//! A cursor refers to one page of data and knows how to find the page after
//! it. Cursors are immutable: resolving the next page produces a new cursor
//! and leaves the current one untouched, so a failed resolution can simply
//! be retried on the same value.

mod mock;

use async_trait::async_trait;

use crate::http::FetchError;

pub use mock::MockCursor;

/// Reference to one page within an ordered remote sequence.
#[async_trait]
pub trait Cursor: Send + Sync + Sized + 'static {
    /// Raw item type held by a page.
    type Item: Send + 'static;

    /// Returns the items of the page this cursor refers to.
    ///
    /// Must be repeatable: the engine calls it again when a previous attempt
    /// failed or was cancelled.
    async fn fetch_page(&self) -> Result<Vec<Self::Item>, FetchError>;

    /// Resolves the cursor for the following page.
    ///
    /// `Ok(None)` marks the end of the sequence.
    async fn resolve_next(&self) -> Result<Option<Self>, FetchError>;
}
