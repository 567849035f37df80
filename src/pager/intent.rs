//! Intents and effects of the paging engine.

use std::fmt;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::http::FetchError;

/// Phase of the paging cycle in which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Resolving the cursor of the next page.
    Resolve,
    /// Fetching the items of the current page.
    Fetch,
}

/// Failure published on the engine's error stream.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub phase: Phase,
    pub error: Arc<FetchError>,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

/// Requests from callers and completions of asynchronous operations.
pub enum PagerIntent<C: Cursor> {
    /// Caller asks for the next page.
    Fetch,
    /// Caller aborts the outstanding operation.
    Cancel,
    /// Caller restarts from the initial cursor.
    Reset { initial: Arc<C> },
    /// `resolve_next` completed.
    Resolved {
        generation: u64,
        result: Result<Option<C>, Arc<FetchError>>,
    },
    /// `fetch_page` completed.
    Fetched {
        generation: u64,
        result: Result<Vec<C::Item>, Arc<FetchError>>,
    },
}

impl<C: Cursor> PagerIntent<C> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Cancel => "cancel",
            Self::Reset { .. } => "reset",
            Self::Resolved { .. } => "resolved",
            Self::Fetched { .. } => "fetched",
        }
    }
}

/// Side effects requested by the reducer and carried out by the engine.
pub enum Effect<C: Cursor> {
    /// Start `resolve_next` on `cursor`, tagged with `generation`.
    StartResolve { cursor: Arc<C>, generation: u64 },
    /// Start `fetch_page` on `cursor`, tagged with `generation`.
    StartFetch { cursor: Arc<C>, generation: u64 },
    /// Abort the outstanding operation.
    Abort,
    /// Transform and append a page of items to the aggregate.
    Append(Vec<C::Item>),
    /// Empty the aggregate.
    Clear,
    /// Publish a failure on the error stream.
    Emit(PageFailure),
}

impl<C: Cursor> fmt::Debug for Effect<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartResolve { generation, .. } => {
                write!(f, "StartResolve {{ generation: {generation} }}")
            }
            Self::StartFetch { generation, .. } => {
                write!(f, "StartFetch {{ generation: {generation} }}")
            }
            Self::Abort => write!(f, "Abort"),
            Self::Append(items) => write!(f, "Append({} items)", items.len()),
            Self::Clear => write!(f, "Clear"),
            Self::Emit(failure) => write!(f, "Emit({:?})", failure.phase),
        }
    }
}
