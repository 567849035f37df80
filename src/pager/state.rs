//! States of the paging engine.

use std::fmt;
use std::sync::Arc;

/// Coarse view of [`PagerState`] without the cursor, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerStatus {
    /// Ready to resolve the next page.
    NextPending,
    /// Resolving the next page's cursor.
    NextResolving,
    /// Ready to fetch the current cursor's page.
    FetchPending,
    /// Fetching the current cursor's page.
    FetchResolving,
    /// The sequence has ended.
    Exhausted,
}

impl PagerStatus {
    /// Whether an asynchronous operation is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::NextResolving | Self::FetchResolving)
    }
}

/// State of the paging engine. Every state carries the cursor it acts on.
///
/// Resolving states also carry the generation of the operation they started;
/// a completion is only applied when its generation matches.
pub enum PagerState<C> {
    NextPending { cursor: Arc<C> },
    NextResolving { cursor: Arc<C>, generation: u64 },
    FetchPending { cursor: Arc<C> },
    FetchResolving { cursor: Arc<C>, generation: u64 },
    Exhausted { cursor: Arc<C> },
}

impl<C> PagerState<C> {
    pub fn status(&self) -> PagerStatus {
        match self {
            Self::NextPending { .. } => PagerStatus::NextPending,
            Self::NextResolving { .. } => PagerStatus::NextResolving,
            Self::FetchPending { .. } => PagerStatus::FetchPending,
            Self::FetchResolving { .. } => PagerStatus::FetchResolving,
            Self::Exhausted { .. } => PagerStatus::Exhausted,
        }
    }

    pub fn cursor(&self) -> &Arc<C> {
        match self {
            Self::NextPending { cursor }
            | Self::NextResolving { cursor, .. }
            | Self::FetchPending { cursor }
            | Self::FetchResolving { cursor, .. }
            | Self::Exhausted { cursor } => cursor,
        }
    }

    /// Generation of the outstanding operation, if any.
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::NextResolving { generation, .. } | Self::FetchResolving { generation, .. } => {
                Some(*generation)
            }
            _ => None,
        }
    }
}

impl<C> Clone for PagerState<C> {
    fn clone(&self) -> Self {
        match self {
            Self::NextPending { cursor } => Self::NextPending {
                cursor: Arc::clone(cursor),
            },
            Self::NextResolving { cursor, generation } => Self::NextResolving {
                cursor: Arc::clone(cursor),
                generation: *generation,
            },
            Self::FetchPending { cursor } => Self::FetchPending {
                cursor: Arc::clone(cursor),
            },
            Self::FetchResolving { cursor, generation } => Self::FetchResolving {
                cursor: Arc::clone(cursor),
                generation: *generation,
            },
            Self::Exhausted { cursor } => Self::Exhausted {
                cursor: Arc::clone(cursor),
            },
        }
    }
}

impl<C: PartialEq> PartialEq for PagerState<C> {
    fn eq(&self, other: &Self) -> bool {
        self.status() == other.status()
            && self.generation() == other.generation()
            && self.cursor() == other.cursor()
    }
}

impl<C: fmt::Debug> fmt::Debug for PagerState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(&format!("{:?}", self.status()));
        s.field("cursor", self.cursor());
        if let Some(generation) = self.generation() {
            s.field("generation", &generation);
        }
        s.finish()
    }
}
