//! Paged-collection engine.
//!
//! Drives a chain of [`Cursor`](crate::cursor::Cursor)s and aggregates their
//! pages into one observable list.
//!
//! # Architecture
//!
//! Uses a state/intent/reducer split:
//! - `state.rs` - Engine state enum, one variant per phase
//! - `intent.rs` - Caller requests, task completions and effects
//! - `reducer.rs` - Pure state transitions
//! - `engine.rs` - Lock, task spawning and observables

mod engine;
mod intent;
mod reducer;
mod state;

pub use engine::{PagedCollection, Pager, ERROR_CHANNEL_CAPACITY};
pub use intent::{Effect, PageFailure, PagerIntent, Phase};
pub use reducer::{PagerReducer, Transition};
pub use state::{PagerState, PagerStatus};
