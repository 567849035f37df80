//! Reducer for the paging engine.

use std::sync::Arc;

use super::intent::{Effect, PageFailure, PagerIntent, Phase};
use super::state::PagerState;
use crate::cursor::Cursor;

/// Result of reducing one intent.
pub struct Transition<C: Cursor> {
    pub state: PagerState<C>,
    pub effects: Vec<Effect<C>>,
}

impl<C: Cursor> Transition<C> {
    fn to(state: PagerState<C>) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn with(state: PagerState<C>, effects: Vec<Effect<C>>) -> Self {
        Self { state, effects }
    }
}

/// Reducer for paging state transitions.
///
/// The reducer is the only place where state transitions happen. It performs
/// no I/O: starting operations, appending items and publishing errors are
/// returned as [`Effect`]s for the engine to carry out.
pub struct PagerReducer;

impl PagerReducer {
    /// Process an intent and return the new state with its effects.
    ///
    /// `ticket` is a fresh generation number; it tags any operation started
    /// by this transition.
    pub fn reduce<C: Cursor>(
        state: PagerState<C>,
        intent: PagerIntent<C>,
        ticket: u64,
    ) -> Transition<C> {
        match intent {
            PagerIntent::Fetch => match state {
                PagerState::NextPending { cursor } => Transition::with(
                    PagerState::NextResolving {
                        cursor: Arc::clone(&cursor),
                        generation: ticket,
                    },
                    vec![Effect::StartResolve {
                        cursor,
                        generation: ticket,
                    }],
                ),
                PagerState::FetchPending { cursor } => Transition::with(
                    PagerState::FetchResolving {
                        cursor: Arc::clone(&cursor),
                        generation: ticket,
                    },
                    vec![Effect::StartFetch {
                        cursor,
                        generation: ticket,
                    }],
                ),
                // Already busy, or nothing left to fetch.
                other => Transition::to(other),
            },

            PagerIntent::Cancel => match state {
                PagerState::NextResolving { cursor, .. } => {
                    Transition::with(PagerState::NextPending { cursor }, vec![Effect::Abort])
                }
                PagerState::FetchResolving { cursor, .. } => {
                    Transition::with(PagerState::FetchPending { cursor }, vec![Effect::Abort])
                }
                other => Transition::to(other),
            },

            PagerIntent::Reset { initial } => {
                let mut effects = Vec::new();
                if state.status().is_busy() {
                    effects.push(Effect::Abort);
                }
                effects.push(Effect::Clear);
                Transition::with(PagerState::NextPending { cursor: initial }, effects)
            }

            PagerIntent::Resolved { generation, result } => match state {
                PagerState::NextResolving {
                    cursor,
                    generation: current,
                } if current == generation => match result {
                    Ok(Some(next)) => {
                        // The resolved page is fetched right away: FetchPending
                        // is passed through within the same transition.
                        let pending = PagerState::FetchPending {
                            cursor: Arc::new(next),
                        };
                        Self::reduce(pending, PagerIntent::Fetch, ticket)
                    }
                    Ok(None) => Transition::to(PagerState::Exhausted { cursor }),
                    Err(error) => Transition::with(
                        PagerState::NextPending { cursor },
                        vec![Effect::Emit(PageFailure {
                            phase: Phase::Resolve,
                            error,
                        })],
                    ),
                },
                // Stale completion.
                other => Transition::to(other),
            },

            PagerIntent::Fetched { generation, result } => match state {
                PagerState::FetchResolving {
                    cursor,
                    generation: current,
                } if current == generation => match result {
                    Ok(items) => Transition::with(
                        PagerState::NextPending { cursor },
                        vec![Effect::Append(items)],
                    ),
                    Err(error) => Transition::with(
                        PagerState::FetchPending { cursor },
                        vec![Effect::Emit(PageFailure {
                            phase: Phase::Fetch,
                            error,
                        })],
                    ),
                },
                other => Transition::to(other),
            },
        }
    }
}
