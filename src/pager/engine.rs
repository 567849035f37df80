use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use super::intent::{Effect, PageFailure, PagerIntent};
use super::reducer::{PagerReducer, Transition};
use super::state::{PagerState, PagerStatus};
use crate::cursor::Cursor;

/// Capacity of the error stream. Slow receivers lag rather than block.
pub const ERROR_CHANNEL_CAPACITY: usize = 16;

type Transform<I, O> = Box<dyn Fn(usize, I) -> Option<O> + Send + Sync>;

/// Observable paged collection, independent of the cursor type behind it.
pub trait PagedCollection<O>: Send + Sync {
    /// Requests the next page. Ignored while a request is outstanding or once
    /// the sequence is exhausted.
    fn fetch(&self);

    /// Aborts the outstanding request, if any.
    fn cancel(&self);

    /// Restarts from the initial cursor and clears the aggregate.
    fn reset(&self);

    fn elements(&self) -> watch::Receiver<Vec<O>>;

    fn errors(&self) -> broadcast::Receiver<PageFailure>;

    fn status(&self) -> watch::Receiver<PagerStatus>;
}

/// Paged-collection engine.
///
/// Turns a chain of cursors into one growing list of transformed items. Each
/// `fetch()` resolves the next cursor and then fetches its page; failures are
/// published on the error stream and leave the engine in a pending state from
/// which the same step can be retried.
pub struct Pager<C: Cursor, O> {
    inner: Arc<PagerInner<C, O>>,
}

struct Machine<C> {
    state: PagerState<C>,
    next_ticket: u64,
    task: Option<JoinHandle<()>>,
}

struct PagerInner<C: Cursor, O> {
    initial: Arc<C>,
    transform: Transform<C::Item, O>,
    machine: Mutex<Machine<C>>,
    elements: watch::Sender<Vec<O>>,
    errors: broadcast::Sender<PageFailure>,
    status: watch::Sender<PagerStatus>,
    runtime: Handle,
}

impl<C, O> Pager<C, O>
where
    C: Cursor,
    O: Send + Sync + 'static,
{
    /// Creates an engine that spawns its requests on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new<F>(initial: C, transform: F) -> Self
    where
        F: Fn(usize, C::Item) -> Option<O> + Send + Sync + 'static,
    {
        Self::with_runtime(initial, transform, Handle::current())
    }

    pub fn with_runtime<F>(initial: C, transform: F, runtime: Handle) -> Self
    where
        F: Fn(usize, C::Item) -> Option<O> + Send + Sync + 'static,
    {
        let initial = Arc::new(initial);
        let state = PagerState::NextPending {
            cursor: Arc::clone(&initial),
        };
        let (elements, _) = watch::channel(Vec::new());
        let (errors, _) = broadcast::channel(ERROR_CHANNEL_CAPACITY);
        let (status, _) = watch::channel(state.status());

        Self {
            inner: Arc::new(PagerInner {
                initial,
                transform: Box::new(transform),
                machine: Mutex::new(Machine {
                    state,
                    next_ticket: 0,
                    task: None,
                }),
                elements,
                errors,
                status,
                runtime,
            }),
        }
    }

    pub fn fetch(&self) {
        self.inner.dispatch(PagerIntent::Fetch);
    }

    pub fn cancel(&self) {
        self.inner.dispatch(PagerIntent::Cancel);
    }

    pub fn reset(&self) {
        let initial = Arc::clone(&self.inner.initial);
        self.inner.dispatch(PagerIntent::Reset { initial });
    }

    /// Receiver for the aggregated list.
    pub fn elements(&self) -> watch::Receiver<Vec<O>> {
        self.inner.elements.subscribe()
    }

    /// Copy of the aggregated list as of now.
    pub fn snapshot(&self) -> Vec<O>
    where
        O: Clone,
    {
        self.inner.elements.borrow().clone()
    }

    /// Receiver for failures published after this call.
    pub fn errors(&self) -> broadcast::Receiver<PageFailure> {
        self.inner.errors.subscribe()
    }

    pub fn status(&self) -> watch::Receiver<PagerStatus> {
        self.inner.status.subscribe()
    }

    pub fn state(&self) -> PagerState<C> {
        self.inner.machine.lock().state.clone()
    }

    /// Waits until no request is outstanding.
    pub async fn wait_idle(&self) {
        let mut status = self.status();
        let _ = status.wait_for(|status| !status.is_busy()).await;
    }
}

impl<C, O> PagedCollection<O> for Pager<C, O>
where
    C: Cursor,
    O: Send + Sync + 'static,
{
    fn fetch(&self) {
        Pager::fetch(self);
    }

    fn cancel(&self) {
        Pager::cancel(self);
    }

    fn reset(&self) {
        Pager::reset(self);
    }

    fn elements(&self) -> watch::Receiver<Vec<O>> {
        Pager::elements(self)
    }

    fn errors(&self) -> broadcast::Receiver<PageFailure> {
        Pager::errors(self)
    }

    fn status(&self) -> watch::Receiver<PagerStatus> {
        Pager::status(self)
    }
}

impl<C, O> PagerInner<C, O>
where
    C: Cursor,
    O: Send + Sync + 'static,
{
    /// Applies one intent under the engine lock.
    fn dispatch(self: &Arc<Self>, intent: PagerIntent<C>) {
        let mut machine = self.machine.lock();
        machine.next_ticket += 1;
        let ticket = machine.next_ticket;

        let name = intent.name();
        let from = machine.state.status();
        let Transition { state, effects } =
            PagerReducer::reduce(machine.state.clone(), intent, ticket);
        machine.state = state;
        let to = machine.state.status();

        tracing::debug!(
            intent = name,
            from = ?from,
            to = ?to,
            effects = ?effects,
            "Pager transition"
        );

        for effect in effects {
            self.apply(&mut machine, effect);
        }

        self.status.send_if_modified(|status| {
            let changed = *status != to;
            *status = to;
            changed
        });
    }

    fn apply(self: &Arc<Self>, machine: &mut Machine<C>, effect: Effect<C>) {
        match effect {
            Effect::StartResolve { cursor, generation } => {
                let inner = Arc::downgrade(self);
                let handle = self.runtime.spawn(async move {
                    let result = cursor.resolve_next().await.map_err(Arc::new);
                    complete(inner, PagerIntent::Resolved { generation, result });
                });
                machine.task = Some(handle);
            }
            Effect::StartFetch { cursor, generation } => {
                let inner = Arc::downgrade(self);
                let handle = self.runtime.spawn(async move {
                    let result = cursor.fetch_page().await.map_err(Arc::new);
                    complete(inner, PagerIntent::Fetched { generation, result });
                });
                machine.task = Some(handle);
            }
            Effect::Abort => {
                if let Some(task) = machine.task.take() {
                    task.abort();
                }
            }
            Effect::Append(items) => {
                let transform = &self.transform;
                self.elements.send_modify(|list| {
                    let base = list.len();
                    let page = items
                        .into_iter()
                        .enumerate()
                        .filter_map(|(offset, item)| transform(base + offset, item));
                    list.extend(page);
                });
            }
            Effect::Clear => {
                self.elements.send_if_modified(|list| {
                    let changed = !list.is_empty();
                    list.clear();
                    changed
                });
            }
            Effect::Emit(failure) => {
                tracing::warn!(
                    phase = ?failure.phase,
                    error_type = failure.error.error_type(),
                    error = %failure.error,
                    "Page request failed"
                );
                // No subscribers is not an error.
                let _ = self.errors.send(failure);
            }
        }
    }
}

/// Feeds a completion back into the engine unless it has been dropped.
fn complete<C, O>(inner: Weak<PagerInner<C, O>>, intent: PagerIntent<C>)
where
    C: Cursor,
    O: Send + Sync + 'static,
{
    if let Some(inner) = inner.upgrade() {
        inner.dispatch(intent);
    }
}

impl<C: Cursor, O> Drop for PagerInner<C, O> {
    fn drop(&mut self) {
        if let Some(task) = self.machine.get_mut().task.take() {
            task.abort();
        }
    }
}
