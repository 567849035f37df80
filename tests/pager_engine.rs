//! Behaviour of the paging engine driven by mock cursors.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{chain, server_error};
use nasa_photos::cursor::MockCursor;
use nasa_photos::pager::{Pager, PagerState, PagerStatus, Phase};

fn identity(_: usize, item: &'static str) -> Option<&'static str> {
    Some(item)
}

async fn fetch_and_wait<O: Send + Sync + 'static>(pager: &Pager<MockCursor<&'static str>, O>) {
    pager.fetch();
    pager.wait_idle().await;
}

/// Counts calls and fails the first `failures` of them.
fn flaky<T: Clone + Send + Sync + 'static>(
    failures: usize,
    calls: Arc<AtomicUsize>,
    value: T,
) -> impl Fn() -> Result<T, nasa_photos::http::FetchError> + Send + Sync + 'static {
    move || {
        if calls.fetch_add(1, Ordering::SeqCst) < failures {
            Err(server_error())
        } else {
            Ok(value.clone())
        }
    }
}

// -- Scenarios ----------------------------------------------------------------

#[tokio::test]
async fn first_fetch_resolves_and_fetches_page() {
    let pager = Pager::new(chain(vec![vec!["A"], vec!["B"]]), identity);
    let mut elements = pager.elements();

    fetch_and_wait(&pager).await;

    assert_eq!(*elements.borrow_and_update(), vec!["A"]);
    assert_eq!(pager.state().status(), PagerStatus::NextPending);
}

#[tokio::test]
async fn resolve_failure_is_reported_and_retryable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let page = MockCursor::page(vec!["B"]);
    let root = MockCursor::with_id("root").on_next(flaky(1, calls.clone(), Some(page)));
    let pager = Pager::new(root, identity);
    let mut errors = pager.errors();

    fetch_and_wait(&pager).await;

    assert!(pager.snapshot().is_empty());
    let failure = errors.try_recv().unwrap();
    assert_eq!(failure.phase, Phase::Resolve);
    assert!(errors.try_recv().is_err());
    assert_eq!(pager.state().status(), PagerStatus::NextPending);

    fetch_and_wait(&pager).await;

    assert_eq!(pager.snapshot(), vec!["B"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn chained_pages_accumulate_in_order() {
    let pager = Pager::new(chain(vec![vec!["X"], vec!["Y"]]), identity);

    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["X"]);

    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["X", "Y"]);
}

#[tokio::test]
async fn empty_sequence_stays_empty_without_errors() {
    let pager = Pager::new(chain(Vec::new()), identity);
    let mut errors = pager.errors();

    for _ in 0..3 {
        fetch_and_wait(&pager).await;
    }

    assert!(pager.snapshot().is_empty());
    assert!(errors.try_recv().is_err());
    assert_eq!(pager.state().status(), PagerStatus::Exhausted);
}

#[tokio::test]
async fn reset_restarts_from_initial_cursor() {
    let pager = Pager::new(chain(vec![vec!["X"], vec!["Y"], vec!["Z"]]), identity);
    fetch_and_wait(&pager).await;
    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["X", "Y"]);

    pager.reset();
    assert!(pager.snapshot().is_empty());

    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["X"]);
}

// -- Properties ---------------------------------------------------------------

#[tokio::test]
async fn successful_fetches_only_append() {
    let pager = Pager::new(
        chain(vec![vec!["a", "b"], vec!["c"], vec!["d", "e"]]),
        identity,
    );

    let mut previous = Vec::new();
    for _ in 0..3 {
        fetch_and_wait(&pager).await;
        let current = pager.snapshot();
        assert!(current.len() > previous.len());
        assert_eq!(&current[..previous.len()], previous.as_slice());
        previous = current;
    }
    assert_eq!(previous, vec!["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn fetch_failure_retries_same_cursor_without_duplicates() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let resolves = Arc::new(AtomicUsize::new(0));
    let page = MockCursor::with_id("page").on_fetch(flaky(2, fetches.clone(), vec!["A", "B"]));
    let root = MockCursor::with_id("root").on_next(flaky(0, resolves.clone(), Some(page)));
    let pager = Pager::new(root, identity);
    let mut errors = pager.errors();

    fetch_and_wait(&pager).await;
    assert_eq!(errors.try_recv().unwrap().phase, Phase::Fetch);
    assert_eq!(pager.state().status(), PagerStatus::FetchPending);

    fetch_and_wait(&pager).await;
    assert_eq!(errors.try_recv().unwrap().phase, Phase::Fetch);

    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["A", "B"]);
    assert_eq!(fetches.load(Ordering::SeqCst), 3);
    assert_eq!(resolves.load(Ordering::SeqCst), 1);
    assert!(matches!(
        pager.state(),
        PagerState::NextPending { cursor } if cursor.id() == "page"
    ));
}

#[tokio::test]
async fn reset_is_idempotent() {
    let pager = Pager::new(chain(vec![vec!["X"]]), identity);
    fetch_and_wait(&pager).await;

    pager.reset();
    let once = pager.state();
    pager.reset();

    assert_eq!(pager.state(), once);
    assert!(matches!(
        pager.state(),
        PagerState::NextPending { cursor } if cursor.id() == "root"
    ));
    assert!(pager.snapshot().is_empty());
}

#[tokio::test]
async fn exhausted_sequence_ignores_fetch() {
    let pager = Pager::new(chain(vec![vec!["X"]]), identity);
    let mut errors = pager.errors();

    for _ in 0..4 {
        fetch_and_wait(&pager).await;
    }

    assert_eq!(pager.snapshot(), vec!["X"]);
    assert_eq!(*pager.status().borrow(), PagerStatus::Exhausted);
    assert!(errors.try_recv().is_err());
}

#[tokio::test]
async fn indices_continue_across_pages() {
    let pager = Pager::new(
        chain(vec![vec!["a", "b"], vec!["c", "d", "e"]]),
        |index, item: &'static str| Some((index, item)),
    );

    fetch_and_wait(&pager).await;
    fetch_and_wait(&pager).await;

    let indices: Vec<usize> = pager.snapshot().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

// -- Concurrency --------------------------------------------------------------

#[tokio::test]
async fn fetch_while_resolving_is_ignored() {
    let resolves = Arc::new(AtomicUsize::new(0));
    let page = MockCursor::page(vec!["A"]);
    let root = MockCursor::with_id("root")
        .on_next(flaky(0, resolves.clone(), Some(page)))
        .with_latency(Duration::from_millis(20));
    let pager = Pager::new(root, identity);

    pager.fetch();
    pager.fetch();
    pager.fetch();
    pager.wait_idle().await;

    assert_eq!(resolves.load(Ordering::SeqCst), 1);
    assert_eq!(pager.snapshot(), vec!["A"]);
}

#[tokio::test]
async fn cancel_during_resolve_discards_result() {
    let page = MockCursor::page(vec!["A"]);
    let root = MockCursor::with_id("root")
        .on_next(move || Ok(Some(page.clone())))
        .with_latency(Duration::from_millis(50));
    let pager = Pager::new(root, identity);
    let mut errors = pager.errors();

    pager.fetch();
    assert_eq!(*pager.status().borrow(), PagerStatus::NextResolving);
    pager.cancel();
    assert_eq!(*pager.status().borrow(), PagerStatus::NextPending);

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(pager.snapshot().is_empty());
    assert!(errors.try_recv().is_err());

    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["A"]);
}

#[tokio::test]
async fn cancel_during_fetch_returns_to_fetch_pending() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let page = MockCursor::with_id("page")
        .on_fetch(flaky(0, fetches.clone(), vec!["A"]))
        .with_latency(Duration::from_millis(50));
    let root = MockCursor::with_id("root").on_next(move || Ok(Some(page.clone())));
    let pager = Pager::new(root, identity);

    pager.fetch();
    let mut status = pager.status();
    status
        .wait_for(|s| *s == PagerStatus::FetchResolving)
        .await
        .unwrap();
    pager.cancel();

    assert!(matches!(
        pager.state(),
        PagerState::FetchPending { cursor } if cursor.id() == "page"
    ));
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(pager.snapshot().is_empty());

    fetch_and_wait(&pager).await;
    assert_eq!(pager.snapshot(), vec!["A"]);
}

#[tokio::test]
async fn reset_during_fetch_discards_late_page() {
    let page = MockCursor::page(vec!["late"]).with_latency(Duration::from_millis(50));
    let root = MockCursor::with_id("root").on_next(move || Ok(Some(page.clone())));
    let pager = Pager::new(root, identity);

    pager.fetch();
    pager
        .status()
        .wait_for(|s| *s == PagerStatus::FetchResolving)
        .await
        .unwrap();
    pager.reset();

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(pager.snapshot().is_empty());
    assert_eq!(*pager.status().borrow(), PagerStatus::NextPending);
}

#[tokio::test]
async fn elements_receiver_is_notified_per_page() {
    let pager = Pager::new(chain(vec![vec!["X"], vec!["Y"]]), identity);
    let mut elements = pager.elements();

    pager.fetch();
    elements.changed().await.unwrap();
    assert_eq!(*elements.borrow_and_update(), vec!["X"]);

    pager.wait_idle().await;
    pager.fetch();
    elements.changed().await.unwrap();
    assert_eq!(*elements.borrow_and_update(), vec!["X", "Y"]);
}
