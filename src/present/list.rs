use std::sync::Arc;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};

use crate::pager::{PageFailure, PagedCollection, PagerStatus};

/// Error prompt shown to the user after a failed page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPrompt {
    pub message: String,
    pub cancellable: bool,
    pub retry_offered: bool,
}

/// List adapter over a paged collection.
///
/// Maps the aggregated elements to display items and turns engine failures
/// into [`ErrorPrompt`]s. Retry is offered for transient failures until
/// `max_retries` consecutive failures have been retried; the count starts
/// over once the list grows or after a reset.
pub struct ListViewModel<O, T> {
    model: Arc<dyn PagedCollection<O>>,
    map: Box<dyn Fn(&O) -> T + Send + Sync>,
    elements: watch::Receiver<Vec<O>>,
    errors: broadcast::Receiver<PageFailure>,
    max_retries: u32,
    failures: u32,
    seen_len: usize,
}

impl<O, T> ListViewModel<O, T> {
    pub fn new<F>(model: Arc<dyn PagedCollection<O>>, max_retries: u32, map: F) -> Self
    where
        F: Fn(&O) -> T + Send + Sync + 'static,
    {
        let elements = model.elements();
        let errors = model.errors();
        let seen_len = elements.borrow().len();
        Self {
            model,
            map: Box::new(map),
            elements,
            errors,
            max_retries,
            failures: 0,
            seen_len,
        }
    }

    /// Display items for the current elements.
    pub fn items(&self) -> Vec<T> {
        self.elements.borrow().iter().map(|e| (self.map)(e)).collect()
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fetch(&self) {
        self.model.fetch();
    }

    /// Re-issues the request that failed.
    pub fn retry(&self) {
        self.model.fetch();
    }

    pub fn cancel(&self) {
        self.model.cancel();
    }

    pub fn reset(&mut self) {
        self.failures = 0;
        self.seen_len = 0;
        self.model.reset();
    }

    /// Element at `index`, or `None` when out of range.
    pub fn select_item(&self, index: usize) -> Option<O>
    where
        O: Clone,
    {
        self.elements.borrow().get(index).cloned()
    }

    pub fn status(&self) -> PagerStatus {
        *self.model.status().borrow()
    }

    /// Waits until the collection has no outstanding request.
    pub async fn wait_idle(&self) {
        let mut status = self.model.status();
        let _ = status.wait_for(|status| !status.is_busy()).await;
    }

    /// Waits for the next failure. Returns `None` once the collection is gone.
    pub async fn next_error(&mut self) -> Option<ErrorPrompt> {
        loop {
            match self.errors.recv().await {
                Ok(failure) => return Some(self.prompt(&failure)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped page failures");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next failure already published, if any.
    pub fn try_error(&mut self) -> Option<ErrorPrompt> {
        loop {
            match self.errors.try_recv() {
                Ok(failure) => return Some(self.prompt(&failure)),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped page failures");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    fn prompt(&mut self, failure: &PageFailure) -> ErrorPrompt {
        let len = self.elements.borrow().len();
        if len != self.seen_len {
            self.failures = 0;
            self.seen_len = len;
        }

        let retry_offered = failure.error.is_transient() && self.failures < self.max_retries;
        self.failures = self.failures.saturating_add(1);

        tracing::debug!(
            phase = ?failure.phase,
            failures = self.failures,
            retry_offered,
            "Page failure prompt"
        );

        ErrorPrompt {
            message: failure.to_string(),
            cancellable: true,
            retry_offered,
        }
    }
}
