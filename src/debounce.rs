//! Cancellable delayed recomputation.
//!
//! Callers that re-run conflict detection as the user edits a request use a
//! [`Debouncer`] so that a burst of input changes triggers one evaluation.
//! Scheduling a new task cancels the one still waiting.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Runs the most recently scheduled task after a quiet period.
///
/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// any pending task.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms `task` to run after the quiet period, cancelling any pending task.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        }));
    }

    /// Cancels the pending task, if any. Returns true if one was waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("Cancelled pending recomputation");
                true
            }
            _ => false,
        }
    }

    /// Returns true if a task is armed and has not finished.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
