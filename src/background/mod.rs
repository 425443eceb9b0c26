//! Background tasks - fire-and-forget work that outlives the response.
//!
//! A request handler hands work to [`TaskQueue::defer`] and returns without
//! waiting for it. Every deferred task is tracked so the process can
//! [`drain`](TaskQueue::drain) the queue before exiting; that is what keeps a
//! cache write started by the last request of a shutdown from being lost.
//! Failures are logged and otherwise ignored: nobody is left to report them to.

use std::fmt::Display;
use std::future::Future;

use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

/// Tracks deferred tasks spawned on the current Tokio runtime.
///
/// Cloning is cheap and every clone shares the same tracker.
///
/// # Examples
///
/// ```rust,no_run
/// use sheetcache::background::TaskQueue;
///
/// # async fn example() {
/// let tasks = TaskQueue::new();
/// tasks.defer("warm-up", async { Ok::<_, std::io::Error>(()) });
/// tasks.drain().await;
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tracker: TaskTracker,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `task` without awaiting it. An `Err` outcome is logged at `warn`
    /// under `name` and dropped.
    pub fn defer<F, E>(&self, name: &'static str, task: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        self.tracker.spawn(async move {
            match task.await {
                Ok(()) => debug!(task = name, "deferred task finished"),
                Err(e) => warn!(task = name, error = %e, "deferred task failed"),
            }
        });
    }

    /// Number of deferred tasks still running.
    pub fn len(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracker.is_empty()
    }

    /// Waits for every task deferred so far. The queue keeps accepting work
    /// afterwards.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn drain_waits_for_pending_tasks() {
        let tasks = TaskQueue::new();
        let done = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let done = Arc::clone(&done);
            tasks.defer("count", async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                done.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(())
            });
        }

        tasks.drain().await;
        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn failing_task_does_not_affect_others() {
        let tasks = TaskQueue::new();
        let done = Arc::new(AtomicUsize::new(0));

        tasks.defer("fail", async { Err::<(), _>("store unavailable") });
        let counter = Arc::clone(&done);
        tasks.defer("ok", async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, &str>(())
        });

        tasks.drain().await;
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn queue_is_reusable_after_drain() {
        let tasks = TaskQueue::new();
        tasks.drain().await;

        let done = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&done);
        tasks.clone().defer("later", async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(())
        });

        tasks.drain().await;
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert_eq!(tasks.len(), 0);
    }
}
