//! Cancellable delayed actions on the tokio runtime

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Handle to an action scheduled to run after a delay.
///
/// Dropping the handle does not cancel the action; call [`ScheduledTask::cancel`].
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Must be called from within a tokio runtime.
    pub fn after<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });

        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Runs only the last of a burst of calls, once `wait` has passed without a
/// newer call.
#[derive(Clone)]
pub struct Debouncer {
    wait: Duration,
    pending: Arc<Mutex<Option<ScheduledTask>>>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if let Some(previous) = pending.take() {
            if !previous.is_finished() {
                previous.cancel();
            }
        }
        *pending = Some(ScheduledTask::after(self.wait, action));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_task_runs_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let task = ScheduledTask::after(Duration::from_millis(100), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_never_runs() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let task = ScheduledTask::after(Duration::from_millis(100), move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        task.cancel();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_keeps_last_call() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let debouncer = Debouncer::new(Duration::from_millis(250));

        for width in [500, 700, 900] {
            let calls = calls.clone();
            debouncer.call(move || calls.lock().push(width));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert!(calls.lock().is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(*calls.lock(), vec![900]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_runs_again_after_settling() {
        let counter = Arc::new(AtomicUsize::new(0));
        let debouncer = Debouncer::new(Duration::from_millis(250));

        for _ in 0..2 {
            let c = counter.clone();
            debouncer.call(move || {
                c.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(300)).await;
        }

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
