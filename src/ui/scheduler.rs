use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Deferred UI work. At most one task per key is pending at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    SmsFadeIn,
    MessageClear,
    FormReset,
}

/// Keyed delayed callbacks on the Tokio runtime. Scheduling a key that is
/// already pending aborts the earlier task.
#[derive(Default)]
pub struct Scheduler {
    tasks: Mutex<HashMap<TaskKey, JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`. Outside a Tokio runtime nothing is spawned
    /// and the task is handed back to the caller.
    pub fn schedule<F>(&self, key: TaskKey, delay: Duration, task: F) -> Result<(), F>
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            tracing::debug!("No runtime available, {key:?} not scheduled");
            return Err(task);
        };

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        if let Some(previous) = self.lock().insert(key, handle) {
            if !previous.is_finished() {
                tracing::debug!("Replacing pending {key:?} task");
            }
            previous.abort();
        }
        Ok(())
    }

    /// Wait for the task under `key` to finish. Returns true if it ran to
    /// completion. Once joined, the task can no longer be cancelled by key.
    pub async fn join(&self, key: TaskKey) -> bool {
        let handle = self.lock().remove(&key);
        match handle {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }

    /// Abort the pending task for `key`. Returns true if one was still waiting.
    pub fn cancel(&self, key: TaskKey) -> bool {
        match self.lock().remove(&key) {
            Some(handle) => {
                let pending = !handle.is_finished();
                handle.abort();
                pending
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: TaskKey) -> bool {
        self.lock()
            .get(&key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn cancel_all(&self) {
        for (key, handle) in self.lock().drain() {
            if !handle.is_finished() {
                tracing::debug!("Cancelling pending {key:?} task");
            }
            handle.abort();
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TaskKey, JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let make = {
            let hits = hits.clone();
            move || {
                let hits = hits.clone();
                Box::new(move || {
                    hits.fetch_add(1, Ordering::SeqCst);
                }) as Box<dyn FnOnce() + Send>
            }
        };
        (hits, make)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_after_delay() {
        let scheduler = Scheduler::new();
        let (hits, make) = counter();

        let _ = scheduler.schedule(TaskKey::MessageClear, Duration::from_secs(5), make());
        assert!(scheduler.is_pending(TaskKey::MessageClear));

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_pending(TaskKey::MessageClear));
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_task() {
        let scheduler = Scheduler::new();
        let (hits, make) = counter();

        let _ = scheduler.schedule(TaskKey::MessageClear, Duration::from_secs(5), make());
        tokio::time::sleep(Duration::from_secs(3)).await;
        let _ = scheduler.schedule(TaskKey::MessageClear, Duration::from_secs(5), make());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_run() {
        let scheduler = Scheduler::new();
        let (hits, make) = counter();

        let _ = scheduler.schedule(TaskKey::FormReset, Duration::from_secs(3), make());
        let _ = scheduler.schedule(TaskKey::SmsFadeIn, Duration::from_millis(10), make());
        assert!(scheduler.cancel(TaskKey::FormReset));
        assert!(!scheduler.cancel(TaskKey::FormReset));

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn join_waits_for_completion() {
        let scheduler = Scheduler::new();
        let (hits, make) = counter();
        let start = tokio::time::Instant::now();

        let _ = scheduler.schedule(TaskKey::FormReset, Duration::from_secs(3), make());
        assert!(scheduler.join(TaskKey::FormReset).await);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert!(!scheduler.join(TaskKey::FormReset).await);
    }

    #[test]
    fn without_runtime_task_is_returned() {
        let scheduler = Scheduler::new();
        let (hits, make) = counter();

        let task = scheduler
            .schedule(TaskKey::SmsFadeIn, Duration::from_millis(10), make())
            .err()
            .expect("task should come back outside a runtime");
        assert!(!scheduler.is_pending(TaskKey::SmsFadeIn));

        task();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_clears_everything() {
        let scheduler = Scheduler::new();
        let (hits, make) = counter();

        let _ = scheduler.schedule(TaskKey::FormReset, Duration::from_secs(3), make());
        let _ = scheduler.schedule(TaskKey::MessageClear, Duration::from_secs(5), make());
        scheduler.cancel_all();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
