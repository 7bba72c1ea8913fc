//! A bounded, drop-oldest-on-overflow worker pool for learning tasks,
//! kept distinct from the agent's own executor so a slow judge can
//! never stall a turn.
//!
//! `tokio::sync::mpsc::Sender` can't evict an already-queued item, so
//! the bounded queue itself is a plain `VecDeque` behind a mutex; a
//! `Notify` wakes the single dedicated worker task that drains it.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

type LearningTask = Pin<Box<dyn Future<Output = ()> + Send>>;

struct Inner {
    queue: Mutex<VecDeque<LearningTask>>,
    capacity: usize,
    notify: Notify,
}

/// The learning pool: a single worker draining a bounded task queue.
#[derive(Clone)]
pub struct LearningPool {
    inner: Arc<Inner>,
}

impl LearningPool {
    /// Spawn a pool with room for `capacity` queued tasks.
    pub fn new(capacity: usize) -> Self {
        let inner = Arc::new(Inner {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            notify: Notify::new(),
        });

        let worker_inner = inner.clone();
        tokio::spawn(async move {
            loop {
                worker_inner.notify.notified().await;
                loop {
                    let task = {
                        let mut queue = worker_inner.queue.lock().await;
                        queue.pop_front()
                    };
                    match task {
                        Some(task) => task.await,
                        None => break,
                    }
                }
            }
        });

        Self { inner }
    }

    /// Queue a task. If the queue is already at capacity, the oldest
    /// queued task is dropped and a warning logged.
    pub async fn submit<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut queue = self.inner.queue.lock().await;
        if queue.len() >= self.inner.capacity {
            queue.pop_front();
            tracing::warn!("learning pool queue full, dropping oldest queued task");
        }
        queue.push_back(Box::pin(task));
        drop(queue);
        self.inner.notify.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn submitted_tasks_eventually_run() {
        let pool = LearningPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let counter = counter.clone();
            pool.submit(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn overflow_drops_the_oldest_queued_task() {
        let pool = LearningPool::new(1);
        let ran = Arc::new(AtomicUsize::new(0));

        // Fill the single worker with a long task so the queue backs up,
        // then enqueue two more: the first should be evicted when the
        // second arrives.
        let blocker_started = Arc::new(tokio::sync::Notify::new());
        {
            let blocker_started = blocker_started.clone();
            pool.submit(async move {
                blocker_started.notify_one();
                tokio::time::sleep(Duration::from_millis(100)).await;
            })
            .await;
        }
        blocker_started.notified().await;

        let first_ran = ran.clone();
        pool.submit(async move {
            first_ran.fetch_add(1, Ordering::SeqCst);
        })
        .await;

        let second_ran = ran.clone();
        pool.submit(async move {
            second_ran.fetch_add(10, Ordering::SeqCst);
        })
        .await;

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(ran.load(Ordering::SeqCst), 10);
    }
}
