//! Task queue for deferred state changes
//!
//! Everything the manager does later (next-tick writes, cool-down releases)
//! goes through a single-threaded [`Scheduler`] running on virtual time. The
//! host advances the clock; with the `tokio-runtime` feature,
//! [`drive_timers`] does that from tokio's clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// A unit of deferred work applied to the scheduler's owner
pub type Task<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Internal wrapper ordering tasks by deadline, then submission order
struct ScheduledTask<T> {
    due: Duration,
    seq: u64,
    label: &'static str,
    task: Task<T>,
}

impl<T> PartialEq for ScheduledTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for ScheduledTask<T> {}

impl<T> PartialOrd for ScheduledTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for ScheduledTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: earliest deadline first, then earliest submission
        match other.due.cmp(&self.due) {
            Ordering::Equal => other.seq.cmp(&self.seq),
            ordering => ordering,
        }
    }
}

/// Single-threaded timer queue on virtual time
///
/// Tasks due at the same instant run in the order they were queued, so a
/// next-tick task always runs after the handler that queued it and before
/// anything queued later.
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<ScheduledTask<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Virtual time elapsed since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue a task for the next tick
    pub fn next_tick<F>(&mut self, label: &'static str, task: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.schedule(Duration::ZERO, label, task);
    }

    /// Queue a task to run once `delay` has elapsed
    pub fn schedule<F>(&mut self, delay: Duration, label: &'static str, task: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let seq = self.next_seq;
        self.next_seq += 1;
        log::debug!("scheduling '{}' in {:?}", label, delay);
        self.queue.push(ScheduledTask {
            due: self.now + delay,
            seq,
            label,
            task: Box::new(task),
        });
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Time from now until the earliest queued task is due
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .peek()
            .map(|next| next.due.saturating_sub(self.now))
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its deadline
    pub fn pop_due(&mut self, until: Duration) -> Option<Task<T>> {
        if self.queue.peek()?.due > until {
            return None;
        }
        let next = self.queue.pop()?;
        self.now = self.now.max(next.due);
        log::trace!("running '{}' at {:?}", next.label, self.now);
        Some(next.task)
    }

    /// Moves the clock forward once every task due by `until` has run
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "tokio-runtime")]
pub use tokio_driver::drive_timers;

#[cfg(feature = "tokio-runtime")]
mod tokio_driver {
    use crate::core::manager::MapManager;
    use std::{sync::Arc, time::Duration};
    use tokio::sync::{watch, Mutex};
    use tokio::time::Instant;

    /// Advances a shared manager from tokio's clock until `shutdown` flips to true
    ///
    /// Sleeps until the next queued task is due, but never longer than
    /// `poll_interval`, so work queued while sleeping is picked up promptly.
    pub async fn drive_timers(
        manager: Arc<Mutex<MapManager>>,
        poll_interval: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut last = Instant::now();
        loop {
            let wait = manager
                .lock()
                .await
                .time_until_next_task()
                .map_or(poll_interval, |due| due.min(poll_interval));

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        log::debug!("timer driver shutting down");
                        break;
                    }
                }
            }

            let now = Instant::now();
            manager.lock().await.advance(now - last);
            last = now;
        }
    }
}
