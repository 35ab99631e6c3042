// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{Scheduler, Subscription, Work};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

struct Task {
    work: Work,
    handle: Subscription,
}

/// A scheduler that only runs work when the test tells it to.
///
/// Scheduled work is queued in FIFO order. Unsubscribing the handle returned by
/// [`schedule`](Scheduler::schedule) cancels the work if it is still queued.
///
/// ```
/// use fluxion_core::Scheduler;
/// use fluxion_test_utils::ManualScheduler;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let scheduler = ManualScheduler::new();
/// let ran = Arc::new(AtomicBool::new(false));
/// let flag = ran.clone();
/// scheduler.schedule(Box::new(move || flag.store(true, Ordering::SeqCst)));
///
/// assert!(!ran.load(Ordering::SeqCst));
/// assert_eq!(scheduler.run_all(), 1);
/// assert!(ran.load(Ordering::SeqCst));
/// ```
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued, not yet cancelled tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .iter()
            .filter(|task| !task.handle.is_closed())
            .count()
    }

    /// Runs the oldest live task. Returns `false` when nothing was left to run.
    pub fn run_next(&self) -> bool {
        loop {
            let Some(task) = self.queue.lock().pop_front() else {
                return false;
            };
            if task.handle.is_closed() {
                continue;
            }
            task.handle.unsubscribe();
            (task.work)();
            return true;
        }
    }

    /// Runs tasks until the queue is empty, including tasks scheduled while running.
    /// Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, work: Work) -> Subscription {
        let handle = Subscription::new();
        self.queue.lock().push_back(Task {
            work,
            handle: handle.clone(),
        });
        handle
    }
}
