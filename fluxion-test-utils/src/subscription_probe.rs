// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{Observable, Subscriber, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug)]
struct ProbeLog<L> {
    subscribed: Vec<L>,
    unsubscribed: Vec<L>,
}

/// Records when labelled observables are subscribed to and torn down.
///
/// Wrap each observable under test with [`track`](Self::track); the probe logs the
/// label on every subscription, and again when that subscription closes.
///
/// ```
/// use fluxion_core::{of, ObservableExt};
/// use fluxion_test_utils::{RecordingObserver, SubscriptionProbe};
///
/// let probe = SubscriptionProbe::new();
/// let source = probe.track("numbers", of(vec![1, 2, 3]));
/// source.subscribe_with(RecordingObserver::<i32>::new());
///
/// assert_eq!(probe.subscribed(), vec!["numbers"]);
/// assert_eq!(probe.unsubscribed(), vec!["numbers"]);
/// ```
#[derive(Debug)]
pub struct SubscriptionProbe<L> {
    log: Arc<Mutex<ProbeLog<L>>>,
}

impl<L: Clone + Send + Sync + 'static> SubscriptionProbe<L> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(ProbeLog {
                subscribed: Vec::new(),
                unsubscribed: Vec::new(),
            })),
        }
    }

    /// Wraps `source` so its subscriptions are logged under `label`.
    pub fn track<O>(&self, label: L, source: O) -> Tracked<L, O> {
        Tracked {
            label,
            source,
            log: Arc::clone(&self.log),
        }
    }

    /// Labels in subscription order.
    #[must_use]
    pub fn subscribed(&self) -> Vec<L> {
        self.log.lock().subscribed.clone()
    }

    /// Labels in teardown order.
    #[must_use]
    pub fn unsubscribed(&self) -> Vec<L> {
        self.log.lock().unsubscribed.clone()
    }

    /// Subscriptions opened and not yet torn down.
    #[must_use]
    pub fn active(&self) -> usize {
        let log = self.log.lock();
        log.subscribed.len() - log.unsubscribed.len()
    }
}

impl<L: Clone + Send + Sync + 'static> Default for SubscriptionProbe<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Clone for SubscriptionProbe<L> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

/// An observable wrapped by a [`SubscriptionProbe`].
#[derive(Debug)]
pub struct Tracked<L, O> {
    label: L,
    source: O,
    log: Arc<Mutex<ProbeLog<L>>>,
}

impl<L, O, T> Observable<T> for Tracked<L, O>
where
    L: Clone + Send + Sync + 'static,
    O: Observable<T>,
    T: 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        self.log.lock().subscribed.push(self.label.clone());

        let label = self.label.clone();
        let log = Arc::clone(&self.log);
        subscriber.add(move || log.lock().unsubscribed.push(label));

        self.source.subscribe(subscriber)
    }
}
