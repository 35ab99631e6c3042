// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Disposable handles that own teardown logic.

use core::fmt;
use parking_lot::Mutex;
use std::mem;
use std::sync::Arc;

type TeardownFn = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct SubscriptionState {
    closed: bool,
    teardowns: Vec<TeardownFn>,
}

/// A cloneable handle to a running subscription.
///
/// A `Subscription` owns a list of teardown actions. [`unsubscribe`](Self::unsubscribe)
/// closes it and runs every action exactly once, in registration order. Clones share
/// the same state, so any clone can close it.
///
/// Teardown added to an already closed subscription runs immediately.
///
/// ```
/// use fluxion_core::Subscription;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let subscription = Subscription::new();
/// let counter = runs.clone();
/// subscription.add(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// subscription.unsubscribe();
/// subscription.unsubscribe();
/// assert_eq!(runs.load(Ordering::SeqCst), 1);
/// assert!(subscription.is_closed());
/// ```
#[derive(Clone, Default)]
pub struct Subscription {
    state: Arc<Mutex<SubscriptionState>>,
}

impl Subscription {
    /// Creates an open subscription with no teardown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an open subscription whose only teardown is `teardown`.
    #[must_use]
    pub fn from_fn(teardown: impl FnOnce() + Send + 'static) -> Self {
        let subscription = Self::new();
        subscription.add(teardown);
        subscription
    }

    /// Creates a subscription that is already closed.
    #[must_use]
    pub fn closed() -> Self {
        let subscription = Self::new();
        subscription.state.lock().closed = true;
        subscription
    }

    /// Registers a teardown action.
    pub fn add(&self, teardown: impl FnOnce() + Send + 'static) {
        let mut state = self.state.lock();
        if state.closed {
            drop(state);
            teardown();
            return;
        }
        state.teardowns.push(Box::new(teardown));
    }

    /// Ties `child` to this subscription: closing `self` closes `child`.
    pub fn add_subscription(&self, child: Subscription) {
        if Arc::ptr_eq(&self.state, &child.state) {
            return;
        }
        self.add(move || child.unsubscribe());
    }

    /// Closes the subscription and runs its teardown. Idempotent.
    pub fn unsubscribe(&self) {
        let teardowns = {
            let mut state = self.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            mem::take(&mut state.teardowns)
        };

        for teardown in teardowns {
            teardown();
        }
    }

    /// Returns `true` once [`unsubscribe`](Self::unsubscribe) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Subscription")
            .field("closed", &state.closed)
            .field("teardowns", &state.teardowns.len())
            .finish()
    }
}
