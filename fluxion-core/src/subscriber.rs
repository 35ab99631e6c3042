// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The sink side of a subscription.

use crate::{FluxionError, Observer, Subscription};
use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct SubscriberInner<T> {
    observer: Box<dyn Observer<T>>,
    stopped: AtomicBool,
    subscription: Subscription,
}

/// A downstream sink handed to [`Observable::subscribe`](crate::Observable::subscribe).
///
/// `Subscriber` wraps an [`Observer`] with the guarantees every producer relies on:
///
/// - `next` is dropped once the subscriber is closed.
/// - At most one terminal signal (`error` or `complete`) reaches the observer.
/// - A terminal signal closes the subscriber and runs its registered teardown.
/// - [`unsubscribe`](Self::unsubscribe) closes it without a terminal signal.
///
/// Clones share the same state.
pub struct Subscriber<T> {
    inner: Arc<SubscriberInner<T>>,
}

impl<T: 'static> Subscriber<T> {
    /// Wraps `observer` in a fresh, open subscriber.
    pub fn new(observer: impl Observer<T> + 'static) -> Self {
        Self {
            inner: Arc::new(SubscriberInner {
                observer: Box::new(observer),
                stopped: AtomicBool::new(false),
                subscription: Subscription::new(),
            }),
        }
    }

    /// Delivers a value unless the subscriber is closed.
    pub fn next(&self, value: T) {
        if !self.is_closed() {
            self.inner.observer.next(value);
        }
    }

    /// Delivers a terminal error, then tears the subscriber down.
    pub fn error(&self, error: FluxionError) {
        if self.stop() {
            self.inner.observer.error(error);
            self.inner.subscription.unsubscribe();
        }
    }

    /// Delivers the terminal completion, then tears the subscriber down.
    pub fn complete(&self) {
        if self.stop() {
            self.inner.observer.complete();
            self.inner.subscription.unsubscribe();
        }
    }

    /// Returns `true` once a terminal signal was delivered or the subscriber was unsubscribed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.stopped.load(Ordering::Acquire) || self.inner.subscription.is_closed()
    }

    /// Registers teardown to run when the subscriber closes.
    pub fn add(&self, teardown: impl FnOnce() + Send + 'static) {
        self.inner.subscription.add(teardown);
    }

    /// Ties `child` to this subscriber's lifetime.
    pub fn add_subscription(&self, child: Subscription) {
        self.inner.subscription.add_subscription(child);
    }

    /// The subscription that closes this subscriber.
    #[must_use]
    pub fn subscription(&self) -> Subscription {
        self.inner.subscription.clone()
    }

    /// Closes the subscriber without a terminal signal.
    pub fn unsubscribe(&self) {
        self.inner.stopped.store(true, Ordering::Release);
        self.inner.subscription.unsubscribe();
    }

    // Wins the right to send the one terminal signal.
    fn stop(&self) -> bool {
        !self.inner.subscription.is_closed() && !self.inner.stopped.swap(true, Ordering::AcqRel)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Observer<T> for Subscriber<T> {
    fn next(&self, value: T) {
        Subscriber::next(self, value);
    }

    fn error(&self, error: FluxionError) {
        Subscriber::error(self, error);
    }

    fn complete(&self) {
        Subscriber::complete(self);
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("stopped", &self.inner.stopped.load(Ordering::Acquire))
            .field("subscription", &self.inner.subscription)
            .finish()
    }
}
