// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{IntoObservable, Observable, Subscriber, Subscription};
use std::sync::Arc;

/// Maps an outer value and its 0-based arrival index to a subscribed inner sequence.
///
/// Implemented for every `Fn(T, usize) -> I` where `I` is an observable input, so
/// projections are written as plain closures.
pub trait Project<T, R>: Send + Sync + 'static {
    /// Projects `value` and subscribes `subscriber` to the resulting inner sequence.
    fn subscribe_projected(
        &self,
        value: T,
        index: usize,
        subscriber: Subscriber<R>,
    ) -> Subscription;
}

impl<T, R, F, I> Project<T, R> for F
where
    F: Fn(T, usize) -> I + Send + Sync + 'static,
    I: IntoObservable<R>,
{
    fn subscribe_projected(
        &self,
        value: T,
        index: usize,
        subscriber: Subscriber<R>,
    ) -> Subscription {
        self(value, index).into_observable().subscribe(subscriber)
    }
}

/// A projection shared by every subscription of one operator.
pub(crate) struct SharedProject<P>(Arc<P>);

impl<P> SharedProject<P> {
    pub(crate) fn new(project: &Arc<P>) -> Self {
        Self(Arc::clone(project))
    }
}

impl<T, R, P> Project<T, R> for SharedProject<P>
where
    P: Project<T, R>,
{
    fn subscribe_projected(
        &self,
        value: T,
        index: usize,
        subscriber: Subscriber<R>,
    ) -> Subscription {
        self.0.subscribe_projected(value, index, subscriber)
    }
}
