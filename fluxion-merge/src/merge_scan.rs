// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::strategy::Scan;
use crate::{Concurrency, MergeEngine};
use core::fmt;
use core::marker::PhantomData;
use fluxion_core::{IntoObservable, Observable, Subscriber, Subscription};
use parking_lot::Mutex;
use std::sync::Arc;

/// Accumulates through inner sequences: each outer value and the current state yield
/// an inner sequence whose values become the new state and are emitted.
///
/// Returned by [`MergeExt::merge_scan`](crate::MergeExt::merge_scan). Each subscription
/// starts from a fresh clone of the seed.
pub struct MergeScan<O, F, T, R> {
    source: O,
    accumulator: Arc<F>,
    seed: R,
    concurrency: Concurrency,
    _marker: PhantomData<fn(T)>,
}

impl<O, F, T, R> MergeScan<O, F, T, R> {
    pub(crate) fn new(source: O, accumulator: F, seed: R, concurrency: Concurrency) -> Self {
        Self {
            source,
            accumulator: Arc::new(accumulator),
            seed,
            concurrency,
            _marker: PhantomData,
        }
    }
}

impl<O, F, I, T, R> Observable<R> for MergeScan<O, F, T, R>
where
    O: Observable<T>,
    F: Fn(&R, T, usize) -> I + Send + Sync + 'static,
    I: IntoObservable<R>,
    T: Send + 'static,
    R: Clone + Send + Sync + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<R>) -> Subscription {
        let state = Arc::new(Mutex::new(self.seed.clone()));

        let accumulator = Arc::clone(&self.accumulator);
        let current = Arc::clone(&state);
        let project = move |value: T, index: usize| {
            let snapshot = current.lock().clone();
            accumulator(&snapshot, value, index)
        };

        MergeEngine::<T, R, _, _>::builder(project)
            .concurrency(self.concurrency)
            .strategy(Scan::new(state))
            .build(subscriber)
            .start(&self.source)
    }
}

impl<O, F, T, R: fmt::Debug> fmt::Debug for MergeScan<O, F, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeScan")
            .field("seed", &self.seed)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
