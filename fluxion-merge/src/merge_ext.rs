// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::merge_map::identity;
use crate::{Concurrency, ExpandOp, MergeMap, MergeScan};
use fluxion_core::{IntoObservable, Observable, Scheduler};
use std::sync::Arc;

/// Merge-family operators for every [`Observable`].
///
/// Each operator returns a cold observable; every subscription to it runs its own
/// [`MergeEngine`](crate::MergeEngine).
///
/// ```
/// use fluxion_core::{of, ObservableExt};
/// use fluxion_merge::{Concurrency, MergeExt};
/// use fluxion_test_utils::RecordingObserver;
///
/// let recorder = RecordingObserver::new();
/// of(vec![1, 2, 3])
///     .merge_map(|x, _| of(vec![x * 10]), Concurrency::limited(2).unwrap())
///     .subscribe_with(recorder.clone());
///
/// assert_eq!(recorder.values(), vec![10, 20, 30]);
/// assert!(recorder.is_completed());
/// ```
pub trait MergeExt<T>: Observable<T> + Sized {
    /// Projects each value into an inner sequence and merges their emissions, with at
    /// most `concurrency` inner subscriptions open at once.
    fn merge_map<F, I, R>(self, project: F, concurrency: Concurrency) -> MergeMap<Self, F, T, R>
    where
        F: Fn(T, usize) -> I + Send + Sync + 'static,
        I: IntoObservable<R>,
    {
        MergeMap::new(self, project, concurrency)
    }

    /// [`merge_map`](Self::merge_map) one inner sequence at a time, in outer order.
    fn concat_map<F, I, R>(self, project: F) -> MergeMap<Self, F, T, R>
    where
        F: Fn(T, usize) -> I + Send + Sync + 'static,
        I: IntoObservable<R>,
    {
        MergeMap::new(self, project, Concurrency::SERIAL)
    }

    /// Flattens an observable whose values are themselves observable.
    fn merge_all<R>(self, concurrency: Concurrency) -> MergeMap<Self, fn(T, usize) -> T, T, R>
    where
        T: IntoObservable<R>,
    {
        MergeMap::new(self, identity::<T> as fn(T, usize) -> T, concurrency)
    }

    /// [`merge_all`](Self::merge_all) one inner sequence at a time, in outer order.
    fn concat_all<R>(self) -> MergeMap<Self, fn(T, usize) -> T, T, R>
    where
        T: IntoObservable<R>,
    {
        self.merge_all(Concurrency::SERIAL)
    }

    /// Runs `accumulator(&state, value, index)` for every value; every value of the
    /// returned inner sequence replaces the state and is emitted.
    fn merge_scan<F, I, R>(
        self,
        accumulator: F,
        seed: R,
        concurrency: Concurrency,
    ) -> MergeScan<Self, F, T, R>
    where
        F: Fn(&R, T, usize) -> I + Send + Sync + 'static,
        I: IntoObservable<R>,
    {
        MergeScan::new(self, accumulator, seed, concurrency)
    }

    /// Emits every value and projects it again, recursively.
    fn expand<F, I>(self, project: F, concurrency: Concurrency) -> ExpandOp<Self, F, T>
    where
        F: Fn(T, usize) -> I + Send + Sync + 'static,
        I: IntoObservable<T>,
    {
        ExpandOp::new(self, project, concurrency, None)
    }

    /// [`expand`](Self::expand) where each buffered value is dispatched as work on
    /// `scheduler` once a slot frees up.
    fn expand_on<F, I>(
        self,
        project: F,
        concurrency: Concurrency,
        scheduler: Arc<dyn Scheduler>,
    ) -> ExpandOp<Self, F, T>
    where
        F: Fn(T, usize) -> I + Send + Sync + 'static,
        I: IntoObservable<T>,
    {
        ExpandOp::new(self, project, concurrency, Some(scheduler))
    }
}

impl<T, O: Observable<T>> MergeExt<T> for O {}
