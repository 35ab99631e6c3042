// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::project::SharedProject;
use crate::{Concurrency, MergeEngine, Project};
use core::fmt;
use core::marker::PhantomData;
use fluxion_core::{Observable, Subscriber, Subscription};
use std::sync::Arc;

/// Projects every outer value into an inner sequence and merges the inner emissions.
///
/// Returned by [`MergeExt::merge_map`](crate::MergeExt::merge_map),
/// [`concat_map`](crate::MergeExt::concat_map),
/// [`merge_all`](crate::MergeExt::merge_all) and
/// [`concat_all`](crate::MergeExt::concat_all).
pub struct MergeMap<O, P, T, R> {
    source: O,
    project: Arc<P>,
    concurrency: Concurrency,
    _marker: PhantomData<fn(T) -> R>,
}

impl<O, P, T, R> MergeMap<O, P, T, R> {
    pub(crate) fn new(source: O, project: P, concurrency: Concurrency) -> Self {
        Self {
            source,
            project: Arc::new(project),
            concurrency,
            _marker: PhantomData,
        }
    }
}

impl<O, P, T, R> Observable<R> for MergeMap<O, P, T, R>
where
    O: Observable<T>,
    P: Project<T, R>,
    T: Send + 'static,
    R: Send + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<R>) -> Subscription {
        MergeEngine::<T, R, _, _>::builder(SharedProject::new(&self.project))
            .concurrency(self.concurrency)
            .build(subscriber)
            .start(&self.source)
    }
}

impl<O, P, T, R> fmt::Debug for MergeMap<O, P, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergeMap")
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

pub(crate) fn identity<T>(value: T, _index: usize) -> T {
    value
}
