// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::project::SharedProject;
use crate::{Concurrency, MergeEngine, Project};
use core::fmt;
use core::marker::PhantomData;
use fluxion_core::{Observable, Scheduler, Subscriber, Subscription};
use std::sync::Arc;

/// Recursive projection: every value, outer or inner, is emitted and projected again.
///
/// Returned by [`MergeExt::expand`](crate::MergeExt::expand) and
/// [`expand_on`](crate::MergeExt::expand_on). Terminates once the projection stops
/// producing values and every inner sequence has completed.
pub struct ExpandOp<O, P, T> {
    source: O,
    project: Arc<P>,
    concurrency: Concurrency,
    scheduler: Option<Arc<dyn Scheduler>>,
    _marker: PhantomData<fn(T)>,
}

impl<O, P, T> ExpandOp<O, P, T> {
    pub(crate) fn new(
        source: O,
        project: P,
        concurrency: Concurrency,
        scheduler: Option<Arc<dyn Scheduler>>,
    ) -> Self {
        Self {
            source,
            project: Arc::new(project),
            concurrency,
            scheduler,
            _marker: PhantomData,
        }
    }
}

impl<O, P, T> Observable<T> for ExpandOp<O, P, T>
where
    O: Observable<T>,
    P: Project<T, T>,
    T: Clone + Send + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        let mut builder = MergeEngine::<T, T, _, _>::builder(SharedProject::new(&self.project))
            .concurrency(self.concurrency)
            .expand();
        if let Some(scheduler) = &self.scheduler {
            builder = builder.inner_scheduler(Arc::clone(scheduler));
        }
        builder.build(subscriber).start(&self.source)
    }
}

impl<O, P, T> fmt::Debug for ExpandOp<O, P, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandOp")
            .field("concurrency", &self.concurrency)
            .field("scheduled", &self.scheduler.is_some())
            .finish_non_exhaustive()
    }
}
