// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Subscription;
use std::sync::Arc;

/// A unit of deferred work.
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// Defers execution of a unit of work to a later turn.
///
/// The returned [`Subscription`] cancels the work if it has not started yet.
/// Implementations live in `fluxion-runtime` (runtime-backed) and
/// `fluxion-test-utils` (manually driven).
pub trait Scheduler: Send + Sync {
    /// Schedules `work` to run later.
    fn schedule(&self, work: Work) -> Subscription;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule(&self, work: Work) -> Subscription {
        (**self).schedule(work)
    }
}
