// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::future::Future;
use fluxion_core::{FluxionError, Result, Scheduler, Subscriber, Subscription, Work};
use tokio::runtime::Handle;

/// Runs scheduled work as a task on a Tokio runtime.
///
/// Unsubscribing the handle returned by [`schedule`](Scheduler::schedule) aborts the
/// task if it has not started yet.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// A scheduler spawning onto the runtime behind `handle`.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// A scheduler spawning onto the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns `FluxionError::InvalidConfiguration` outside of a Tokio runtime.
    pub fn try_current() -> Result<Self> {
        current_handle().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, work: Work) -> Subscription {
        let task = self.handle.spawn(async move { work() });
        Subscription::from_fn(move || task.abort())
    }
}

fn current_handle() -> Result<Handle> {
    Handle::try_current().map_err(|error| {
        FluxionError::invalid_configuration(format!("no Tokio runtime available: {error}"))
    })
}

/// Spawns `future` on the current runtime, settling `subscriber` with its result.
///
/// Unsubscribing aborts the task. Outside of a runtime the subscriber fails with
/// `FluxionError::InvalidConfiguration`.
pub(crate) fn spawn_settled<T, Fut>(subscriber: Subscriber<T>, future: Fut) -> Subscription
where
    T: Send + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let handle = match current_handle() {
        Ok(handle) => handle,
        Err(error) => {
            subscriber.error(error);
            return subscriber.subscription();
        }
    };

    let settling = subscriber.clone();
    let task = handle.spawn(async move {
        match future.await {
            Ok(value) => {
                settling.next(value);
                settling.complete();
            }
            Err(error) => settling.error(error),
        }
    });
    subscriber.add(move || task.abort());
    subscriber.subscription()
}

/// Spawns a task on the current runtime that drives `body` until it finishes or the
/// subscriber closes.
pub(crate) fn spawn_driven<T, Fut>(
    subscriber: Subscriber<T>,
    body: impl FnOnce(Subscriber<T>) -> Fut,
) -> Subscription
where
    T: Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let handle = match current_handle() {
        Ok(handle) => handle,
        Err(error) => {
            subscriber.error(error);
            return subscriber.subscription();
        }
    };

    let task = handle.spawn(body(subscriber.clone()));
    subscriber.add(move || task.abort());
    subscriber.subscription()
}
