// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FluxionError;
use std::sync::Arc;

/// Receiver of push notifications.
///
/// An observer sees any number of `next` calls followed by at most one terminal
/// signal, `error` or `complete`. Observers are shared between the threads a
/// source may emit on, hence `&self` and the `Send + Sync` bound; an observer
/// that accumulates state wraps it in a lock.
pub trait Observer<T>: Send + Sync {
    /// A value was produced.
    fn next(&self, value: T);

    /// The source failed. Terminal.
    fn error(&self, error: FluxionError);

    /// The source finished. Terminal.
    fn complete(&self);
}

impl<T, O> Observer<T> for Arc<O>
where
    O: Observer<T> + ?Sized,
{
    fn next(&self, value: T) {
        (**self).next(value);
    }

    fn error(&self, error: FluxionError) {
        (**self).error(error);
    }

    fn complete(&self) {
        (**self).complete();
    }
}

/// An [`Observer`] assembled from three closures.
///
/// ```
/// use fluxion_core::{of, FluxionError, FnObserver, ObservableExt};
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let sum = Arc::new(AtomicI32::new(0));
/// let acc = sum.clone();
/// of(vec![1, 2, 3]).subscribe_with(FnObserver::new(
///     move |v: i32| {
///         acc.fetch_add(v, Ordering::SeqCst);
///     },
///     |_err: FluxionError| {},
///     || {},
/// ));
/// assert_eq!(sum.load(Ordering::SeqCst), 6);
/// ```
pub struct FnObserver<N, E, C> {
    on_next: N,
    on_error: E,
    on_complete: C,
}

impl<N, E, C> FnObserver<N, E, C> {
    pub const fn new(on_next: N, on_error: E, on_complete: C) -> Self {
        Self {
            on_next,
            on_error,
            on_complete,
        }
    }
}

impl<T, N, E, C> Observer<T> for FnObserver<N, E, C>
where
    N: Fn(T) + Send + Sync,
    E: Fn(FluxionError) + Send + Sync,
    C: Fn() + Send + Sync,
{
    fn next(&self, value: T) {
        (self.on_next)(value);
    }

    fn error(&self, error: FluxionError) {
        (self.on_error)(error);
    }

    fn complete(&self) {
        (self.on_complete)();
    }
}
