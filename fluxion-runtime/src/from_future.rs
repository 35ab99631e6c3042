// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::impls::tokio::spawn_settled;
use core::future::Future;
use fluxion_core::{FluxionError, Observable, Result, Subscriber, Subscription};

/// Emits the output of a freshly created future, then completes.
///
/// Created by [`from_future`].
#[derive(Clone, Debug)]
pub struct FromFuture<F> {
    factory: F,
}

/// Like [`FromFuture`], but an `Err` output fails the subscriber.
///
/// Created by [`try_from_future`].
#[derive(Clone, Debug)]
pub struct TryFromFuture<F> {
    factory: F,
}

/// An observable over a future. Every subscription calls `factory` and spawns the
/// returned future on the current Tokio runtime; unsubscribing aborts it.
///
/// ```
/// use fluxion_core::{ObservableExt, StreamItem};
/// use fluxion_runtime::from_future;
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let answer = from_future(|| async { 42 });
/// let items: Vec<_> = answer.to_stream().collect().await;
/// assert_eq!(items, vec![StreamItem::Value(42)]);
/// # }
/// ```
pub fn from_future<F, Fut>(factory: F) -> FromFuture<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future + Send + 'static,
{
    FromFuture { factory }
}

/// An observable over a fallible future: `Ok` is emitted then completes, `Err` fails.
pub fn try_from_future<F, Fut, T>(factory: F) -> TryFromFuture<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    TryFromFuture { factory }
}

impl<F, Fut, T> Observable<T> for FromFuture<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        let future = (self.factory)();
        spawn_settled(subscriber, async move { Ok::<T, FluxionError>(future.await) })
    }
}

impl<F, Fut, T> Observable<T> for TryFromFuture<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        spawn_settled(subscriber, (self.factory)())
    }
}
