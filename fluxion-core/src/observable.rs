// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observable_stream::ObservableStream;
use crate::{Observer, Subscriber, Subscription};
use std::sync::Arc;

/// A push-based sequence of values.
///
/// Subscribing hands the observable a [`Subscriber`]; the observable pushes zero or
/// more values into it, followed by at most one terminal signal. The returned
/// [`Subscription`] stops further notifications when unsubscribed. Observables in
/// this crate are cold: every subscription replays the sequence from the start.
pub trait Observable<T>: Send + Sync {
    /// Starts delivering notifications to `subscriber`.
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription;
}

/// A type-erased, shareable observable.
pub type BoxObservable<T> = Arc<dyn Observable<T>>;

impl<T, O> Observable<T> for Arc<O>
where
    O: Observable<T> + ?Sized,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        (**self).subscribe(subscriber)
    }
}

impl<T, O> Observable<T> for Box<O>
where
    O: Observable<T> + ?Sized,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        (**self).subscribe(subscriber)
    }
}

/// Convenience methods available on every [`Observable`].
pub trait ObservableExt<T: 'static>: Observable<T> {
    /// Subscribes a plain [`Observer`].
    fn subscribe_with<O>(&self, observer: O) -> Subscription
    where
        O: Observer<T> + 'static,
    {
        self.subscribe(Subscriber::new(observer))
    }

    /// Erases the concrete observable type.
    fn boxed(self) -> BoxObservable<T>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }

    /// Subscribes and exposes the notifications as a `futures::Stream`.
    ///
    /// Values arrive as [`StreamItem::Value`](crate::StreamItem::Value), a failure as a final
    /// [`StreamItem::Error`](crate::StreamItem::Error); completion ends the stream. Dropping
    /// the stream unsubscribes.
    fn to_stream(&self) -> ObservableStream<T>
    where
        T: Send,
    {
        ObservableStream::subscribe_to(self)
    }
}

impl<T: 'static, O: Observable<T> + ?Sized> ObservableExt<T> for O {}
