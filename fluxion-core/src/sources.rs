// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Synchronous source observables.

use crate::{FluxionError, Observable, Subscriber, Subscription};
use core::fmt;
use core::marker::PhantomData;

// Pushes every item, stopping early if the subscriber closes.
pub(crate) fn emit_all<T: 'static>(
    items: impl IntoIterator<Item = T>,
    subscriber: Subscriber<T>,
) -> Subscription {
    for item in items {
        if subscriber.is_closed() {
            return subscriber.subscription();
        }
        subscriber.next(item);
    }
    subscriber.complete();
    subscriber.subscription()
}

/// Emits every item of a cloneable iterable, then completes.
#[derive(Clone, Debug)]
pub struct IterObservable<I> {
    items: I,
}

impl<I, T> Observable<T> for IterObservable<I>
where
    I: IntoIterator<Item = T> + Clone + Send + Sync,
    T: 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        emit_all(self.items.clone(), subscriber)
    }
}

/// Creates an observable from a cloneable iterable. Each subscription iterates a fresh clone.
///
/// ```
/// use fluxion_core::{from_iter, ObservableExt, StreamItem};
/// use futures::executor::block_on;
/// use futures::StreamExt;
///
/// let items: Vec<_> = block_on(from_iter(1..=3).to_stream().collect());
/// assert_eq!(items, vec![StreamItem::Value(1), StreamItem::Value(2), StreamItem::Value(3)]);
/// ```
pub fn from_iter<I>(items: I) -> IterObservable<I>
where
    I: IntoIterator + Clone + Send + Sync,
{
    IterObservable { items }
}

/// Emits the given values in order, then completes.
pub fn of<T>(values: Vec<T>) -> IterObservable<Vec<T>>
where
    T: Clone + Send + Sync,
{
    from_iter(values)
}

/// Completes immediately without emitting.
pub struct Empty<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Observable<T> for Empty<T> {
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        subscriber.complete();
        subscriber.subscription()
    }
}

pub const fn empty<T>() -> Empty<T> {
    Empty {
        _marker: PhantomData,
    }
}

/// Never emits and never terminates.
pub struct Never<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Observable<T> for Never<T> {
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        subscriber.subscription()
    }
}

pub const fn never<T>() -> Never<T> {
    Never {
        _marker: PhantomData,
    }
}

/// Fails immediately with a clone of the given error.
pub struct ThrowError<T> {
    error: FluxionError,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Observable<T> for ThrowError<T> {
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        subscriber.error(self.error.clone());
        subscriber.subscription()
    }
}

impl<T> fmt::Debug for ThrowError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThrowError")
            .field("error", &self.error)
            .finish()
    }
}

pub const fn throw_error<T>(error: FluxionError) -> ThrowError<T> {
    ThrowError {
        error,
        _marker: PhantomData,
    }
}

/// An observable defined by a producer closure.
///
/// The closure runs on every subscription and pushes into the given [`Subscriber`].
/// Resources it acquires are released through [`Subscriber::add`].
///
/// ```
/// use fluxion_core::{create, ObservableExt, StreamItem};
/// use futures::executor::block_on;
/// use futures::StreamExt;
///
/// let source = create(|subscriber| {
///     subscriber.next("ready");
///     subscriber.complete();
/// });
///
/// let items: Vec<_> = block_on(source.to_stream().collect());
/// assert_eq!(items, vec![StreamItem::Value("ready")]);
/// ```
pub struct Create<F, T> {
    producer: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> Observable<T> for Create<F, T>
where
    F: Fn(&Subscriber<T>) + Send + Sync,
    T: 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        (self.producer)(&subscriber);
        subscriber.subscription()
    }
}

pub fn create<T, F>(producer: F) -> Create<F, T>
where
    F: Fn(&Subscriber<T>) + Send + Sync,
{
    Create {
        producer,
        _marker: PhantomData,
    }
}
