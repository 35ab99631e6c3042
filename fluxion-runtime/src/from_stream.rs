// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::impls::tokio::spawn_driven;
use fluxion_core::{Observable, StreamItem, Subscriber, Subscription};
use futures::{Stream, StreamExt};

/// Forwards a freshly created stream of [`StreamItem`]s.
///
/// Created by [`from_stream`].
#[derive(Clone, Debug)]
pub struct FromStream<F> {
    factory: F,
}

/// An observable over a stream. Every subscription calls `factory` and drives the
/// stream on the current Tokio runtime: values are forwarded, the first
/// `StreamItem::Error` fails the subscriber, and the end of the stream completes it.
pub fn from_stream<F, S, T>(factory: F) -> FromStream<F>
where
    F: Fn() -> S + Send + Sync,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
{
    FromStream { factory }
}

impl<F, S, T> Observable<T> for FromStream<F>
where
    F: Fn() -> S + Send + Sync,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        let stream = (self.factory)();
        spawn_driven(subscriber, move |subscriber| async move {
            let mut stream = Box::pin(stream);
            while let Some(item) = stream.next().await {
                if subscriber.is_closed() {
                    return;
                }
                match item {
                    StreamItem::Value(value) => subscriber.next(value),
                    StreamItem::Error(error) => {
                        subscriber.error(error);
                        return;
                    }
                }
            }
            subscriber.complete();
        })
    }
}
