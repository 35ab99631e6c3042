// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from the push side to `futures::Stream`.

use crate::{FluxionError, Observable, Observer, StreamItem, Subscriber, Subscription};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

struct ChannelObserver<T> {
    sender: UnboundedSender<StreamItem<T>>,
}

impl<T: Send> Observer<T> for ChannelObserver<T> {
    fn next(&self, value: T) {
        // The receiver may already be gone; the subscription is torn down on drop.
        let _ = self.sender.unbounded_send(StreamItem::Value(value));
    }

    fn error(&self, error: FluxionError) {
        let _ = self.sender.unbounded_send(StreamItem::Error(error));
        self.sender.close_channel();
    }

    fn complete(&self) {
        self.sender.close_channel();
    }
}

/// A `Stream` fed by an observable subscription.
///
/// Created by [`ObservableExt::to_stream`](crate::ObservableExt::to_stream).
pub struct ObservableStream<T> {
    receiver: UnboundedReceiver<StreamItem<T>>,
    subscription: Subscription,
}

impl<T: Send + 'static> ObservableStream<T> {
    pub(crate) fn subscribe_to<O>(observable: &O) -> Self
    where
        O: Observable<T> + ?Sized,
    {
        let (sender, receiver) = mpsc::unbounded();
        let subscription = observable.subscribe(Subscriber::new(ChannelObserver { sender }));
        Self {
            receiver,
            subscription,
        }
    }
}

impl<T> ObservableStream<T> {
    /// The subscription feeding this stream.
    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl<T> Stream for ObservableStream<T> {
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().receiver).poll_next(cx)
    }
}

impl<T> Drop for ObservableStream<T> {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
