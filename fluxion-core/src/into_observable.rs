// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conversion of observable inputs into observables.
//!
//! Operators that accept "something that can be subscribed to" take
//! `impl IntoObservable<T>`. Besides every [`Observable`], the following plain values
//! are observable inputs:
//!
//! | Input | Sequence |
//! |---|---|
//! | `Vec<T>` | every element, then complete |
//! | `Option<T>` | zero or one value, then complete |
//! | `Result<T, FluxionError>` | one value then complete, or the error |
//!
//! Iterators go through [`from_iter`](crate::from_iter); futures and streams go through
//! the adapters in `fluxion-runtime`.

use crate::sources::emit_all;
use crate::{FluxionError, Observable, Subscriber, Subscription};

/// Values that can be adapted into an [`Observable`].
pub trait IntoObservable<T> {
    /// The observable produced by the conversion.
    type Observable: Observable<T> + 'static;

    /// Performs the conversion.
    fn into_observable(self) -> Self::Observable;
}

impl<T, O> IntoObservable<T> for O
where
    O: Observable<T> + 'static,
{
    type Observable = O;

    fn into_observable(self) -> Self::Observable {
        self
    }
}

impl<T> Observable<T> for Vec<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        emit_all(self.iter().cloned(), subscriber)
    }
}

impl<T> Observable<T> for Option<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        emit_all(self.iter().cloned(), subscriber)
    }
}

impl<T> Observable<T> for Result<T, FluxionError>
where
    T: Clone + Send + Sync + 'static,
{
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        match self {
            Ok(value) => emit_all(core::iter::once(value.clone()), subscriber),
            Err(error) => {
                subscriber.error(error.clone());
                subscriber.subscription()
            }
        }
    }
}
