// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-based observable primitives for Fluxion.
//!
//! - [`Observable`] / [`Observer`]: the producing and consuming ends of a sequence
//! - [`Subscriber`]: the sink handed to a producer, with terminal-signal guarantees
//! - [`Subscription`]: the handle that tears a subscription down
//! - [`IntoObservable`]: the adapter operators apply to their inputs
//! - [`Scheduler`]: deferral of work to a later turn
//! - sources ([`of`], [`from_iter`], [`empty`], [`never`], [`throw_error`], [`create`])
//!   and the hot [`FluxionSubject`]

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fluxion_error;
pub mod fluxion_subject;
pub mod into_observable;
mod logging;
pub mod notification;
pub mod observable;
pub mod observable_stream;
pub mod observer;
pub mod scheduler;
pub mod sources;
pub mod stream_item;
pub mod subscriber;
pub mod subscription;

pub use self::fluxion_error::{FluxionError, Result};
pub use self::fluxion_subject::{FluxionSubject, SubjectError};
pub use self::into_observable::IntoObservable;
pub use self::notification::Notification;
pub use self::observable::{BoxObservable, Observable, ObservableExt};
pub use self::observable_stream::ObservableStream;
pub use self::observer::{FnObserver, Observer};
pub use self::scheduler::{Scheduler, Work};
pub use self::sources::{
    create, empty, from_iter, never, of, throw_error, Create, Empty, IterObservable, Never,
    ThrowError,
};
pub use self::stream_item::StreamItem;
pub use self::subscriber::Subscriber;
pub use self::subscription::Subscription;
