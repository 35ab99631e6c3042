// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Async runtime integration for fluxion observables.
//!
//! With the `runtime-tokio` feature (default):
//! - **`TokioScheduler`** - a [`Scheduler`](fluxion_core::Scheduler) spawning work as Tokio tasks
//! - **`from_future`** / **`try_from_future`** - one-shot sources over futures
//! - **`from_stream`** - sources over `futures::Stream`s of `StreamItem`s

pub mod impls;

#[cfg(feature = "runtime-tokio")]
mod from_future;
#[cfg(feature = "runtime-tokio")]
mod from_stream;

#[cfg(feature = "runtime-tokio")]
pub use self::from_future::{from_future, try_from_future, FromFuture, TryFromFuture};
#[cfg(feature = "runtime-tokio")]
pub use self::from_stream::{from_stream, FromStream};
#[cfg(feature = "runtime-tokio")]
pub use self::impls::tokio::TokioScheduler;
