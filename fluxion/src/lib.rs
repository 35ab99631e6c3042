// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Fluxion
//!
//! Push-based reactive sequences with bounded-concurrency merging.
//!
//! ## Overview
//!
//! An [`Observable`] pushes values into a [`Subscriber`] and finishes with at most one
//! terminal signal. The merge family (`merge_map`, `concat_map`, `merge_all`,
//! `concat_all`, `merge_scan`, `expand`) projects every outer value into an inner
//! sequence and interleaves the results, keeping at most a configured number of inner
//! subscriptions open and buffering the rest in arrival order.
//!
//! All of them share one engine, [`MergeEngine`], which can also be driven directly
//! through its builder when an operator needs custom hooks.
//!
//! ## Quick Start
//!
//! ```rust
//! use fluxion_rx::prelude::*;
//! use fluxion_test_utils::RecordingObserver;
//!
//! let recorder = RecordingObserver::new();
//! of(vec![1, 2, 3])
//!     .merge_map(|x, _| of(vec![x * 10]), Concurrency::limited(2).unwrap())
//!     .subscribe_with(recorder.clone());
//!
//! assert_eq!(recorder.values(), vec![10, 20, 30]);
//! ```
//!
//! ## Features
//!
//! - `runtime-tokio` (default): [`TokioScheduler`], `from_future`, `from_stream`
//! - `tracing`: engine decisions logged through `tracing`

pub use fluxion_core::{
    create, empty, from_iter, never, of, throw_error, BoxObservable, FluxionError,
    FluxionSubject, FnObserver, IntoObservable, Notification, Observable, ObservableExt,
    ObservableStream, Observer, Result, Scheduler, StreamItem, SubjectError, Subscriber,
    Subscription,
};
pub use fluxion_merge::{
    Concurrency, ExpandOp, MergeEngine, MergeEngineBuilder, MergeExt, MergeMap, MergeScan,
    MergeStrategy,
};

#[cfg(feature = "runtime-tokio")]
pub use fluxion_runtime::{from_future, from_stream, try_from_future, TokioScheduler};

/// Prelude module for convenient imports
pub mod prelude {
    pub use fluxion_core::{
        empty, of, FluxionError, FluxionSubject, IntoObservable, Observable, ObservableExt,
        StreamItem, Subscription,
    };
    pub use fluxion_merge::{Concurrency, MergeExt};

    #[cfg(feature = "runtime-tokio")]
    pub use fluxion_runtime::{from_future, TokioScheduler};
}
