// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded-concurrency merging of observable sequences.
//!
//! # Overview
//!
//! - **`MergeEngine`** - the shared core: subscribes an outer sequence, projects each value
//!   into an inner sequence, caps open inner subscriptions, buffers the overflow
//! - **`Concurrency`** - the cap (`Unbounded` or `Limited(n)`)
//! - **`MergeStrategy`** - per-variant behaviour (`Flatten`, `Scan`, `Expand`, `Hooks`)
//! - **`MergeExt`** - `merge_map`, `concat_map`, `merge_all`, `concat_all`, `merge_scan`,
//!   `expand`, `expand_on`
//!
//! # Example
//!
//! ```rust
//! use fluxion_core::{of, ObservableExt};
//! use fluxion_merge::MergeExt;
//! use fluxion_test_utils::RecordingObserver;
//!
//! let recorder = RecordingObserver::new();
//! of(vec!["a", "b", "c"])
//!     .concat_map(|letter, index| of(vec![format!("{letter}{index}")]))
//!     .subscribe_with(recorder.clone());
//!
//! assert_eq!(recorder.values(), vec!["a0", "b1", "c2"]);
//! ```

mod logging;

mod concurrency;
mod expand;
mod merge_engine;
mod merge_ext;
mod merge_map;
mod merge_scan;
mod project;
pub mod strategy;

pub use self::concurrency::Concurrency;
pub use self::expand::ExpandOp;
pub use self::merge_engine::{MergeEngine, MergeEngineBuilder};
pub use self::merge_ext::MergeExt;
pub use self::merge_map::MergeMap;
pub use self::merge_scan::MergeScan;
pub use self::project::Project;
pub use self::strategy::{Expand, Flatten, Hooks, InnerAction, IntoExpand, MergeStrategy, Scan};
