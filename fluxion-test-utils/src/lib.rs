// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the Fluxion workspace.
//!
//! This crate is designed for use in development and testing only, not for production code.
//!
//! # Key Types
//!
//! - [`RecordingObserver`] - logs every notification for later assertions
//! - [`ManualScheduler`] - a [`Scheduler`](fluxion_core::Scheduler) driven step by step
//! - [`SubscriptionProbe`] - records subscription and teardown order of labelled sources
//! - [`test_data`] - `TestData` fixtures (people, animals, a small family tree)
//! - [`helpers`] - async assertions over `to_stream` output
//!
//! # Example
//!
//! ```rust
//! use fluxion_core::{ObservableExt, FluxionSubject};
//! use fluxion_test_utils::RecordingObserver;
//! use fluxion_test_utils::test_data::{person_alice, person_bob, TestData};
//!
//! let subject = FluxionSubject::<TestData>::new();
//! let recorder = RecordingObserver::new();
//! subject.subscribe_with(recorder.clone());
//!
//! subject.next(person_alice()).unwrap();
//! subject.next(person_bob()).unwrap();
//!
//! assert_eq!(recorder.values(), vec![person_alice(), person_bob()]);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;
pub mod manual_scheduler;
pub mod recording_observer;
pub mod subscription_probe;
pub mod test_data;

// Re-export commonly used test utilities
pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value};
pub use manual_scheduler::ManualScheduler;
pub use recording_observer::RecordingObserver;
pub use subscription_probe::{SubscriptionProbe, Tracked};
pub use test_data::TestData;
