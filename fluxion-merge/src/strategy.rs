// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-variant behaviour plugged into the [`MergeEngine`](crate::MergeEngine).
//!
//! The engine itself only knows how to admit, buffer and complete. What happens to an
//! outer value when it is dispatched, to each inner value, and right before completion is
//! decided by a [`MergeStrategy`]:
//!
//! | Strategy | Used by | Behaviour |
//! |---|---|---|
//! | [`Flatten`] | `merge_map`, `concat_map`, `merge_all` | relay inner values |
//! | [`Scan`] | `merge_scan` | remember each inner value as the new state, relay it |
//! | [`Expand`] | `expand` | emit each dispatched value, feed inner values back as outer values |
//! | [`Hooks`] | builder users | run caller closures around another strategy |

use parking_lot::Mutex;
use std::sync::Arc;

/// What the engine does with a value emitted by an inner sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InnerAction<T, R> {
    /// Forward downstream.
    Relay(R),
    /// Run it through the dispatch-or-buffer decision as a new outer value.
    Resubmit(T),
}

/// Variant behaviour of a merge. Every method has a pass-through default.
///
/// All calls happen one at a time, never concurrently, and never while the engine's
/// own state is locked.
pub trait MergeStrategy<T, R>: Send + 'static {
    /// Called when `value` is dispatched, before its projection. A returned value is
    /// emitted downstream first.
    fn on_dispatch(&mut self, _value: &T) -> Option<R> {
        None
    }

    /// Called for every inner emission.
    fn on_inner_next(&mut self, value: R) -> InnerAction<T, R> {
        InnerAction::Relay(value)
    }

    /// Called once, immediately before downstream completion. A returned value is
    /// emitted before `complete`. Never called when the merge fails.
    fn on_before_complete(&mut self) -> Option<R> {
        None
    }
}

/// Plain merge: inner values are relayed as they arrive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flatten;

impl<T, R> MergeStrategy<T, R> for Flatten {}

/// Recursive expansion: every dispatched value is emitted, and every inner value is
/// projected again.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expand;

impl<T: Clone> MergeStrategy<T, T> for Expand {
    fn on_dispatch(&mut self, value: &T) -> Option<T> {
        Some(value.clone())
    }

    fn on_inner_next(&mut self, value: T) -> InnerAction<T, T> {
        InnerAction::Resubmit(value)
    }
}

/// Strategies that can switch to expand mode while keeping their other behaviour.
///
/// Hook layers stay in place: only the strategy at the bottom becomes [`Expand`].
pub trait IntoExpand<T> {
    type Expanded: MergeStrategy<T, T>;

    fn into_expand(self) -> Self::Expanded;
}

impl<T: Clone> IntoExpand<T> for Flatten {
    type Expanded = Expand;

    fn into_expand(self) -> Expand {
        Expand
    }
}

impl<T: Clone> IntoExpand<T> for Expand {
    type Expanded = Self;

    fn into_expand(self) -> Self {
        self
    }
}

impl<T, S> IntoExpand<T> for Hooks<S, T>
where
    S: IntoExpand<T>,
    T: 'static,
{
    type Expanded = Hooks<S::Expanded, T>;

    fn into_expand(self) -> Self::Expanded {
        Hooks {
            inner: self.inner.into_expand(),
            before_next: self.before_next,
            before_complete: self.before_complete,
        }
    }
}

/// Accumulating merge: each inner value replaces the shared state and is relayed.
///
/// The state handle is shared with the projection, which reads it to build the next
/// inner sequence.
#[derive(Debug)]
pub struct Scan<R> {
    state: Arc<Mutex<R>>,
}

impl<R> Scan<R> {
    pub fn new(state: Arc<Mutex<R>>) -> Self {
        Self { state }
    }
}

impl<T, R> MergeStrategy<T, R> for Scan<R>
where
    R: Clone + Send + 'static,
{
    fn on_inner_next(&mut self, value: R) -> InnerAction<T, R> {
        *self.state.lock() = value.clone();
        InnerAction::Relay(value)
    }
}

type BeforeNext<R> = Box<dyn FnMut(&R) + Send>;
type BeforeComplete<R> = Box<dyn FnOnce() -> Option<R> + Send>;

/// Caller-supplied hooks layered over another strategy.
///
/// `before_next` sees every inner value before the wrapped strategy does.
/// `before_complete` runs once before completion; if it yields a value that value is
/// emitted, otherwise the wrapped strategy's final value is.
pub struct Hooks<S, R> {
    inner: S,
    before_next: Option<BeforeNext<R>>,
    before_complete: Option<BeforeComplete<R>>,
}

impl<S, R> Hooks<S, R> {
    pub fn around(inner: S) -> Self {
        Self {
            inner,
            before_next: None,
            before_complete: None,
        }
    }

    #[must_use]
    pub fn before_next(mut self, hook: impl FnMut(&R) + Send + 'static) -> Self {
        self.before_next = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn before_complete(mut self, hook: impl FnOnce() -> Option<R> + Send + 'static) -> Self {
        self.before_complete = Some(Box::new(hook));
        self
    }
}

impl<T, R, S> MergeStrategy<T, R> for Hooks<S, R>
where
    S: MergeStrategy<T, R>,
    R: 'static,
{
    fn on_dispatch(&mut self, value: &T) -> Option<R> {
        self.inner.on_dispatch(value)
    }

    fn on_inner_next(&mut self, value: R) -> InnerAction<T, R> {
        if let Some(hook) = self.before_next.as_mut() {
            hook(&value);
        }
        self.inner.on_inner_next(value)
    }

    fn on_before_complete(&mut self) -> Option<R> {
        let own = self.before_complete.take().and_then(|hook| hook());
        let inner = self.inner.on_before_complete();
        own.or(inner)
    }
}
