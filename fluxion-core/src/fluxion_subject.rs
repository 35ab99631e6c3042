// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject.
//!
//! A [`FluxionSubject`] is both the producing and the observable end of a sequence:
//! values pushed with [`next`](FluxionSubject::next) are broadcast to every current
//! subscriber.
//!
//! ## Characteristics
//!
//! - **Hot**: Late subscribers do not receive past values, only values sent after subscribing.
//! - **Synchronous**: `next` delivers to every subscriber before returning.
//! - **Thread-safe**: Cheap to clone; all clones share the same internal state.
//! - **Terminal replay**: Subscribing after `close` or `error` immediately receives that
//!   terminal signal.
//!
//! ## Example
//!
//! ```
//! use fluxion_core::{FluxionSubject, ObservableExt, StreamItem};
//! use futures::executor::block_on;
//! use futures::StreamExt;
//!
//! let subject = FluxionSubject::<i32>::new();
//! let stream = subject.to_stream();
//!
//! subject.next(1).unwrap();
//! subject.next(2).unwrap();
//! subject.close();
//!
//! let items: Vec<_> = block_on(stream.collect());
//! assert_eq!(items, vec![StreamItem::Value(1), StreamItem::Value(2)]);
//! ```

use crate::logging::{debug, trace};
use crate::{FluxionError, Observable, Subscriber, Subscription};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Errors specific to subject operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject has been closed or failed and cannot accept new items.
    #[error("Subject is closed")]
    Closed,
}

enum Terminal {
    Completed,
    Failed(FluxionError),
}

struct SubjectState<T> {
    terminal: Option<Terminal>,
    subscribers: Vec<(u64, Subscriber<T>)>,
    next_id: u64,
}

/// A hot subject that broadcasts values to all current subscribers.
///
/// See the [module documentation](self) for details.
pub struct FluxionSubject<T> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> FluxionSubject<T> {
    /// Creates a new open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                terminal: None,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Sends a value to every current subscriber.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject has been closed or failed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        let subscribers = self.snapshot()?;
        for subscriber in &subscribers {
            subscriber.next(value.clone());
        }
        Ok(())
    }

    /// Fails every subscriber and terminates the subject.
    ///
    /// # Errors
    ///
    /// Returns `SubjectError::Closed` if the subject was already terminated.
    pub fn error(&self, error: FluxionError) -> Result<(), SubjectError> {
        let subscribers = self.terminate(Terminal::Failed(error.clone()))?;
        debug!("subject: failed with {} subscribers: {}", subscribers.len(), error);
        for subscriber in subscribers {
            subscriber.error(error.clone());
        }
        Ok(())
    }

    /// Completes every subscriber. Closing is idempotent.
    pub fn close(&self) {
        if let Ok(subscribers) = self.terminate(Terminal::Completed) {
            debug!("subject: closed with {} subscribers", subscribers.len());
            for subscriber in subscribers {
                subscriber.complete();
            }
        }
    }

    /// Returns `true` if the subject has been closed or failed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Returns the number of currently active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().subscribers.len()
    }

    fn snapshot(&self) -> Result<Vec<Subscriber<T>>, SubjectError> {
        let state = self.state.lock();
        if state.terminal.is_some() {
            return Err(SubjectError::Closed);
        }
        Ok(state.subscribers.iter().map(|(_, s)| s.clone()).collect())
    }

    fn terminate(&self, terminal: Terminal) -> Result<Vec<Subscriber<T>>, SubjectError> {
        let mut state = self.state.lock();
        if state.terminal.is_some() {
            return Err(SubjectError::Closed);
        }
        state.terminal = Some(terminal);
        Ok(state.subscribers.drain(..).map(|(_, s)| s).collect())
    }
}

impl<T: Clone + Send + 'static> Observable<T> for FluxionSubject<T> {
    fn subscribe(&self, subscriber: Subscriber<T>) -> Subscription {
        let mut state = self.state.lock();
        match &state.terminal {
            Some(Terminal::Completed) => {
                drop(state);
                trace!("subject: late subscriber, replaying completion");
                subscriber.complete();
            }
            Some(Terminal::Failed(error)) => {
                let error = error.clone();
                drop(state);
                trace!("subject: late subscriber, replaying error");
                subscriber.error(error);
            }
            None => {
                let id = state.next_id;
                state.next_id += 1;
                state.subscribers.push((id, subscriber.clone()));
                drop(state);
                trace!("subject: subscriber {} attached", id);

                let weak: Weak<Mutex<SubjectState<T>>> = Arc::downgrade(&self.state);
                subscriber.add(move || {
                    if let Some(state) = weak.upgrade() {
                        state.lock().subscribers.retain(|(sid, _)| *sid != id);
                        trace!("subject: subscriber {} detached", id);
                    }
                });
            }
        }
        subscriber.subscription()
    }
}

impl<T: Clone + Send + 'static> Default for FluxionSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FluxionSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
