// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, Notification, Observer};
use parking_lot::Mutex;
use std::sync::Arc;

/// An observer that records every notification it receives, in order.
///
/// Clones share the same log, so a test keeps one clone for assertions and hands
/// the other to `subscribe_with`.
///
/// ```
/// use fluxion_core::{of, Notification, ObservableExt};
/// use fluxion_test_utils::RecordingObserver;
///
/// let recorder = RecordingObserver::new();
/// of(vec![1, 2]).subscribe_with(recorder.clone());
///
/// assert_eq!(recorder.values(), vec![1, 2]);
/// assert_eq!(recorder.notifications().last(), Some(&Notification::Complete));
/// ```
#[derive(Debug)]
pub struct RecordingObserver<T> {
    log: Arc<Mutex<Vec<Notification<T>>>>,
}

impl<T: Clone> RecordingObserver<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every notification received so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification<T>> {
        self.log.lock().clone()
    }

    /// The values received so far.
    #[must_use]
    pub fn values(&self) -> Vec<T> {
        self.log
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notification::Next(v) => Some(v.clone()),
                _ => None,
            })
            .collect()
    }

    /// The error received, if any.
    #[must_use]
    pub fn error(&self) -> Option<FluxionError> {
        self.log.lock().iter().find_map(|n| match n {
            Notification::Error(e) => Some(e.clone()),
            _ => None,
        })
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.log
            .lock()
            .iter()
            .any(|n| matches!(n, Notification::Complete))
    }

    /// Number of terminal signals received. A well-behaved producer never exceeds one.
    #[must_use]
    pub fn terminal_count(&self) -> usize {
        self.log.lock().iter().filter(|n| n.is_terminal()).count()
    }

    /// Asserts that nothing arrived after the first terminal signal.
    ///
    /// # Panics
    ///
    /// Panics if a notification follows the first terminal one.
    pub fn assert_terminated_once(&self) {
        let log = self.log.lock();
        let position = log.iter().position(Notification::is_terminal);
        match position {
            Some(index) => assert_eq!(
                index + 1,
                log.len(),
                "notifications arrived after the terminal signal"
            ),
            None => panic!("expected a terminal signal, got none"),
        }
    }
}

impl<T: Clone> Default for RecordingObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RecordingObserver<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

impl<T: Send> Observer<T> for RecordingObserver<T> {
    fn next(&self, value: T) {
        self.log.lock().push(Notification::Next(value));
    }

    fn error(&self, error: FluxionError) {
        self.log.lock().push(Notification::Error(error));
    }

    fn complete(&self) {
        self.log.lock().push(Notification::Complete);
    }
}
