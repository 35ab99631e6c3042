// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The shared core behind every merge-family operator.
//!
//! A [`MergeEngine`] subscribes to an outer sequence, projects each outer value into an
//! inner sequence, keeps at most [`Concurrency`] inner subscriptions open, buffers the
//! overflow in arrival order and forwards everything to one downstream [`Subscriber`].
//!
//! # Serialization
//!
//! Notifications may arrive from any thread and from inside the engine's own calls
//! (an inner sequence that emits synchronously while being subscribed, a downstream
//! observer that feeds the outer source). Every notification is turned into a signal and
//! pushed onto a queue; whichever caller finds the queue idle drains it, the others
//! return immediately. This gives three guarantees:
//!
//! - downstream sees one notification at a time, never concurrently
//! - nested dispatch never grows the stack, however deep an expansion goes
//! - the projection, the strategy and the downstream observer are never called while
//!   the engine's state lock is held
//!
//! # Completion
//!
//! Downstream completes exactly once, after the outer sequence has completed and every
//! buffered or open inner sequence has finished. The first error from any source fails
//! downstream immediately and tears down everything else.

mod engine_state;

use crate::logging::{debug, trace};
use crate::strategy::{Flatten, Hooks, InnerAction, IntoExpand, MergeStrategy};
use crate::{Concurrency, Project};
use engine_state::{EngineState, Reserved, Signal, SlotId};
use fluxion_core::{FluxionError, Observable, Observer, Scheduler, Subscriber, Subscription};
use parking_lot::Mutex;
use std::marker::PhantomData;
use std::sync::Arc;

/// Configures a [`MergeEngine`] before it is bound to a downstream subscriber.
///
/// ```
/// use fluxion_core::{of, Observable, Subscriber};
/// use fluxion_merge::{Concurrency, MergeEngine};
/// use fluxion_test_utils::RecordingObserver;
///
/// let recorder = RecordingObserver::new();
/// let engine = MergeEngine::builder(|x: i32, _index: usize| of(vec![x, x * 10]))
///     .concurrency(Concurrency::SERIAL)
///     .build(Subscriber::new(recorder.clone()));
///
/// engine.start(&of(vec![1, 2]));
///
/// assert_eq!(recorder.values(), vec![1, 10, 2, 20]);
/// assert!(recorder.is_completed());
/// ```
pub struct MergeEngineBuilder<T, R, P, S> {
    project: P,
    strategy: S,
    concurrency: Concurrency,
    scheduler: Option<Arc<dyn Scheduler>>,
    _marker: PhantomData<fn(T) -> R>,
}

impl<T, R, P, S> MergeEngineBuilder<T, R, P, S> {
    /// Limits how many inner subscriptions may be open at once. Defaults to unbounded.
    #[must_use]
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Routes every dispatch of a buffered value through `scheduler` instead of
    /// subscribing the inner sequence inline.
    #[must_use]
    pub fn inner_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Replaces the variant behaviour.
    #[must_use]
    pub fn strategy<S2>(self, strategy: S2) -> MergeEngineBuilder<T, R, P, S2> {
        MergeEngineBuilder {
            project: self.project,
            strategy,
            concurrency: self.concurrency,
            scheduler: self.scheduler,
            _marker: PhantomData,
        }
    }

    /// Runs `hook` on every inner value before it is handled.
    #[must_use]
    pub fn on_before_next(
        self,
        hook: impl FnMut(&R) + Send + 'static,
    ) -> MergeEngineBuilder<T, R, P, Hooks<S, R>> {
        let strategy = Hooks::around(self.strategy).before_next(hook);
        MergeEngineBuilder {
            project: self.project,
            strategy,
            concurrency: self.concurrency,
            scheduler: self.scheduler,
            _marker: PhantomData,
        }
    }

    /// Runs `hook` once right before downstream completes; a returned value is emitted
    /// ahead of the completion.
    #[must_use]
    pub fn on_before_complete(
        self,
        hook: impl FnOnce() -> Option<R> + Send + 'static,
    ) -> MergeEngineBuilder<T, R, P, Hooks<S, R>> {
        let strategy = Hooks::around(self.strategy).before_complete(hook);
        MergeEngineBuilder {
            project: self.project,
            strategy,
            concurrency: self.concurrency,
            scheduler: self.scheduler,
            _marker: PhantomData,
        }
    }

    /// Binds the engine to `sink`. Nothing is subscribed until [`MergeEngine::start`].
    pub fn build(self, sink: Subscriber<R>) -> MergeEngine<T, R, P, S>
    where
        T: Send + 'static,
        R: Send + 'static,
        P: Project<T, R>,
        S: MergeStrategy<T, R>,
    {
        MergeEngine {
            shared: Arc::new(Shared {
                project: self.project,
                strategy: Mutex::new(self.strategy),
                scheduler: self.scheduler,
                sink,
                state: Mutex::new(EngineState::new(self.concurrency)),
            }),
        }
    }
}

impl<T, P, S> MergeEngineBuilder<T, T, P, S>
where
    S: IntoExpand<T>,
{
    /// Switches to expand mode: every dispatched value is emitted and every inner value
    /// is projected again. Hooks configured before or after this call both apply.
    #[must_use]
    pub fn expand(self) -> MergeEngineBuilder<T, T, P, S::Expanded> {
        MergeEngineBuilder {
            project: self.project,
            strategy: self.strategy.into_expand(),
            concurrency: self.concurrency,
            scheduler: self.scheduler,
            _marker: PhantomData,
        }
    }
}

/// One running merge. See the [module documentation](self).
pub struct MergeEngine<T, R, P, S> {
    shared: Arc<Shared<T, R, P, S>>,
}

impl<T, R, P> MergeEngine<T, R, P, Flatten> {
    /// Starts configuring an engine around `project`.
    pub fn builder(project: P) -> MergeEngineBuilder<T, R, P, Flatten> {
        MergeEngineBuilder {
            project,
            strategy: Flatten,
            concurrency: Concurrency::Unbounded,
            scheduler: None,
            _marker: PhantomData,
        }
    }
}

impl<T, R, P, S> MergeEngine<T, R, P, S>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Project<T, R>,
    S: MergeStrategy<T, R>,
{
    /// Subscribes to `source` and returns the downstream subscription. Unsubscribing it
    /// tears down the outer subscription, every open inner subscription and every
    /// scheduled dispatch, and discards the buffer.
    pub fn start<O>(&self, source: &O) -> Subscription
    where
        O: Observable<T> + ?Sized,
    {
        let weak = Arc::downgrade(&self.shared);
        self.shared.sink.add(move || {
            if let Some(shared) = weak.upgrade() {
                shared.dispose();
            }
        });

        let outer = source.subscribe(Subscriber::new(OuterObserver {
            shared: Arc::clone(&self.shared),
        }));
        let stale = self.shared.state.lock().attach_outer(outer);
        if let Some(stale) = stale {
            stale.unsubscribe();
        }

        self.shared.sink.subscription()
    }

    /// Number of inner subscriptions currently open or scheduled.
    pub fn active(&self) -> usize {
        self.shared.state.lock().active()
    }

    /// Number of outer values waiting for a free slot.
    pub fn buffered(&self) -> usize {
        self.shared.state.lock().buffered()
    }

    /// Whether downstream has received its terminal notification or been torn down.
    pub fn is_terminated(&self) -> bool {
        self.shared.state.lock().is_terminated()
    }
}

struct Shared<T, R, P, S> {
    project: P,
    strategy: Mutex<S>,
    scheduler: Option<Arc<dyn Scheduler>>,
    sink: Subscriber<R>,
    state: Mutex<EngineState<T, R>>,
}

impl<T, R, P, S> Shared<T, R, P, S>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Project<T, R>,
    S: MergeStrategy<T, R>,
{
    fn submit(self: &Arc<Self>, signal: Signal<T, R>) {
        let elected = self.state.lock().enqueue(signal);
        if elected {
            self.drain();
        }
    }

    fn drain(self: &Arc<Self>) {
        loop {
            let next = self.state.lock().next_signal();
            match next {
                Some(signal) => self.process(signal),
                None => return,
            }
        }
    }

    fn process(self: &Arc<Self>, signal: Signal<T, R>) {
        match signal {
            Signal::OuterNext(value) => self.admit(value),
            Signal::InnerNext(value) => {
                let action = self.strategy.lock().on_inner_next(value);
                match action {
                    InnerAction::Relay(value) => self.sink.next(value),
                    InnerAction::Resubmit(value) => self.admit(value),
                }
            }
            Signal::InnerComplete(slot) => self.release(slot),
            Signal::Scheduled(reserved) => self.subscribe_inner(reserved),
            Signal::OuterComplete => {
                let done = {
                    let mut state = self.state.lock();
                    state.complete_outer();
                    state.is_done()
                };
                if done {
                    self.finish();
                }
            }
            Signal::Failed(error) => self.fail(error),
        }
    }

    fn admit(self: &Arc<Self>, value: T) {
        let reserved = self.state.lock().admit(value);
        match reserved {
            Some(reserved) => self.subscribe_inner(reserved),
            None => trace!("merge: concurrency limit reached, value buffered"),
        }
    }

    fn subscribe_inner(self: &Arc<Self>, reserved: Reserved<T>) {
        let Reserved { value, index, slot } = reserved;

        let echo = self.strategy.lock().on_dispatch(&value);
        if let Some(echo) = echo {
            self.sink.next(echo);
        }
        if self.state.lock().is_terminated() {
            return;
        }

        trace!("merge: subscribing inner sequence #{}", index);
        let subscriber = Subscriber::new(InnerObserver {
            shared: Arc::clone(self),
            slot,
        });
        let subscription = self.project.subscribe_projected(value, index, subscriber);
        let stale = self.state.lock().attach(slot, subscription);
        if let Some(stale) = stale {
            stale.unsubscribe();
        }
    }

    fn release(self: &Arc<Self>, slot: SlotId) {
        let (ready, done) = {
            let mut state = self.state.lock();
            let ready = state.release(slot);
            (ready, state.is_done())
        };
        for reserved in ready {
            self.launch(reserved);
        }
        if done {
            self.finish();
        }
    }

    fn launch(self: &Arc<Self>, reserved: Reserved<T>) {
        let Some(scheduler) = self.scheduler.as_ref() else {
            self.subscribe_inner(reserved);
            return;
        };

        let slot = reserved.slot;
        let shared = Arc::clone(self);
        let handle = scheduler.schedule(Box::new(move || {
            shared.submit(Signal::Scheduled(reserved));
        }));
        let stale = self.state.lock().attach(slot, handle);
        if let Some(stale) = stale {
            stale.unsubscribe();
        }
    }

    fn finish(&self) {
        let closed = self.state.lock().close();
        let Some(subscriptions) = closed else {
            return;
        };
        debug!("merge: completed");

        let last = self.strategy.lock().on_before_complete();
        if let Some(last) = last {
            self.sink.next(last);
        }
        self.sink.complete();
        unsubscribe_all(subscriptions);
    }

    fn fail(&self, error: FluxionError) {
        let closed = self.state.lock().close();
        let Some(subscriptions) = closed else {
            return;
        };
        debug!("merge: failed: {}", error);

        self.sink.error(error);
        unsubscribe_all(subscriptions);
    }

    fn dispose(&self) {
        let closed = self.state.lock().close();
        if let Some(subscriptions) = closed {
            trace!("merge: torn down");
            unsubscribe_all(subscriptions);
        }
    }
}

fn unsubscribe_all(subscriptions: Vec<Subscription>) {
    for subscription in subscriptions {
        subscription.unsubscribe();
    }
}

struct OuterObserver<T, R, P, S> {
    shared: Arc<Shared<T, R, P, S>>,
}

impl<T, R, P, S> Observer<T> for OuterObserver<T, R, P, S>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Project<T, R>,
    S: MergeStrategy<T, R>,
{
    fn next(&self, value: T) {
        self.shared.submit(Signal::OuterNext(value));
    }

    fn error(&self, error: FluxionError) {
        self.shared.submit(Signal::Failed(error));
    }

    fn complete(&self) {
        self.shared.submit(Signal::OuterComplete);
    }
}

struct InnerObserver<T, R, P, S> {
    shared: Arc<Shared<T, R, P, S>>,
    slot: SlotId,
}

impl<T, R, P, S> Observer<R> for InnerObserver<T, R, P, S>
where
    T: Send + 'static,
    R: Send + 'static,
    P: Project<T, R>,
    S: MergeStrategy<T, R>,
{
    fn next(&self, value: R) {
        self.shared.submit(Signal::InnerNext(value));
    }

    fn error(&self, error: FluxionError) {
        self.shared.submit(Signal::Failed(error));
    }

    fn complete(&self) {
        self.shared.submit(Signal::InnerComplete(self.slot));
    }
}
