// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Concurrency;
use fluxion_core::{FluxionError, Subscription};
use std::collections::{BTreeMap, VecDeque};

pub(crate) type SlotId = u64;

/// An outer value that has been granted a concurrency slot.
pub(crate) struct Reserved<T> {
    pub(crate) value: T,
    pub(crate) index: usize,
    pub(crate) slot: SlotId,
}

/// A notification waiting for the drain loop.
pub(crate) enum Signal<T, R> {
    OuterNext(T),
    OuterComplete,
    InnerNext(R),
    InnerComplete(SlotId),
    Failed(FluxionError),
    Scheduled(Reserved<T>),
}

/// Everything a merge mutates, guarded as one unit by the engine.
pub(crate) struct EngineState<T, R> {
    concurrency: Concurrency,
    buffer: VecDeque<T>,
    active: usize,
    index: usize,
    next_slot: SlotId,
    // A slot is `None` between reservation and the inner subscribe call returning.
    slots: BTreeMap<SlotId, Option<Subscription>>,
    outer: Option<Subscription>,
    outer_complete: bool,
    terminated: bool,
    draining: bool,
    queue: VecDeque<Signal<T, R>>,
}

impl<T, R> EngineState<T, R> {
    pub(crate) fn new(concurrency: Concurrency) -> Self {
        Self {
            concurrency,
            buffer: VecDeque::new(),
            active: 0,
            index: 0,
            next_slot: 0,
            slots: BTreeMap::new(),
            outer: None,
            outer_complete: false,
            terminated: false,
            draining: false,
            queue: VecDeque::new(),
        }
    }

    /// Queues a signal. Returns `true` if the caller must now drain the queue.
    pub(crate) fn enqueue(&mut self, signal: Signal<T, R>) -> bool {
        if self.terminated {
            return false;
        }
        self.queue.push_back(signal);
        if self.draining {
            return false;
        }
        self.draining = true;
        true
    }

    /// The next signal to process. `None` ends the drain.
    pub(crate) fn next_signal(&mut self) -> Option<Signal<T, R>> {
        let signal = if self.terminated {
            None
        } else {
            self.queue.pop_front()
        };
        if signal.is_none() {
            self.draining = false;
            self.queue.clear();
        }
        signal
    }

    /// Grants `value` a slot, or buffers it when the limit is reached.
    pub(crate) fn admit(&mut self, value: T) -> Option<Reserved<T>> {
        if self.concurrency.admits(self.active) {
            Some(self.reserve(value))
        } else {
            self.buffer.push_back(value);
            None
        }
    }

    fn reserve(&mut self, value: T) -> Reserved<T> {
        self.active += 1;
        let index = self.index;
        self.index += 1;
        let slot = self.next_slot;
        self.next_slot += 1;
        self.slots.insert(slot, None);
        Reserved { value, index, slot }
    }

    /// Frees `slot` and reserves slots for as many buffered values as now fit, oldest first.
    pub(crate) fn release(&mut self, slot: SlotId) -> Vec<Reserved<T>> {
        if self.slots.remove(&slot).is_none() {
            return Vec::new();
        }
        self.active -= 1;

        let mut ready = Vec::new();
        while self.concurrency.admits(self.active) {
            let Some(value) = self.buffer.pop_front() else {
                break;
            };
            ready.push(self.reserve(value));
        }
        ready
    }

    /// Stores the subscription occupying `slot`. Returns it back if it must be torn down.
    pub(crate) fn attach(&mut self, slot: SlotId, subscription: Subscription) -> Option<Subscription> {
        if self.terminated {
            return Some(subscription);
        }
        match self.slots.get_mut(&slot) {
            Some(entry) => {
                *entry = Some(subscription);
                None
            }
            None => Some(subscription),
        }
    }

    /// Stores the outer subscription. Returns it back if it must be torn down.
    pub(crate) fn attach_outer(&mut self, subscription: Subscription) -> Option<Subscription> {
        if self.terminated {
            return Some(subscription);
        }
        if !self.outer_complete {
            self.outer = Some(subscription);
        }
        None
    }

    pub(crate) fn complete_outer(&mut self) {
        self.outer_complete = true;
        self.outer = None;
    }

    /// The completion gate.
    pub(crate) fn is_done(&self) -> bool {
        self.outer_complete && self.buffer.is_empty() && self.active == 0
    }

    /// Terminates the engine, releasing the buffer. Returns the subscriptions to tear
    /// down, or `None` if the engine had already terminated.
    pub(crate) fn close(&mut self) -> Option<Vec<Subscription>> {
        if self.terminated {
            return None;
        }
        self.terminated = true;
        self.buffer = VecDeque::new();
        self.queue.clear();

        let mut subscriptions: Vec<Subscription> =
            std::mem::take(&mut self.slots).into_values().flatten().collect();
        subscriptions.extend(self.outer.take());
        Some(subscriptions)
    }

    pub(crate) const fn active(&self) -> usize {
        self.active
    }

    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub(crate) const fn is_terminated(&self) -> bool {
        self.terminated
    }
}
