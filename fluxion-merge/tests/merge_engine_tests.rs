// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{create, of, FluxionError, FluxionSubject, Notification, Subscriber};
use fluxion_merge::{Concurrency, InnerAction, MergeEngine, MergeStrategy, Scan};
use fluxion_test_utils::test_data::{person_alice, person_bob, person_charlie, TestData};
use fluxion_test_utils::{RecordingObserver, SubscriptionProbe};
use parking_lot::Mutex;
use std::sync::Arc;

#[tokio::test]
async fn test_before_complete_value_is_emitted_ahead_of_completion() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder(|value: i32, _index: usize| of(vec![value]))
        .on_before_complete(|| Some(99))
        .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![1, 2]));

    // Assert
    assert_eq!(
        recorder.notifications(),
        vec![
            Notification::Next(1),
            Notification::Next(2),
            Notification::Next(99),
            Notification::Complete,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_before_complete_returning_none_only_completes() -> anyhow::Result<()> {
    // Arrange
    let calls = Arc::new(Mutex::new(0));
    let recorder = RecordingObserver::<i32>::new();
    let engine = MergeEngine::builder(|value: i32, _index: usize| of(vec![value]))
        .on_before_complete({
            let calls = calls.clone();
            move || {
                *calls.lock() += 1;
                None
            }
        })
        .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![5]));

    // Assert
    assert_eq!(*calls.lock(), 1);
    assert_eq!(
        recorder.notifications(),
        vec![Notification::Next(5), Notification::Complete]
    );
    Ok(())
}

#[tokio::test]
async fn test_before_next_sees_every_inner_value_before_downstream() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder(|person: TestData, _index: usize| {
        of(vec![person.name().to_uppercase()])
    })
    .on_before_next({
        let seen = seen.clone();
        let recorder = recorder.clone();
        move |name: &String| seen.lock().push((name.clone(), recorder.values().len()))
    })
    .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![person_alice(), person_bob()]));

    // Assert
    assert_eq!(
        *seen.lock(),
        vec![("ALICE".to_string(), 0), ("BOB".to_string(), 1)]
    );
    assert_eq!(recorder.values(), vec!["ALICE", "BOB"]);
    Ok(())
}

#[tokio::test]
async fn test_buffer_is_only_used_at_the_limit() -> anyhow::Result<()> {
    // Arrange
    let outer = FluxionSubject::<usize>::new();
    let inners: Vec<FluxionSubject<usize>> = (0..4).map(|_| FluxionSubject::new()).collect();
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder({
        let inners = inners.clone();
        move |value: usize, _index: usize| inners[value].clone()
    })
    .concurrency(Concurrency::limited(2)?)
    .build(Subscriber::new(recorder.clone()));
    engine.start(&outer);

    // Act & Assert
    outer.next(0)?;
    assert_eq!((engine.active(), engine.buffered()), (1, 0));

    outer.next(1)?;
    outer.next(2)?;
    outer.next(3)?;
    assert_eq!((engine.active(), engine.buffered()), (2, 2));

    inners[1].close();
    assert_eq!((engine.active(), engine.buffered()), (2, 1));

    inners[0].close();
    inners[2].close();
    assert_eq!((engine.active(), engine.buffered()), (1, 0));

    outer.close();
    assert!(!recorder.is_completed());
    inners[3].close();
    assert!(recorder.is_completed());
    assert!(engine.is_terminated());
    Ok(())
}

#[tokio::test]
async fn test_unbounded_never_buffers() -> anyhow::Result<()> {
    // Arrange
    let outer = FluxionSubject::<usize>::new();
    let inner = FluxionSubject::<usize>::new();
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder({
        let inner = inner.clone();
        move |_value: usize, _index: usize| inner.clone()
    })
    .build(Subscriber::new(recorder.clone()));
    engine.start(&outer);

    // Act
    for value in 0..100 {
        outer.next(value)?;
    }

    // Assert
    assert_eq!(engine.active(), 100);
    assert_eq!(engine.buffered(), 0);
    assert_eq!(inner.subscriber_count(), 100);
    Ok(())
}

#[tokio::test]
async fn test_synchronous_inner_emits_while_subscribing() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder(|value: i32, _index: usize| {
        create(move |subscriber| {
            subscriber.next(value);
            subscriber.next(value + 1);
            subscriber.complete();
        })
    })
    .concurrency(Concurrency::SERIAL)
    .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![10, 20]));

    // Assert
    assert_eq!(recorder.values(), vec![10, 11, 20, 21]);
    assert!(recorder.is_completed());
    assert_eq!(engine.active(), 0);
    Ok(())
}

#[tokio::test]
async fn test_downstream_feeding_the_outer_source_does_not_deadlock() -> anyhow::Result<()> {
    // Arrange
    let outer = FluxionSubject::<u32>::new();
    let recorder = RecordingObserver::new();
    let feedback = outer.clone();
    let sink = Subscriber::new(fluxion_core::FnObserver::new(
        {
            let recorder = recorder.clone();
            move |value: u32| {
                fluxion_core::Observer::next(&recorder, value);
                if value < 3 {
                    let _ = feedback.next(value + 1);
                } else {
                    feedback.close();
                }
            }
        },
        |_error: FluxionError| {},
        {
            let recorder = recorder.clone();
            move || fluxion_core::Observer::<u32>::complete(&recorder)
        },
    ));
    let engine = MergeEngine::builder(|value: u32, _index: usize| of(vec![value]))
        .concurrency(Concurrency::SERIAL)
        .build(sink);
    engine.start(&outer);

    // Act
    outer.next(0)?;

    // Assert
    assert_eq!(recorder.values(), vec![0, 1, 2, 3]);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_discards_buffer_and_is_idempotent() -> anyhow::Result<()> {
    // Arrange
    let probe = SubscriptionProbe::new();
    let recorder = RecordingObserver::<usize>::new();
    let outer = FluxionSubject::<usize>::new();
    let engine = MergeEngine::builder({
        let probe = probe.clone();
        move |value: usize, _index: usize| probe.track(value, fluxion_core::never::<usize>())
    })
    .concurrency(Concurrency::SERIAL)
    .build(Subscriber::new(recorder.clone()));
    let subscription = engine.start(&outer);
    outer.next(0)?;
    outer.next(1)?;
    outer.next(2)?;

    // Act
    subscription.unsubscribe();
    subscription.unsubscribe();

    // Assert
    assert_eq!(engine.buffered(), 0);
    assert!(engine.is_terminated());
    assert_eq!(probe.subscribed(), vec![0]);
    assert_eq!(probe.unsubscribed(), vec![0]);
    assert!(recorder.notifications().is_empty());
    Ok(())
}

/// Counts dispatched values and reports the count as the final value.
struct CountingStrategy {
    dispatched: usize,
}

impl MergeStrategy<TestData, String> for CountingStrategy {
    fn on_dispatch(&mut self, _value: &TestData) -> Option<String> {
        self.dispatched += 1;
        None
    }

    fn on_inner_next(&mut self, value: String) -> InnerAction<TestData, String> {
        InnerAction::Relay(format!("<{value}>"))
    }

    fn on_before_complete(&mut self) -> Option<String> {
        Some(format!("dispatched {}", self.dispatched))
    }
}

#[tokio::test]
async fn test_custom_strategy_plugs_into_the_engine() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder(|person: TestData, _index: usize| {
        of(vec![person.name().to_string()])
    })
    .strategy(CountingStrategy { dispatched: 0 })
    .concurrency(Concurrency::SERIAL)
    .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![person_alice(), person_bob(), person_charlie()]));

    // Assert
    assert_eq!(
        recorder.values(),
        vec!["<Alice>", "<Bob>", "<Charlie>", "dispatched 3"]
    );
    assert!(recorder.is_completed());
    Ok(())
}

fn countdown_to(limit: u32) -> impl Fn(u32, usize) -> Vec<u32> + Send + Sync + 'static {
    move |n, _| if n < limit { vec![n + 1] } else { Vec::new() }
}

#[tokio::test]
async fn test_before_next_set_ahead_of_expand_still_runs() -> anyhow::Result<()> {
    // Arrange
    let hook_calls = Arc::new(Mutex::new(0));
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::<u32, u32, _, _>::builder(countdown_to(3))
        .on_before_next({
            let hook_calls = hook_calls.clone();
            move |_: &u32| *hook_calls.lock() += 1
        })
        .expand()
        .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![0]));

    // Assert
    assert_eq!(recorder.values(), vec![0, 1, 2, 3]);
    assert_eq!(*hook_calls.lock(), 3);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_before_complete_set_ahead_of_expand_still_emits() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::<u32, u32, _, _>::builder(countdown_to(2))
        .on_before_complete(|| Some(99))
        .expand()
        .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![0]));

    // Assert
    assert_eq!(
        recorder.notifications(),
        vec![
            Notification::Next(0),
            Notification::Next(1),
            Notification::Next(2),
            Notification::Next(99),
            Notification::Complete,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_hooks_set_after_expand_run_too() -> anyhow::Result<()> {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::<u32, u32, _, _>::builder(countdown_to(2))
        .expand()
        .on_before_next({
            let seen = seen.clone();
            move |value: &u32| seen.lock().push(*value)
        })
        .on_before_complete(|| Some(10))
        .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![0]));

    // Assert
    assert_eq!(*seen.lock(), vec![1, 2]);
    assert_eq!(recorder.values(), vec![0, 1, 2, 10]);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_before_next_over_scan_sees_value_before_state_update() -> anyhow::Result<()> {
    // Arrange
    let state = Arc::new(Mutex::new(0));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = RecordingObserver::new();
    let engine = MergeEngine::builder({
        let state = state.clone();
        move |value: i32, _index: usize| {
            let acc = *state.lock();
            of(vec![acc + value])
        }
    })
    .strategy(Scan::new(state.clone()))
    .on_before_next({
        let seen = seen.clone();
        let state = state.clone();
        move |value: &i32| seen.lock().push((*value, *state.lock()))
    })
    .concurrency(Concurrency::SERIAL)
    .build(Subscriber::new(recorder.clone()));

    // Act
    engine.start(&of(vec![1, 2, 3]));

    // Assert
    assert_eq!(recorder.values(), vec![1, 3, 6]);
    assert_eq!(*seen.lock(), vec![(1, 0), (3, 1), (6, 3)]);
    assert_eq!(*state.lock(), 6);
    assert!(recorder.is_completed());
    Ok(())
}
