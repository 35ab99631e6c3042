// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{of, FluxionSubject, Notification, ObservableExt};
use fluxion_merge::{Concurrency, MergeExt};
use fluxion_test_utils::test_data::{person_alice, person_bob, person_charlie, TestData};
use fluxion_test_utils::RecordingObserver;

#[tokio::test]
async fn test_merge_scan_accumulates_running_total() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    of(vec![1, 2, 3])
        .merge_scan(|total: &i32, x: i32, _| of(vec![total + x]), 0, Concurrency::SERIAL)
        .subscribe_with(recorder.clone());

    // Assert
    assert_eq!(
        recorder.notifications(),
        vec![
            Notification::Next(1),
            Notification::Next(3),
            Notification::Next(6),
            Notification::Complete,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_merge_scan_every_inner_value_replaces_state() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    of(vec![person_alice(), person_bob()])
        .merge_scan(
            |names: &String, person: TestData, _| {
                of(vec![
                    format!("{names}+"),
                    format!("{names}+{}", person.name()),
                ])
            },
            String::from("seed"),
            Concurrency::SERIAL,
        )
        .subscribe_with(recorder.clone());

    // Assert
    assert_eq!(
        recorder.values(),
        vec!["seed+", "seed+Alice", "seed+Alice+", "seed+Alice+Bob"]
    );
    Ok(())
}

#[tokio::test]
async fn test_merge_scan_restarts_from_seed_per_subscription() -> anyhow::Result<()> {
    // Arrange
    let ages = of(vec![person_alice(), person_charlie()]).merge_scan(
        |sum: &u32, person: TestData, _| match person {
            TestData::Person(p) => of(vec![sum + p.age]),
            TestData::Animal(_) => of(vec![*sum]),
        },
        0_u32,
        Concurrency::Unbounded,
    );
    let first = RecordingObserver::new();
    let second = RecordingObserver::new();

    // Act
    ages.subscribe_with(first.clone());
    ages.subscribe_with(second.clone());

    // Assert
    assert_eq!(first.values(), vec![65, 100]);
    assert_eq!(second.values(), vec![65, 100]);
    Ok(())
}

#[tokio::test]
async fn test_merge_scan_projection_sees_state_at_dispatch_time() -> anyhow::Result<()> {
    // Arrange
    let outer = FluxionSubject::<i32>::new();
    let inner = FluxionSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
    let accumulator = {
        let inner = inner.clone();
        let seen = seen.clone();
        move |state: &i32, value: i32, _| {
            seen.lock().push((*state, value));
            inner.clone()
        }
    };
    outer
        .clone()
        .merge_scan(accumulator, 100, Concurrency::SERIAL)
        .subscribe_with(recorder.clone());

    // Act
    outer.next(1)?;
    outer.next(2)?;
    inner.next(7)?;

    // Assert
    assert_eq!(*seen.lock(), vec![(100, 1)]);

    inner.close();
    assert_eq!(*seen.lock(), vec![(100, 1), (7, 2)]);
    assert_eq!(recorder.values(), vec![7]);
    assert!(!recorder.is_completed());
    Ok(())
}
