// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{of, BoxObservable, FluxionError, FluxionSubject, Notification, ObservableExt};
use fluxion_merge::{Concurrency, MergeExt};
use fluxion_test_utils::test_data::{animal_bird, animal_dog, person_dave, TestData};
use fluxion_test_utils::RecordingObserver;

#[tokio::test]
async fn test_merge_all_flattens_observables() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    of(vec![of(vec![1, 2]), of(vec![3])])
        .merge_all::<i32>(Concurrency::Unbounded)
        .subscribe_with(recorder.clone());

    // Assert
    assert_eq!(recorder.values(), vec![1, 2, 3]);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_concat_all_flattens_collections() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    of(vec![vec![animal_dog(), animal_bird()], Vec::new(), vec![person_dave()]])
        .concat_all::<TestData>()
        .subscribe_with(recorder.clone());

    // Assert
    assert_eq!(
        recorder.values(),
        vec![animal_dog(), animal_bird(), person_dave()]
    );
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_merge_all_adapts_options() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    of(vec![Some("first"), None, Some("third")])
        .merge_all::<&str>(Concurrency::SERIAL)
        .subscribe_with(recorder.clone());

    // Assert
    assert_eq!(recorder.values(), vec!["first", "third"]);
    assert!(recorder.is_completed());
    Ok(())
}

#[tokio::test]
async fn test_merge_all_adapts_results() -> anyhow::Result<()> {
    // Arrange
    let recorder = RecordingObserver::new();

    // Act
    of(vec![
        Ok(1),
        Err(FluxionError::stream_error("rejected")),
        Ok(3),
    ])
    .merge_all::<i32>(Concurrency::Unbounded)
    .subscribe_with(recorder.clone());

    // Assert
    assert_eq!(
        recorder.notifications(),
        vec![
            Notification::Next(1),
            Notification::Error(FluxionError::stream_error("rejected")),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_concat_all_over_boxed_subjects_waits_for_each() -> anyhow::Result<()> {
    // Arrange
    let first = FluxionSubject::<u8>::new();
    let second = FluxionSubject::<u8>::new();
    let inners: Vec<BoxObservable<u8>> = vec![first.clone().boxed(), second.clone().boxed()];
    let recorder = RecordingObserver::new();
    of(inners)
        .concat_all::<u8>()
        .subscribe_with(recorder.clone());

    // Act
    second.next(20)?;
    first.next(10)?;
    first.close();
    second.next(21)?;
    second.close();

    // Assert
    assert_eq!(recorder.values(), vec![10, 21]);
    assert!(recorder.is_completed());
    Ok(())
}
