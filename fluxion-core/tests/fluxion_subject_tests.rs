// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::{FluxionError, FluxionSubject, ObservableExt, StreamItem, SubjectError};
use fluxion_test_utils::test_data::{person_alice, person_bob, TestData};
use fluxion_test_utils::{assert_stream_ended, unwrap_value, RecordingObserver};

#[tokio::test]
async fn test_subject_broadcasts_to_every_subscriber() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<TestData>::new();
    let mut first = subject.to_stream();
    let mut second = subject.to_stream();

    // Act
    subject.next(person_alice())?;

    // Assert
    assert_eq!(unwrap_value(&mut first, 500).await, person_alice());
    assert_eq!(unwrap_value(&mut second, 500).await, person_alice());
    Ok(())
}

#[tokio::test]
async fn test_late_subscriber_misses_earlier_values() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<TestData>::new();
    subject.next(person_alice())?;
    let late = RecordingObserver::new();

    // Act
    subject.subscribe_with(late.clone());
    subject.next(person_bob())?;

    // Assert
    assert_eq!(late.values(), vec![person_bob()]);
    Ok(())
}

#[tokio::test]
async fn test_close_completes_subscribers_and_rejects_values() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<i32>::new();
    let mut stream = subject.to_stream();

    // Act
    subject.close();
    subject.close();
    let rejected = subject.next(1);

    // Assert
    assert_eq!(rejected, Err(SubjectError::Closed));
    assert!(subject.is_closed());
    assert_stream_ended(&mut stream, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_error_fails_subscribers_once() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    subject.subscribe_with(recorder.clone());

    // Act
    subject.error(FluxionError::stream_error("boom"))?;
    let second = subject.error(FluxionError::stream_error("again"));

    // Assert
    assert_eq!(second, Err(SubjectError::Closed));
    recorder.assert_terminated_once();
    assert!(recorder.error().is_some());
    Ok(())
}

#[tokio::test]
async fn test_subscribing_after_termination_replays_terminal() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<i32>::new();
    subject.error(FluxionError::stream_error("gone"))?;

    // Act
    let items: Vec<StreamItem<i32>> = futures::StreamExt::collect(subject.to_stream()).await;

    // Assert
    assert_eq!(items.len(), 1);
    assert!(items[0].is_error());
    Ok(())
}

#[tokio::test]
async fn test_unsubscribe_removes_subscriber() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<i32>::new();
    let recorder = RecordingObserver::new();
    let subscription = subject.subscribe_with(recorder.clone());
    assert_eq!(subject.subscriber_count(), 1);

    // Act
    subscription.unsubscribe();
    subject.next(7)?;

    // Assert
    assert_eq!(subject.subscriber_count(), 0);
    assert!(recorder.values().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_dropping_stream_unsubscribes() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<i32>::new();
    let stream = subject.to_stream();
    assert_eq!(subject.subscriber_count(), 1);

    // Act
    drop(stream);

    // Assert
    assert_eq!(subject.subscriber_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_lifecycle_attach_close_and_late_subscribe() -> anyhow::Result<()> {
    // Arrange
    let subject = FluxionSubject::<i32>::new();
    let early = RecordingObserver::new();
    let dropped = RecordingObserver::new();
    subject.subscribe_with(early.clone());
    subject.subscribe_with(dropped.clone()).unsubscribe();

    // Act
    subject.next(1)?;
    subject.close();
    subject.close();
    let late = RecordingObserver::new();
    subject.subscribe_with(late.clone());

    // Assert
    assert_eq!(early.values(), vec![1]);
    assert!(early.is_completed());
    early.assert_terminated_once();
    assert!(dropped.values().is_empty());
    assert_eq!(dropped.terminal_count(), 0);
    assert!(late.values().is_empty());
    assert!(late.is_completed());
    assert_eq!(subject.subscriber_count(), 0);
    Ok(())
}
