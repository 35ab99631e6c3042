// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use fluxion_core::StreamItem;
use futures::stream::StreamExt;
use futures::Stream;
use std::time::Duration;
use tokio::time::{sleep, timeout};

/// Waits for the next item, panicking if none arrives within `timeout_ms`.
///
/// # Panics
///
/// Panics on timeout or if the stream ended.
pub async fn unwrap_stream<T, S>(stream: &mut S, timeout_ms: u64) -> StreamItem<T>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("expected an item, but the stream ended"),
        Err(_) => panic!("timed out after {timeout_ms}ms waiting for an item"),
    }
}

/// Waits for the next item and returns its value.
///
/// # Panics
///
/// Panics on timeout, on stream end, or if the item is an error.
pub async fn unwrap_value<T, S>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    match unwrap_stream(stream, timeout_ms).await {
        StreamItem::Value(value) => value,
        StreamItem::Error(e) => panic!("expected a value, got error: {e}"),
    }
}

/// Asserts that nothing is emitted for `timeout_ms`.
///
/// # Panics
///
/// Panics if the stream yields an item or ends within the window.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected emission, expected no output.");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Asserts that the stream ends within `timeout_ms`.
///
/// # Panics
///
/// Panics if an item arrives or the stream stays open.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(None) => {}
        Ok(Some(_)) => panic!("expected the stream to end, but it emitted an item"),
        Err(_) => panic!("expected the stream to end within {timeout_ms}ms"),
    }
}
