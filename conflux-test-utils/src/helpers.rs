// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream::StreamExt;
use futures::Stream;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    tokio::select! {
        item = stream.next() => {
            panic!("Unexpected emission, expected no output: {item:?}");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

pub async fn expect_next_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = T> + Unpin,
    T: Debug + PartialEq,
{
    let item = stream.next().await.expect("expected next item");
    assert_eq!(item, expected);
}

/// Next item, panicking if none arrives within `timeout_ms` or the stream ends.
pub async fn unwrap_stream<S, T>(stream: &mut S, timeout_ms: u64) -> T
where
    S: Stream<Item = T> + Unpin,
{
    match timeout(Duration::from_millis(timeout_ms), stream.next()).await {
        Ok(Some(item)) => item,
        Ok(None) => panic!("Expected an item but stream ended"),
        Err(_) => panic!("Timeout: No item received within {timeout_ms} ms"),
    }
}

/// Asserts that the stream has completed.
pub async fn expect_completion<S, T>(stream: &mut S)
where
    S: Stream<Item = T> + Unpin,
    T: Debug,
{
    if let Some(item) = stream.next().await {
        panic!("expected completion, got {item:?}");
    }
}

/// Collects the whole stream, panicking if it has not completed within `timeout_ms`.
pub async fn collect_within<S>(stream: S, timeout_ms: u64) -> Vec<S::Item>
where
    S: Stream,
{
    timeout(Duration::from_millis(timeout_ms), stream.collect::<Vec<_>>())
        .await
        .unwrap_or_else(|_| panic!("stream did not complete within {timeout_ms}ms"))
}

/// Joins byte-mode outputs into one buffer.
///
/// Chunk boundaries in byte mode are not meaningful, only the concatenation is.
pub fn concat_chunks<I, C>(chunks: I) -> Vec<u8>
where
    I: IntoIterator<Item = C>,
    C: AsRef<[u8]>,
{
    chunks.into_iter().fold(Vec::new(), |mut joined, chunk| {
        joined.extend_from_slice(chunk.as_ref());
        joined
    })
}
