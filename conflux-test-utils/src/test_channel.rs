// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// A test channel that combines the sender and stream into a single struct.
/// Automatically converts the receiver into an UnboundedReceiverStream.
pub struct TestChannel<T> {
    pub sender: mpsc::UnboundedSender<T>,
    pub stream: UnboundedReceiverStream<T>,
}

impl<T> TestChannel<T> {
    /// Creates a new test channel with unbounded capacity.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let stream = UnboundedReceiverStream::new(receiver);
        Self { sender, stream }
    }

    /// Splits into the sender and the upstream to feed an operator with.
    pub fn split(self) -> (mpsc::UnboundedSender<T>, UnboundedReceiverStream<T>) {
        (self.sender, self.stream)
    }
}

impl<T> Default for TestChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends a value, panicking if the receiving side is gone.
pub fn push<T>(value: T, sender: &mpsc::UnboundedSender<T>) {
    sender.send(value).unwrap()
}

/// Creates an unbounded channel whose receiving side is a `Stream`.
///
/// ```rust
/// use conflux_test_utils::test_channel;
/// use conflux_test_utils::test_data::person_alice;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
/// tx.send(person_alice()).unwrap();
/// assert_eq!(stream.next().await, Some(person_alice()));
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (mpsc::UnboundedSender<T>, UnboundedReceiverStream<T>) {
    TestChannel::new().split()
}
