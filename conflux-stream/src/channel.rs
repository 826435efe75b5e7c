// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Push-style input for the resolve operator.
//!
//! [`resolve_channel`] pairs a [`Writer`] with the operator's output stream. The
//! writer feeds a bounded buffer, so `write` waits while the operator is not
//! pulling (because its concurrency cap is reached or nobody polls the output).

use crate::options::ResolveOptions;
use crate::resolve_stream::ResolveStream;
use crate::resolver::Resolver;
use conflux_core::{ConfluxError, Result};
use event_listener::Event;
use futures::channel::mpsc;
use futures::SinkExt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const RUNNING: u8 = 0;
const DRAINED: u8 = 1;
const DROPPED: u8 = 2;

#[derive(Debug)]
struct Completion {
    state: AtomicU8,
    event: Event,
}

impl Completion {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(RUNNING),
            event: Event::new(),
        }
    }

    fn finish(&self, state: u8) {
        if self
            .state
            .compare_exchange(RUNNING, state, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.event.notify(usize::MAX);
        }
    }

    async fn wait(&self) -> Result<()> {
        loop {
            match self.state.load(Ordering::Acquire) {
                DRAINED => return Ok(()),
                DROPPED => return Err(ConfluxError::ChannelClosed),
                _ => {}
            }
            let listener = self.event.listen();
            if self.state.load(Ordering::Acquire) != RUNNING {
                continue;
            }
            listener.await;
        }
    }
}

/// Held by the operator; reports how it ended.
#[derive(Debug)]
pub(crate) struct CompletionGuard(Arc<Completion>);

impl CompletionGuard {
    pub(crate) fn drained(&self) {
        self.0.finish(DRAINED);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.0.finish(DROPPED);
    }
}

/// Input handle returned by [`resolve_channel`].
#[derive(Debug)]
pub struct Writer<T> {
    tx: mpsc::Sender<T>,
    completion: Arc<Completion>,
}

impl<T> Clone for Writer<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            completion: self.completion.clone(),
        }
    }
}

impl<T> Writer<T> {
    /// Feeds one item, returning once the input buffer is no longer over capacity.
    ///
    /// While fewer than `capacity` items are buffered a write returns at once.
    /// The write that overfills the buffer hands its item over but only returns
    /// after the operator pulls an item, which happens only while the output
    /// stream is polled and the concurrency cap has a free slot. With
    /// `capacity` 0 every write waits for the operator to take its item, so the
    /// output must be polled concurrently (for example with `tokio::join!`).
    ///
    /// # Errors
    ///
    /// Returns [`ConfluxError::ChannelClosed`] if the operator was dropped or the
    /// input was already ended.
    pub async fn write(&mut self, item: T) -> Result<()> {
        self.tx
            .send(item)
            .await
            .map_err(|_| ConfluxError::ChannelClosed)
    }

    /// Signals end of input for every clone of this writer.
    pub fn end(&mut self) {
        if !self.tx.is_closed() {
            crate::info!("resolve channel: input ended");
        }
        self.tx.close_channel();
    }

    /// Waits until the operator has drained and emitted its completion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluxError::ChannelClosed`] if the operator was dropped first.
    pub async fn closed(&self) -> Result<()> {
        self.completion.wait().await
    }

    /// Ends input and waits for completion.
    ///
    /// # Errors
    ///
    /// See [`closed`](Self::closed).
    pub async fn finish(mut self) -> Result<()> {
        self.end();
        self.closed().await
    }
}

/// Creates a resolve operator fed through a [`Writer`].
///
/// `capacity` bounds the input buffer between the writer and the operator; see
/// [`Writer::write`] for when a write waits.
///
/// # Errors
///
/// Returns [`ConfluxError::ResolverNotImplemented`] if `options` carries no
/// resolver.
///
/// # Examples
///
/// ```
/// use conflux_stream::{resolve_channel, ResolveOptions};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() -> conflux_core::Result<()> {
/// let options = ResolveOptions::new().resolver(|word: String| async move {
///     Ok::<_, std::io::Error>(word.len())
/// });
/// let (mut writer, output) = resolve_channel(options, 8)?;
///
/// let consumer = tokio::spawn(output.collect::<Vec<_>>());
/// writer.write("conflux".to_string()).await?;
/// writer.write("rs".to_string()).await?;
/// writer.finish().await?;
///
/// assert_eq!(consumer.await.unwrap(), vec![7, 2]);
/// # Ok(())
/// # }
/// ```
pub fn resolve_channel<T, R>(
    options: ResolveOptions<R>,
    capacity: usize,
) -> Result<(Writer<T>, ResolveStream<mpsc::Receiver<T>, R>)>
where
    T: Clone,
    R: Resolver<T>,
{
    let (tx, rx) = mpsc::channel(capacity);
    let completion = Arc::new(Completion::new());
    let stream = ResolveStream::new(rx, options)?
        .with_completion(CompletionGuard(completion.clone()));

    Ok((Writer { tx, completion }, stream))
}
