// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Uniform asynchronous completion for resolver results.
//!
//! A resolver may produce its output in three shapes: a value that is already
//! known, a deferred value (any `Future`), or a delegate-style thenable that
//! accepts a settle callback. [`Resolution`] turns all three into a single
//! `Future<Output = Result<U, E>>` so the operator only ever awaits one kind of
//! thing.

use crate::error::ConfluxError;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::channel::oneshot;
use futures::future::BoxFuture;
use futures::FutureExt;

/// A normalized resolver result.
///
/// # Examples
///
/// ```
/// use conflux_core::Resolution;
///
/// # #[tokio::main]
/// # async fn main() {
/// let immediate = Resolution::<_, std::io::Error>::value(21);
/// assert_eq!(immediate.await.unwrap(), 21);
///
/// let deferred = Resolution::<_, std::io::Error>::deferred(async { Ok(42) });
/// assert_eq!(deferred.await.unwrap(), 42);
/// # }
/// ```
pub struct Resolution<U, E> {
    inner: Inner<U, E>,
}

enum Inner<U, E> {
    Ready(Option<Result<U, E>>),
    Deferred(BoxFuture<'static, Result<U, E>>),
    Thenable {
        settled: oneshot::Receiver<Result<U, E>>,
        abandoned: fn() -> E,
    },
}

impl<U, E> Resolution<U, E> {
    /// Wraps a value that is already resolved.
    pub fn value(value: U) -> Self {
        Self {
            inner: Inner::Ready(Some(Ok(value))),
        }
    }

    /// Wraps an error that is already known.
    pub fn error(error: E) -> Self {
        Self {
            inner: Inner::Ready(Some(Err(error))),
        }
    }

    /// Wraps a deferred value.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<U, E>> + Send + 'static,
    {
        Self {
            inner: Inner::Deferred(future.boxed()),
        }
    }

    /// Registers a settle callback on a thenable and waits for it to fire.
    ///
    /// The callback is registered immediately. If the thenable drops the
    /// [`Settle`] handle without calling it, the resolution rejects with
    /// [`ConfluxError::Abandoned`] converted into `E`.
    pub fn from_thenable<T>(thenable: T) -> Self
    where
        T: Thenable<Output = U, Error = E>,
        E: From<ConfluxError>,
    {
        let (tx, rx) = oneshot::channel();
        thenable.then(Settle { tx });
        Self {
            inner: Inner::Thenable {
                settled: rx,
                abandoned: || E::from(ConfluxError::Abandoned),
            },
        }
    }

    /// Returns `true` if the result was available at construction time.
    pub const fn is_immediate(&self) -> bool {
        matches!(self.inner, Inner::Ready(_))
    }
}

impl<U, E> From<Result<U, E>> for Resolution<U, E> {
    fn from(result: Result<U, E>) -> Self {
        Self {
            inner: Inner::Ready(Some(result)),
        }
    }
}

// The output is only ever moved out, never pinned.
impl<U, E> Unpin for Resolution<U, E> {}

impl<U, E> Future for Resolution<U, E> {
    type Output = Result<U, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            Inner::Ready(slot) => match slot.take() {
                Some(result) => Poll::Ready(result),
                None => unreachable!("Resolution polled after completion"),
            },
            Inner::Deferred(future) => future.as_mut().poll(cx),
            Inner::Thenable { settled, abandoned } => {
                let abandoned = *abandoned;
                Pin::new(settled).poll(cx).map(|outcome| match outcome {
                    Ok(result) => result,
                    Err(oneshot::Canceled) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!("thenable dropped its settle handle without settling");
                        Err(abandoned())
                    }
                })
            }
        }
    }
}

impl<U, E> fmt::Debug for Resolution<U, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.inner {
            Inner::Ready(Some(Ok(_))) => "Ready(Ok)",
            Inner::Ready(Some(Err(_))) => "Ready(Err)",
            Inner::Ready(None) => "Taken",
            Inner::Deferred(_) => "Deferred",
            Inner::Thenable { .. } => "Thenable",
        };
        f.debug_struct("Resolution").field("kind", &kind).finish()
    }
}

/// A delegate-style asynchronous value.
///
/// Anything that can accept a settle callback and call it later, once, with the
/// outcome. Callback-based client libraries are the usual source.
///
/// ```
/// use conflux_core::{Resolution, Settle, Thenable, ConfluxError};
///
/// struct Legacy(u32);
///
/// impl Thenable for Legacy {
///     type Output = u32;
///     type Error = ConfluxError;
///
///     fn then(self, settle: Settle<u32, ConfluxError>) {
///         settle.resolve(self.0 + 1);
///     }
/// }
///
/// # #[tokio::main]
/// # async fn main() {
/// assert_eq!(Resolution::from_thenable(Legacy(1)).await.unwrap(), 2);
/// # }
/// ```
pub trait Thenable {
    /// The success value
    type Output;
    /// The failure value
    type Error;

    /// Hands over the settle callback.
    fn then(self, settle: Settle<Self::Output, Self::Error>);
}

/// One-shot settle callback handed to a [`Thenable`].
#[derive(Debug)]
pub struct Settle<U, E> {
    tx: oneshot::Sender<Result<U, E>>,
}

impl<U, E> Settle<U, E> {
    /// Settles with a success value.
    pub fn resolve(self, value: U) {
        self.settle(Ok(value));
    }

    /// Settles with a failure.
    pub fn reject(self, error: E) {
        self.settle(Err(error));
    }

    /// Settles with the given outcome.
    ///
    /// Settling after the waiting side is gone is a no-op.
    pub fn settle(self, outcome: Result<U, E>) {
        let _ = self.tx.send(outcome);
    }
}
