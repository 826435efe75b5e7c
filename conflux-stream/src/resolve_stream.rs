// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded-concurrency async map with optional order preservation.

use crate::admission::Admission;
use crate::channel::CompletionGuard;
use crate::options::ResolveOptions;
use crate::relay::{FaultHandler, LogFaults};
use crate::resolver::Resolver;
use crate::runner::Runner;
use conflux_core::{ConfluxError, Encoding, Fault, MaxParallel, Mode, OperatorState, Recovery, Result};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project::pin_project;

/// Upstream items admitted per intake round before the operator yields.
const INTAKE_BUDGET: usize = 64;

/// Extension trait providing the `resolve` operator for streams.
pub trait ResolveExt: Stream + Sized {
    /// Resolves every item through an asynchronous mapping function.
    ///
    /// At most `max_parallel` resolutions run at once; upstream is not polled
    /// while the cap is reached. With `maintain_order` (the default) outputs
    /// follow input order regardless of completion order, otherwise they are
    /// emitted as they complete. A failed resolution is handed to the fault
    /// handler (see [`ResolveStream::on_fault`]) and the stream carries on. The
    /// stream ends only after upstream has ended and every in-flight resolution
    /// has settled.
    ///
    /// Items must be `Clone`: the resolver receives one copy and the operator
    /// keeps the other until the resolution settles, so a failure can hand the
    /// original input to the fault handler. For large owned items (byte chunks
    /// included) that is one copy per admitted item; wrap them in an `Arc` or
    /// use a cheaply cloned buffer type to avoid it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluxError::ResolverNotImplemented`] if `options` carries no
    /// resolver.
    ///
    /// # Examples
    ///
    /// ```
    /// use conflux_core::MaxParallel;
    /// use conflux_stream::{ResolveExt, ResolveOptions};
    /// use futures::{stream, StreamExt};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> conflux_core::Result<()> {
    /// let options = ResolveOptions::new()
    ///     .max_parallel(MaxParallel::limited(4)?)
    ///     .resolver(|millis: u64| async move {
    ///         tokio::time::sleep(Duration::from_millis(millis)).await;
    ///         Ok::<_, std::io::Error>(millis)
    ///     });
    ///
    /// let outputs: Vec<u64> = stream::iter(vec![30, 10, 20]).resolve(options)?.collect().await;
    ///
    /// assert_eq!(outputs, vec![30, 10, 20]);
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # See Also
    ///
    /// - [`resolve_channel`](crate::resolve_channel) - Push-style input with a writer handle
    fn resolve<R>(self, options: ResolveOptions<R>) -> Result<ResolveStream<Self, R>>
    where
        Self::Item: Clone,
        R: Resolver<Self::Item>;
}

impl<S> ResolveExt for S
where
    S: Stream,
{
    fn resolve<R>(self, options: ResolveOptions<R>) -> Result<ResolveStream<Self, R>>
    where
        Self::Item: Clone,
        R: Resolver<Self::Item>,
    {
        ResolveStream::new(self, options)
    }
}

/// Stream returned by [`ResolveExt::resolve`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct ResolveStream<S, R, H = LogFaults>
where
    S: Stream,
    R: Resolver<S::Item>,
{
    #[pin]
    upstream: S,
    runner: Runner<S::Item, R, H>,
    upstream_done: bool,
    finished: bool,
    completion: Option<CompletionGuard>,
}

impl<S, R> ResolveStream<S, R, LogFaults>
where
    S: Stream,
    S::Item: Clone,
    R: Resolver<S::Item>,
{
    /// # Errors
    ///
    /// Returns [`ConfluxError::ResolverNotImplemented`] if `options` carries no
    /// resolver.
    pub fn new(upstream: S, options: ResolveOptions<R>) -> Result<Self> {
        let (resolver, settings) = options.into_parts();
        if !resolver.is_implemented() {
            return Err(ConfluxError::ResolverNotImplemented);
        }

        Ok(Self {
            upstream,
            runner: Runner::new(resolver, LogFaults, settings),
            upstream_done: false,
            finished: false,
            completion: None,
        })
    }
}

impl<S, R, H> ResolveStream<S, R, H>
where
    S: Stream,
    R: Resolver<S::Item>,
{
    /// Installs a fault handler.
    ///
    /// The handler sees each failed item with its error and returns a
    /// [`Recovery`]: `Skip` drops the item, `Emit` pushes a substitute straight
    /// to the output.
    ///
    /// ```
    /// use conflux_core::Recovery;
    /// use conflux_stream::{ResolveExt, ResolveOptions};
    /// use futures::{future, stream, StreamExt};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> conflux_core::Result<()> {
    /// let options = ResolveOptions::new().resolver(|n: i32| {
    ///     if n % 2 == 0 { future::ok(n * 10) } else { future::err(format!("odd {n}")) }
    /// });
    ///
    /// let outputs: Vec<i32> = stream::iter(1..=4)
    ///     .resolve(options)?
    ///     .on_fault(|fault| Recovery::Emit(-fault.item))
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(outputs, vec![-1, 20, -3, 40]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn on_fault<H2>(self, handler: H2) -> ResolveStream<S, R, H2>
    where
        H2: FnMut(Fault<S::Item, R::Error>) -> Recovery<R::Output>,
    {
        self.with_fault_handler(handler)
    }

    /// Installs any [`FaultHandler`] implementation.
    pub fn with_fault_handler<H2>(self, handler: H2) -> ResolveStream<S, R, H2> {
        ResolveStream {
            upstream: self.upstream,
            runner: self.runner.with_handler(handler),
            upstream_done: self.upstream_done,
            finished: self.finished,
            completion: self.completion,
        }
    }

    pub(crate) fn with_completion(mut self, guard: CompletionGuard) -> Self {
        self.completion = Some(guard);
        self
    }

    /// Resolutions currently in flight.
    pub fn running(&self) -> usize {
        self.runner.running()
    }

    /// Entries waiting in the order buffer.
    pub fn buffered_len(&self) -> usize {
        self.runner.buffered()
    }

    /// `true` once upstream ended and every resolution settled.
    pub fn is_drained(&self) -> bool {
        self.upstream_done && self.runner.is_drained()
    }

    pub fn state(&self) -> OperatorState {
        self.runner.state()
    }

    pub fn maintains_order(&self) -> bool {
        self.runner.settings().maintain_order
    }

    pub fn max_parallel(&self) -> MaxParallel {
        self.runner.settings().max_parallel
    }

    pub fn input_mode(&self) -> Mode {
        self.runner.settings().writable_mode
    }

    /// Mode reported for the output side. Emission is the same in both modes.
    pub fn output_mode(&self) -> Mode {
        self.runner.settings().readable_mode
    }

    pub fn encoding(&self) -> Encoding {
        self.runner.settings().encoding
    }
}

impl<S, R, H> Stream for ResolveStream<S, R, H>
where
    S: Stream,
    S::Item: Clone,
    R: Resolver<S::Item>,
    H: FaultHandler<S::Item, R::Error, R::Output>,
{
    type Item = R::Output;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            // 1. Admit upstream items until the cap pauses intake or the budget runs out
            let mut admitted = 0;
            let mut yielded = false;
            while !*this.upstream_done && !this.runner.is_paused() {
                if admitted == INTAKE_BUDGET {
                    yielded = true;
                    break;
                }
                match this.upstream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(item)) => {
                        admitted += 1;
                        if this.runner.admit(item) == Admission::Pause {
                            break;
                        }
                    }
                    Poll::Ready(None) => {
                        *this.upstream_done = true;
                        crate::debug!(
                            "resolve: upstream ended, draining {} in-flight resolution(s)",
                            this.runner.running()
                        );
                    }
                    Poll::Pending => break,
                }
            }

            // 2. Route every settlement that is ready
            let mut settled_any = false;
            while let Poll::Ready(Some(settled)) = this.runner.poll_settled(cx) {
                this.runner.route(settled);
                settled_any = true;
            }

            if let Some(output) = this.runner.pop_ready() {
                return Poll::Ready(Some(output));
            }

            if *this.upstream_done && this.runner.is_drained() {
                *this.finished = true;
                if let Some(completion) = this.completion.take() {
                    completion.drained();
                }
                crate::debug!("resolve: drained, completing");
                return Poll::Ready(None);
            }

            // Upstream still has items ready; hand control back and ask to be polled again
            if yielded {
                cx.waker().wake_by_ref();
                return Poll::Pending;
            }

            // A freed slot may let intake continue; otherwise wait for a wake-up
            if !settled_any {
                return Poll::Pending;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        (self.runner.ready_len(), None)
    }
}

impl<S, R, H> FusedStream for ResolveStream<S, R, H>
where
    S: Stream,
    S::Item: Clone,
    R: Resolver<S::Item>,
    H: FaultHandler<S::Item, R::Error, R::Output>,
{
    fn is_terminated(&self) -> bool {
        self.finished
    }
}
