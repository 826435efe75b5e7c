// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The user-supplied mapping function.

use conflux_core::{ConfluxError, Encoding};
use core::future::Future;
use futures::future::{self, Ready, TryFuture, TryFutureExt};

/// Maps one input item to an asynchronous result.
///
/// Implemented for every `FnMut(T) -> Fut` where `Fut` is a fallible future, which
/// covers `async` blocks, [`futures::future::ok`] and
/// [`Resolution`](conflux_core::Resolution). Use [`with_encoding`] when the
/// encoding hint is needed, or implement the trait directly on a type that owns
/// its own state.
///
/// ```
/// use conflux_core::{ConfluxError, Encoding, Resolution};
/// use conflux_stream::Resolver;
///
/// struct Doubler;
///
/// impl Resolver<u32> for Doubler {
///     type Output = u32;
///     type Error = ConfluxError;
///     type Resolution = Resolution<u32, ConfluxError>;
///
///     fn resolve(&mut self, item: u32, _encoding: Encoding) -> Self::Resolution {
///         Resolution::value(item * 2)
///     }
/// }
/// ```
pub trait Resolver<T> {
    /// Output emitted for a successful item
    type Output;
    /// Error reported to the fault handler for a failed item
    type Error;
    /// The pending result of one item
    type Resolution: Future<Output = Result<Self::Output, Self::Error>>;

    /// Starts resolving `item`.
    fn resolve(&mut self, item: T, encoding: Encoding) -> Self::Resolution;

    /// `false` only for the [`NotImplemented`] placeholder.
    fn is_implemented(&self) -> bool {
        true
    }
}

impl<T, F, Fut> Resolver<T> for F
where
    F: FnMut(T) -> Fut,
    Fut: TryFuture,
{
    type Output = Fut::Ok;
    type Error = Fut::Error;
    type Resolution = future::IntoFuture<Fut>;

    fn resolve(&mut self, item: T, _encoding: Encoding) -> Self::Resolution {
        self(item).into_future()
    }
}

/// Adapts a two-argument closure that wants the encoding hint.
///
/// ```
/// use conflux_core::Encoding;
/// use conflux_stream::{with_encoding, Resolver};
/// use futures::future;
///
/// let mut resolver = with_encoding(|chunk: Vec<u8>, encoding: Encoding| {
///     future::ok::<_, std::io::Error>(format!("{}:{}", encoding, chunk.len()))
/// });
/// let _pending = resolver.resolve(vec![1, 2, 3], Encoding::Buffer);
/// ```
pub fn with_encoding<F>(resolver: F) -> WithEncoding<F> {
    WithEncoding(resolver)
}

/// See [`with_encoding`].
#[derive(Debug, Clone, Copy)]
pub struct WithEncoding<F>(F);

impl<T, F, Fut> Resolver<T> for WithEncoding<F>
where
    F: FnMut(T, Encoding) -> Fut,
    Fut: TryFuture,
{
    type Output = Fut::Ok;
    type Error = Fut::Error;
    type Resolution = future::IntoFuture<Fut>;

    fn resolve(&mut self, item: T, encoding: Encoding) -> Self::Resolution {
        (self.0)(item, encoding).into_future()
    }
}

/// Placeholder occupying the resolver slot until one is supplied.
///
/// Attaching an operator while this is still in place fails with
/// [`ConfluxError::ResolverNotImplemented`]. Invoking it directly fails the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotImplemented;

impl<T> Resolver<T> for NotImplemented {
    type Output = T;
    type Error = ConfluxError;
    type Resolution = Ready<Result<T, ConfluxError>>;

    fn resolve(&mut self, _item: T, _encoding: Encoding) -> Self::Resolution {
        future::err(ConfluxError::ResolverNotImplemented)
    }

    fn is_implemented(&self) -> bool {
        false
    }
}
