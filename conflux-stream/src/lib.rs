// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded-concurrency asynchronous mapping of stream items.
//!
//! The [`resolve`](ResolveExt::resolve) operator runs a user-supplied async
//! function on every item of a stream, keeps at most `max_parallel` of those
//! functions in flight, and emits results either in input order or as they
//! complete.
//!
//! # Architecture
//!
//! The operator is a single `Stream` whose `poll_next` drives everything. No
//! tasks are spawned and no locks are taken; resolutions are interleaved at
//! their await points inside the consumer's task.
//!
//! - **Admission**: each upstream item takes a slot; upstream is not polled while
//!   every slot is taken, which is how the cap becomes backpressure
//! - **Pending set**: every admitted item stays tracked until its result has been
//!   routed
//! - **Order buffer**: with `maintain_order`, results are released strictly from
//!   the head of a submission-ordered queue
//! - **Fault relay**: a failed resolution goes to the fault handler together with
//!   its input, and the stream keeps going
//! - **Drain**: the stream ends only after upstream has ended and every tracked
//!   resolution has settled
//!
//! # Ordering
//!
//! | `maintain_order` | Output order |
//! |------------------|--------------|
//! | `true` (default) | Input order, regardless of completion order |
//! | `false` | Completion order |
//!
//! Resolutions always *start* in input order.
//!
//! # Example
//!
//! ```
//! use conflux_core::{MaxParallel, Recovery};
//! use conflux_stream::prelude::*;
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() -> conflux_core::Result<()> {
//! let options = ResolveOptions::new()
//!     .max_parallel(MaxParallel::unbounded())
//!     .resolver(|n: u32| async move {
//!         if n == 3 {
//!             Err("three")
//!         } else {
//!             Ok(n * n)
//!         }
//!     });
//!
//! let squares: Vec<u32> = stream::iter(1..=4)
//!     .resolve(options)?
//!     .on_fault(|_fault| Recovery::Skip)
//!     .collect()
//!     .await;
//!
//! assert_eq!(squares, vec![1, 4, 16]);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
mod logging;

mod admission;
pub mod channel;
pub mod options;
mod order_buffer;
mod pending_set;
pub mod prelude;
pub mod relay;
pub mod resolve_stream;
pub mod resolver;
mod runner;

pub use self::channel::{resolve_channel, Writer};
pub use self::options::ResolveOptions;
pub use self::relay::{FaultHandler, LogFaults};
pub use self::resolve_stream::{ResolveExt, ResolveStream};
pub use self::resolver::{with_encoding, NotImplemented, Resolver, WithEncoding};
