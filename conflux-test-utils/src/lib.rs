// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the conflux resolve operator.
//!
//! This crate is designed for use in development and testing only, not for
//! production code.
//!
//! # Key Types
//!
//! ## Deferred resolutions
//!
//! [`deferred`] and [`DeferredBoard`] hand control over completion timing to the
//! test, which is how ordering and concurrency properties are exercised without
//! relying on timers:
//!
//! ```rust
//! use conflux_core::ConfluxError;
//! use conflux_test_utils::DeferredBoard;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let board = DeferredBoard::<&str, usize, ConfluxError>::new();
//! let mut resolver = board.resolver();
//!
//! let first = resolver("a");
//! let second = resolver("bb");
//! board.wait_for(2).await;
//!
//! board.resolve(&"bb", 2);
//! assert_eq!(second.await.unwrap(), 2);
//! board.resolve(&"a", 1);
//! assert_eq!(first.await.unwrap(), 1);
//! # }
//! ```
//!
//! ## RunningGauge
//!
//! Tracks how many resolutions are alive at once and the observed peak.
//!
//! ## Test Fixtures
//!
//! - `Person` - A person with name and age
//! - `Animal` - An animal with name and leg count
//! - `TestData` - Either of the above, with pre-built values such as `person_alice()`

pub mod animal;
pub mod deferred;
pub mod gauge;
pub mod helpers;
pub mod person;
pub mod test_channel;
pub mod test_data;

pub use self::deferred::{deferred, Deferred, DeferredBoard};
pub use self::gauge::{GaugeGuard, RunningGauge};
pub use self::helpers::{
    assert_no_element_emitted, collect_within, concat_chunks, expect_completion,
    expect_next_value, unwrap_stream,
};
pub use self::test_channel::{push, test_channel, TestChannel};
pub use self::test_data::TestData;
