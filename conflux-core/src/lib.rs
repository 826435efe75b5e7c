// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod error;
pub mod fault;
pub mod max_parallel;
pub mod mode;
pub mod resolution;

pub use self::error::{ConfluxError, Result};
pub use self::fault::{Fault, OperatorState, Recovery, TaskId};
pub use self::max_parallel::MaxParallel;
pub use self::mode::{Encoding, Mode};
pub use self::resolution::{Resolution, Settle, Thenable};
