// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenient imports for the resolve operator.

pub use crate::channel::{resolve_channel, Writer};
pub use crate::options::ResolveOptions;
pub use crate::relay::{FaultHandler, LogFaults};
pub use crate::resolve_stream::{ResolveExt, ResolveStream};
pub use crate::resolver::{with_encoding, Resolver};
pub use conflux_core::{Fault, MaxParallel, Recovery, Resolution};
