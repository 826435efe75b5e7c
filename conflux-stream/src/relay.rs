// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Non-terminating delivery of item-level failures.

use conflux_core::{Fault, Recovery};
use core::fmt::Debug;

/// Receives every failed resolution and decides what, if anything, replaces it.
///
/// Implemented for any `FnMut(Fault<T, E>) -> Recovery<U>`. Returning
/// [`Recovery::Emit`] pushes a substitute straight to the output; returning
/// [`Recovery::Skip`] drops the item. Either way the stream keeps running.
pub trait FaultHandler<T, E, U> {
    fn on_fault(&mut self, fault: Fault<T, E>) -> Recovery<U>;
}

impl<T, E, U, F> FaultHandler<T, E, U> for F
where
    F: FnMut(Fault<T, E>) -> Recovery<U>,
{
    fn on_fault(&mut self, fault: Fault<T, E>) -> Recovery<U> {
        self(fault)
    }
}

/// Default handler: logs each fault at `warn` level and skips the item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFaults;

impl<T, E, U> FaultHandler<T, E, U> for LogFaults
where
    T: Debug,
    E: Debug,
{
    fn on_fault(&mut self, fault: Fault<T, E>) -> Recovery<U> {
        crate::warn!(
            "resolution {} failed for {:?}: {:?} (running: {}, max_parallel: {})",
            fault.id,
            fault.item,
            fault.error,
            fault.operator.running,
            fault.operator.max_parallel
        );
        Recovery::Skip
    }
}
