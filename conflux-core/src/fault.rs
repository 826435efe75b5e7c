// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Item-level failure reporting.
//!
//! A failed resolution never ends the stream. The operator hands a [`Fault`] to
//! its fault handler, which answers with a [`Recovery`] deciding whether anything
//! takes the failed item's place in the output.

use crate::max_parallel::MaxParallel;
use core::fmt;

/// Identity of one admitted item, assigned in submission order starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub const fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Snapshot of the operator taken when a fault or query is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorState {
    /// Resolutions still in flight
    pub running: usize,
    /// Configured concurrency cap
    pub max_parallel: MaxParallel,
    /// Whether output follows input order
    pub maintain_order: bool,
    /// Entries waiting in the order buffer
    pub buffered: usize,
    /// Whether upstream intake is paused on the concurrency cap
    pub paused: bool,
}

/// A failed resolution together with the input that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault<T, E> {
    /// The original input item
    pub item: T,
    /// What the resolver reported
    pub error: E,
    /// Submission identity of the failed task
    pub id: TaskId,
    /// The operator as it looked when the failure was routed
    pub operator: OperatorState,
}

impl<T, E> Fault<T, E> {
    pub fn into_item(self) -> T {
        self.item
    }

    pub fn into_parts(self) -> (T, E) {
        (self.item, self.error)
    }
}

impl<T: fmt::Debug, E: fmt::Display> fmt::Display for Fault<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resolution {} failed for {:?}: {}",
            self.id, self.item, self.error
        )
    }
}

/// A fault handler's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recovery<U> {
    /// Drop the failed item; nothing is emitted for it
    Skip,
    /// Emit a substitute output in its place
    Emit(U),
}

impl<U> Recovery<U> {
    pub const fn is_skip(&self) -> bool {
        matches!(self, Recovery::Skip)
    }

    pub fn into_option(self) -> Option<U> {
        match self {
            Recovery::Skip => None,
            Recovery::Emit(value) => Some(value),
        }
    }
}

impl<U> From<Option<U>> for Recovery<U> {
    fn from(value: Option<U>) -> Self {
        value.map_or(Recovery::Skip, Recovery::Emit)
    }
}
