// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{ConfluxError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Upper bound on concurrently running resolutions.
///
/// Defaults to one, which processes items sequentially.
///
/// ```
/// use conflux_core::MaxParallel;
///
/// assert_eq!(MaxParallel::default(), MaxParallel::sequential());
/// assert!(MaxParallel::limited(0).is_err());
/// assert!(MaxParallel::unbounded().allows(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxParallel {
    /// At most this many resolutions run at once
    Limited(NonZeroUsize),
    /// No cap; admission never pauses
    Unbounded,
}

impl MaxParallel {
    /// One resolution at a time.
    pub const fn sequential() -> Self {
        Self::Limited(NonZeroUsize::MIN)
    }

    /// No cap.
    pub const fn unbounded() -> Self {
        Self::Unbounded
    }

    /// A positive cap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluxError::InvalidOption`] if `limit` is zero.
    pub fn limited(limit: usize) -> Result<Self> {
        NonZeroUsize::new(limit)
            .map(Self::Limited)
            .ok_or_else(|| ConfluxError::invalid_option("max_parallel must be positive"))
    }

    /// Whether another resolution may start while `running` are in flight.
    pub const fn allows(self, running: usize) -> bool {
        match self {
            Self::Limited(limit) => running < limit.get(),
            Self::Unbounded => true,
        }
    }

    /// The numeric cap, `None` when unbounded.
    pub const fn get(self) -> Option<usize> {
        match self {
            Self::Limited(limit) => Some(limit.get()),
            Self::Unbounded => None,
        }
    }

    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl Default for MaxParallel {
    fn default() -> Self {
        Self::sequential()
    }
}

impl From<NonZeroUsize> for MaxParallel {
    fn from(limit: NonZeroUsize) -> Self {
        Self::Limited(limit)
    }
}

/// `usize::MAX` maps to [`MaxParallel::Unbounded`].
impl TryFrom<usize> for MaxParallel {
    type Error = ConfluxError;

    fn try_from(limit: usize) -> Result<Self> {
        if limit == usize::MAX {
            Ok(Self::Unbounded)
        } else {
            Self::limited(limit)
        }
    }
}

impl fmt::Display for MaxParallel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(limit) => write!(f, "{limit}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}
