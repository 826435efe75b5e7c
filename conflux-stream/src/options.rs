// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Configuration surface of the resolve operator.

use crate::resolver::NotImplemented;
use conflux_core::{ConfluxError, Encoding, MaxParallel, Mode, Result};

/// Builder-style options for [`ResolveExt::resolve`](crate::ResolveExt::resolve).
///
/// | Option | Default |
/// |--------|---------|
/// | `resolver` | [`NotImplemented`], rejected when the operator is attached |
/// | `maintain_order` | `true` |
/// | `max_parallel` | `1` |
/// | modes | object mode on both sides when no mode option is given |
///
/// When any mode option is given, a side without an explicit mode takes the
/// `object_mode` value, and falls back to byte mode if that is unset too.
///
/// ```
/// use conflux_core::{Encoding, MaxParallel, Mode};
/// use conflux_stream::ResolveOptions;
///
/// let options = ResolveOptions::new()
///     .resolver(|n: u32| async move { Ok::<_, std::io::Error>(n + 1) })
///     .max_parallel(MaxParallel::unbounded())
///     .maintain_order(false);
///
/// assert!(!options.maintains_order());
/// assert_eq!(options.input_mode(), Mode::Object);
/// assert_eq!(options.encoding_hint(), Encoding::Object);
/// ```
#[derive(Debug, Clone)]
pub struct ResolveOptions<R = NotImplemented> {
    resolver: R,
    maintain_order: bool,
    max_parallel: MaxParallel,
    object_mode: Option<bool>,
    readable_mode: Option<Mode>,
    writable_mode: Option<Mode>,
    byte_encoding: Encoding,
}

impl ResolveOptions<NotImplemented> {
    pub fn new() -> Self {
        Self {
            resolver: NotImplemented,
            maintain_order: true,
            max_parallel: MaxParallel::default(),
            object_mode: None,
            readable_mode: None,
            writable_mode: None,
            byte_encoding: Encoding::Buffer,
        }
    }
}

impl Default for ResolveOptions<NotImplemented> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ResolveOptions<R> {
    /// Sets the mapping function.
    pub fn resolver<R2>(self, resolver: R2) -> ResolveOptions<R2> {
        ResolveOptions {
            resolver,
            maintain_order: self.maintain_order,
            max_parallel: self.max_parallel,
            object_mode: self.object_mode,
            readable_mode: self.readable_mode,
            writable_mode: self.writable_mode,
            byte_encoding: self.byte_encoding,
        }
    }

    /// Emit outputs in input order (`true`) or in completion order (`false`).
    #[must_use]
    pub fn maintain_order(mut self, maintain_order: bool) -> Self {
        self.maintain_order = maintain_order;
        self
    }

    #[must_use]
    pub fn max_parallel(mut self, max_parallel: MaxParallel) -> Self {
        self.max_parallel = max_parallel;
        self
    }

    /// Numeric form of [`max_parallel`](Self::max_parallel); `usize::MAX` means unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluxError::InvalidOption`] for zero.
    pub fn try_max_parallel(self, max_parallel: usize) -> Result<Self> {
        Ok(self.max_parallel(MaxParallel::try_from(max_parallel)?))
    }

    /// Sets both sides to object (`true`) or byte (`false`) mode.
    #[must_use]
    pub fn object_mode(mut self, object_mode: bool) -> Self {
        self.object_mode = Some(object_mode);
        self
    }

    /// Mode of the output side.
    ///
    /// Only reported back through [`output_mode`](Self::output_mode) and
    /// [`ResolveStream::output_mode`](crate::ResolveStream::output_mode). Outputs
    /// are emitted exactly as resolvers return them in either mode.
    #[must_use]
    pub fn readable_mode(mut self, mode: Mode) -> Self {
        self.readable_mode = Some(mode);
        self
    }

    /// Mode of the input side.
    #[must_use]
    pub fn writable_mode(mut self, mode: Mode) -> Self {
        self.writable_mode = Some(mode);
        self
    }

    /// Encoding hint passed to resolvers when the input side is in byte mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluxError::InvalidOption`] for [`Encoding::Object`], which is not a byte encoding.
    pub fn byte_encoding(mut self, encoding: Encoding) -> Result<Self> {
        if encoding == Encoding::Object {
            return Err(ConfluxError::invalid_option(
                "byte_encoding must be a byte encoding, not `object`",
            ));
        }
        self.byte_encoding = encoding;
        Ok(self)
    }

    pub const fn maintains_order(&self) -> bool {
        self.maintain_order
    }

    pub const fn parallelism(&self) -> MaxParallel {
        self.max_parallel
    }

    /// Effective mode of the output side.
    pub fn output_mode(&self) -> Mode {
        self.resolve_mode(self.readable_mode)
    }

    /// Effective mode of the input side.
    pub fn input_mode(&self) -> Mode {
        self.resolve_mode(self.writable_mode)
    }

    /// What resolvers receive as the encoding argument.
    pub fn encoding_hint(&self) -> Encoding {
        match self.input_mode() {
            Mode::Object => Encoding::Object,
            Mode::Bytes => self.byte_encoding,
        }
    }

    pub(crate) fn into_parts(self) -> (R, Settings) {
        let settings = Settings {
            maintain_order: self.maintain_order,
            max_parallel: self.max_parallel,
            readable_mode: self.output_mode(),
            writable_mode: self.input_mode(),
            encoding: self.encoding_hint(),
        };
        (self.resolver, settings)
    }

    fn resolve_mode(&self, side: Option<Mode>) -> Mode {
        let nothing_specified =
            self.object_mode.is_none() && self.readable_mode.is_none() && self.writable_mode.is_none();
        if nothing_specified {
            return Mode::Object;
        }
        side.or(self.object_mode.map(Mode::from_object_mode))
            .unwrap_or(Mode::Bytes)
    }
}

/// Resolved, immutable settings of a running operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) maintain_order: bool,
    pub(crate) max_parallel: MaxParallel,
    pub(crate) readable_mode: Mode,
    pub(crate) writable_mode: Mode,
    pub(crate) encoding: Encoding,
}
