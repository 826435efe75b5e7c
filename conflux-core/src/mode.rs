// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Whether one side of the operator carries structured items or raw byte chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Each item is an opaque value
    #[default]
    Object,
    /// Each item is a chunk of bytes
    Bytes,
}

impl Mode {
    pub const fn from_object_mode(object_mode: bool) -> Self {
        if object_mode {
            Self::Object
        } else {
            Self::Bytes
        }
    }

    pub const fn is_object(self) -> bool {
        matches!(self, Self::Object)
    }
}

/// Encoding hint handed to resolvers alongside each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Structured item, no byte encoding applies
    #[default]
    Object,
    /// Raw bytes
    Buffer,
    /// UTF-8 text chunks
    Utf8,
}

impl Encoding {
    /// Stable lowercase name of the encoding.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Buffer => "buffer",
            Self::Utf8 => "utf8",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
