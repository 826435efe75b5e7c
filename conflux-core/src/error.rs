// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the conflux resolution operator
//!
//! Item-level failures produced by a resolver are never turned into a
//! [`ConfluxError`]: they travel to the fault handler as the resolver's own error
//! type. [`ConfluxError`] covers configuration mistakes and plumbing failures
//! around the operator.
//!
//! # Examples
//!
//! ```
//! use conflux_core::{ConfluxError, Result};
//!
//! fn configure(limit: usize) -> Result<usize> {
//!     if limit == 0 {
//!         return Err(ConfluxError::invalid_option("max_parallel must be positive"));
//!     }
//!     Ok(limit)
//! }
//!
//! assert!(configure(0).is_err());
//! ```

/// Root error type for all conflux operations
#[derive(Debug, thiserror::Error)]
pub enum ConfluxError {
    /// No resolver was configured
    ///
    /// Returned when the operator is attached with the default resolver slot still
    /// in place, and by the default resolver itself if it is ever invoked.
    #[error("Not implemented. Supply a resolver to the options or implement `Resolver` for your type")]
    ResolverNotImplemented,

    /// A delegate-style thenable dropped its settle handle without settling
    #[error("Thenable was dropped without settling")]
    Abandoned,

    /// A configuration value was rejected
    #[error("Invalid option: {context}")]
    InvalidOption {
        /// Which option was rejected and why
        context: String,
    },

    /// The operator side of a resolve channel was dropped
    #[error("Channel closed: operator dropped")]
    ChannelClosed,

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ConfluxError {
    /// Create an invalid option error with the given context
    pub fn invalid_option(context: impl Into<String>) -> Self {
        Self::InvalidOption {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Configuration errors are programmer errors and must not be retried.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::ResolverNotImplemented | Self::InvalidOption { .. }
        )
    }
}

/// Specialized Result type for conflux operations
pub type Result<T> = std::result::Result<T, ConfluxError>;
