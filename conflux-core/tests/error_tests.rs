// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::ConfluxError;
use std::error::Error;
use std::io;

#[test]
fn test_error_display() {
    let err = ConfluxError::ResolverNotImplemented;
    assert_eq!(
        err.to_string(),
        "Not implemented. Supply a resolver to the options or implement `Resolver` for your type"
    );

    let err = ConfluxError::invalid_option("max_parallel must be at least 1");
    assert_eq!(
        err.to_string(),
        "Invalid option: max_parallel must be at least 1"
    );
}

#[test]
fn test_is_configuration_error() {
    assert!(ConfluxError::ResolverNotImplemented.is_configuration_error());
    assert!(ConfluxError::invalid_option("test").is_configuration_error());
    assert!(!ConfluxError::Abandoned.is_configuration_error());
    assert!(!ConfluxError::ChannelClosed.is_configuration_error());
    assert!(!ConfluxError::user_error(io::Error::other("test")).is_configuration_error());
}

#[test]
fn test_user_error_keeps_source() {
    let err = ConfluxError::user_error(io::Error::other("disk full"));

    assert!(matches!(err, ConfluxError::UserError(_)));
    assert_eq!(err.to_string(), "User error: disk full");
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("disk full"));
}

#[test]
fn test_error_into_anyhow() {
    let err: anyhow::Error = ConfluxError::ChannelClosed.into();

    assert!(err.downcast_ref::<ConfluxError>().is_some());
}
