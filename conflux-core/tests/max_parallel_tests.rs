// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::{ConfluxError, MaxParallel};
use std::num::NonZeroUsize;

#[test]
fn test_default_is_sequential() {
    let max_parallel = MaxParallel::default();

    assert_eq!(max_parallel, MaxParallel::sequential());
    assert_eq!(max_parallel.get(), Some(1));
    assert!(max_parallel.allows(0));
    assert!(!max_parallel.allows(1));
}

#[test]
fn test_limited_rejects_zero() {
    let result = MaxParallel::limited(0);

    assert!(matches!(result, Err(ConfluxError::InvalidOption { .. })));
}

#[test]
fn test_limited_allows_up_to_limit() -> anyhow::Result<()> {
    let max_parallel = MaxParallel::limited(10)?;

    assert!(max_parallel.allows(9));
    assert!(!max_parallel.allows(10));
    assert!(!max_parallel.is_unbounded());
    assert_eq!(max_parallel.to_string(), "10");

    Ok(())
}

#[test]
fn test_unbounded_allows_everything() {
    let max_parallel = MaxParallel::unbounded();

    assert!(max_parallel.allows(usize::MAX - 1));
    assert!(max_parallel.is_unbounded());
    assert_eq!(max_parallel.get(), None);
    assert_eq!(max_parallel.to_string(), "unbounded");
}

#[test]
fn test_conversions() -> anyhow::Result<()> {
    assert_eq!(MaxParallel::try_from(usize::MAX)?, MaxParallel::unbounded());
    assert_eq!(MaxParallel::try_from(4)?, MaxParallel::limited(4)?);
    assert!(MaxParallel::try_from(0).is_err());

    let three = NonZeroUsize::new(3).ok_or_else(|| anyhow::anyhow!("zero"))?;
    assert_eq!(MaxParallel::from(three).get(), Some(3));

    Ok(())
}
