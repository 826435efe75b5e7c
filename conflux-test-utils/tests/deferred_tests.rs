// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::ConfluxError;
use conflux_test_utils::test_data::{person_alice, person_bob};
use conflux_test_utils::{deferred, DeferredBoard, TestData};

#[tokio::test]
async fn test_deferred_resolves_once() -> anyhow::Result<()> {
    // Arrange
    let (handle, resolution) = deferred::<u32, ConfluxError>();

    // Act
    let first = handle.resolve(1);
    let second = handle.resolve(2);

    // Assert
    assert!(first);
    assert!(!second);
    assert!(handle.is_settled());
    assert_eq!(resolution.await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_deferred_reject() {
    // Arrange
    let (handle, resolution) = deferred::<u32, ConfluxError>();

    // Act
    handle.reject(ConfluxError::invalid_option("rejected"));

    // Assert
    assert!(matches!(
        resolution.await,
        Err(ConfluxError::InvalidOption { .. })
    ));
}

#[tokio::test]
async fn test_dropped_deferred_abandons_resolution() {
    // Arrange
    let (handle, resolution) = deferred::<u32, ConfluxError>();

    // Act
    drop(handle);

    // Assert
    assert!(matches!(resolution.await, Err(ConfluxError::Abandoned)));
}

#[tokio::test]
async fn test_board_settles_out_of_arrival_order() -> anyhow::Result<()> {
    // Arrange
    let board = DeferredBoard::<TestData, String, ConfluxError>::new();
    let mut resolver = board.resolver();
    let alice = resolver(person_alice());
    let bob = resolver(person_bob());

    // Act
    board.wait_for(2).await;
    let items = board.items();
    let settled_bob = board.resolve(&person_bob(), "bob".to_string());

    // Assert
    assert_eq!(items, vec![person_alice(), person_bob()]);
    assert!(settled_bob);
    assert_eq!(board.len(), 1);
    assert_eq!(bob.await?, "bob");

    assert!(board.resolve(&person_alice(), "alice".to_string()));
    assert!(board.is_empty());
    assert_eq!(alice.await?, "alice");

    Ok(())
}

#[tokio::test]
async fn test_board_unknown_item_is_not_settled() {
    // Arrange
    let board = DeferredBoard::<u32, u32, ConfluxError>::new();
    let mut resolver = board.resolver();
    let _pending = resolver(1);

    // Act
    let settled = board.reject(&2, ConfluxError::ChannelClosed);

    // Assert
    assert!(!settled);
    assert_eq!(board.len(), 1);
}
