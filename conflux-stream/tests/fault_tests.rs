// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use conflux_core::{Fault, TaskId};
use conflux_stream::prelude::*;
use conflux_test_utils::test_data::{animal_bird, mixed_fixtures, person_alice, TestData};
use conflux_test_utils::{assert_no_element_emitted, expect_completion, test_channel};
use futures::{future, stream, StreamExt};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum LookupError {
    #[error("no record for {0}")]
    Missing(String),
}

fn always_fails(data: TestData) -> future::Ready<Result<String, LookupError>> {
    future::err(LookupError::Missing(data.name().to_string()))
}

fn fails_on_animals(data: TestData) -> future::Ready<Result<TestData, LookupError>> {
    match data {
        TestData::Person(_) => future::ok(data),
        TestData::Animal(_) => future::err(LookupError::Missing(data.name().to_string())),
    }
}

/// Collects every fault it sees and skips the item.
#[derive(Clone, Default)]
struct FaultLog {
    seen: Arc<Mutex<Vec<(TaskId, TestData, LookupError)>>>,
}

impl<U> FaultHandler<TestData, LookupError, U> for FaultLog {
    fn on_fault(&mut self, fault: Fault<TestData, LookupError>) -> Recovery<U> {
        self.seen
            .lock()
            .unwrap()
            .push((fault.id, fault.item, fault.error));
        Recovery::Skip
    }
}

#[tokio::test]
async fn test_always_failing_resolver_yields_one_fault_per_input() -> anyhow::Result<()> {
    // Arrange
    let log = FaultLog::default();
    let options = ResolveOptions::new()
        .max_parallel(MaxParallel::limited(3)?)
        .resolver(always_fails);

    // Act
    let outputs: Vec<String> = stream::iter(mixed_fixtures())
        .resolve(options)?
        .with_fault_handler(log.clone())
        .collect()
        .await;

    // Assert
    assert!(outputs.is_empty());
    let seen = log.seen.lock().unwrap().clone();
    let mut items: Vec<TestData> = seen.iter().map(|(_, item, _)| item.clone()).collect();
    let mut expected = mixed_fixtures();
    items.sort();
    expected.sort();
    assert_eq!(items, expected);
    assert!(seen
        .iter()
        .all(|(_, item, error)| *error == LookupError::Missing(item.name().to_string())));

    Ok(())
}

#[tokio::test]
async fn test_stream_stays_open_after_faults() -> anyhow::Result<()> {
    // Arrange
    let (tx, upstream) = test_channel();
    let (fault_tx, mut faults) = mpsc::unbounded_channel();
    let options = ResolveOptions::new().resolver(always_fails);
    let mut resolved = upstream
        .resolve(options)?
        .on_fault(move |fault| {
            fault_tx.send(fault.into_item()).unwrap();
            Recovery::Skip
        });

    // Act & Assert
    tx.send(person_alice())?;
    assert_no_element_emitted(&mut resolved, 50).await;
    assert_eq!(faults.try_recv()?, person_alice());

    tx.send(animal_bird())?;
    assert_no_element_emitted(&mut resolved, 50).await;
    assert_eq!(faults.try_recv()?, animal_bird());
    assert!(!resolved.is_drained());

    drop(tx);
    expect_completion(&mut resolved).await;
    assert!(faults.try_recv().is_err());

    Ok(())
}

#[tokio::test]
async fn test_reinjection_restores_parity() -> anyhow::Result<()> {
    // Arrange
    let options = ResolveOptions::new()
        .max_parallel(MaxParallel::unbounded())
        .resolver(fails_on_animals);

    // Act
    let outputs: Vec<TestData> = stream::iter(mixed_fixtures())
        .resolve(options)?
        .on_fault(|fault| Recovery::Emit(fault.into_item()))
        .collect()
        .await;

    // Assert
    let mut outputs_sorted = outputs.clone();
    let mut expected = mixed_fixtures();
    outputs_sorted.sort();
    expected.sort();
    assert_eq!(outputs.len(), mixed_fixtures().len());
    assert_eq!(outputs_sorted, expected);

    Ok(())
}

#[tokio::test]
async fn test_sequential_reinjection_keeps_positions() -> anyhow::Result<()> {
    // Arrange
    let options = ResolveOptions::new().resolver(fails_on_animals);

    // Act
    let outputs: Vec<TestData> = stream::iter(mixed_fixtures())
        .resolve(options)?
        .on_fault(|fault| Recovery::Emit(fault.into_item()))
        .collect()
        .await;

    // Assert
    assert_eq!(outputs, mixed_fixtures());

    Ok(())
}

#[tokio::test]
async fn test_default_handler_skips_failed_items() -> anyhow::Result<()> {
    // Arrange
    let options = ResolveOptions::new()
        .max_parallel(MaxParallel::limited(4)?)
        .resolver(fails_on_animals);

    // Act
    let outputs: Vec<TestData> = stream::iter(mixed_fixtures())
        .resolve(options)?
        .collect()
        .await;

    // Assert
    let people: Vec<TestData> = mixed_fixtures()
        .into_iter()
        .filter(|data| matches!(data, TestData::Person(_)))
        .collect();
    assert_eq!(outputs, people);

    Ok(())
}

#[tokio::test]
async fn test_fault_carries_operator_snapshot() -> anyhow::Result<()> {
    // Arrange
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let recorder = snapshots.clone();
    let options = ResolveOptions::new()
        .max_parallel(MaxParallel::limited(2)?)
        .maintain_order(false)
        .resolver(always_fails);

    // Act
    let outputs: Vec<String> = stream::iter(mixed_fixtures())
        .resolve(options)?
        .on_fault(move |fault| {
            recorder.lock().unwrap().push(fault.operator);
            Recovery::Skip
        })
        .collect()
        .await;

    // Assert
    assert!(outputs.is_empty());
    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), mixed_fixtures().len());
    for snapshot in snapshots.iter() {
        assert_eq!(snapshot.max_parallel, MaxParallel::limited(2)?);
        assert!(!snapshot.maintain_order);
        assert!(snapshot.running >= 1 && snapshot.running <= 2);
        assert_eq!(snapshot.buffered, 0);
    }

    Ok(())
}
