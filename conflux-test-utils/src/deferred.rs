// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Resolutions settled by hand from test code.
//!
//! [`deferred`] hands out a [`Resolution`] together with the [`Deferred`] handle
//! that settles it, so a test decides exactly when (and in which order) each
//! in-flight item completes. [`DeferredBoard`] does the same for every item a
//! resolver is asked to handle.

use conflux_core::{ConfluxError, Resolution, Settle, Thenable};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;

type Slot<U, E> = Arc<Mutex<Option<Settle<U, E>>>>;

/// Settles exactly one [`Resolution`].
///
/// Dropping the handle without settling abandons the resolution, which then
/// fails with [`ConfluxError::Abandoned`].
#[derive(Debug)]
pub struct Deferred<U, E> {
    slot: Slot<U, E>,
}

struct Handoff<U, E>(Slot<U, E>);

impl<U, E> Thenable for Handoff<U, E> {
    type Output = U;
    type Error = E;

    fn then(self, settle: Settle<U, E>) {
        *self.0.lock() = Some(settle);
    }
}

/// Creates a resolution that stays pending until its [`Deferred`] is settled.
///
/// ```
/// use conflux_core::ConfluxError;
/// use conflux_test_utils::deferred;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (handle, resolution) = deferred::<u32, ConfluxError>();
/// assert!(handle.resolve(7));
/// assert_eq!(resolution.await.unwrap(), 7);
/// # }
/// ```
pub fn deferred<U, E>() -> (Deferred<U, E>, Resolution<U, E>)
where
    E: From<ConfluxError>,
{
    let slot: Slot<U, E> = Arc::new(Mutex::new(None));
    let resolution = Resolution::from_thenable(Handoff(slot.clone()));
    (Deferred { slot }, resolution)
}

impl<U, E> Deferred<U, E> {
    /// Returns `false` if already settled.
    pub fn resolve(&self, value: U) -> bool {
        self.settle(Ok(value))
    }

    /// Returns `false` if already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    pub fn settle(&self, outcome: Result<U, E>) -> bool {
        match self.slot.lock().take() {
            Some(settle) => {
                settle.settle(outcome);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.slot.lock().is_none()
    }
}

/// Records every item a resolver receives and lets the test settle them in any order.
pub struct DeferredBoard<T, U, E> {
    entries: Arc<Mutex<Vec<(T, Deferred<U, E>)>>>,
    arrivals: Arc<Notify>,
}

impl<T, U, E> Clone for DeferredBoard<T, U, E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            arrivals: self.arrivals.clone(),
        }
    }
}

impl<T, U, E> Default for DeferredBoard<T, U, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, E> DeferredBoard<T, U, E> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            arrivals: Arc::new(Notify::new()),
        }
    }

    /// A resolver that parks every item on this board.
    pub fn resolver(&self) -> impl FnMut(T) -> Resolution<U, E>
    where
        E: From<ConfluxError>,
    {
        let board = self.clone();
        move |item| board.park(item)
    }

    fn park(&self, item: T) -> Resolution<U, E>
    where
        E: From<ConfluxError>,
    {
        let (handle, resolution) = deferred();
        self.entries.lock().push((item, handle));
        self.arrivals.notify_waiters();
        resolution
    }

    /// Items parked and not yet settled.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unsettled items in arrival order.
    pub fn items(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.lock().iter().map(|(item, _)| item.clone()).collect()
    }

    /// Waits until at least `count` items are parked.
    pub async fn wait_for(&self, count: usize) {
        loop {
            let arrived = self.arrivals.notified();
            if self.len() >= count {
                return;
            }
            arrived.await;
        }
    }

    /// Settles the first parked entry equal to `item`. Returns `false` if there is none.
    pub fn settle(&self, item: &T, outcome: Result<U, E>) -> bool
    where
        T: PartialEq,
    {
        let handle = {
            let mut entries = self.entries.lock();
            match entries.iter().position(|(parked, _)| parked == item) {
                Some(index) => entries.remove(index).1,
                None => return false,
            }
        };
        handle.settle(outcome)
    }

    pub fn resolve(&self, item: &T, value: U) -> bool
    where
        T: PartialEq,
    {
        self.settle(item, Ok(value))
    }

    pub fn reject(&self, item: &T, error: E) -> bool
    where
        T: PartialEq,
    {
        self.settle(item, Err(error))
    }
}
