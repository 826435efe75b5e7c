// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Tracking of in-flight resolutions.

use conflux_core::TaskId;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FuturesUnordered, StreamExt};
use pin_project::pin_project;
use std::collections::HashSet;

/// One admitted item and its running resolution.
#[pin_project]
pub(crate) struct Task<T, F> {
    id: TaskId,
    item: Option<T>,
    #[pin]
    resolution: F,
}

impl<T, F> Task<T, F> {
    pub(crate) const fn new(id: TaskId, item: T, resolution: F) -> Self {
        Self {
            id,
            item: Some(item),
            resolution,
        }
    }
}

/// A task whose resolution has settled but which is still tracked.
#[derive(Debug)]
pub(crate) struct Settled<T, U, E> {
    pub(crate) id: TaskId,
    pub(crate) item: T,
    pub(crate) outcome: Result<U, E>,
}

impl<T, F, U, E> Future for Task<T, F>
where
    F: Future<Output = Result<U, E>>,
{
    type Output = Settled<T, U, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        match this.resolution.poll(cx) {
            Poll::Ready(outcome) => match this.item.take() {
                Some(item) => Poll::Ready(Settled {
                    id: *this.id,
                    item,
                    outcome,
                }),
                None => unreachable!("Task polled after completion"),
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

/// The set of tasks that have been admitted and not yet fully routed.
///
/// A task leaves the underlying future set the moment it settles, but stays
/// tracked until [`PendingSet::remove`] is called for its id. The set is drained
/// only once every settled task has also been removed.
pub(crate) struct PendingSet<T, F> {
    running: FuturesUnordered<Task<T, F>>,
    tracked: HashSet<TaskId>,
}

impl<T, F> PendingSet<T, F> {
    pub(crate) fn new() -> Self {
        Self {
            running: FuturesUnordered::new(),
            tracked: HashSet::new(),
        }
    }

    pub(crate) fn insert(&mut self, task: Task<T, F>) {
        let fresh = self.tracked.insert(task.id);
        debug_assert!(fresh, "task {} inserted twice", task.id);
        self.running.push(task);
    }

    /// Stops tracking a settled task. Returns `false` if the id was unknown.
    pub(crate) fn remove(&mut self, id: TaskId) -> bool {
        self.tracked.remove(&id)
    }

    pub(crate) fn contains(&self, id: TaskId) -> bool {
        self.tracked.contains(&id)
    }

    pub(crate) fn len(&self) -> usize {
        self.tracked.len()
    }

    pub(crate) fn is_drained(&self) -> bool {
        self.tracked.is_empty()
    }
}

impl<T, F, U, E> PendingSet<T, F>
where
    F: Future<Output = Result<U, E>>,
{
    /// Polls for the next settlement, in completion order.
    ///
    /// Returns `Ready(None)` when nothing is running.
    pub(crate) fn poll_settled(&mut self, cx: &mut Context<'_>) -> Poll<Option<Settled<T, U, E>>> {
        self.running.poll_next_unpin(cx)
    }
}
