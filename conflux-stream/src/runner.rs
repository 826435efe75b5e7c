// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Resolution bookkeeping shared by every poll of the operator.
//!
//! All mutation happens inside a single `poll_next` call of the owning stream,
//! so there is no locking. What matters is the order of steps when a task
//! settles: the output (or fault) is routed and the task leaves tracking before
//! its slot is released, which is what resumes intake.

use crate::admission::{Admission, AdmissionController};
use crate::options::Settings;
use crate::order_buffer::OrderBuffer;
use crate::pending_set::{PendingSet, Settled, Task};
use crate::relay::FaultHandler;
use crate::resolver::Resolver;
use conflux_core::{Fault, OperatorState, Recovery, TaskId};
use core::task::{Context, Poll};
use std::collections::VecDeque;

pub(crate) struct Runner<T, R, H>
where
    R: Resolver<T>,
{
    resolver: R,
    handler: H,
    settings: Settings,
    admission: AdmissionController,
    pending: PendingSet<T, R::Resolution>,
    order: OrderBuffer<R::Output>,
    ready: VecDeque<R::Output>,
    next_id: u64,
}

impl<T, R, H> Runner<T, R, H>
where
    R: Resolver<T>,
{
    pub(crate) fn new(resolver: R, handler: H, settings: Settings) -> Self {
        Self {
            resolver,
            handler,
            admission: AdmissionController::new(settings.max_parallel),
            settings,
            pending: PendingSet::new(),
            order: OrderBuffer::new(),
            ready: VecDeque::new(),
            next_id: 0,
        }
    }

    pub(crate) fn with_handler<H2>(self, handler: H2) -> Runner<T, R, H2> {
        Runner {
            resolver: self.resolver,
            handler,
            settings: self.settings,
            admission: self.admission,
            pending: self.pending,
            order: self.order,
            ready: self.ready,
            next_id: self.next_id,
        }
    }

    pub(crate) const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub(crate) const fn is_paused(&self) -> bool {
        self.admission.is_paused()
    }

    pub(crate) const fn running(&self) -> usize {
        self.admission.running()
    }

    pub(crate) fn buffered(&self) -> usize {
        self.order.len()
    }

    /// No task is tracked anymore, by either the pending set or the order buffer.
    pub(crate) fn is_drained(&self) -> bool {
        self.pending.is_drained() && self.order.is_empty()
    }

    pub(crate) fn pop_ready(&mut self) -> Option<R::Output> {
        self.ready.pop_front()
    }

    pub(crate) fn ready_len(&self) -> usize {
        self.ready.len()
    }

    pub(crate) fn state(&self) -> OperatorState {
        OperatorState {
            running: self.admission.running(),
            max_parallel: self.admission.limit(),
            maintain_order: self.settings.maintain_order,
            buffered: self.order.len(),
            paused: self.admission.is_paused(),
        }
    }

    /// Starts resolving `item` and reports whether intake may continue.
    pub(crate) fn admit(&mut self, item: T) -> Admission
    where
        T: Clone,
    {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;

        let admission = self.admission.admit();
        if self.settings.maintain_order {
            self.order.enqueue(id);
        }
        let resolution = self.resolver.resolve(item.clone(), self.settings.encoding);
        self.pending.insert(Task::new(id, item, resolution));

        if admission == Admission::Pause {
            crate::debug!(
                "resolve: intake paused at {} running (max_parallel: {})",
                self.admission.running(),
                self.admission.limit()
            );
        }
        admission
    }

    pub(crate) fn poll_settled(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Settled<T, R::Output, R::Error>>> {
        self.pending.poll_settled(cx)
    }
}

impl<T, R, H> Runner<T, R, H>
where
    R: Resolver<T>,
    H: FaultHandler<T, R::Error, R::Output>,
{
    /// Routes one settlement and frees its slot.
    pub(crate) fn route(&mut self, settled: Settled<T, R::Output, R::Error>) {
        let Settled { id, item, outcome } = settled;
        debug_assert!(self.pending.contains(id), "settled task {id} is not tracked");
        match outcome {
            Ok(value) => self.release_output(id, value),
            Err(error) => self.relay_fault(id, item, error),
        }

        if self.admission.release() {
            crate::debug!(
                "resolve: intake resumed after task {} settled ({} running)",
                id,
                self.admission.running()
            );
        }
        debug_assert_eq!(self.admission.running(), self.pending.len());
    }

    fn release_output(&mut self, id: TaskId, value: R::Output) {
        if self.settings.maintain_order {
            let buffered = self.order.resolve(id, value);
            debug_assert!(buffered, "resolved task {id} has no order buffer entry");
            self.order.flush_into(&mut self.ready);
        } else {
            self.ready.push_back(value);
        }
        self.pending.remove(id);
    }

    fn relay_fault(&mut self, id: TaskId, item: T, error: R::Error) {
        self.pending.remove(id);
        if self.settings.maintain_order {
            self.order.remove(id);
        }

        let fault = Fault {
            item,
            error,
            id,
            operator: self.state(),
        };
        if let Recovery::Emit(substitute) = self.handler.on_fault(fault) {
            self.ready.push_back(substitute);
        }

        if self.settings.maintain_order {
            self.order.flush_into(&mut self.ready);
        }
    }
}
