// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reordering of out-of-order completions.

use conflux_core::TaskId;
use std::collections::VecDeque;

#[derive(Debug)]
struct Entry<U> {
    id: TaskId,
    value: Option<U>,
}

impl<U> Entry<U> {
    const fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}

/// Holds one entry per in-flight task, in submission order.
///
/// Entries are only ever released from the head, and only once resolved, so a
/// slow early task holds back every later output until it settles. Task ids are
/// assigned monotonically, which keeps the buffer sorted by id and lets lookups
/// binary-search.
#[derive(Debug)]
pub(crate) struct OrderBuffer<U> {
    entries: VecDeque<Entry<U>>,
}

impl<U> OrderBuffer<U> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Appends an unresolved entry at the tail.
    pub(crate) fn enqueue(&mut self, id: TaskId) {
        debug_assert!(
            self.entries.back().map_or(true, |last| last.id < id),
            "order buffer entries must be enqueued in submission order"
        );
        self.entries.push_back(Entry { id, value: None });
    }

    /// Records the output of a task. Returns `false` if the id is not buffered.
    pub(crate) fn resolve(&mut self, id: TaskId, value: U) -> bool {
        match self.position(id) {
            Some(index) => {
                self.entries[index].value = Some(value);
                true
            }
            None => false,
        }
    }

    /// Drops the entry of a failed task, wherever it sits.
    pub(crate) fn remove(&mut self, id: TaskId) -> bool {
        self.position(id)
            .and_then(|index| self.entries.remove(index))
            .is_some()
    }

    /// Moves the resolved prefix into `out`, in order. Returns how many moved.
    pub(crate) fn flush_into(&mut self, out: &mut VecDeque<U>) -> usize {
        let mut released = 0;
        while self.entries.front().is_some_and(Entry::is_resolved) {
            if let Some(value) = self.entries.pop_front().and_then(|entry| entry.value) {
                out.push_back(value);
                released += 1;
            }
        }
        released
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.entries.binary_search_by_key(&id, |entry| entry.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(sequence: u64) -> TaskId {
        TaskId::new(sequence)
    }

    #[test]
    fn head_blocks_later_resolved_entries() {
        let mut buffer = OrderBuffer::new();
        let mut out = VecDeque::new();
        buffer.enqueue(id(0));
        buffer.enqueue(id(1));
        buffer.enqueue(id(2));

        assert!(buffer.resolve(id(2), "c"));
        assert!(buffer.resolve(id(1), "b"));
        assert_eq!(buffer.flush_into(&mut out), 0);
        assert!(out.is_empty());

        assert!(buffer.resolve(id(0), "a"));
        assert_eq!(buffer.flush_into(&mut out), 3);
        assert_eq!(out, ["a", "b", "c"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn removing_failed_head_unblocks_successors() {
        let mut buffer = OrderBuffer::new();
        let mut out = VecDeque::new();
        buffer.enqueue(id(0));
        buffer.enqueue(id(1));
        buffer.enqueue(id(2));
        buffer.resolve(id(1), 10);

        assert!(buffer.remove(id(0)));
        assert_eq!(buffer.flush_into(&mut out), 1);
        assert_eq!(out, [10]);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn removing_from_the_middle_keeps_order() {
        let mut buffer = OrderBuffer::new();
        let mut out = VecDeque::new();
        for sequence in 0..4 {
            buffer.enqueue(id(sequence));
        }

        assert!(buffer.remove(id(2)));
        buffer.resolve(id(3), 'd');
        buffer.resolve(id(1), 'b');
        buffer.resolve(id(0), 'a');
        buffer.flush_into(&mut out);

        assert_eq!(out, ['a', 'b', 'd']);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut buffer: OrderBuffer<u8> = OrderBuffer::new();
        buffer.enqueue(id(5));

        assert!(!buffer.resolve(id(4), 1));
        assert!(!buffer.remove(id(6)));
        assert_eq!(buffer.len(), 1);
    }
}
