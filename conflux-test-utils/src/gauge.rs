// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts how many tracked futures are alive at once and remembers the peak.
///
/// ```
/// use conflux_test_utils::RunningGauge;
///
/// let gauge = RunningGauge::new();
/// let first = gauge.enter();
/// let second = gauge.enter();
/// drop(first);
/// drop(second);
///
/// assert_eq!(gauge.current(), 0);
/// assert_eq!(gauge.peak(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunningGauge {
    counters: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    current: AtomicUsize,
    peak: AtomicUsize,
}

/// Leaves the gauge when dropped.
#[derive(Debug)]
#[must_use = "the gauge is left as soon as the guard is dropped"]
pub struct GaugeGuard {
    counters: Arc<Counters>,
}

impl Drop for GaugeGuard {
    fn drop(&mut self) {
        self.counters.current.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RunningGauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) -> GaugeGuard {
        let now = self.counters.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(now, Ordering::SeqCst);
        GaugeGuard {
            counters: self.counters.clone(),
        }
    }

    /// Enters now and leaves when `future` completes.
    pub fn track<F>(&self, future: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        let guard = self.enter();
        async move {
            let output = future.await;
            drop(guard);
            output
        }
    }

    pub fn current(&self) -> usize {
        self.counters.current.load(Ordering::SeqCst)
    }

    pub fn peak(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }
}
