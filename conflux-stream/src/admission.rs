// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrency cap on running resolutions.

use conflux_core::MaxParallel;

/// Signal returned to upstream intake after each admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Below the cap: pull the next item right away
    Continue,
    /// Cap reached: intake stays stalled until a slot frees
    Pause,
}

/// Counts running resolutions against the configured cap.
///
/// Hitting the cap stashes a single stalled-intake marker. Releasing a slot
/// clears it exactly once, which is the moment upstream intake resumes. No
/// admission may happen while the marker is set.
#[derive(Debug)]
pub(crate) struct AdmissionController {
    running: usize,
    limit: MaxParallel,
    stalled: bool,
}

impl AdmissionController {
    pub(crate) const fn new(limit: MaxParallel) -> Self {
        Self {
            running: 0,
            limit,
            stalled: false,
        }
    }

    pub(crate) fn admit(&mut self) -> Admission {
        debug_assert!(
            !self.stalled,
            "admission requested while intake is stalled on the concurrency cap"
        );
        self.running += 1;
        if self.limit.allows(self.running) {
            Admission::Continue
        } else {
            self.stalled = true;
            Admission::Pause
        }
    }

    /// Frees one slot. Returns `true` if this resumed stalled intake.
    pub(crate) fn release(&mut self) -> bool {
        debug_assert!(self.running > 0, "released more slots than admitted");
        self.running = self.running.saturating_sub(1);
        core::mem::take(&mut self.stalled)
    }

    pub(crate) const fn is_paused(&self) -> bool {
        self.stalled
    }

    pub(crate) const fn running(&self) -> usize {
        self.running
    }

    pub(crate) const fn limit(&self) -> MaxParallel {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_pauses_after_every_admission() {
        let mut controller = AdmissionController::new(MaxParallel::sequential());

        assert_eq!(controller.admit(), Admission::Pause);
        assert!(controller.is_paused());

        assert!(controller.release());
        assert!(!controller.is_paused());
        assert_eq!(controller.running(), 0);
    }

    #[test]
    fn pauses_only_when_cap_is_reached() {
        let mut controller = AdmissionController::new(MaxParallel::limited(3).unwrap());

        assert_eq!(controller.admit(), Admission::Continue);
        assert_eq!(controller.admit(), Admission::Continue);
        assert!(!controller.release());
        assert_eq!(controller.admit(), Admission::Continue);
        assert_eq!(controller.admit(), Admission::Pause);
        assert_eq!(controller.running(), 3);

        assert!(controller.release());
        assert!(!controller.release());
        assert_eq!(controller.running(), 1);
    }

    #[test]
    fn unbounded_never_pauses() {
        let mut controller = AdmissionController::new(MaxParallel::unbounded());

        for _ in 0..1000 {
            assert_eq!(controller.admit(), Admission::Continue);
        }
        assert_eq!(controller.running(), 1000);
        assert!(!controller.is_paused());
    }
}
