//! Single-slot deferred step queue.
//!
//! The playback loop never sleeps: after an image is shown the next one is
//! parked here with a countdown, and the host's frame loop feeds elapsed time
//! through [`Scheduler::advance`]. Scheduling replaces whatever was pending,
//! so at most one playback loop exists at a time.

use std::time::Duration;

/// A step of the playback loop: show `index` of batch `batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub batch: u64,
    pub index: usize,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    step: Step,
    remaining: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Option<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parks `step` to fire once `after` has elapsed, superseding any pending step.
    pub fn schedule(&mut self, step: Step, after: Duration) {
        self.pending = Some(Deferred { step, remaining: after });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<Step> {
        self.pending.map(|deferred| deferred.step)
    }

    /// Time left before the pending step fires.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.map(|deferred| deferred.remaining)
    }

    /// Counts `elapsed` down and hands back the step once it is due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Step> {
        let deferred = self.pending.as_mut()?;
        deferred.remaining = deferred.remaining.saturating_sub(elapsed);
        if deferred.remaining.is_zero() {
            self.pending.take().map(|deferred| deferred.step)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Step = Step { batch: 1, index: 3 };

    #[test]
    fn step_fires_only_once_due() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(STEP, Duration::from_secs(2));

        assert_eq!(scheduler.advance(Duration::from_millis(1500)), None);
        assert_eq!(scheduler.remaining(), Some(Duration::from_millis(500)));
        assert_eq!(scheduler.advance(Duration::from_millis(600)), Some(STEP));
        assert_eq!(scheduler.pending(), None);
        assert_eq!(scheduler.advance(Duration::from_secs(10)), None);
    }

    #[test]
    fn zero_delay_fires_on_next_advance() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(STEP, Duration::ZERO);
        assert_eq!(scheduler.advance(Duration::ZERO), Some(STEP));
    }

    #[test]
    fn scheduling_supersedes_the_pending_step() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(STEP, Duration::from_secs(1));
        let newer = Step { batch: 2, index: 0 };
        scheduler.schedule(newer, Duration::from_secs(5));

        assert_eq!(scheduler.advance(Duration::from_secs(1)), None);
        assert_eq!(scheduler.advance(Duration::from_secs(4)), Some(newer));
    }

    #[test]
    fn cancel_drops_the_pending_step() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(STEP, Duration::ZERO);
        scheduler.cancel();
        assert_eq!(scheduler.advance(Duration::from_secs(1)), None);
    }
}
