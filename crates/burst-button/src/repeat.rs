//! The per-button repeat timer.

use std::time::Duration;

use burst_button_core::logging::targets;
use burst_button_core::{FrameScheduler, Repeat, TimerId};

/// Holds at most one repeating timer on the host's [`FrameScheduler`].
///
/// The timer fires once after the delay and then every interval until
/// stopped. Fires are reported by [`FrameScheduler::advance`]; the owner
/// checks them against [`owns`](Self::owns).
#[derive(Debug, Default)]
pub struct RepeatTimer {
    handle: Option<TimerId>,
}

impl RepeatTimer {
    /// Create a stopped timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start firing after `delay`, then every `interval`. A running timer is
    /// stopped first.
    pub fn start(
        &mut self,
        delay: Duration,
        interval: Duration,
        scheduler: &mut FrameScheduler,
    ) -> TimerId {
        self.stop(scheduler);
        let id = scheduler.schedule_repeating(delay, interval, Repeat::Forever);
        tracing::trace!(target: targets::BUTTON, ?id, ?delay, ?interval, "repeat started");
        self.handle = Some(id);
        id
    }

    /// Stop the timer. Returns `false` if it was not running.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) -> bool {
        let Some(id) = self.handle.take() else {
            return false;
        };
        tracing::trace!(target: targets::BUTTON, ?id, "repeat stopped");
        scheduler.stop(id).is_ok()
    }

    /// Check if `id` is this timer's current handle.
    pub fn owns(&self, id: TimerId) -> bool {
        self.handle == Some(id)
    }

    /// Check if the timer is running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// The current scheduler handle.
    pub fn handle(&self) -> Option<TimerId> {
        self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_replaces_previous() {
        let mut scheduler = FrameScheduler::new();
        let mut repeat = RepeatTimer::new();

        let first = repeat.start(Duration::ZERO, Duration::from_millis(10), &mut scheduler);
        let second = repeat.start(Duration::ZERO, Duration::from_millis(10), &mut scheduler);

        assert!(!scheduler.is_active(first));
        assert!(repeat.owns(second));
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = FrameScheduler::new();
        let mut repeat = RepeatTimer::new();

        assert!(!repeat.stop(&mut scheduler));
        repeat.start(Duration::from_millis(5), Duration::from_millis(5), &mut scheduler);
        assert!(repeat.stop(&mut scheduler));
        assert!(!repeat.stop(&mut scheduler));
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn test_zero_delay_fires_next_tick() {
        let mut scheduler = FrameScheduler::new();
        let mut repeat = RepeatTimer::new();

        let id = repeat.start(Duration::ZERO, Duration::from_millis(100), &mut scheduler);
        assert_eq!(scheduler.advance(Duration::ZERO), vec![id]);
        assert!(scheduler.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![id]);
    }
}
