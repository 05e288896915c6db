//! Frame-driven timer system.
//!
//! Provides one-shot and repeating timers on a virtual clock that only moves
//! when the host calls [`FrameScheduler::advance`] from its update loop.
//! Timers never run on their own thread; fired timers are reported back to
//! the caller, who dispatches them on the same execution context as input.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::error::TimerError;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// How many times a repeating timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Fire until stopped.
    #[default]
    Forever,
    /// Fire this many times in total, then remove the timer.
    Times(u32),
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating {
        /// Fires left, `None` for unbounded.
        remaining: Option<u32>,
    },
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire, on the scheduler clock.
    next_fire: Duration,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Duration,
    /// Insertion order, so timers due at the same instant fire FIFO.
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Manages all timers driven by one update loop.
///
/// Fire times are computed with `Duration` arithmetic from the moment the
/// timer was scheduled, so a repeating timer fires at exactly
/// `delay + k * interval` however the host slices its frames.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    /// Current time on the scheduler clock.
    now: Duration,
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
    next_seq: u64,
}

impl FrameScheduler {
    /// Create a new scheduler with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time on the scheduler clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a one-shot timer that fires after `delay`.
    ///
    /// A zero delay fires on the next [`advance`](Self::advance).
    pub fn start_one_shot(&mut self, delay: Duration) -> TimerId {
        self.insert(delay, delay, TimerKind::OneShot)
    }

    /// Start a repeating timer. The first fire occurs after `interval`.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.schedule_repeating(interval, interval, Repeat::Forever)
    }

    /// Start a repeating timer whose first fire occurs after `initial_delay`
    /// and then every `interval`.
    ///
    /// `Repeat::Times(0)` is treated as a single fire.
    pub fn schedule_repeating(
        &mut self,
        initial_delay: Duration,
        interval: Duration,
        repeat: Repeat,
    ) -> TimerId {
        let remaining = match repeat {
            Repeat::Forever => None,
            Repeat::Times(n) => Some(n.max(1)),
        };
        self.insert(initial_delay, interval, TimerKind::Repeating { remaining })
    }

    fn insert(&mut self, delay: Duration, interval: Duration, kind: TimerKind) -> TimerId {
        let next_fire = self.now.saturating_add(delay);
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.push(id, next_fire);
        tracing::trace!(target: "burst_button_core::timer", ?id, ?delay, ?interval, "timer scheduled");
        id
    }

    fn push(&mut self, id: TimerId, fire_time: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(TimerQueueEntry { id, fire_time, seq });
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer does not exist (already stopped, or a
    /// one-shot that has fired).
    pub fn stop(&mut self, id: TimerId) -> Result<(), TimerError> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: "burst_button_core::timer", ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId)
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Get the clock time remaining until the next timer fires, if any.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_sub(self.now))
    }

    /// Drop queue entries whose timer was stopped or rescheduled.
    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.is_current(entry) {
                break;
            }
            self.queue.pop();
        }
    }

    fn is_current(&self, entry: &TimerQueueEntry) -> bool {
        self.timers
            .get(entry.id)
            .is_some_and(|t| t.next_fire == entry.fire_time)
    }

    /// Move the clock forward by `dt` and collect every timer fire that
    /// falls due, in chronological order.
    ///
    /// A repeating timer may appear several times when `dt` spans several
    /// intervals. A zero-interval timer fires at most once per call.
    #[tracing::instrument(skip(self), target = "burst_button_core::timer", level = "trace")]
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let target = self.now.saturating_add(dt);
        let mut fired = Vec::new();
        let mut deferred = Vec::new();

        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_time > target {
                break;
            }
            self.queue.pop();

            if !self.is_current(&entry) {
                continue;
            }
            let id = entry.id;
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };

            tracing::trace!(target: "burst_button_core::timer", ?id, at = ?entry.fire_time, "timer fired");
            fired.push(id);

            let kind = timer.kind;
            match kind {
                TimerKind::OneShot => {
                    self.timers.remove(id);
                }
                TimerKind::Repeating { remaining } => {
                    let remaining = remaining.map(|n| n.saturating_sub(1));
                    if remaining == Some(0) {
                        self.timers.remove(id);
                        continue;
                    }
                    timer.kind = TimerKind::Repeating { remaining };
                    let next_fire = entry.fire_time.saturating_add(timer.interval);
                    if next_fire == entry.fire_time {
                        // Zero interval or a saturated clock: next frame, not this one.
                        timer.next_fire = target;
                        deferred.push((id, target));
                    } else {
                        timer.next_fire = next_fire;
                        self.push(id, next_fire);
                    }
                }
            }
        }

        self.now = target;
        for (id, fire_time) in deferred {
            self.push(id, fire_time);
        }
        fired
    }
}

static_assertions::assert_impl_all!(FrameScheduler: Send, Sync);
