#![forbid(unsafe_code)]

//! Timeline: labelled animations at offsets, optionally looping.
//!
//! A [`Timeline`] owns a set of [`Animation`]s that start at fixed offsets
//! from the timeline's start and share one clock. When the clock reaches the
//! timeline duration it either finishes or, for looping timelines, resets
//! every event and carries the overshoot into the next cycle.
//!
//! ```ignore
//! use std::time::Duration;
//! use showcase_core::animation::{Fade, LoopCount, Timeline};
//!
//! let period = Duration::from_millis(1200);
//! let mut pulse = Timeline::new()
//!     .add("alpha", Duration::ZERO, Fade::new(period))
//!     .add("radius", Duration::ZERO, Fade::new(period))
//!     .duration(period)
//!     .loop_count(LoopCount::Infinite);
//! pulse.play();
//! ```
//!
//! # Invariants
//!
//! 1. Events only advance while the timeline is `Playing`.
//! 2. An event never receives time from before its offset.
//! 3. On every loop boundary all events restart from their initial state;
//!    a looping timeline is never resumed mid-cycle after [`Timeline::play`].
//!
//! # Failure Modes
//!
//! - Zero duration: clamped to 1ns.
//! - Frames longer than several periods of an infinite loop: whole periods
//!   are skipped, only the remainder is applied.

use std::fmt;
use std::time::Duration;

use super::Animation;

/// How many times the timeline plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    /// Play once.
    Once,
    /// Repeat a fixed number of times (total plays = times + 1).
    Times(u32),
    /// Loop until stopped.
    Infinite,
}

/// Playback state of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    /// All loops exhausted.
    Finished,
}

struct TimelineEvent {
    label: &'static str,
    offset: Duration,
    animation: Box<dyn Animation>,
}

/// Labelled animations sharing one looping clock.
pub struct Timeline {
    events: Vec<TimelineEvent>,
    duration: Duration,
    loop_count: LoopCount,
    loops_remaining: u32,
    elapsed: Duration,
    overshoot: Duration,
    cycles: u64,
    state: PlaybackState,
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field(
                "events",
                &self.events.iter().map(|e| (e.label, e.offset)).collect::<Vec<_>>(),
            )
            .field("duration", &self.duration)
            .field("loop_count", &self.loop_count)
            .field("elapsed", &self.elapsed)
            .field("state", &self.state)
            .finish()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            duration: Duration::from_nanos(1),
            loop_count: LoopCount::Once,
            loops_remaining: 0,
            elapsed: Duration::ZERO,
            overshoot: Duration::ZERO,
            cycles: 0,
            state: PlaybackState::Idle,
        }
    }

    /// Add a labelled event starting `offset` after the timeline start.
    #[must_use]
    pub fn add(
        mut self,
        label: &'static str,
        offset: Duration,
        animation: impl Animation + 'static,
    ) -> Self {
        self.events.push(TimelineEvent {
            label,
            offset,
            animation: Box::new(animation),
        });
        self
    }

    /// Length of one cycle. Zero is clamped to 1ns.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration.max(Duration::from_nanos(1));
        self
    }

    #[must_use]
    pub fn loop_count(mut self, count: LoopCount) -> Self {
        self.loop_count = count;
        self.loops_remaining = Self::initial_loops(count);
        self
    }

    fn initial_loops(count: LoopCount) -> u32 {
        match count {
            LoopCount::Once => 0,
            LoopCount::Times(n) => n,
            LoopCount::Infinite => u32::MAX,
        }
    }

    /// Start (or restart) from the beginning of the first cycle.
    pub fn play(&mut self) {
        self.reset();
        self.state = PlaybackState::Playing;
    }

    /// Stop and rewind; events read their initial values.
    pub fn stop(&mut self) {
        self.reset();
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Time into the current cycle.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Completed cycles since the last `play`.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Progress through the current cycle in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }

    /// Current value of the first event with `label`.
    pub fn event_value(&self, label: &str) -> Option<f32> {
        self.events
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.animation.value())
    }

    /// Advance events by `step`, which never crosses the cycle end.
    fn advance_events(&mut self, step: Duration) {
        let start = self.elapsed;
        let end = start.saturating_add(step);
        for event in &mut self.events {
            if end <= event.offset || event.animation.is_complete() {
                continue;
            }
            let share = if start >= event.offset {
                step
            } else {
                end.saturating_sub(event.offset)
            };
            event.animation.tick(share);
        }
        self.elapsed = end;
    }

    fn restart_cycle(&mut self) {
        self.elapsed = Duration::ZERO;
        self.cycles += 1;
        for event in &mut self.events {
            event.animation.reset();
        }
    }
}

impl Animation for Timeline {
    fn tick(&mut self, dt: Duration) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let mut remaining = dt;
        if self.loop_count == LoopCount::Infinite {
            let period = self.duration.as_nanos();
            let into_cycle = self.elapsed.as_nanos() + remaining.as_nanos();
            if into_cycle >= period * 2 {
                // Skip whole cycles; keep the phase.
                let skipped = into_cycle / period - 1;
                self.cycles += skipped as u64;
                let keep = into_cycle - skipped * period - self.elapsed.as_nanos();
                remaining = Duration::from_nanos(keep as u64);
            }
        }

        loop {
            let until_end = self.duration.saturating_sub(self.elapsed);
            let step = remaining.min(until_end);
            self.advance_events(step);
            remaining -= step;
            if self.elapsed < self.duration {
                break;
            }
            if self.loops_remaining == 0 {
                self.state = PlaybackState::Finished;
                self.overshoot = remaining;
                break;
            }
            if self.loop_count != LoopCount::Infinite {
                self.loops_remaining -= 1;
            }
            self.restart_cycle();
            if remaining.is_zero() {
                break;
            }
        }
    }

    fn is_complete(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    fn value(&self) -> f32 {
        self.progress()
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.overshoot = Duration::ZERO;
        self.cycles = 0;
        self.loops_remaining = Self::initial_loops(self.loop_count);
        self.state = PlaybackState::Idle;
        for event in &mut self.events {
            event.animation.reset();
        }
    }

    fn overshoot(&self) -> Duration {
        self.overshoot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Fade;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);
    const MS_400: Duration = Duration::from_millis(400);

    fn two_events() -> Timeline {
        Timeline::new()
            .add("a", Duration::ZERO, Fade::new(MS_200))
            .add("b", MS_200, Fade::new(MS_200))
            .duration(MS_400)
    }

    #[test]
    fn idle_timeline_does_not_advance() {
        let mut tl = two_events();
        tl.tick(MS_100);
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.event_value("a"), Some(0.0));
    }

    #[test]
    fn events_start_at_their_offset() {
        let mut tl = two_events();
        tl.play();
        tl.tick(Duration::from_millis(300));
        assert_eq!(tl.event_value("a"), Some(1.0));
        assert!((tl.event_value("b").unwrap_or_default() - 0.5).abs() < 1e-6);
        assert_eq!(tl.event_value("missing"), None);
    }

    #[test]
    fn once_finishes_with_overshoot() {
        let mut tl = two_events();
        tl.play();
        tl.tick(Duration::from_millis(450));
        assert!(tl.is_complete());
        assert_eq!(tl.overshoot(), Duration::from_millis(50));
        assert_eq!(tl.progress(), 1.0);
    }

    #[test]
    fn times_loops_then_finishes() {
        let mut tl = two_events().loop_count(LoopCount::Times(1));
        tl.play();
        tl.tick(MS_400);
        assert_eq!(tl.state(), PlaybackState::Playing);
        assert_eq!(tl.cycles(), 1);
        tl.tick(MS_400);
        assert!(tl.is_complete());
    }

    #[test]
    fn infinite_loop_restarts_events_and_keeps_phase() {
        let mut tl = two_events().loop_count(LoopCount::Infinite);
        tl.play();
        tl.tick(Duration::from_millis(500));
        assert_eq!(tl.state(), PlaybackState::Playing);
        assert_eq!(tl.elapsed(), MS_100);
        assert!((tl.event_value("a").unwrap_or_default() - 0.5).abs() < 1e-6);
        assert_eq!(tl.event_value("b"), Some(0.0));
    }

    #[test]
    fn infinite_loop_skips_whole_cycles_on_long_frames() {
        let mut tl = two_events().loop_count(LoopCount::Infinite);
        tl.play();
        tl.tick(Duration::from_millis(4_100));
        assert_eq!(tl.elapsed(), MS_100);
        assert_eq!(tl.cycles(), 10);
    }

    #[test]
    fn play_restarts_from_initial_phase() {
        let mut tl = two_events().loop_count(LoopCount::Infinite);
        tl.play();
        tl.tick(Duration::from_millis(300));
        tl.play();
        assert_eq!(tl.elapsed(), Duration::ZERO);
        assert_eq!(tl.event_value("a"), Some(0.0));
        assert_eq!(tl.event_value("b"), Some(0.0));
    }
}
