#![forbid(unsafe_code)]

//! The looping pulse ring around donut cutouts.

use std::time::Duration;

use showcase_core::animation::{
    Animation, Fade, LoopCount, PlaybackState, Timeline, fast_out_linear_in, fast_out_slow_in,
};

use crate::config::{PULSE_PERIOD, PULSE_START_ALPHA};

const ALPHA: &str = "alpha";
const RADIUS: &str = "radius";

/// Endless alpha/radius cycle, restarted from its first phase on every step.
#[derive(Debug)]
pub struct PulseLoop {
    timeline: Timeline,
}

impl PulseLoop {
    pub fn new(period: Duration) -> Self {
        let timeline = Timeline::new()
            .add(ALPHA, Duration::ZERO, Fade::new(period).easing(fast_out_slow_in))
            .add(RADIUS, Duration::ZERO, Fade::new(period).easing(fast_out_linear_in))
            .duration(period)
            .loop_count(LoopCount::Infinite);
        Self { timeline }
    }

    /// Start over at full alpha and zero radius.
    pub fn restart(&mut self) {
        self.timeline.play();
    }

    pub fn stop(&mut self) {
        self.timeline.stop();
    }

    pub fn is_playing(&self) -> bool {
        self.timeline.state() == PlaybackState::Playing
    }

    pub fn tick(&mut self, dt: Duration) {
        self.timeline.tick(dt);
    }

    /// Ring alpha: fades from the start alpha to zero over each cycle.
    pub fn alpha(&self) -> f32 {
        if !self.is_playing() {
            return 0.0;
        }
        let progress = self.timeline.event_value(ALPHA).unwrap_or(1.0);
        PULSE_START_ALPHA * (1.0 - progress)
    }

    /// Ring width as a fraction of the target's larger side.
    pub fn radius_fraction(&self) -> f32 {
        if !self.is_playing() {
            return 0.0;
        }
        self.timeline.event_value(RADIUS).unwrap_or(0.0)
    }
}

impl Default for PulseLoop {
    fn default() -> Self {
        Self::new(PULSE_PERIOD)
    }
}
