#![forbid(unsafe_code)]

//! Frame-driven animation primitives.
//!
//! Nothing here reads a wall clock. Every animation advances by the `Duration`
//! handed to [`Animation::tick`], so a host frame loop and a test harness
//! drive the exact same code.
//!
//! # Building blocks
//!
//! - Easing curves ([`EasingFn`]), including the cubic-Bezier material curves
//!   ([`fast_out_slow_in`], [`fast_out_linear_in`], [`linear_out_slow_in`]).
//! - [`Fade`]: a 0→1 progress animation with an easing curve.
//! - [`Animatable`]: a value channel that can be snapped or tweened toward a
//!   target, with a generation counter so awaiting callers can tell when
//!   their animation was superseded.
//! - [`Timeline`]: labelled animations at offsets, optionally looping.
//!
//! # Invariants
//!
//! 1. `value()` of every easing curve is 0.0 at progress 0 and 1.0 at
//!    progress 1; inputs outside [0, 1] are clamped.
//! 2. A zero duration is clamped to 1ns so progress never divides by zero.

mod animatable;
mod timeline;

use std::time::Duration;

pub use animatable::{Animatable, Lerp, Tween};
pub use timeline::{LoopCount, PlaybackState, Timeline};

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// An easing curve mapping linear progress in [0, 1] to eased progress.
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Standard curve: quick acceleration, long gentle settle. `(0.4, 0, 0.2, 1)`.
pub fn fast_out_slow_in(t: f32) -> f32 {
    cubic_bezier(0.4, 0.0, 0.2, 1.0, t)
}

/// Accelerating exit curve. `(0.4, 0, 1, 1)`.
pub fn fast_out_linear_in(t: f32) -> f32 {
    cubic_bezier(0.4, 0.0, 1.0, 1.0, t)
}

/// Decelerating entry curve. `(0, 0, 0.2, 1)`.
pub fn linear_out_slow_in(t: f32) -> f32 {
    cubic_bezier(0.0, 0.0, 0.2, 1.0, t)
}

/// Evaluate a CSS-style cubic Bezier easing with control points
/// `(x1, y1)` and `(x2, y2)` at linear progress `t`.
///
/// Solves `x(s) = t` for the curve parameter with Newton iterations, falling
/// back to bisection when the slope is too flat, then returns `y(s)`.
/// `x1` and `x2` must lie in [0, 1] for the curve to be a function of x.
pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let x = f64::from(t.clamp(0.0, 1.0));
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let (x1, y1, x2, y2) = (
        f64::from(x1),
        f64::from(y1),
        f64::from(x2),
        f64::from(y2),
    );

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return bezier_component(y1, y2, s) as f32;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
        if !(0.0..=1.0).contains(&s) {
            break;
        }
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    for _ in 0..64 {
        let value = bezier_component(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_component(y1, y2, s) as f32
}

/// One coordinate of a cubic Bezier anchored at 0 and 1.
#[inline]
fn bezier_component(a: f64, b: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * a + 3.0 * u * s * s * b + s * s * s
}

#[inline]
fn bezier_slope(a: f64, b: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * a + 6.0 * u * s * (b - a) + 3.0 * s * s * (1.0 - b)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-driven animation producing a normalised value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// True once the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current value, normally in [0, 1].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time past completion absorbed by the last `tick`.
    ///
    /// Loop drivers carry this into the next iteration so long frames do not
    /// drift the phase.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

// ---------------------------------------------------------------------------
// Fade
// ---------------------------------------------------------------------------

/// A 0→1 progress animation over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Fade {
    /// Create a linear fade. Zero durations are clamped to 1ns.
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: duration.max(Duration::from_nanos(1)),
            easing: linear,
        }
    }

    /// Replace the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress before easing, in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0) as f32
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
