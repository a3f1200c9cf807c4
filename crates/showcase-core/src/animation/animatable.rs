#![forbid(unsafe_code)]

//! Animated value channels.
//!
//! An [`Animatable`] holds a current value and, optionally, one in-flight
//! tween toward a target. Starting a new tween or snapping replaces the
//! in-flight one and bumps the channel's generation. A caller that started a
//! tween keeps the generation it was handed; if the channel's generation has
//! moved on by the time it checks back, its animation was superseded.

use std::time::Duration;

use super::{Animation, EasingFn, Fade, fast_out_slow_in};
use crate::geometry::{Point, Rect, Size};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    /// Interpolate from `self` toward `to`; `t` is eased progress and may
    /// leave [0, 1] for overshooting curves.
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Point {
    fn lerp(self, to: Self, t: f32) -> Self {
        Point::new(self.x.lerp(to.x, t), self.y.lerp(to.y, t))
    }
}

impl Lerp for Size {
    fn lerp(self, to: Self, t: f32) -> Self {
        Size::new(self.width.lerp(to.width, t), self.height.lerp(to.height, t))
    }
}

impl Lerp for Rect {
    fn lerp(self, to: Self, t: f32) -> Self {
        Rect::from_origin_size(self.origin().lerp(to.origin(), t), self.size().lerp(to.size(), t))
    }
}

/// Duration plus easing for one tween.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub duration: Duration,
    pub easing: EasingFn,
}

impl Tween {
    /// A tween with the default [`fast_out_slow_in`] curve.
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            easing: fast_out_slow_in,
        }
    }

    /// Shorthand for [`Tween::new`] in milliseconds.
    pub const fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    #[must_use]
    pub const fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::millis(300)
    }
}

/// A value channel that can be snapped or tweened.
#[derive(Debug, Clone)]
pub struct Animatable<T: Lerp> {
    value: T,
    from: T,
    target: T,
    fade: Option<Fade>,
    generation: u64,
}

impl<T: Lerp> Animatable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            from: initial,
            target: initial,
            fade: None,
            generation: 0,
        }
    }

    /// Current interpolated value.
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }

    /// Where the in-flight tween ends, or the current value when idle.
    #[inline]
    pub fn target(&self) -> T {
        self.target
    }

    /// True while a tween is in flight.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.fade.is_some()
    }

    /// Bumped by every [`snap_to`](Self::snap_to) and
    /// [`animate_to`](Self::animate_to).
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Set the value immediately, cancelling any in-flight tween.
    pub fn snap_to(&mut self, value: T) -> u64 {
        self.value = value;
        self.from = value;
        self.target = value;
        self.fade = None;
        self.generation += 1;
        self.generation
    }

    /// Start a tween from the current value toward `target`.
    ///
    /// A zero-duration tween lands immediately. Returns the generation the
    /// caller should await.
    pub fn animate_to(&mut self, target: T, tween: Tween) -> u64 {
        if tween.duration.is_zero() {
            return self.snap_to(target);
        }
        self.from = self.value;
        self.target = target;
        self.fade = Some(Fade::new(tween.duration).easing(tween.easing));
        self.generation += 1;
        self.generation
    }

    /// Advance the in-flight tween, if any.
    pub fn tick(&mut self, dt: Duration) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.tick(dt);
        if fade.is_complete() {
            self.value = self.target;
            self.fade = None;
        } else {
            self.value = self.from.lerp(self.target, fade.value());
        }
    }
}

impl<T: Lerp + Default> Default for Animatable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
