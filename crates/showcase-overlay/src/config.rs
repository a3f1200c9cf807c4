#![forbid(unsafe_code)]

//! Showcase configuration.
//!
//! Plain data with builder setters. Runtime state (whether the showcase is
//! running, the finish callback) lives on [`crate::Showcase`] itself.

use std::time::Duration;

use showcase_render::color::Color;

use crate::model::{Message, TargetShape};

/// Extra wait after a step's exit animation before the index resets.
pub const SETTLE_PADDING: Duration = Duration::from_millis(250);

/// One cycle of the pulse ring.
pub const PULSE_PERIOD: Duration = Duration::from_millis(1200);

/// Alpha the pulse ring starts each cycle at.
pub const PULSE_START_ALPHA: f32 = 0.6;

/// Fade applied to the whole overlay as it appears or disappears.
pub const VISIBILITY_FADE: Duration = Duration::from_millis(300);

/// Mask opacity for the band mask.
pub const BAND_MASK_ALPHA: f32 = 0.8;

/// Mask opacity for the donut mask.
pub const DONUT_MASK_ALPHA: f32 = 0.9;

/// How the highlight moves from one target to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPolicy {
    /// Position, size, and mask morph continuously to the new target.
    #[default]
    Direct,
    /// Mask and highlight collapse at the old target, then grow at the new one.
    ShrinkExpand,
}

/// Coerce the starting index: a sequence without a greeting cannot start
/// on the empty index 0.
pub fn validate_initial_index(index: usize, has_greeting: bool) -> usize {
    if has_greeting { index } else { index.max(1) }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShowcaseConfig {
    pub initial_index: usize,
    /// White mask instead of black.
    pub dark_layout: bool,
    pub step_duration: Duration,
    /// Message shown at index 0 before the first target.
    pub greeting: Option<Message>,
    pub arrow_line_thickness: f32,
    pub target_shape: TargetShape,
    pub transition: TransitionPolicy,
    /// Ignore taps while a previous tap's transition is still running.
    pub guard_taps_during_transition: bool,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            dark_layout: false,
            step_duration: Duration::from_millis(1000),
            greeting: None,
            arrow_line_thickness: 5.0,
            target_shape: TargetShape::Rectangle,
            transition: TransitionPolicy::Direct,
            guard_taps_during_transition: false,
        }
    }
}

impl ShowcaseConfig {
    #[must_use]
    pub fn initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    #[must_use]
    pub fn dark_layout(mut self, dark: bool) -> Self {
        self.dark_layout = dark;
        self
    }

    #[must_use]
    pub fn step_duration(mut self, duration: Duration) -> Self {
        self.step_duration = duration;
        self
    }

    #[must_use]
    pub fn greeting(mut self, message: Message) -> Self {
        self.greeting = Some(message);
        self
    }

    #[must_use]
    pub fn arrow_line_thickness(mut self, thickness: f32) -> Self {
        self.arrow_line_thickness = thickness.max(0.0);
        self
    }

    #[must_use]
    pub fn target_shape(mut self, shape: TargetShape) -> Self {
        self.target_shape = shape;
        self
    }

    #[must_use]
    pub fn transition(mut self, policy: TransitionPolicy) -> Self {
        self.transition = policy;
        self
    }

    /// `true` selects [`TransitionPolicy::Direct`], `false`
    /// [`TransitionPolicy::ShrinkExpand`].
    #[must_use]
    pub fn animate_directly_to_next_target(self, direct: bool) -> Self {
        self.transition(if direct {
            TransitionPolicy::Direct
        } else {
            TransitionPolicy::ShrinkExpand
        })
    }

    #[must_use]
    pub fn guard_taps_during_transition(mut self, guard: bool) -> Self {
        self.guard_taps_during_transition = guard;
        self
    }

    /// The index the sequence starts at and returns to.
    pub fn validated_initial_index(&self) -> usize {
        validate_initial_index(self.initial_index, self.greeting.is_some())
    }

    /// Delay between a final exit animation and the index reset.
    pub fn settle_delay(&self) -> Duration {
        self.step_duration + SETTLE_PADDING
    }

    /// Mask fill color, alpha included.
    pub fn mask_color(&self) -> Color {
        let base = if self.dark_layout {
            Color::WHITE
        } else {
            Color::BLACK
        };
        base.with_alpha(if self.target_shape.is_donut() {
            DONUT_MASK_ALPHA
        } else {
            BAND_MASK_ALPHA
        })
    }
}
