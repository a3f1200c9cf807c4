#![forbid(unsafe_code)]

//! Animation Timeline Controller.
//!
//! Every animated quantity on the overlay is a scalar [`Channel`]. Scripts
//! ([`script`]) drive channels through frame-suspending [`Task`]s grouped in
//! two scopes:
//!
//! - the **step scope** holds the entry animations of the step on screen. It
//!   is torn down whenever the displayed step changes or a tap dismisses it,
//!   so a half-finished entry never fights an exit or the next entry.
//! - the **overlay scope** holds exit scripts started by taps. They outlive
//!   the step they retract because they are what triggers the next step.
//!
//! The pulse ring runs on its own looping [`PulseLoop`] and is restarted
//! from its first phase on every new step.
//!
//! # Frame order
//!
//! 1. Channels and the pulse advance by `dt`.
//! 2. Step tasks, then overlay tasks, resume against the new values.
//! 3. Signals raised by tasks are queued for the sequencer.
//! 4. Once the overlay has faded out completely, step tasks are dropped and
//!    the pulse stops.

pub mod pulse;
pub mod script;
pub mod task;

use std::time::Duration;

use showcase_core::animation::{Animatable, Tween, linear};
use showcase_core::geometry::Rect;

use crate::config::VISIBILITY_FADE;

pub use pulse::PulseLoop;
pub use script::{
    EntryPlan, ExitOutcome, ExitPlan, arrow_enter, entry_script, exit_script, message_enter,
};
pub use task::{Poll, Signal, Step, Task, TaskScope};

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// One animated scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Width,
    Height,
    MaskAlpha,
    /// Donut outer-circle scale, 0 collapsed to 1 covering the canvas.
    OuterScale,
    ArrowFraction,
    ArrowAlpha,
    HeadSize,
    /// Message card background alpha.
    CardAlpha,
    TextAlpha,
    /// Whole-overlay fade.
    Visibility,
}

impl Channel {
    pub const COUNT: usize = 12;

    pub const ALL: [Channel; Self::COUNT] = [
        Self::X,
        Self::Y,
        Self::Width,
        Self::Height,
        Self::MaskAlpha,
        Self::OuterScale,
        Self::ArrowFraction,
        Self::ArrowAlpha,
        Self::HeadSize,
        Self::CardAlpha,
        Self::TextAlpha,
        Self::Visibility,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::MaskAlpha => "mask-alpha",
            Self::OuterScale => "outer-scale",
            Self::ArrowFraction => "arrow-fraction",
            Self::ArrowAlpha => "arrow-alpha",
            Self::HeadSize => "head-size",
            Self::CardAlpha => "card-alpha",
            Self::TextAlpha => "text-alpha",
            Self::Visibility => "visibility",
        }
    }

    #[inline]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Storage for every channel, all starting at zero.
#[derive(Debug, Clone)]
pub struct Channels {
    slots: [Animatable<f32>; Channel::COUNT],
}

impl Channels {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Animatable::new(0.0)),
        }
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> &Animatable<f32> {
        &self.slots[channel.slot()]
    }

    #[inline]
    pub fn value(&self, channel: Channel) -> f32 {
        self.get(channel).value()
    }

    pub fn snap(&mut self, channel: Channel, value: f32) -> u64 {
        self.slots[channel.slot()].snap_to(value)
    }

    pub fn animate(&mut self, channel: Channel, target: f32, tween: Tween) -> u64 {
        self.slots[channel.slot()].animate_to(target, tween)
    }

    pub fn tick(&mut self, dt: Duration) {
        for slot in &mut self.slots {
            slot.tick(dt);
        }
    }

    /// True while any channel has a tween in flight.
    pub fn is_running(&self) -> bool {
        self.slots.iter().any(Animatable::is_running)
    }

    /// The animated highlight rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.value(Channel::X),
            self.value(Channel::Y),
            self.value(Channel::Width).max(0.0),
            self.value(Channel::Height).max(0.0),
        )
    }
}

impl Default for Channels {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of every value the frame composer reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelValues {
    pub rect: Rect,
    pub mask_alpha: f32,
    pub outer_scale: f32,
    pub arrow_fraction: f32,
    pub arrow_alpha: f32,
    pub head_size: f32,
    pub card_alpha: f32,
    pub text_alpha: f32,
    pub visibility: f32,
    pub pulse_alpha: f32,
    /// Pulse ring width relative to the target's larger side.
    pub pulse_radius_fraction: f32,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Channels, task scopes, and the pulse loop for one overlay.
#[derive(Debug)]
pub struct StepTimeline {
    channels: Channels,
    step_scope: TaskScope,
    overlay_scope: TaskScope,
    pulse: PulseLoop,
    signals: Vec<Signal>,
}

impl Default for StepTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl StepTimeline {
    pub fn new() -> Self {
        Self {
            channels: Channels::new(),
            step_scope: TaskScope::new("step"),
            overlay_scope: TaskScope::new("overlay"),
            pulse: PulseLoop::default(),
            signals: Vec::new(),
        }
    }

    /// Tear down the previous step's tasks and start `plan`'s entry.
    ///
    /// The entry's snaps apply before this returns.
    pub fn enter_step(&mut self, plan: &EntryPlan, pulse: bool) {
        self.step_scope.cancel();
        self.step_scope.launch(entry_script(plan));
        self.step_scope
            .tick(Duration::ZERO, &mut self.channels, &mut self.signals);
        if pulse {
            self.pulse.restart();
        } else {
            self.pulse.stop();
        }
    }

    /// Start the exit script for the step on screen.
    ///
    /// Entry tasks still pending are dropped; tweens already in flight keep
    /// running.
    pub fn exit_step(&mut self, plan: &ExitPlan) {
        self.step_scope.cancel();
        self.overlay_scope.launch(exit_script(plan));
        self.overlay_scope
            .tick(Duration::ZERO, &mut self.channels, &mut self.signals);
    }

    /// Drop a running exit script before it raises any further signal.
    /// Returns `true` if one was running.
    pub fn abandon_exit(&mut self) -> bool {
        self.overlay_scope.cancel() > 0
    }

    /// Move a resting highlight onto `rect` after the target re-measured.
    ///
    /// Returns `false`, leaving the channels alone, while the highlight is
    /// still morphing.
    pub fn follow_target(&mut self, rect: Rect) -> bool {
        const GEOMETRY: [Channel; 4] = [Channel::X, Channel::Y, Channel::Width, Channel::Height];
        if GEOMETRY.iter().any(|c| self.channels.get(*c).is_running()) {
            return false;
        }
        self.channels.snap(Channel::X, rect.x);
        self.channels.snap(Channel::Y, rect.y);
        self.channels.snap(Channel::Width, rect.width);
        self.channels.snap(Channel::Height, rect.height);
        true
    }

    /// Fade the whole overlay in or out. Returns `false` if already heading
    /// that way.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let target = if visible { 1.0 } else { 0.0 };
        if self.channels.get(Channel::Visibility).target() == target {
            return false;
        }
        self.channels.animate(
            Channel::Visibility,
            target,
            Tween::new(VISIBILITY_FADE).easing(linear),
        );
        true
    }

    /// True when the overlay is visible or fading in.
    pub fn is_shown(&self) -> bool {
        self.channels.get(Channel::Visibility).target() > 0.0
    }

    /// True once a fade-out has fully completed.
    pub fn is_hidden(&self) -> bool {
        let visibility = self.channels.get(Channel::Visibility);
        visibility.target() <= 0.0 && !visibility.is_running()
    }

    pub fn tick(&mut self, dt: Duration) {
        self.channels.tick(dt);
        self.pulse.tick(dt);
        self.step_scope.tick(dt, &mut self.channels, &mut self.signals);
        self.overlay_scope
            .tick(dt, &mut self.channels, &mut self.signals);

        if self.is_hidden() && (!self.step_scope.is_idle() || self.pulse.is_playing()) {
            self.step_scope.cancel();
            self.pulse.stop();
        }
    }

    /// Signals raised since the last drain, in the order tasks raised them.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    /// True while a tap's exit script is still running.
    pub fn is_transitioning(&self) -> bool {
        !self.overlay_scope.is_idle()
    }

    /// No tasks pending and no tween in flight. The pulse is ignored.
    pub fn is_settled(&self) -> bool {
        self.step_scope.is_idle() && self.overlay_scope.is_idle() && !self.channels.is_running()
    }

    pub fn pulse(&self) -> &PulseLoop {
        &self.pulse
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    pub fn values(&self) -> ChannelValues {
        let c = &self.channels;
        ChannelValues {
            rect: c.rect(),
            mask_alpha: c.value(Channel::MaskAlpha),
            outer_scale: c.value(Channel::OuterScale),
            arrow_fraction: c.value(Channel::ArrowFraction).clamp(0.0, 1.0),
            arrow_alpha: c.value(Channel::ArrowAlpha),
            head_size: c.value(Channel::HeadSize).max(0.0),
            card_alpha: c.value(Channel::CardAlpha),
            text_alpha: c.value(Channel::TextAlpha),
            visibility: c.value(Channel::Visibility),
            pulse_alpha: self.pulse.alpha(),
            pulse_radius_fraction: self.pulse.radius_fraction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransitionPolicy;
    use crate::model::MessageAnimation;

    fn greeting_plan() -> EntryPlan {
        EntryPlan {
            target: Rect::default(),
            greeting: true,
            entering: true,
            first: true,
            transition: TransitionPolicy::Direct,
            step_duration: Duration::from_millis(600),
            arrow: None,
            enter: MessageAnimation::None,
        }
    }

    #[test]
    fn channel_slots_match_all() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(channel.slot(), i);
        }
    }

    #[test]
    fn enter_step_applies_snaps_immediately() {
        let mut timeline = StepTimeline::new();
        timeline.enter_step(&greeting_plan(), false);
        let values = timeline.values();
        assert_eq!(values.outer_scale, 1.0);
        assert_eq!(values.text_alpha, 1.0);
        assert!(!timeline.pulse().is_playing());
    }

    #[test]
    fn visibility_fades_and_reports_state() {
        let mut timeline = StepTimeline::new();
        assert!(timeline.is_hidden());
        assert!(timeline.set_visible(true));
        assert!(!timeline.set_visible(true));
        assert!(timeline.is_shown());
        timeline.tick(VISIBILITY_FADE);
        assert_eq!(timeline.values().visibility, 1.0);
        timeline.set_visible(false);
        assert!(!timeline.is_hidden());
        timeline.tick(VISIBILITY_FADE);
        assert!(timeline.is_hidden());
    }

    #[test]
    fn hidden_overlay_drops_step_tasks_and_pulse() {
        let mut timeline = StepTimeline::new();
        timeline.set_visible(true);
        let mut plan = greeting_plan();
        plan.enter = MessageAnimation::default();
        timeline.enter_step(&plan, true);
        assert!(timeline.pulse().is_playing());
        timeline.set_visible(false);
        timeline.tick(VISIBILITY_FADE);
        assert!(!timeline.pulse().is_playing());
        assert_eq!(timeline.values().pulse_alpha, 0.0);
        assert!(!timeline.is_settled());
        timeline.tick(VISIBILITY_FADE);
        assert!(timeline.is_settled());
    }

    #[test]
    fn exit_signals_surface_through_drain() {
        let mut timeline = StepTimeline::new();
        timeline.exit_step(&ExitPlan {
            outcome: ExitOutcome::Advance,
            transition: TransitionPolicy::Direct,
            step_duration: Duration::from_millis(600),
            settle_delay: Duration::from_millis(850),
            has_arrow: false,
            exit: MessageAnimation::None,
        });
        assert_eq!(timeline.drain_signals(), vec![Signal::Advance]);
        assert!(timeline.drain_signals().is_empty());
        assert!(!timeline.is_transitioning());
    }

    #[test]
    fn abandoned_exit_raises_nothing_further() {
        let mut timeline = StepTimeline::new();
        timeline.exit_step(&ExitPlan {
            outcome: ExitOutcome::Finish,
            transition: TransitionPolicy::Direct,
            step_duration: Duration::from_millis(600),
            settle_delay: Duration::from_millis(850),
            has_arrow: false,
            exit: MessageAnimation::None,
        });
        for _ in 0..25 {
            timeline.tick(Duration::from_millis(16));
        }
        assert_eq!(timeline.drain_signals(), vec![Signal::Finish]);
        assert!(timeline.is_transitioning());

        assert!(timeline.abandon_exit());
        assert!(!timeline.is_transitioning());
        for _ in 0..100 {
            timeline.tick(Duration::from_millis(16));
        }
        assert!(timeline.drain_signals().is_empty());
        assert!(!timeline.abandon_exit());
    }
}
