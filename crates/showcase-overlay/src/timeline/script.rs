#![forbid(unsafe_code)]

//! Entry and exit scripts for one step.
//!
//! Both are built as a single root [`Task`] whose leading snaps run the
//! moment it is launched. Timings derive from the step duration `d`:
//!
//! | phase | timing |
//! |-------|--------|
//! | greeting mask fade-in | `d/2` |
//! | first step outer-scale grow | `d` |
//! | direct morph of position and size | `d` |
//! | shrink-expand regrow, mask fade, outer scale | `d/3` each, staggered |
//! | arrow draw and message fade-in | after `d` |
//! | arrow retract on exit | `d/2` |
//! | final mask fade-out | `d/2`, then finish |
//! | index reset after finish | settle delay |
//! | index reset after an override | with the override's end |

use std::time::Duration;

use showcase_core::animation::Tween;
use showcase_core::geometry::Rect;

use super::Channel;
use super::task::{Signal, Task};
use crate::config::TransitionPolicy;
use crate::model::{Arrow, MessageAnimation};

/// Everything the entry script needs to know about the step being shown.
#[derive(Debug, Clone)]
pub struct EntryPlan {
    /// Highlight rectangle the channels should end on.
    pub target: Rect,
    /// Index 0 or a single greeting: no cutout, no arrow, no settle delay.
    pub greeting: bool,
    /// The overlay was hidden before this step.
    pub entering: bool,
    /// Grow the mask in place instead of transitioning from the old target.
    pub first: bool,
    pub transition: TransitionPolicy,
    pub step_duration: Duration,
    pub arrow: Option<Arrow>,
    pub enter: MessageAnimation,
}

/// What happens once a step's exit animation is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Advance,
    Finish,
    SingleItem,
    SingleGreeting,
}

#[derive(Debug, Clone)]
pub struct ExitPlan {
    pub outcome: ExitOutcome,
    pub transition: TransitionPolicy,
    pub step_duration: Duration,
    pub settle_delay: Duration,
    pub has_arrow: bool,
    pub exit: MessageAnimation,
}

fn tween(duration: Duration) -> Tween {
    Tween::new(duration)
}

fn snap_rect(task: Task, rect: Rect) -> Task {
    task.snap(Channel::X, rect.x)
        .snap(Channel::Y, rect.y)
        .snap(Channel::Width, rect.width)
        .snap(Channel::Height, rect.height)
}

/// Script that brings a step on screen.
pub fn entry_script(plan: &EntryPlan) -> Task {
    let d = plan.step_duration;
    let third = d / 3;
    let half = d / 2;
    let target = plan.target;

    let mut task = Task::new("entry")
        .snap(Channel::ArrowFraction, 0.0)
        .snap(Channel::ArrowAlpha, 0.0)
        .snap(Channel::HeadSize, 0.0)
        .snap(Channel::CardAlpha, 0.0)
        .snap(Channel::TextAlpha, 0.0);
    if plan.entering {
        task = task.snap(Channel::OuterScale, 0.0);
    }

    if plan.greeting {
        return task
            .snap(Channel::X, target.x)
            .snap(Channel::Y, target.y)
            .snap(Channel::Width, 0.0)
            .snap(Channel::Height, 0.0)
            .snap(Channel::OuterScale, 1.0)
            .launch(message_enter(plan.enter))
            .animate(Channel::MaskAlpha, 1.0, tween(half));
    }

    task = if plan.first {
        snap_rect(task, target)
            .snap(Channel::MaskAlpha, 1.0)
            .animate_detached(Channel::OuterScale, 1.0, tween(d))
    } else {
        match plan.transition {
            TransitionPolicy::Direct => task
                .snap(Channel::OuterScale, 1.0)
                .snap(Channel::MaskAlpha, 1.0)
                .animate_detached(Channel::X, target.x, tween(d))
                .animate_detached(Channel::Y, target.y, tween(d))
                .animate_detached(Channel::Width, target.width, tween(d))
                .animate_detached(Channel::Height, target.height, tween(d)),
            TransitionPolicy::ShrinkExpand => {
                let expand = Task::new("expand")
                    .delay(third)
                    .animate_detached(Channel::MaskAlpha, 1.0, tween(third))
                    .animate(Channel::OuterScale, 1.0, tween(third));
                task.snap(Channel::X, target.x)
                    .snap(Channel::Y, target.y)
                    .snap(Channel::Width, 0.0)
                    .snap(Channel::Height, 0.0)
                    .animate_detached(Channel::Width, target.width, tween(third))
                    .animate_detached(Channel::Height, target.height, tween(third))
                    .launch(expand)
            }
        }
    };

    let mut settle = Task::new("settle").delay(d);
    if let Some(arrow) = &plan.arrow {
        settle = settle.launch(arrow_enter(arrow));
    }
    task.launch(settle.launch(message_enter(plan.enter)))
}

/// Draw the arrow in, with its head growing alongside.
pub fn arrow_enter(arrow: &Arrow) -> Task {
    let draw = tween(arrow.duration);
    let head = if arrow.animate_head_size {
        Task::new("head").animate(Channel::HeadSize, arrow.head_size, draw)
    } else {
        Task::new("head").snap(Channel::HeadSize, arrow.head_size)
    };
    Task::new("arrow")
        .launch(head)
        .animate_detached(Channel::ArrowAlpha, 1.0, draw)
        .animate(Channel::ArrowFraction, 1.0, draw)
}

pub fn message_enter(animation: MessageAnimation) -> Task {
    fade_message(Task::new("message-enter"), animation, 1.0)
}

/// Append a message fade to `task`, awaiting the text channel.
fn fade_message(task: Task, animation: MessageAnimation, to: f32) -> Task {
    match animation {
        MessageAnimation::FadeInOut(duration) => task
            .animate_detached(Channel::CardAlpha, to, tween(duration))
            .animate(Channel::TextAlpha, to, tween(duration)),
        MessageAnimation::None => task.snap(Channel::CardAlpha, to).snap(Channel::TextAlpha, to),
    }
}

/// Script run on tap: retract the arrow, fade the message, then signal.
pub fn exit_script(plan: &ExitPlan) -> Task {
    let d = plan.step_duration;
    let half = d / 2;
    let third = d / 3;

    let mut task = Task::new("exit");
    if plan.has_arrow {
        task = task
            .animate_detached(Channel::HeadSize, 0.0, tween(half))
            .animate_detached(Channel::ArrowAlpha, 0.0, tween(half))
            .animate(Channel::ArrowFraction, 0.0, tween(half));
    }
    task = fade_message(task, plan.exit, 0.0);

    match (plan.outcome, plan.transition) {
        (ExitOutcome::Advance, TransitionPolicy::Direct) => task.signal(Signal::Advance),
        (ExitOutcome::Advance, TransitionPolicy::ShrinkExpand) => task
            .animate_detached(Channel::OuterScale, 0.0, tween(d))
            .animate_detached(Channel::MaskAlpha, 0.0, tween(d))
            .delay(d)
            .signal(Signal::Advance),
        (ExitOutcome::Finish, _) => task
            .animate_detached(Channel::MaskAlpha, 0.0, tween(half))
            .delay(half)
            .signal(Signal::Finish)
            .delay(plan.settle_delay)
            .signal(Signal::ResetIndex),
        (ExitOutcome::SingleItem, _) => task
            .animate_detached(Channel::OuterScale, 0.0, tween(d))
            .animate_detached(Channel::MaskAlpha, 0.0, tween(d))
            .delay(third)
            .signal(Signal::OverrideFinished)
            .signal(Signal::ResetIndex),
        (ExitOutcome::SingleGreeting, _) => task
            .animate(Channel::MaskAlpha, 0.0, tween(third))
            .signal(Signal::OverrideFinished)
            .signal(Signal::ResetIndex),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Side;
    use crate::timeline::Channels;
    use crate::timeline::task::TaskScope;

    const FRAME: Duration = Duration::from_millis(100);
    const STEP: Duration = Duration::from_millis(1000);

    struct Harness {
        channels: Channels,
        scope: TaskScope,
        elapsed: Duration,
        signals: Vec<(Duration, Signal)>,
    }

    impl Harness {
        fn launch(task: Task) -> Self {
            let mut h = Self {
                channels: Channels::new(),
                scope: TaskScope::new("test"),
                elapsed: Duration::ZERO,
                signals: Vec::new(),
            };
            h.scope.launch(task);
            h.frame(Duration::ZERO);
            h
        }

        fn frame(&mut self, dt: Duration) {
            self.elapsed += dt;
            self.channels.tick(dt);
            let mut signals = Vec::new();
            self.scope.tick(dt, &mut self.channels, &mut signals);
            self.signals.extend(signals.into_iter().map(|s| (self.elapsed, s)));
        }

        fn run_until(&mut self, at: Duration) {
            while self.elapsed < at {
                self.frame(FRAME);
            }
        }

        fn value(&self, channel: Channel) -> f32 {
            self.channels.value(channel)
        }
    }

    fn plan(target: Rect) -> EntryPlan {
        EntryPlan {
            target,
            greeting: false,
            entering: false,
            first: false,
            transition: TransitionPolicy::Direct,
            step_duration: STEP,
            arrow: None,
            enter: MessageAnimation::default(),
        }
    }

    fn exit_plan(outcome: ExitOutcome) -> ExitPlan {
        ExitPlan {
            outcome,
            transition: TransitionPolicy::Direct,
            step_duration: STEP,
            settle_delay: STEP + Duration::from_millis(250),
            has_arrow: true,
            exit: MessageAnimation::default(),
        }
    }

    #[test]
    fn greeting_fades_in_without_waiting() {
        let mut p = plan(Rect::new(20.0, 30.0, 0.0, 0.0));
        p.greeting = true;
        let mut h = Harness::launch(entry_script(&p));
        assert_eq!(h.value(Channel::X), 20.0);
        assert_eq!(h.value(Channel::OuterScale), 1.0);
        h.run_until(Duration::from_millis(500));
        assert_eq!(h.value(Channel::MaskAlpha), 1.0);
        assert_eq!(h.value(Channel::TextAlpha), 1.0);
        assert!(h.scope.is_idle());
    }

    #[test]
    fn first_step_snaps_rect_and_grows_mask() {
        let target = Rect::new(10.0, 20.0, 30.0, 40.0);
        let mut p = plan(target);
        p.first = true;
        p.entering = true;
        let mut h = Harness::launch(entry_script(&p));
        assert_eq!(h.value(Channel::Width), 30.0);
        assert_eq!(h.value(Channel::OuterScale), 0.0);
        h.run_until(STEP);
        assert_eq!(h.value(Channel::OuterScale), 1.0);
        assert_eq!(h.value(Channel::TextAlpha), 0.0);
        h.run_until(STEP + Duration::from_millis(500));
        assert_eq!(h.value(Channel::TextAlpha), 1.0);
    }

    #[test]
    fn direct_morph_moves_from_previous_rect() {
        let seed = Task::new("seed")
            .snap(Channel::X, 0.0)
            .snap(Channel::Width, 10.0);
        let mut h = Harness::launch(seed);
        h.scope.launch(entry_script(&plan(Rect::new(100.0, 0.0, 50.0, 10.0))));
        h.frame(Duration::ZERO);
        h.frame(Duration::from_millis(500));
        let x = h.value(Channel::X);
        assert!(x > 0.0 && x < 100.0, "{x}");
        h.run_until(Duration::from_millis(1000));
        assert_eq!(h.value(Channel::X), 100.0);
        assert_eq!(h.value(Channel::Width), 50.0);
    }

    #[test]
    fn shrink_expand_regrows_then_restores_mask() {
        let target = Rect::new(50.0, 60.0, 90.0, 30.0);
        let mut p = plan(target);
        p.transition = TransitionPolicy::ShrinkExpand;
        let mut h = Harness::launch(entry_script(&p));
        assert_eq!(h.value(Channel::Width), 0.0);
        assert_eq!(h.value(Channel::X), 50.0);
        h.run_until(Duration::from_millis(400));
        assert_eq!(h.value(Channel::Width), 90.0);
        assert!(h.value(Channel::MaskAlpha) < 1.0);
        h.run_until(Duration::from_millis(800));
        assert_eq!(h.value(Channel::MaskAlpha), 1.0);
        assert_eq!(h.value(Channel::OuterScale), 1.0);
    }

    #[test]
    fn arrow_waits_for_step_then_draws_monotonically() {
        let mut p = plan(Rect::new(10.0, 10.0, 10.0, 10.0));
        p.arrow = Some(Arrow::from_side(Side::Top));
        let mut h = Harness::launch(entry_script(&p));
        h.run_until(STEP);
        assert_eq!(h.value(Channel::ArrowFraction), 0.0);
        let mut last = 0.0;
        while h.elapsed < STEP * 2 {
            h.frame(FRAME);
            let fraction = h.value(Channel::ArrowFraction);
            assert!(fraction >= last);
            last = fraction;
        }
        assert_eq!(last, 1.0);
        assert_eq!(h.value(Channel::HeadSize), 25.0);
    }

    #[test]
    fn head_snaps_when_not_animated() {
        let arrow = Arrow::default().animate_head_size(false);
        let h = Harness::launch(arrow_enter(&arrow));
        assert_eq!(h.value(Channel::HeadSize), 25.0);
        assert_eq!(h.value(Channel::ArrowFraction), 0.0);
    }

    #[test]
    fn advance_waits_for_message_fade() {
        let mut h = Harness::launch(exit_script(&exit_plan(ExitOutcome::Advance)));
        h.run_until(Duration::from_millis(900));
        assert!(h.signals.is_empty());
        h.run_until(Duration::from_millis(1000));
        assert_eq!(h.signals, vec![(Duration::from_millis(1000), Signal::Advance)]);
    }

    #[test]
    fn finish_signals_then_resets_after_settle() {
        let mut h = Harness::launch(Task::new("seed").snap(Channel::MaskAlpha, 1.0));
        let mut p = exit_plan(ExitOutcome::Finish);
        p.has_arrow = false;
        p.exit = MessageAnimation::None;
        h.scope.launch(exit_script(&p));
        h.frame(Duration::ZERO);
        h.run_until(Duration::from_millis(2000));
        assert_eq!(
            h.signals,
            vec![
                (Duration::from_millis(500), Signal::Finish),
                (Duration::from_millis(1750), Signal::ResetIndex),
            ]
        );
        assert_eq!(h.value(Channel::MaskAlpha), 0.0);
    }

    #[test]
    fn single_greeting_dismissal() {
        let mut p = exit_plan(ExitOutcome::SingleGreeting);
        p.has_arrow = false;
        p.exit = MessageAnimation::None;
        let mut h = Harness::launch(exit_script(&p));
        h.run_until(Duration::from_millis(1700));
        assert_eq!(
            h.signals,
            vec![
                (Duration::from_millis(400), Signal::OverrideFinished),
                (Duration::from_millis(400), Signal::ResetIndex),
            ]
        );
    }

    #[test]
    fn exit_retracts_arrow_monotonically() {
        let mut h = Harness::launch(
            Task::new("seed")
                .snap(Channel::ArrowFraction, 1.0)
                .snap(Channel::HeadSize, 25.0),
        );
        h.scope.launch(exit_script(&exit_plan(ExitOutcome::Advance)));
        h.frame(Duration::ZERO);
        let mut last = 1.0;
        while h.elapsed < Duration::from_millis(500) {
            h.frame(FRAME);
            let fraction = h.value(Channel::ArrowFraction);
            assert!(fraction <= last);
            last = fraction;
        }
        assert_eq!(last, 0.0);
        assert_eq!(h.value(Channel::HeadSize), 0.0);
    }
}
