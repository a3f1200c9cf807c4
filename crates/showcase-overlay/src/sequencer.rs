#![forbid(unsafe_code)]

//! The showcase sequencer.
//!
//! [`Showcase`] owns the registry, tracks which target is highlighted, turns
//! taps into exit scripts, and reacts to the signals those scripts raise.
//! Hosts drive it with three calls: [`Showcase::on_measured`] for every
//! target on every layout pass, [`Showcase::tap`] on pointer-down anywhere on
//! the overlay, and [`Showcase::tick`] once per frame.
//!
//! # States
//!
//! ```text
//!   Idle ──start──▶ Active(init) ──tap──▶ Active(i+1) … ──tap on last──▶ Idle
//!     │                                    (onFinish; index reset after
//!     │                                     the settle delay)
//!     └──show_item(k) / show_greeting(m)──▶ Single ──tap──▶ previous state,
//!                                                          index = init
//! ```
//!
//! # Invariants
//!
//! 1. `current_index` only changes through `start`, an `Advance` signal, or
//!    a `ResetIndex` signal. Single-item and single-greeting displays never
//!    touch it, so dismissing them returns to the initial index rather than
//!    to wherever the main sequence was.
//! 2. `onFinish` runs once per completed sequence, from the `Finish` signal.
//! 3. Nothing is re-keyed while the overlay is invisible.
//! 4. `start`, `show_item`, and `show_greeting` abandon any exit script still
//!    running, so signals from an earlier run or display never reach a new
//!    one.
//!
//! # Failure Modes
//!
//! - Taps during a running exit script start a second exit script unless
//!   `guard_taps_during_transition` is set. A tap during the message fade
//!   restarts the fade and supersedes the first script. A tap during the
//!   shrink-expand collapse raises a second `Advance`, skipping a step.
//! - Unregistered indices show a zero-sized highlight at the origin.

use std::fmt;
use std::time::Duration;

use showcase_core::geometry::{Point, Size};
use showcase_render::surface::Surface;
use showcase_render::text::TextMeasurer;

use crate::config::{ShowcaseConfig, TransitionPolicy};
use crate::error::Result;
use crate::event::{Level, ShowcaseEvent, ShowcaseEventListener, StepChangeReason};
use crate::model::{Message, MessageAnimation};
use crate::overlay::{FrameInput, OverlayFrame, compose};
use crate::registry::TargetRegistry;
use crate::timeline::{ChannelValues, EntryPlan, ExitOutcome, ExitPlan, Signal, StepTimeline};

/// Upper bound on signal-handling rounds per call.
const MAX_SIGNAL_ROUNDS: usize = 32;

/// What the overlay is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Displayed {
    /// A step of the main sequence; 0 is the greeting.
    Step(usize),
    /// A one-off replay of one target.
    Item(usize),
    /// A one-off greeting not tied to any target.
    Greeting(Message),
}

impl Displayed {
    /// Registry index the display reads its rectangle from.
    pub fn index(&self) -> usize {
        match self {
            Self::Step(index) | Self::Item(index) => *index,
            Self::Greeting(_) => 0,
        }
    }

    pub fn is_greeting(&self) -> bool {
        self.index() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Single {
    Item(usize),
    Greeting(Message),
}

/// Externally visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseState {
    Idle,
    Active { index: usize },
    SingleItem { index: usize },
    SingleGreeting,
}

pub struct Showcase {
    config: ShowcaseConfig,
    initial_index: usize,
    registry: TargetRegistry,
    current_index: usize,
    active: bool,
    single: Option<Single>,
    shown: Option<Displayed>,
    timeline: StepTimeline,
    on_finish: Option<Box<dyn FnMut()>>,
    listener: Option<Box<dyn ShowcaseEventListener>>,
    events: Vec<ShowcaseEvent>,
}

impl fmt::Debug for Showcase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Showcase")
            .field("config", &self.config)
            .field("initial_index", &self.initial_index)
            .field("current_index", &self.current_index)
            .field("active", &self.active)
            .field("single", &self.single)
            .field("shown", &self.shown)
            .field("targets", &self.registry.count())
            .finish_non_exhaustive()
    }
}

impl Default for Showcase {
    fn default() -> Self {
        Self::new(ShowcaseConfig::default())
    }
}

impl Showcase {
    pub fn new(config: ShowcaseConfig) -> Self {
        let initial_index = config.validated_initial_index();
        Self {
            registry: TargetRegistry::new(config.greeting.clone()),
            initial_index,
            current_index: initial_index,
            active: false,
            single: None,
            shown: None,
            timeline: StepTimeline::new(),
            on_finish: None,
            listener: None,
            events: Vec::new(),
            config,
        }
    }

    /// Called once each time the sequence completes.
    #[must_use]
    pub fn on_finish(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_finish = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn event_listener(mut self, listener: impl ShowcaseEventListener + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The index the sequence starts at and returns to.
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True while the main sequence runs or a single display is up.
    pub fn is_visible(&self) -> bool {
        self.active || self.single.is_some()
    }

    /// No script running and no channel moving.
    pub fn is_settled(&self) -> bool {
        self.timeline.is_settled()
    }

    pub fn state(&self) -> ShowcaseState {
        match &self.single {
            Some(Single::Item(index)) => ShowcaseState::SingleItem { index: *index },
            Some(Single::Greeting(_)) => ShowcaseState::SingleGreeting,
            None if self.active => ShowcaseState::Active {
                index: self.current_index,
            },
            None => ShowcaseState::Idle,
        }
    }

    /// What was last brought on screen, if anything.
    pub fn displayed(&self) -> Option<&Displayed> {
        self.shown.as_ref()
    }

    pub fn values(&self) -> ChannelValues {
        self.timeline.values()
    }

    pub fn timeline(&self) -> &StepTimeline {
        &self.timeline
    }

    /// Lifecycle events since the last drain.
    pub fn drain_events(&mut self) -> Vec<ShowcaseEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Forget every target before the host re-reports them.
    pub fn begin_layout(&mut self) {
        self.registry.reset(self.config.greeting.clone());
    }

    /// Record a measured target. Index 0 is reserved and rejected.
    pub fn on_measured(
        &mut self,
        index: usize,
        size: Size,
        position: Point,
        message: Option<Message>,
    ) -> Result<()> {
        if let Err(err) = self.registry.register(index, size, position, message) {
            self.emit(Level::Warning, &format!("rejected registration: {err}"));
            return Err(err);
        }
        self.emit(
            Level::Verbose,
            &format!(
                "measured target {index}: size {}x{} at ({}, {})",
                size.width, size.height, position.x, position.y
            ),
        );

        let follows = match &self.shown {
            Some(shown) if self.is_visible() => {
                shown.index() == index || (shown.is_greeting() && index == 1)
            }
            _ => false,
        };
        if follows {
            if let Some(shown) = &self.shown {
                let rect = self.registry.rect_for(shown.index());
                self.timeline.follow_target(rect);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Control
    // -----------------------------------------------------------------------

    /// Start or stop the main sequence.
    pub fn set_active(&mut self, active: bool) {
        if active == self.active {
            return;
        }
        if active {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Run the main sequence from the initial index.
    pub fn start(&mut self) {
        self.abandon_exit();
        self.active = true;
        self.current_index = self.initial_index;
        self.events.push(ShowcaseEvent::Started {
            index: self.initial_index,
        });
        self.emit(
            Level::Info,
            &format!("showcase started at index {}", self.initial_index),
        );
        if self.single.is_none() {
            self.show_current(true);
        }
        self.timeline.set_visible(true);
    }

    /// Hide the main sequence. A single display in progress stays up.
    pub fn stop(&mut self) {
        self.active = false;
        self.emit(Level::Info, "showcase stopped");
        self.timeline.set_visible(self.is_visible());
    }

    /// Highlight target `index` on its own. Dismissing it returns to the
    /// initial index.
    pub fn show_item(&mut self, index: usize) {
        self.events.push(ShowcaseEvent::StepChanged {
            from: self.current_index,
            to: index,
            reason: StepChangeReason::SingleItem,
        });
        self.emit(Level::Debug, &format!("single item {index}"));
        self.abandon_exit();
        self.single = Some(Single::Item(index));
        self.show_current(true);
        self.timeline.set_visible(true);
    }

    /// Show `message` as a one-off greeting.
    pub fn show_greeting(&mut self, message: Message) {
        self.events.push(ShowcaseEvent::StepChanged {
            from: self.current_index,
            to: 0,
            reason: StepChangeReason::SingleGreeting,
        });
        self.emit(Level::Debug, "single greeting");
        self.abandon_exit();
        self.single = Some(Single::Greeting(message));
        self.show_current(true);
        self.timeline.set_visible(true);
    }

    /// Handle a tap anywhere on the overlay. Returns `false` if ignored.
    pub fn tap(&mut self) -> bool {
        if !self.is_visible() || self.shown.is_none() {
            self.emit(Level::Verbose, "tap ignored: overlay hidden");
            return false;
        }
        if self.config.guard_taps_during_transition && self.timeline.is_transitioning() {
            self.emit(Level::Verbose, "tap ignored: transition running");
            return false;
        }

        let outcome = match &self.single {
            Some(Single::Item(_)) => ExitOutcome::SingleItem,
            Some(Single::Greeting(_)) => ExitOutcome::SingleGreeting,
            None if self.registry.is_last(self.current_index) => ExitOutcome::Finish,
            None => ExitOutcome::Advance,
        };
        let greeting = self.shown.as_ref().is_some_and(Displayed::is_greeting);
        let message = self.shown.as_ref().and_then(|shown| self.message_for(shown));
        let plan = ExitPlan {
            outcome,
            transition: self.config.transition,
            step_duration: self.config.step_duration,
            settle_delay: self.config.settle_delay(),
            has_arrow: !greeting && message.is_some_and(|m| m.arrow.is_some()),
            exit: message.map_or(MessageAnimation::None, |m| m.exit),
        };

        self.emit(
            Level::Debug,
            &format!("tap at index {}: {outcome:?}", self.current_index),
        );
        self.timeline.exit_step(&plan);
        self.process_signals();
        true
    }

    /// Advance every animation by `dt` and act on what finished.
    pub fn tick(&mut self, dt: Duration) {
        self.timeline.tick(dt);
        self.process_signals();
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// The frame to draw now, or `None` when nothing is on screen.
    pub fn frame(&self, canvas: Size, measurer: &dyn TextMeasurer) -> Option<OverlayFrame> {
        let shown = self.shown.as_ref()?;
        if self.timeline.is_hidden() {
            return None;
        }
        let input = FrameInput {
            canvas,
            values: self.timeline.values(),
            target: self.registry.rect_for(shown.index()),
            message: self.message_for(shown),
            greeting: shown.is_greeting(),
            shape: self.config.target_shape,
            mask_color: self.config.mask_color(),
            arrow_line_thickness: self.config.arrow_line_thickness,
        };
        Some(compose(&input, measurer))
    }

    /// Compose and paint the current frame onto `surface`.
    pub fn render(&self, surface: &mut dyn Surface, measurer: &dyn TextMeasurer) {
        if let Some(frame) = self.frame(surface.size(), measurer) {
            frame.paint(surface);
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn message_for<'a>(&'a self, shown: &'a Displayed) -> Option<&'a Message> {
        match shown {
            Displayed::Step(index) | Displayed::Item(index) => self.registry.message_for(*index),
            Displayed::Greeting(message) => Some(message),
        }
    }

    fn displayed_key(&self) -> Displayed {
        match &self.single {
            Some(Single::Item(index)) => Displayed::Item(*index),
            Some(Single::Greeting(message)) => Displayed::Greeting(message.clone()),
            None => Displayed::Step(self.current_index),
        }
    }

    /// Bring the current display on screen, unless it already is.
    fn show_current(&mut self, force: bool) {
        if !self.is_visible() {
            return;
        }
        let key = self.displayed_key();
        if !force && self.shown.as_ref() == Some(&key) {
            return;
        }

        let index = key.index();
        let greeting = key.is_greeting();
        let entering = !self.timeline.is_shown();
        let (first, transition) = match key {
            Displayed::Item(_) => (entering, TransitionPolicy::ShrinkExpand),
            _ => (entering || index == self.initial_index, self.config.transition),
        };
        let message = self.message_for(&key);
        let plan = EntryPlan {
            target: self.registry.rect_for(index),
            greeting,
            entering,
            first,
            transition,
            step_duration: self.config.step_duration,
            arrow: if greeting {
                None
            } else {
                message.and_then(|m| m.arrow)
            },
            enter: message.map_or(MessageAnimation::None, |m| m.enter),
        };
        let pulse = self.config.target_shape.is_donut() && !greeting;

        showcase_core::debug!(index, entering, first, "step re-keyed");
        self.timeline.enter_step(&plan, pulse);
        self.shown = Some(key);
    }

    fn abandon_exit(&mut self) {
        if self.timeline.abandon_exit() {
            self.emit(Level::Debug, "running exit script abandoned");
        }
    }

    fn process_signals(&mut self) {
        for _ in 0..MAX_SIGNAL_ROUNDS {
            let signals = self.timeline.drain_signals();
            if signals.is_empty() {
                return;
            }
            for signal in signals {
                self.handle_signal(signal);
            }
        }
        showcase_core::warn!(
            rounds = MAX_SIGNAL_ROUNDS,
            "signals still pending; deferring to next frame"
        );
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::Advance => {
                let from = self.current_index;
                let to = from + 1;
                self.current_index = to;
                self.events.push(ShowcaseEvent::StepChanged {
                    from,
                    to,
                    reason: StepChangeReason::Advanced,
                });
                self.emit(Level::Debug, &format!("advanced {from} -> {to}"));
                self.show_current(false);
            }
            Signal::Finish => {
                if let Some(callback) = self.on_finish.as_mut() {
                    callback();
                }
                self.events.push(ShowcaseEvent::Finished);
                self.emit(Level::Info, "showcase finished");
                self.active = false;
                self.timeline.set_visible(self.is_visible());
            }
            Signal::OverrideFinished => {
                match self.single.take() {
                    Some(Single::Item(index)) => {
                        self.events.push(ShowcaseEvent::ItemFinished { index });
                        self.emit(Level::Debug, &format!("single item {index} dismissed"));
                    }
                    Some(Single::Greeting(_)) => {
                        self.events.push(ShowcaseEvent::GreetingFinished);
                        self.emit(Level::Debug, "single greeting dismissed");
                    }
                    None => {}
                }
                self.timeline.set_visible(self.is_visible());
            }
            Signal::ResetIndex => {
                let from = self.current_index;
                self.current_index = self.initial_index;
                if from != self.initial_index {
                    self.events.push(ShowcaseEvent::StepChanged {
                        from,
                        to: self.initial_index,
                        reason: StepChangeReason::Reset,
                    });
                }
                self.emit(
                    Level::Debug,
                    &format!("index reset {from} -> {}", self.initial_index),
                );
                self.show_current(false);
            }
        }
    }

    /// Log `message` and forward it to the listener.
    fn emit(&mut self, level: Level, message: &str) {
        match level {
            Level::Verbose => {
                showcase_core::trace!("{message}");
            }
            Level::Debug => {
                showcase_core::debug!("{message}");
            }
            Level::Info => {
                showcase_core::info!("{message}");
            }
            Level::Warning => {
                showcase_core::warn!("{message}");
            }
            Level::Error => {
                showcase_core::error!("{message}");
            }
        }
        if let Some(listener) = self.listener.as_mut() {
            listener.on_event(level, message);
        }
    }
}
