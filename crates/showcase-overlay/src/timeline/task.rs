#![forbid(unsafe_code)]

//! Frame-driven animation tasks.
//!
//! A [`Task`] is a queue of [`Step`]s run in order. Snaps, launches, and
//! signals complete on the spot; an animation or delay suspends the task
//! until a later frame. Tasks live in a [`TaskScope`]; tearing the scope down
//! drops every task in it, which is how a step's animations are cancelled
//! when the highlighted index changes.
//!
//! # Invariants
//!
//! 1. A task awaiting a channel resumes only once that channel's tween has
//!    landed. If the channel was snapped or re-targeted by someone else in
//!    the meantime the task is superseded and ends without running its
//!    remaining steps.
//! 2. Tasks launched during a tick run their leading instantaneous steps in
//!    that same tick.
//! 3. Delays are charged only for frames that start after the delay began.

use std::collections::VecDeque;
use std::time::Duration;

use showcase_core::animation::Tween;

use super::{Channel, Channels};

/// Requests a task makes of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Move to the next index.
    Advance,
    /// The last step was tapped; the sequence is over.
    Finish,
    /// A single-item or single-greeting display was dismissed.
    OverrideFinished,
    /// Return to the initial index.
    ResetIndex,
}

#[derive(Debug)]
pub enum Step {
    Snap(Channel, f32),
    /// Tween a channel and wait for it to land.
    Animate(Channel, f32, Tween),
    Delay(Duration),
    /// Start a sibling task without waiting for it.
    Launch(Task),
    Signal(Signal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wait {
    Ready,
    Delay(Duration),
    Channel { channel: Channel, generation: u64 },
}

/// Outcome of driving a task as far as it can go this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Pending,
    Done,
    /// The awaited channel was taken over by another animation.
    Superseded,
}

/// A sequential animation script.
#[derive(Debug)]
pub struct Task {
    label: &'static str,
    steps: VecDeque<Step>,
    wait: Wait,
}

impl Task {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            steps: VecDeque::new(),
            wait: Wait::Ready,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn snap(mut self, channel: Channel, value: f32) -> Self {
        self.steps.push_back(Step::Snap(channel, value));
        self
    }

    #[must_use]
    pub fn animate(mut self, channel: Channel, target: f32, tween: Tween) -> Self {
        self.steps.push_back(Step::Animate(channel, target, tween));
        self
    }

    /// Tween in a sibling task so this one does not wait for it.
    #[must_use]
    pub fn animate_detached(self, channel: Channel, target: f32, tween: Tween) -> Self {
        let child = Task::new(channel.name()).animate(channel, target, tween);
        self.launch(child)
    }

    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.steps.push_back(Step::Delay(delay));
        self
    }

    #[must_use]
    pub fn launch(mut self, task: Task) -> Self {
        self.steps.push_back(Step::Launch(task));
        self
    }

    #[must_use]
    pub fn signal(mut self, signal: Signal) -> Self {
        self.steps.push_back(Step::Signal(signal));
        self
    }

    /// Charge `dt` against a pending delay.
    fn elapse(&mut self, dt: Duration) {
        if let Wait::Delay(remaining) = &mut self.wait {
            *remaining = remaining.saturating_sub(dt);
        }
    }

    /// Run steps until the task suspends or ends.
    pub fn poll(
        &mut self,
        channels: &mut Channels,
        spawned: &mut Vec<Task>,
        signals: &mut Vec<Signal>,
    ) -> Poll {
        loop {
            match self.wait {
                Wait::Ready => {}
                Wait::Delay(remaining) if !remaining.is_zero() => return Poll::Pending,
                Wait::Delay(_) => self.wait = Wait::Ready,
                Wait::Channel {
                    channel,
                    generation,
                } => {
                    let anim = channels.get(channel);
                    if anim.generation() != generation {
                        return Poll::Superseded;
                    }
                    if anim.is_running() {
                        return Poll::Pending;
                    }
                    self.wait = Wait::Ready;
                }
            }

            let Some(step) = self.steps.pop_front() else {
                return Poll::Done;
            };
            match step {
                Step::Snap(channel, value) => {
                    channels.snap(channel, value);
                }
                Step::Animate(channel, target, tween) => {
                    let generation = channels.animate(channel, target, tween);
                    self.wait = Wait::Channel {
                        channel,
                        generation,
                    };
                }
                Step::Delay(delay) => self.wait = Wait::Delay(delay),
                Step::Launch(task) => spawned.push(task),
                Step::Signal(signal) => signals.push(signal),
            }
        }
    }
}

/// A set of running tasks torn down together.
#[derive(Debug, Default)]
pub struct TaskScope {
    name: &'static str,
    tasks: Vec<Task>,
}

impl TaskScope {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tasks: Vec::new(),
        }
    }

    /// Queue a task; it first runs on the next [`tick`](Self::tick).
    pub fn launch(&mut self, task: Task) {
        showcase_core::trace!(scope = self.name, task = task.label, "launch");
        self.tasks.push(task);
    }

    /// Drop every task. Returns how many were running.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.tasks.len();
        if dropped > 0 {
            showcase_core::debug!(scope = self.name, dropped, "scope cancelled");
        }
        self.tasks.clear();
        dropped
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance delays by `dt`, then drive every task as far as it goes.
    ///
    /// Channels are expected to have been ticked for this frame already.
    pub fn tick(&mut self, dt: Duration, channels: &mut Channels, signals: &mut Vec<Signal>) {
        for task in &mut self.tasks {
            task.elapse(dt);
        }

        let mut pending: VecDeque<Task> = self.tasks.drain(..).collect();
        let mut spawned = Vec::new();
        while let Some(mut task) = pending.pop_front() {
            match task.poll(channels, &mut spawned, signals) {
                Poll::Pending => self.tasks.push(task),
                Poll::Done => {
                    showcase_core::trace!(scope = self.name, task = task.label, "done");
                }
                Poll::Superseded => {
                    showcase_core::trace!(scope = self.name, task = task.label, "superseded");
                }
            }
            pending.extend(spawned.drain(..));
        }
    }
}
