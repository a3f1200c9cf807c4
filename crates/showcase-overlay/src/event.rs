#![forbid(unsafe_code)]

//! Diagnostics and lifecycle events.
//!
//! Two ways out of the sequencer, neither of which changes its behavior:
//!
//! - [`ShowcaseEventListener`]: a push sink for `(Level, message)`
//!   diagnostics. Every message sent to it is also logged through `tracing`.
//! - [`ShowcaseEvent`]: a queue of lifecycle events drained with
//!   `Showcase::drain_events`, for hosts that poll once per frame.

use std::fmt;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Verbose,
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Receives diagnostic messages from a showcase.
pub trait ShowcaseEventListener {
    fn on_event(&mut self, level: Level, message: &str);
}

impl<F: FnMut(Level, &str)> ShowcaseEventListener for F {
    fn on_event(&mut self, level: Level, message: &str) {
        self(level, message)
    }
}

/// Why the sequence moved to a different step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChangeReason {
    /// A tap advanced the main sequence.
    Advanced,
    /// A single-item request jumped to its target.
    SingleItem,
    /// A single-greeting request took over index 0.
    SingleGreeting,
    /// The settle delay after a finish or override elapsed.
    Reset,
}

/// Lifecycle events, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowcaseEvent {
    /// The main sequence started at `index`.
    Started { index: usize },
    StepChanged {
        from: usize,
        to: usize,
        reason: StepChangeReason,
    },
    /// A single-item replay was dismissed.
    ItemFinished { index: usize },
    /// A single greeting was dismissed.
    GreetingFinished,
    /// The last target was dismissed; `onFinish` has run.
    Finished,
}
