#![forbid(unsafe_code)]

//! Core: geometry, animation, and logging primitives for the showcase overlay.
//!
//! # Role in the workspace
//! `showcase-core` is the leaf crate. It owns the float geometry the overlay
//! measures targets in, the frame-driven animation primitives every channel
//! is built from, and the logging facade the other crates call through.
//!
//! # Primary responsibilities
//! - **Geometry**: [`geometry::Point`], [`geometry::Size`], [`geometry::Rect`]
//!   in device-independent units, origin at the top-left, y growing down.
//! - **Animation**: easing curves, the [`animation::Animation`] trait,
//!   [`animation::Animatable`] value channels, and looping
//!   [`animation::Timeline`]s. Everything advances on caller-supplied
//!   `Duration`s so tests drive time deterministically.
//! - **Logging**: `tracing` macros when the `tracing` feature is on, no-op
//!   macros of the same names otherwise.

pub mod animation;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
