#![forbid(unsafe_code)]

//! Product-tour overlay: dims the screen, cuts a hole around one target at a
//! time, explains it with a message card and an optional arrow, and steps
//! through the targets on taps.
//!
//! # Role in the workspace
//! `showcase-overlay` is where the tour logic lives. It sits on top of
//! `showcase-core` (geometry, animation, logging) and `showcase-render`
//! (colors, paths, text, the draw surface) and is re-exported by the
//! `showcase` facade.
//!
//! # Primary responsibilities
//! - **Registry**: [`registry::TargetRegistry`] keeps the measured rectangle
//!   and message of every target, with index 0 reserved for the greeting.
//! - **Geometry**: band and donut masks, message placement, and arrow paths
//!   in [`geometry`].
//! - **Timeline**: per-step animation scripts over named channels in
//!   [`timeline`], torn down whenever the step changes.
//! - **Sequencing**: [`Showcase`] turns taps into exit scripts and exit
//!   scripts into index changes, `onFinish` callbacks, and resets.
//! - **Composition**: [`overlay::compose`] freezes the animated values into
//!   an [`OverlayFrame`] that paints onto any
//!   [`Surface`](showcase_render::surface::Surface).
//!
//! # Driving it
//!
//! ```
//! use std::time::Duration;
//! use showcase_core::geometry::{Point, Size};
//! use showcase_overlay::{Message, Showcase, ShowcaseConfig};
//! use showcase_render::surface::RecordingSurface;
//! use showcase_render::text::MonospaceMeasurer;
//!
//! let mut showcase = Showcase::new(ShowcaseConfig::default());
//! let message = Message::new("Tap here");
//! showcase
//!     .on_measured(1, Size::new(80.0, 40.0), Point::new(20.0, 20.0), Some(message))
//!     .unwrap();
//! showcase.start();
//! showcase.tick(Duration::from_millis(16));
//!
//! let mut surface = RecordingSurface::new(Size::new(400.0, 800.0));
//! showcase.render(&mut surface, &MonospaceMeasurer::default());
//! assert!(!surface.commands().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod model;
pub mod overlay;
pub mod registry;
pub mod sequencer;
pub mod timeline;

pub use config::{ShowcaseConfig, TransitionPolicy};
pub use error::{Result, ShowcaseError};
pub use event::{Level, ShowcaseEvent, ShowcaseEventListener, StepChangeReason};
pub use model::{Arrow, Gravity, HeadShape, Message, MessageAnimation, Side, TargetShape};
pub use overlay::OverlayFrame;
pub use registry::TargetRegistry;
pub use sequencer::{Displayed, Showcase, ShowcaseState};
