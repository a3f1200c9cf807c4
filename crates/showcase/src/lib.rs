#![forbid(unsafe_code)]

//! Showcase public facade crate.
//!
//! Re-exports the types a host needs to run a product tour from the internal
//! crates, plus a prelude for day-to-day use. Hosts implement
//! [`Surface`] and [`TextMeasurer`] over their own canvas, report every
//! target through [`Showcase::on_measured`], forward taps, and tick once per
//! frame.

// --- Core re-exports -------------------------------------------------------

pub use showcase_core::animation::{Animatable, Tween};
pub use showcase_core::geometry::{Point, Rect, Size};

// --- Render re-exports -----------------------------------------------------

pub use showcase_render::color::Color;
pub use showcase_render::path::{FillPath, LineCap, StrokeStyle};
pub use showcase_render::surface::{DrawCommand, RecordingSurface, Surface};
pub use showcase_render::text::{MonospaceMeasurer, TextLayout, TextMeasurer, TextStyle};

// --- Overlay re-exports ----------------------------------------------------

pub use showcase_overlay::{
    Arrow, Displayed, Gravity, HeadShape, Level, Message, MessageAnimation, OverlayFrame, Result,
    Showcase, ShowcaseConfig, ShowcaseError, ShowcaseEvent, ShowcaseEventListener, ShowcaseState,
    Side, StepChangeReason, TargetRegistry, TargetShape, TransitionPolicy,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Arrow, Color, Gravity, Message, MessageAnimation, Point, Rect, Showcase, ShowcaseConfig,
        ShowcaseEvent, Side, Size, Surface, TargetShape, TextMeasurer, TextStyle,
    };

    pub use crate::{core, overlay, render};
}

pub use showcase_core as core;
pub use showcase_overlay as overlay;
pub use showcase_render as render;
