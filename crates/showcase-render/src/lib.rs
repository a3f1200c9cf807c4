#![forbid(unsafe_code)]

//! Render kernel: colors, fill/stroke paths, text layout, and the draw
//! surface the overlay paints onto.
//!
//! # Role in the workspace
//! The overlay never talks to a host renderer directly. It describes each
//! frame as fills, strokes, and text runs against the [`surface::Surface`]
//! trait; hosts implement that trait over their own canvas. Paths are
//! [`kurbo`] Bezier paths in `f64`; everything else stays in the `f32` units
//! of `showcase-core`.
//!
//! [`surface::RecordingSurface`] captures the calls as
//! [`surface::DrawCommand`]s, which is what the tests assert against.

pub mod color;
pub mod path;
pub mod surface;
pub mod text;

pub use kurbo;
