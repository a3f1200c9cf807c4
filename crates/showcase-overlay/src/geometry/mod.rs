#![forbid(unsafe_code)]

//! Pure layout math for the overlay: masks, message placement, arrows.
//!
//! Nothing here holds state or talks to a surface. Every function takes the
//! canvas size and the current (possibly mid-animation) target rectangle and
//! returns paths or rectangles for the frame composer.

pub mod arrow;
pub mod mask;
pub mod placement;

pub use arrow::{ArrowPath, ArrowSample, arrow_path, head_path};
pub use mask::{Cutout, Mask, pulse_ring};
pub use placement::{
    MessagePlacement, PlacementRules, VerticalPlacement, place_message, text_width_limit,
};
