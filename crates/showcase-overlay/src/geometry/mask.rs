#![forbid(unsafe_code)]

//! Mask-with-cutout construction.
//!
//! Three mask forms:
//!
//! - [`Mask::Solid`]: the whole canvas, used for the greeting where there is
//!   no target to protect.
//! - [`Mask::Bands`]: canvas minus a rectangle, built as four explicit bands
//!   (top, bottom, and the left/right strips between them) so no path
//!   boolean operation is needed.
//! - [`Mask::Donut`]: an outer circle centered on the target minus an inner
//!   [`Cutout`], drawn as a path difference. The outer radius reaches the
//!   farthest canvas corner at scale 1 and shrinks toward the target as the
//!   scale drops.
//!
//! # Invariants
//!
//! 1. Band rectangles never overlap and never leave the canvas; together
//!    with the clamped target they tile the canvas exactly.
//! 2. A band mask for a target covering the whole canvas has zero area.

use kurbo::{BezPath, Shape};
use showcase_core::geometry::{Point, Rect};
use showcase_render::path::{FillPath, TOLERANCE, to_kurbo_point, to_kurbo_rect};

use crate::model::TargetShape;

/// The highlight region cut out of a donut mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutout {
    Rect(Rect),
    RoundedRect { rect: Rect, radius: f32 },
    Oval { center: Point, radius: f32 },
}

impl Cutout {
    /// Cutout for a target rectangle drawn with `shape`.
    ///
    /// A circle is centered on the target with a radius of half its larger
    /// side; a rounded-rectangle radius is capped at half the shorter side.
    pub fn for_target(shape: TargetShape, target: Rect) -> Self {
        match shape {
            TargetShape::Rectangle => Self::Rect(target),
            TargetShape::RoundedRectangle { corner_radius } => Self::RoundedRect {
                rect: target,
                radius: corner_radius.min(target.size().min_dimension() / 2.0).max(0.0),
            },
            TargetShape::Circle => Self::Oval {
                center: target.center(),
                radius: target.size().max_dimension() / 2.0,
            },
        }
    }

    pub fn center(&self) -> Point {
        match self {
            Self::Rect(rect) | Self::RoundedRect { rect, .. } => rect.center(),
            Self::Oval { center, .. } => *center,
        }
    }

    /// Axis-aligned bounds of the cutout.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) | Self::RoundedRect { rect, .. } => *rect,
            Self::Oval { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
        }
    }

    /// The same shape with every edge pushed outward by `by`.
    #[must_use]
    pub fn grow(&self, by: f32) -> Self {
        match *self {
            Self::Rect(rect) => Self::Rect(rect.inflate(by)),
            Self::RoundedRect { rect, radius } => Self::RoundedRect {
                rect: rect.inflate(by),
                radius: (radius + by).max(0.0),
            },
            Self::Oval { center, radius } => Self::Oval {
                center,
                radius: (radius + by).max(0.0),
            },
        }
    }

    pub fn to_path(&self) -> BezPath {
        match *self {
            Self::Rect(rect) => to_kurbo_rect(rect).to_path(TOLERANCE),
            Self::RoundedRect { rect, radius } => to_kurbo_rect(rect)
                .to_rounded_rect(f64::from(radius))
                .to_path(TOLERANCE),
            Self::Oval { center, radius } => {
                let r = f64::from(radius);
                kurbo::Ellipse::new(to_kurbo_point(center), (r, r), 0.0).to_path(TOLERANCE)
            }
        }
    }
}

/// The dimmed region drawn over the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mask {
    Solid(Rect),
    /// Top, bottom, left, right.
    Bands([Rect; 4]),
    Donut {
        center: Point,
        outer_radius: f32,
        inner: Cutout,
    },
}

impl Mask {
    /// Canvas minus `target` as four bands.
    pub fn bands(canvas: Rect, target: Rect) -> Self {
        let left = target.left().clamp(canvas.left(), canvas.right());
        let right = target.right().clamp(left, canvas.right());
        let top = target.top().clamp(canvas.top(), canvas.bottom());
        let bottom = target.bottom().clamp(top, canvas.bottom());

        Self::Bands([
            Rect::new(canvas.x, canvas.y, canvas.width, top - canvas.top()),
            Rect::new(canvas.x, bottom, canvas.width, canvas.bottom() - bottom),
            Rect::new(canvas.x, top, left - canvas.left(), bottom - top),
            Rect::new(right, top, canvas.right() - right, bottom - top),
        ])
    }

    /// Outer circle around `inner`, sized to cover `canvas` at `scale` 1.
    pub fn donut(canvas: Rect, inner: Cutout, scale: f32) -> Self {
        let center = inner.center();
        Self::Donut {
            center,
            outer_radius: canvas.max_corner_distance_from(center) * scale.max(0.0),
            inner,
        }
    }

    /// Mask for the current step.
    pub fn for_target(canvas: Rect, target: Rect, shape: TargetShape, outer_scale: f32) -> Self {
        if shape.is_donut() {
            Self::donut(canvas, Cutout::for_target(shape, target), outer_scale)
        } else {
            Self::bands(canvas, target)
        }
    }

    /// The highlight region, if the mask has one.
    pub fn cutout(&self) -> Option<Cutout> {
        match self {
            Self::Solid(_) => None,
            Self::Bands([top, bottom, left, right]) => Some(Cutout::Rect(Rect::new(
                left.right(),
                top.bottom(),
                right.left() - left.right(),
                bottom.top() - top.bottom(),
            ))),
            Self::Donut { inner, .. } => Some(*inner),
        }
    }

    pub fn to_fill(&self) -> FillPath {
        match self {
            Self::Solid(canvas) => FillPath::Simple(to_kurbo_rect(*canvas).to_path(TOLERANCE)),
            Self::Bands(bands) => {
                let mut path = BezPath::new();
                for band in bands.iter().filter(|b| !b.is_empty()) {
                    path.extend(to_kurbo_rect(*band).to_path(TOLERANCE));
                }
                FillPath::Simple(path)
            }
            Self::Donut {
                center,
                outer_radius,
                inner,
            } => {
                if *outer_radius <= 0.0 {
                    return FillPath::Simple(BezPath::new());
                }
                let r = f64::from(*outer_radius);
                FillPath::Difference {
                    outer: kurbo::Ellipse::new(to_kurbo_point(*center), (r, r), 0.0)
                        .to_path(TOLERANCE),
                    inner: inner.to_path(),
                }
            }
        }
    }

    /// Area of the dimmed region.
    pub fn visible_area(&self) -> f32 {
        match self {
            Self::Solid(canvas) => canvas.area(),
            Self::Bands(bands) => bands.iter().map(Rect::area).sum(),
            Self::Donut { .. } => self.to_fill().area() as f32,
        }
    }
}

/// Ring between `inner` and `inner` grown by `radius`.
pub fn pulse_ring(inner: &Cutout, radius: f32) -> FillPath {
    FillPath::Difference {
        outer: inner.grow(radius.max(0.0)).to_path(),
        inner: inner.to_path(),
    }
}
