#![forbid(unsafe_code)]

//! Arrow paths and head shapes.
//!
//! An arrow is one segment: a straight line approaching the target from one
//! side, or a quadratic curve swinging in from below. What gets drawn is a
//! prefix of that segment whose length is an animated fraction of the whole;
//! the head sits at the end of the prefix, rotated to the tangent there.

use std::ops::Range;

use kurbo::{Affine, BezPath, Line, ParamCurve, ParamCurveArclen, QuadBez, Shape};
use showcase_core::geometry::{Point, Rect, Size};
use showcase_render::path::{TOLERANCE, from_kurbo_point, to_kurbo_point, to_kurbo_rect};

use crate::model::{Arrow, HeadShape, Side};

/// Distance from the target edge to the start of a straight arrow.
pub const ARROW_REACH: f32 = 200.0;
/// Straight arrows from below start a little further out.
pub const ARROW_REACH_BOTTOM: f32 = 250.0;
/// Gap left between a straight arrow's tip and the target, on top of the head size.
pub const HEAD_MARGIN: f32 = 25.0;
/// Horizontal gap between a curved arrow's tip and the target's right edge.
pub const CURVE_TIP_GAP: f32 = 50.0;
/// Horizontal gap used when the tip has to move to the target's left edge.
pub const CURVE_TIP_GAP_FLIPPED: f32 = 80.0;

/// Arc-length accuracy for prefix measurement.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// The full arrow segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowPath {
    Straight(Line),
    Curved(QuadBez),
}

/// Position and direction at a point along an arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSample {
    pub position: Point,
    /// Unnormalised direction of travel.
    pub tangent: Point,
}

impl ArrowSample {
    /// Head rotation in degrees so a tip-up head points along the path.
    pub fn head_rotation_degrees(&self) -> f32 {
        -self.tangent.x.atan2(self.tangent.y).to_degrees() - 180.0
    }
}

/// Build the arrow pointing at `target`.
///
/// `origin` overrides where a curved arrow starts (the message card edge);
/// without it curved arrows start below the target at the canvas center.
pub fn arrow_path(canvas: Size, target: Rect, arrow: &Arrow, origin: Option<Point>) -> ArrowPath {
    if arrow.curved {
        return ArrowPath::Curved(curved_path(canvas, target, origin));
    }

    let margin = if arrow.has_head() {
        arrow.head_size + HEAD_MARGIN
    } else {
        0.0
    };
    let center = target.center();
    let (start, end) = match arrow.approach {
        Side::Top => (
            Point::new(center.x, target.top() - ARROW_REACH),
            Point::new(center.x, target.top() - margin),
        ),
        Side::Bottom => (
            Point::new(center.x, target.bottom() + ARROW_REACH_BOTTOM),
            Point::new(center.x, target.bottom() + margin),
        ),
        Side::Left => (
            Point::new(target.left() - ARROW_REACH, center.y),
            Point::new(target.left() - margin, center.y),
        ),
        Side::Right => (
            Point::new(target.right() + ARROW_REACH, center.y),
            Point::new(target.right() + margin, center.y),
        ),
    };
    ArrowPath::Straight(Line::new(to_kurbo_point(start), to_kurbo_point(end)))
}

fn curved_path(canvas: Size, target: Rect, origin: Option<Point>) -> QuadBez {
    let mid_x = canvas.width / 2.0;
    let start = origin.unwrap_or(Point::new(mid_x, target.bottom() + ARROW_REACH));
    let control = Point::new(mid_x, target.bottom());
    let tip_x = if target.right() + CURVE_TIP_GAP_FLIPPED > canvas.width {
        target.left() - CURVE_TIP_GAP_FLIPPED
    } else {
        target.right() + CURVE_TIP_GAP
    };
    QuadBez::new(
        to_kurbo_point(start),
        to_kurbo_point(control),
        to_kurbo_point(Point::new(tip_x, target.center().y)),
    )
}

impl ArrowPath {
    pub fn start(&self) -> Point {
        match self {
            Self::Straight(line) => from_kurbo_point(line.p0),
            Self::Curved(quad) => from_kurbo_point(quad.p0),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Straight(line) => from_kurbo_point(line.p1),
            Self::Curved(quad) => from_kurbo_point(quad.p2),
        }
    }

    /// Arc length of the whole arrow.
    pub fn length(&self) -> f32 {
        match self {
            Self::Straight(line) => line.arclen(ARCLEN_ACCURACY) as f32,
            Self::Curved(quad) => quad.arclen(ARCLEN_ACCURACY) as f32,
        }
    }

    /// Curve parameter at `fraction` of the arc length.
    fn param_at(&self, fraction: f32) -> f64 {
        let fraction = f64::from(fraction.clamp(0.0, 1.0));
        if fraction >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Straight(_) => fraction,
            Self::Curved(quad) => {
                let total = quad.arclen(ARCLEN_ACCURACY);
                if total <= 0.0 {
                    return fraction;
                }
                quad.inv_arclen(total * fraction, ARCLEN_ACCURACY)
            }
        }
    }

    /// Position and direction at `fraction` of the arc length.
    pub fn sample(&self, fraction: f32) -> ArrowSample {
        let t = self.param_at(fraction);
        match self {
            Self::Straight(line) => ArrowSample {
                position: from_kurbo_point(line.eval(t)),
                tangent: from_kurbo_point((line.p1 - line.p0).to_point()),
            },
            Self::Curved(quad) => {
                let d = (quad.p1 - quad.p0) * (2.0 * (1.0 - t)) + (quad.p2 - quad.p1) * (2.0 * t);
                ArrowSample {
                    position: from_kurbo_point(quad.eval(t)),
                    tangent: from_kurbo_point(d.to_point()),
                }
            }
        }
    }

    /// The drawn part of the arrow: the first `fraction` of its length.
    pub fn prefix(&self, fraction: f32) -> BezPath {
        let mut path = BezPath::new();
        if fraction <= 0.0 {
            return path;
        }
        let range: Range<f64> = 0.0..self.param_at(fraction);
        match self {
            Self::Straight(line) => {
                let sub = line.subsegment(range);
                path.move_to(sub.p0);
                path.line_to(sub.p1);
            }
            Self::Curved(quad) => {
                let sub = quad.subsegment(range);
                path.move_to(sub.p0);
                path.quad_to(sub.p1, sub.p2);
            }
        }
        path
    }
}

/// Filled head of `shape` centered at `at`.
///
/// `size` is the circle radius, the triangle half-width, or the square side.
/// Triangles are rotated by `rotation_degrees` about `at`; squares stay
/// axis-aligned. Returns `None` for [`HeadShape::None`] or a non-positive
/// size.
pub fn head_path(shape: HeadShape, at: Point, size: f32, rotation_degrees: f32) -> Option<BezPath> {
    if size <= 0.0 {
        return None;
    }
    let center = to_kurbo_point(at);
    let s = f64::from(size);
    let path = match shape {
        HeadShape::None => return None,
        HeadShape::Circle => kurbo::Circle::new(center, s).to_path(TOLERANCE),
        HeadShape::Triangle => {
            let mut tri = BezPath::new();
            tri.move_to((center.x, center.y - s));
            tri.line_to((center.x - s, center.y + s));
            tri.line_to((center.x + s, center.y + s));
            tri.close_path();
            tri.apply_affine(Affine::rotate_about(
                f64::from(rotation_degrees).to_radians(),
                center,
            ));
            tri
        }
        HeadShape::Square => to_kurbo_rect(square(at, size)).to_path(TOLERANCE),
        HeadShape::RoundedSquare => to_kurbo_rect(square(at, size))
            .to_rounded_rect(s / 4.0)
            .to_path(TOLERANCE),
    };
    Some(path)
}

fn square(center: Point, side: f32) -> Rect {
    Rect::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(400.0, 800.0);

    fn target() -> Rect {
        Rect::new(100.0, 300.0, 80.0, 40.0)
    }

    #[test]
    fn straight_from_top_stops_short_of_head() {
        let arrow = Arrow::from_side(Side::Top);
        let path = arrow_path(CANVAS, target(), &arrow, None);
        assert_eq!(path.start(), Point::new(140.0, 100.0));
        assert_eq!(path.end(), Point::new(140.0, 300.0 - 25.0 - HEAD_MARGIN));
    }

    #[test]
    fn headless_arrow_reaches_the_edge() {
        let arrow = Arrow::from_side(Side::Right).head(HeadShape::None);
        let path = arrow_path(CANVAS, target(), &arrow, None);
        assert_eq!(path.start(), Point::new(380.0, 320.0));
        assert_eq!(path.end(), Point::new(180.0, 320.0));
    }

    #[test]
    fn bottom_and_left_approaches() {
        let bottom = arrow_path(CANVAS, target(), &Arrow::from_side(Side::Bottom), None);
        assert_eq!(bottom.start(), Point::new(140.0, 340.0 + ARROW_REACH_BOTTOM));
        let left = arrow_path(CANVAS, target(), &Arrow::from_side(Side::Left), None);
        assert_eq!(left.end(), Point::new(100.0 - 50.0, 320.0));
    }

    #[test]
    fn curved_tip_flips_near_right_edge() {
        let right = arrow_path(CANVAS, target(), &Arrow::curved(), None);
        assert_eq!(right.start(), Point::new(200.0, 540.0));
        assert_eq!(right.end(), Point::new(230.0, 320.0));

        let near_edge = Rect::new(300.0, 300.0, 60.0, 40.0);
        let flipped = arrow_path(CANVAS, near_edge, &Arrow::curved(), None);
        assert_eq!(flipped.end(), Point::new(220.0, 320.0));
    }

    #[test]
    fn curved_origin_override() {
        let origin = Point::new(120.0, 500.0);
        let path = arrow_path(CANVAS, target(), &Arrow::curved(), Some(origin));
        assert_eq!(path.start(), origin);
    }

    #[test]
    fn sample_walks_by_arc_length() {
        let path = arrow_path(CANVAS, target(), &Arrow::from_side(Side::Left), None);
        let half = path.sample(0.5);
        assert!((half.position.x + 25.0).abs() < 1e-3, "{:?}", half.position);
        assert_eq!(path.sample(1.0).position, path.end());
    }

    #[test]
    fn head_points_along_travel() {
        let down = ArrowSample {
            position: Point::ZERO,
            tangent: Point::new(0.0, 1.0),
        };
        assert_eq!(down.head_rotation_degrees(), -180.0);
        let right = ArrowSample {
            position: Point::ZERO,
            tangent: Point::new(1.0, 0.0),
        };
        assert_eq!(right.head_rotation_degrees(), -270.0);
    }

    #[test]
    fn prefix_grows_with_fraction() {
        let path = arrow_path(CANVAS, target(), &Arrow::curved(), None);
        assert!(path.prefix(0.0).elements().is_empty());
        let short = path.prefix(0.25).perimeter(1e-3);
        let long = path.prefix(0.75).perimeter(1e-3);
        let total = f64::from(path.length());
        assert!((short - total * 0.25).abs() < 0.5, "{short} vs {total}");
        assert!((long - total * 0.75).abs() < 0.5, "{long} vs {total}");
    }

    #[test]
    fn triangle_head_rotates_tip_toward_target() {
        let head = head_path(HeadShape::Triangle, Point::new(50.0, 50.0), 10.0, -180.0)
            .expect("triangle");
        let bounds = head.bounding_box();
        assert!((bounds.y1 - 60.0).abs() < 1e-9);
        assert!(head.contains(kurbo::Point::new(50.0, 58.0)));
    }

    #[test]
    fn head_shapes() {
        let at = Point::new(0.0, 0.0);
        assert!(head_path(HeadShape::None, at, 10.0, 0.0).is_none());
        assert!(head_path(HeadShape::Circle, at, 0.0, 0.0).is_none());
        let square = head_path(HeadShape::Square, at, 10.0, 45.0).expect("square");
        assert!((square.area().abs() - 100.0).abs() < 1e-9);
        let rounded = head_path(HeadShape::RoundedSquare, at, 10.0, 0.0).expect("rounded");
        assert!(rounded.area().abs() < 100.0);
        let circle = head_path(HeadShape::Circle, at, 10.0, 0.0).expect("circle");
        assert!((circle.area().abs() - std::f64::consts::PI * 100.0).abs() < 1.0);
    }
}
