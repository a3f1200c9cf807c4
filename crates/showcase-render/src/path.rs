#![forbid(unsafe_code)]

//! Fill and stroke paths.
//!
//! Paths are [`kurbo::BezPath`]s. A [`FillPath`] is either a single path
//! filled with the non-zero rule, or the boolean difference of two paths
//! (outer minus inner). Hosts without a path-op API can draw the difference
//! with an even-odd fill, since every difference the overlay produces has
//! the inner path fully inside the outer one.

use kurbo::{BezPath, Shape};
use showcase_core::geometry::{Point, Rect};

/// Flattening tolerance used when converting curves to Bezier paths.
pub const TOLERANCE: f64 = 0.1;

#[inline]
pub fn to_kurbo_point(p: Point) -> kurbo::Point {
    kurbo::Point::new(f64::from(p.x), f64::from(p.y))
}

#[inline]
pub fn from_kurbo_point(p: kurbo::Point) -> Point {
    Point::new(p.x as f32, p.y as f32)
}

#[inline]
pub fn to_kurbo_rect(r: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        f64::from(r.left()),
        f64::from(r.top()),
        f64::from(r.right()),
        f64::from(r.bottom()),
    )
}

#[inline]
pub fn from_kurbo_rect(r: kurbo::Rect) -> Rect {
    Rect::new(r.x0 as f32, r.y0 as f32, r.width() as f32, r.height() as f32)
}

/// A filled region.
#[derive(Debug, Clone, PartialEq)]
pub enum FillPath {
    /// One path, non-zero winding.
    Simple(BezPath),
    /// `outer` minus `inner`.
    Difference { outer: BezPath, inner: BezPath },
}

impl FillPath {
    /// Area covered by the fill.
    ///
    /// `Simple` paths are assumed to hold non-overlapping subpaths; a
    /// `Difference` assumes `inner` lies inside `outer`.
    pub fn area(&self) -> f64 {
        match self {
            Self::Simple(path) => subpath_area(path),
            Self::Difference { outer, inner } => {
                (subpath_area(outer) - subpath_area(inner)).max(0.0)
            }
        }
    }

    /// Hit test with the fill rule of each variant.
    pub fn contains(&self, point: Point) -> bool {
        let p = to_kurbo_point(point);
        match self {
            Self::Simple(path) => path.contains(p),
            Self::Difference { outer, inner } => outer.contains(p) && !inner.contains(p),
        }
    }

    /// Bounding box of the covered region.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Simple(path) => from_kurbo_rect(path.bounding_box()),
            Self::Difference { outer, .. } => from_kurbo_rect(outer.bounding_box()),
        }
    }
}

/// Sum of absolute subpath areas, so winding direction does not matter.
fn subpath_area(path: &BezPath) -> f64 {
    let mut total = 0.0;
    let mut current = BezPath::new();
    for el in path.elements() {
        if matches!(el, kurbo::PathEl::MoveTo(_)) && !current.elements().is_empty() {
            total += current.area().abs();
            current = BezPath::new();
        }
        current.push(*el);
    }
    if !current.elements().is_empty() {
        total += current.area().abs();
    }
    total
}

/// Line end decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// How a path is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
}

impl StrokeStyle {
    /// Round-capped stroke of the given width.
    pub const fn round(width: f32) -> Self {
        Self {
            width,
            cap: LineCap::Round,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::round(5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Shape};

    #[test]
    fn rect_round_trips_through_kurbo() {
        let r = Rect::new(20.0, 30.0, 100.0, 50.0);
        assert_eq!(from_kurbo_rect(to_kurbo_rect(r)), r);
    }

    #[test]
    fn subpath_area_ignores_winding() {
        let mut path = kurbo::Rect::new(0.0, 0.0, 10.0, 10.0).to_path(TOLERANCE);
        let mut reversed = BezPath::new();
        reversed.move_to((20.0, 0.0));
        reversed.line_to((20.0, 10.0));
        reversed.line_to((30.0, 10.0));
        reversed.line_to((30.0, 0.0));
        reversed.close_path();
        path.extend(reversed);
        assert!((FillPath::Simple(path).area() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn difference_excludes_inner_region() {
        let outer = kurbo::Rect::new(0.0, 0.0, 100.0, 100.0).to_path(TOLERANCE);
        let inner = Circle::new((50.0, 50.0), 10.0).to_path(TOLERANCE);
        let fill = FillPath::Difference { outer, inner };
        assert!(fill.contains(Point::new(5.0, 5.0)));
        assert!(!fill.contains(Point::new(50.0, 50.0)));
        let expected = 10_000.0 - std::f64::consts::PI * 100.0;
        assert!((fill.area() - expected).abs() < 1.0);
    }
}
