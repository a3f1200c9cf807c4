#![forbid(unsafe_code)]

//! Message placement relative to the highlighted target.
//!
//! Vertical: above the target when it fits (or when gravity pins `Top`),
//! otherwise below. Pinned gravity is honored even when it pushes the message
//! off-screen.
//!
//! Horizontal: centered on the target. When centering would cross a canvas
//! edge, the message's near edge is aligned with the target's near edge
//! instead. This is not a hard clamp: a message wider than the space beside
//! its target may still cross the edge, unless the rules ask for the
//! last-resort canvas clamp.

use showcase_core::geometry::{Point, Rect, Size};

use crate::model::Gravity;

/// Gap between the target and the message card.
pub const MESSAGE_MARGIN: f32 = 48.0;
/// Horizontal space reserved around wrapped message text.
pub const TEXT_WIDTH_INSET: f32 = 90.0;
/// Card padding around message text.
pub const CARD_PADDING: f32 = 18.0;
/// Greeting text may use this share of the canvas width.
pub const GREETING_WIDTH_FRACTION: f32 = 0.8;
/// Card padding around greeting text.
pub const GREETING_CARD_PADDING: f32 = 40.0;
/// Minimum distance from the canvas edge for clamped messages.
pub const CANVAS_PADDING: f32 = 16.0;

/// Where the message ended up relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPlacement {
    Above,
    Below,
    Centered,
}

/// Tunables for one placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    pub margin: f32,
    pub card_padding: f32,
    /// Center on the canvas instead of the target (greeting, curved arrows).
    pub center_horizontally: bool,
    /// Center on the canvas vertically (greeting).
    pub center_vertically: bool,
    /// Keep the whole card on the canvas as a last resort.
    pub clamp_to_canvas: bool,
}

impl PlacementRules {
    /// Rules for a message attached to a target.
    pub fn target() -> Self {
        Self {
            margin: MESSAGE_MARGIN,
            card_padding: CARD_PADDING,
            center_horizontally: false,
            center_vertically: false,
            clamp_to_canvas: false,
        }
    }

    /// Rules for the greeting: centered on the canvas both ways.
    pub fn greeting() -> Self {
        Self {
            margin: 0.0,
            card_padding: GREETING_CARD_PADDING,
            center_horizontally: true,
            center_vertically: true,
            clamp_to_canvas: false,
        }
    }

    #[must_use]
    pub fn center_horizontally(mut self, center: bool) -> Self {
        self.center_horizontally = center;
        self
    }

    #[must_use]
    pub fn clamp_to_canvas(mut self, clamp: bool) -> Self {
        self.clamp_to_canvas = clamp;
        self
    }
}

/// Resolved message position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessagePlacement {
    /// Top-left corner of the text.
    pub text_origin: Point,
    /// Text rectangle inflated by the card padding.
    pub card: Rect,
    pub vertical: VerticalPlacement,
}

/// Maximum text width for a message on `canvas`.
pub fn text_width_limit(canvas: Size, greeting: bool) -> f32 {
    let limit = if greeting {
        canvas.width * GREETING_WIDTH_FRACTION
    } else {
        canvas.width - TEXT_WIDTH_INSET
    };
    limit.max(1.0)
}

/// Place a message of `text` size next to `target`.
pub fn place_message(
    canvas: Size,
    target: Rect,
    text: Size,
    gravity: Gravity,
    rules: &PlacementRules,
) -> MessagePlacement {
    let (y, vertical) = if rules.center_vertically {
        ((canvas.height - text.height) / 2.0, VerticalPlacement::Centered)
    } else {
        let above = target.top() - text.height - rules.margin;
        let below = target.bottom() + rules.margin;
        match gravity {
            Gravity::Top => (above, VerticalPlacement::Above),
            Gravity::Bottom => (below, VerticalPlacement::Below),
            Gravity::Auto if above - rules.card_padding < 0.0 => (below, VerticalPlacement::Below),
            Gravity::Auto => (above, VerticalPlacement::Above),
        }
    };

    let mut x = if rules.center_horizontally {
        (canvas.width - text.width) / 2.0
    } else {
        horizontal_position(canvas.width, target, text.width)
    };

    if rules.clamp_to_canvas {
        let min = CANVAS_PADDING + rules.card_padding;
        let max = canvas.width - text.width - min;
        x = if max < min { min } else { x.clamp(min, max) };
    }

    let text_origin = Point::new(x, y);
    MessagePlacement {
        text_origin,
        card: Rect::from_origin_size(text_origin, text).inflate(rules.card_padding),
        vertical,
    }
}

/// Center on the target, falling back to near-edge alignment.
fn horizontal_position(canvas_width: f32, target: Rect, width: f32) -> f32 {
    let mid = target.center().x;
    let half = width / 2.0;
    let canvas_mid = canvas_width / 2.0;
    if mid < canvas_mid {
        if mid - half < 0.0 { target.left() } else { mid - half }
    } else if mid > canvas_mid {
        if mid + half > canvas_width {
            target.right() - width
        } else {
            mid - half
        }
    } else {
        mid - half
    }
}
