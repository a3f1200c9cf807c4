#![forbid(unsafe_code)]

//! Message, arrow, and shape descriptions attached to targets.
//!
//! These are immutable values: the host builds them once per target and
//! hands them over at registration time.

use std::time::Duration;

use showcase_render::color::Color;
use showcase_render::text::TextStyle;

/// Vertical placement preference for a message relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gravity {
    /// Always above, even off-screen.
    Top,
    /// Always below, even off-screen.
    Bottom,
    /// Above when it fits, otherwise below.
    #[default]
    Auto,
}

/// The side an arrow approaches its target from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

/// Shape drawn at the tip of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeadShape {
    None,
    Circle,
    #[default]
    Triangle,
    Square,
    RoundedSquare,
}

/// Message fade used on enter or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageAnimation {
    FadeInOut(Duration),
    /// Appear or disappear on the spot.
    None,
}

impl MessageAnimation {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

    pub fn duration(&self) -> Duration {
        match self {
            Self::FadeInOut(d) => *d,
            Self::None => Duration::ZERO,
        }
    }
}

impl Default for MessageAnimation {
    fn default() -> Self {
        Self::FadeInOut(Self::DEFAULT_DURATION)
    }
}

/// An animated pointer from the message toward its target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrow {
    pub approach: Side,
    /// Quadratic curve from the message instead of a straight segment.
    pub curved: bool,
    pub duration: Duration,
    pub head: HeadShape,
    pub head_size: f32,
    /// Grow the head from zero; otherwise it appears at full size.
    pub animate_head_size: bool,
    pub color: Color,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            approach: Side::Bottom,
            curved: false,
            duration: Duration::from_millis(1000),
            head: HeadShape::Triangle,
            head_size: 25.0,
            animate_head_size: true,
            color: Color::WHITE,
        }
    }
}

impl Arrow {
    /// A straight arrow approaching from `side`.
    pub fn from_side(side: Side) -> Self {
        Self {
            approach: side,
            ..Self::default()
        }
    }

    /// A curved arrow.
    pub fn curved() -> Self {
        Self {
            curved: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn approach(mut self, side: Side) -> Self {
        self.approach = side;
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn head(mut self, head: HeadShape) -> Self {
        self.head = head;
        self
    }

    #[must_use]
    pub fn head_size(mut self, size: f32) -> Self {
        self.head_size = size.max(0.0);
        self
    }

    #[must_use]
    pub fn animate_head_size(mut self, animate: bool) -> Self {
        self.animate_head_size = animate;
        self
    }

    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// True when a head is drawn at the tip.
    pub fn has_head(&self) -> bool {
        self.head != HeadShape::None && self.head_size > 0.0
    }
}

/// The explanatory message shown for a target.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub style: TextStyle,
    /// Card behind the text; none draws bare text.
    pub background: Option<Color>,
    pub corner_radius: f32,
    pub gravity: Gravity,
    pub arrow: Option<Arrow>,
    pub enter: MessageAnimation,
    pub exit: MessageAnimation,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            background: None,
            corner_radius: 0.0,
            gravity: Gravity::Auto,
            arrow: None,
            enter: MessageAnimation::default(),
            exit: MessageAnimation::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    #[must_use]
    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    #[must_use]
    pub fn arrow(mut self, arrow: Arrow) -> Self {
        self.arrow = Some(arrow);
        self
    }

    #[must_use]
    pub fn enter(mut self, animation: MessageAnimation) -> Self {
        self.enter = animation;
        self
    }

    #[must_use]
    pub fn exit(mut self, animation: MessageAnimation) -> Self {
        self.exit = animation;
        self
    }
}

/// Shape of the highlight cut out of the mask.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetShape {
    /// Exact target rectangle, cut from four mask bands.
    #[default]
    Rectangle,
    /// Target rectangle with rounded corners, cut from a donut mask.
    RoundedRectangle { corner_radius: f32 },
    /// Circle around the target, cut from a donut mask.
    Circle,
}

impl TargetShape {
    pub const DEFAULT_CORNER_RADIUS: f32 = 8.0;

    /// Rounded rectangle with the given corner radius.
    pub fn rounded(corner_radius: f32) -> Self {
        Self::RoundedRectangle {
            corner_radius: corner_radius.max(0.0),
        }
    }

    /// True for shapes drawn with the outer-ring donut mask and pulse.
    pub fn is_donut(&self) -> bool {
        !matches!(self, Self::Rectangle)
    }
}
