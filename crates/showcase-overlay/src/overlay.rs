#![forbid(unsafe_code)]

//! Frame composition: channel values in, draw calls out.
//!
//! [`compose`] is a pure function of the current channel snapshot, the
//! registered target, and its message. The resulting [`OverlayFrame`] can be
//! inspected directly or painted onto a [`Surface`] in a fixed order: mask,
//! pulse ring, message card, message text, arrow stroke, arrow head.
//!
//! Alpha is folded into colors here. The overlay visibility multiplies every
//! draw; the mask alpha also scales the pulse ring.

use kurbo::{BezPath, Shape};
use showcase_core::geometry::{Point, Rect, Size};
use showcase_render::color::Color;
use showcase_render::path::{FillPath, StrokeStyle, TOLERANCE, to_kurbo_rect};
use showcase_render::surface::Surface;
use showcase_render::text::{TextLayout, TextMeasurer};

use crate::geometry::arrow::{arrow_path, head_path};
use crate::geometry::mask::{Cutout, Mask, pulse_ring};
use crate::geometry::placement::{
    MessagePlacement, PlacementRules, VerticalPlacement, place_message, text_width_limit,
};
use crate::model::{Message, TargetShape};
use crate::timeline::ChannelValues;

/// Everything [`compose`] reads.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub canvas: Size,
    pub values: ChannelValues,
    /// Registered rectangle of the step on screen; messages anchor to it.
    pub target: Rect,
    pub message: Option<&'a Message>,
    pub greeting: bool,
    pub shape: TargetShape,
    /// Mask color at full mask alpha.
    pub mask_color: Color,
    pub arrow_line_thickness: f32,
}

/// A filled region with its final color.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub path: FillPath,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageFrame {
    pub layout: TextLayout,
    pub placement: MessagePlacement,
    pub text_color: Color,
    pub card: Option<Fill>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFrame {
    /// The drawn prefix of the arrow.
    pub stroke: BezPath,
    pub style: StrokeStyle,
    pub color: Color,
    pub head: Option<Fill>,
}

/// One frame of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    pub canvas: Size,
    pub mask: Mask,
    pub mask_fill: Fill,
    pub pulse: Option<Fill>,
    pub message: Option<MessageFrame>,
    pub arrow: Option<ArrowFrame>,
}

impl OverlayFrame {
    /// Paint in order, skipping fully transparent draws.
    pub fn paint(&self, surface: &mut dyn Surface) {
        fill(surface, &self.mask_fill);
        if let Some(pulse) = &self.pulse {
            fill(surface, pulse);
        }
        if let Some(message) = &self.message {
            if let Some(card) = &message.card {
                fill(surface, card);
            }
            if !message.text_color.is_transparent() && !message.layout.lines.is_empty() {
                surface.text(&message.layout, message.placement.text_origin, message.text_color);
            }
        }
        if let Some(arrow) = &self.arrow {
            if !arrow.color.is_transparent() && !arrow.stroke.elements().is_empty() {
                surface.stroke(&arrow.stroke, &arrow.style, arrow.color);
            }
            if let Some(head) = &arrow.head {
                fill(surface, head);
            }
        }
    }
}

fn fill(surface: &mut dyn Surface, fill: &Fill) {
    if !fill.color.is_transparent() {
        surface.fill(&fill.path, fill.color);
    }
}

/// Build the frame for the current channel values.
pub fn compose(input: &FrameInput<'_>, measurer: &dyn TextMeasurer) -> OverlayFrame {
    let canvas = Rect::from_size(input.canvas);
    let v = &input.values;
    let visibility = v.visibility.clamp(0.0, 1.0);

    let mask = if input.greeting {
        Mask::Solid(canvas)
    } else {
        Mask::for_target(canvas, v.rect, input.shape, v.outer_scale)
    };
    let mask_fill = Fill {
        path: mask.to_fill(),
        color: input.mask_color.fade(v.mask_alpha * visibility),
    };

    let pulse = match mask.cutout() {
        Some(cutout) if input.shape.is_donut() && v.pulse_alpha > 0.0 => {
            let radius = v.pulse_radius_fraction * v.rect.size().max_dimension();
            (radius > 0.0).then(|| Fill {
                path: pulse_ring(&cutout, radius),
                color: Color::WHITE.fade(v.pulse_alpha * v.mask_alpha * visibility),
            })
        }
        _ => None,
    };

    let message = input
        .message
        .map(|m| compose_message(input, m, visibility, measurer));

    let arrow = match (input.message, &message) {
        (Some(m), Some(frame)) if !input.greeting => {
            compose_arrow(input, m, &frame.placement, visibility)
        }
        _ => None,
    };

    OverlayFrame {
        canvas: input.canvas,
        mask,
        mask_fill,
        pulse,
        message,
        arrow,
    }
}

/// Bounds the arrow and message work against for this shape.
fn highlight_bounds(shape: TargetShape, rect: Rect) -> Rect {
    if shape.is_donut() {
        Cutout::for_target(shape, rect).bounds()
    } else {
        rect
    }
}

fn compose_message(
    input: &FrameInput<'_>,
    message: &Message,
    visibility: f32,
    measurer: &dyn TextMeasurer,
) -> MessageFrame {
    let v = &input.values;
    let max_width = text_width_limit(input.canvas, input.greeting);
    let layout = measurer.layout(&message.text, &message.style, max_width);

    let rules = if input.greeting {
        PlacementRules::greeting()
    } else {
        let curved = message.arrow.is_some_and(|a| a.curved);
        PlacementRules::target()
            .center_horizontally(curved)
            .clamp_to_canvas(input.shape.is_donut())
    };
    let anchor = highlight_bounds(input.shape, input.target);
    let placement = place_message(input.canvas, anchor, layout.size, message.gravity, &rules);

    let card = message.background.map(|background| Fill {
        path: FillPath::Simple(
            to_kurbo_rect(placement.card)
                .to_rounded_rect(f64::from(message.corner_radius))
                .to_path(TOLERANCE),
        ),
        color: background.fade(v.card_alpha * visibility),
    });

    MessageFrame {
        layout,
        placement,
        text_color: message.style.color.fade(v.text_alpha * visibility),
        card,
    }
}

/// Middle of the card edge that faces the target.
fn card_edge_facing(placement: &MessagePlacement) -> Point {
    let card = placement.card;
    let x = card.center().x;
    match placement.vertical {
        VerticalPlacement::Below => Point::new(x, card.top()),
        VerticalPlacement::Above | VerticalPlacement::Centered => Point::new(x, card.bottom()),
    }
}

fn compose_arrow(
    input: &FrameInput<'_>,
    message: &Message,
    placement: &MessagePlacement,
    visibility: f32,
) -> Option<ArrowFrame> {
    let arrow = message.arrow?;
    let v = &input.values;
    if v.arrow_fraction <= 0.0 {
        return None;
    }

    let target = highlight_bounds(input.shape, v.rect);
    let origin = (arrow.curved && input.shape.is_donut()).then(|| card_edge_facing(placement));
    let path = arrow_path(input.canvas, target, &arrow, origin);
    let tip = path.sample(v.arrow_fraction);

    let head = if arrow.has_head() {
        head_path(
            arrow.head,
            tip.position,
            v.head_size,
            tip.head_rotation_degrees(),
        )
        .map(|head| Fill {
            path: FillPath::Simple(head),
            color: arrow.color.fade(v.arrow_alpha * visibility),
        })
    } else {
        None
    };

    Some(ArrowFrame {
        stroke: path.prefix(v.arrow_fraction),
        style: StrokeStyle::round(input.arrow_line_thickness),
        color: arrow.color.fade(visibility),
        head,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Arrow, Side};
    use showcase_render::surface::{DrawCommand, RecordingSurface};
    use showcase_render::text::MonospaceMeasurer;

    const CANVAS: Size = Size::new(400.0, 800.0);

    fn values(rect: Rect) -> ChannelValues {
        ChannelValues {
            rect,
            mask_alpha: 1.0,
            outer_scale: 1.0,
            arrow_fraction: 1.0,
            arrow_alpha: 1.0,
            head_size: 25.0,
            card_alpha: 1.0,
            text_alpha: 1.0,
            visibility: 1.0,
            pulse_alpha: 0.0,
            pulse_radius_fraction: 0.0,
        }
    }

    fn input<'a>(rect: Rect, message: Option<&'a Message>) -> FrameInput<'a> {
        FrameInput {
            canvas: CANVAS,
            values: values(rect),
            target: rect,
            message,
            greeting: false,
            shape: TargetShape::Rectangle,
            mask_color: Color::BLACK.with_alpha(0.8),
            arrow_line_thickness: 5.0,
        }
    }

    fn kinds(surface: &RecordingSurface) -> Vec<&'static str> {
        surface
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Fill { .. } => "fill",
                DrawCommand::Stroke { .. } => "stroke",
                DrawCommand::Text { .. } => "text",
            })
            .collect()
    }

    #[test]
    fn paints_in_layer_order() {
        let message = Message::new("Tap here")
            .background(Color::WHITE)
            .arrow(Arrow::from_side(Side::Top));
        let rect = Rect::new(150.0, 400.0, 100.0, 40.0);
        let frame = compose(&input(rect, Some(&message)), &MonospaceMeasurer::default());
        let mut surface = RecordingSurface::new(CANVAS);
        frame.paint(&mut surface);
        assert_eq!(kinds(&surface), vec!["fill", "fill", "text", "stroke", "fill"]);
    }

    #[test]
    fn greeting_uses_solid_mask_and_no_arrow() {
        let message = Message::new("Welcome").arrow(Arrow::default());
        let mut frame_input = input(Rect::default(), Some(&message));
        frame_input.greeting = true;
        let frame = compose(&frame_input, &MonospaceMeasurer::default());
        assert_eq!(frame.mask, Mask::Solid(Rect::from_size(CANVAS)));
        assert!(frame.arrow.is_none());
        let placement = frame.message.expect("greeting message").placement;
        assert_eq!(placement.vertical, VerticalPlacement::Centered);
    }

    #[test]
    fn hidden_overlay_paints_nothing() {
        let message = Message::new("Hidden").background(Color::WHITE);
        let mut frame_input = input(Rect::new(10.0, 10.0, 10.0, 10.0), Some(&message));
        frame_input.values.visibility = 0.0;
        let mut surface = RecordingSurface::new(CANVAS);
        compose(&frame_input, &MonospaceMeasurer::default()).paint(&mut surface);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn retracted_arrow_is_omitted() {
        let message = Message::new("m").arrow(Arrow::from_side(Side::Left));
        let mut frame_input = input(Rect::new(200.0, 400.0, 40.0, 40.0), Some(&message));
        frame_input.values.arrow_fraction = 0.0;
        assert!(compose(&frame_input, &MonospaceMeasurer::default()).arrow.is_none());
    }

    #[test]
    fn curved_donut_arrow_starts_at_card_edge() {
        let message = Message::new("Look").arrow(Arrow::curved());
        let rect = Rect::new(100.0, 400.0, 80.0, 80.0);
        let mut frame_input = input(rect, Some(&message));
        frame_input.shape = TargetShape::Circle;
        let frame = compose(&frame_input, &MonospaceMeasurer::default());
        let placement = frame.message.as_ref().expect("message").placement;
        assert_eq!(placement.vertical, VerticalPlacement::Above);
        let start = frame
            .arrow
            .as_ref()
            .and_then(|a| a.stroke.elements().first().copied())
            .expect("arrow stroke");
        let kurbo::PathEl::MoveTo(p) = start else {
            panic!("stroke starts with a move");
        };
        assert!((p.y as f32 - placement.card.bottom()).abs() < 1e-3);
        assert!((p.x as f32 - placement.card.center().x).abs() < 1e-3);
    }

    #[test]
    fn pulse_ring_follows_channels() {
        let rect = Rect::new(100.0, 100.0, 80.0, 80.0);
        let mut frame_input = input(rect, None);
        frame_input.shape = TargetShape::Circle;
        frame_input.values.pulse_alpha = 0.6;
        frame_input.values.pulse_radius_fraction = 0.5;
        let pulse = compose(&frame_input, &MonospaceMeasurer::default())
            .pulse
            .expect("pulse ring");
        assert!(pulse.path.contains(Point::new(140.0 + 40.0 + 20.0, 140.0)));
        assert!(!pulse.path.contains(Point::new(140.0, 140.0)));
        assert!((pulse.color.a - 0.6).abs() < 1e-6);

        frame_input.shape = TargetShape::Rectangle;
        assert!(compose(&frame_input, &MonospaceMeasurer::default()).pulse.is_none());
    }
}
