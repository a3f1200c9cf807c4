#![forbid(unsafe_code)]

//! The draw surface the overlay paints onto.
//!
//! Alpha is always folded into the [`Color`] passed to each call; surfaces
//! blend source-over. Calls arrive in painter's order.

use kurbo::BezPath;
use showcase_core::geometry::{Point, Size};

use crate::color::Color;
use crate::path::{FillPath, StrokeStyle};
use crate::text::TextLayout;

/// A full-viewport canvas supplied by the host.
pub trait Surface {
    /// Viewport size in root units.
    fn size(&self) -> Size;

    /// Fill a region.
    fn fill(&mut self, path: &FillPath, color: Color);

    /// Stroke a path.
    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle, color: Color);

    /// Draw laid-out text with its top-left corner at `origin`.
    fn text(&mut self, layout: &TextLayout, origin: Point, color: Color);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: FillPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        style: StrokeStyle,
        color: Color,
    },
    Text {
        layout: TextLayout,
        origin: Point,
        color: Color,
    },
}

/// A surface that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the surface empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Recorded fills, in order.
    pub fn fills(&self) -> impl Iterator<Item = (&FillPath, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Fill { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    /// Recorded text runs, in order.
    pub fn texts(&self) -> impl Iterator<Item = (&TextLayout, Point, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text {
                layout,
                origin,
                color,
            } => Some((layout, *origin, *color)),
            _ => None,
        })
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Stroke { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn fill(&mut self, path: &FillPath, color: Color) {
        self.commands.push(DrawCommand::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            style: *style,
            color,
        });
    }

    fn text(&mut self, layout: &TextLayout, origin: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            layout: layout.clone(),
            origin,
            color,
        });
    }
}
