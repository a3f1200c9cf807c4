#![forbid(unsafe_code)]

//! Text style, layout, and measurement.
//!
//! The overlay treats message text as opaque: it asks a [`TextMeasurer`] for
//! a [`TextLayout`] constrained to a maximum width, positions the resulting
//! box, and hands the layout back to the surface. Hosts with a real text
//! engine implement [`TextMeasurer`]; [`MonospaceMeasurer`] is a fixed-advance
//! fallback good enough for tests and simple canvases.

use showcase_core::geometry::Size;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::color::Color;

/// Visual style of message text.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    pub color: Color,
    pub font_size: f32,
    /// Line height as a multiple of `font_size`.
    pub line_height: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            font_size: 16.0,
            line_height: 1.3,
        }
    }
}

impl TextStyle {
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size.max(0.0);
        self
    }

    #[must_use]
    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height.max(0.0);
        self
    }

    /// Absolute line height in root units.
    pub fn line_advance(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Text broken into lines, with its bounding size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayout {
    pub lines: Vec<String>,
    pub size: Size,
    pub line_height: f32,
}

/// Lays text out under a width constraint.
pub trait TextMeasurer {
    /// Wrap `text` to at most `max_width` and report the resulting box.
    ///
    /// Words that cannot fit on a line by themselves are broken between
    /// grapheme clusters; the layout never reports a width above
    /// `max_width` unless a single grapheme is wider.
    fn layout(&self, text: &str, style: &TextStyle, max_width: f32) -> TextLayout;
}

/// Fixed-advance measurer: every terminal column is `advance * font_size`
/// wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    advance: f32,
}

impl MonospaceMeasurer {
    pub fn new(advance: f32) -> Self {
        Self {
            advance: advance.max(f32::EPSILON),
        }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.6)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn layout(&self, text: &str, style: &TextStyle, max_width: f32) -> TextLayout {
        let column = self.advance * style.font_size;
        let max_columns = if column > 0.0 {
            (max_width.max(0.0) / column).floor() as usize
        } else {
            usize::MAX
        };
        let lines = wrap_text(text, max_columns.max(1));
        let widest = lines
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);
        let line_height = style.line_advance();
        TextLayout {
            size: Size::new(widest as f32 * column, lines.len() as f32 * line_height),
            lines,
            line_height,
        }
    }
}

/// Greedy word wrap to `max_columns` display columns.
///
/// Explicit newlines are kept, runs of whitespace collapse to one space, and
/// words longer than a line are split between graphemes.
pub fn wrap_text(text: &str, max_columns: usize) -> Vec<String> {
    if max_columns == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut width = 0usize;
        for word in paragraph.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            if word_width > max_columns {
                if width > 0 {
                    lines.push(std::mem::take(&mut line));
                    width = 0;
                }
                for grapheme in word.graphemes(true) {
                    let g = UnicodeWidthStr::width(grapheme);
                    if width > 0 && width + g > max_columns {
                        lines.push(std::mem::take(&mut line));
                        width = 0;
                    }
                    line.push_str(grapheme);
                    width += g;
                }
                continue;
            }

            if width == 0 {
                line.push_str(word);
                width = word_width;
            } else if width + 1 + word_width <= max_columns {
                line.push(' ');
                line.push_str(word);
                width += 1 + word_width;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                width = word_width;
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_column_budget() {
        let lines = wrap_text("tap anywhere to see the next feature", 12);
        assert_eq!(lines, vec!["tap anywhere", "to see the", "next feature"]);
        assert!(lines.iter().all(|l| UnicodeWidthStr::width(l.as_str()) <= 12));
    }

    #[test]
    fn wrap_breaks_oversized_words() {
        let lines = wrap_text("supercalifragilistic ok", 8);
        assert_eq!(lines, vec!["supercal", "ifragili", "stic ok"]);
    }

    #[test]
    fn wrap_keeps_blank_paragraphs() {
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn wrap_counts_wide_graphemes() {
        let lines = wrap_text("日本語のテキスト", 6);
        assert!(lines.iter().all(|l| UnicodeWidthStr::width(l.as_str()) <= 6));
        assert_eq!(lines.concat(), "日本語のテキスト");
    }

    #[test]
    fn monospace_layout_reports_box() {
        let style = TextStyle::default().font_size(10.0).line_height(2.0);
        let layout = MonospaceMeasurer::new(1.0).layout("hello world", &style, 60.0);
        assert_eq!(layout.lines, vec!["hello", "world"]);
        assert_eq!(layout.size, Size::new(50.0, 40.0));
        assert_eq!(layout.line_height, 20.0);
    }

    #[test]
    fn monospace_layout_fits_single_line_when_wide() {
        let style = TextStyle::default().font_size(10.0);
        let layout = MonospaceMeasurer::new(1.0).layout("hello world", &style, 1000.0);
        assert_eq!(layout.lines.len(), 1);
        assert_eq!(layout.size.width, 110.0);
    }
}
