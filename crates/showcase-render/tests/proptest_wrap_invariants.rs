//! Property-based invariants for message text wrapping.
//!
//! 1. No wrapped line is wider than the column budget.
//! 2. Wrapping never drops or reorders non-whitespace content.
//! 3. The monospace layout box never exceeds the width constraint.

use proptest::prelude::*;
use showcase_render::text::{MonospaceMeasurer, TextMeasurer, TextStyle, wrap_text};
use unicode_width::UnicodeWidthStr;

fn message_text() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z]{1,24}", 0..30).prop_map(|words| words.join(" "))
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn lines_fit_the_budget(text in message_text(), columns in 1usize..60) {
        for line in wrap_text(&text, columns) {
            prop_assert!(UnicodeWidthStr::width(line.as_str()) <= columns, "{line:?} > {columns}");
        }
    }

    #[test]
    fn content_is_preserved(text in message_text(), columns in 1usize..60) {
        let wrapped = wrap_text(&text, columns).concat();
        prop_assert_eq!(strip_whitespace(&wrapped), strip_whitespace(&text));
    }

    #[test]
    fn layout_box_respects_max_width(text in message_text(), max_width in 20.0f32..800.0) {
        let style = TextStyle::default();
        let layout = MonospaceMeasurer::default().layout(&text, &style, max_width);
        prop_assert!(layout.size.width <= max_width + 1e-3);
        prop_assert_eq!(layout.size.height, layout.lines.len() as f32 * style.line_advance());
    }
}
