#![forbid(unsafe_code)]

//! Target registry: measured rectangles and messages keyed by index.
//!
//! The host re-reports every target on each layout pass, so the registry is
//! cleared with [`TargetRegistry::reset`] and refilled rather than patched.
//!
//! # Invariants
//!
//! 1. Index 0 always holds the greeting slot: zero size, origin position,
//!    the greeting message if any. It is re-created by every reset.
//! 2. Only indices ≥ 1 can be registered.
//! 3. [`count`](TargetRegistry::count) includes the index-0 slot, so with
//!    targets `1..=N` registered it is `N + 1`.
//!
//! # Failure Modes
//!
//! - Lookups of unregistered indices return zero size at the origin. Index
//!   gaps are not detected: a sequence `1, 2, 4` ends after 2 because the
//!   count says so.

use ahash::AHashMap;
use showcase_core::geometry::{Point, Rect, Size};

use crate::error::{Result, ShowcaseError};
use crate::model::Message;

/// One measured target.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetEntry {
    pub index: usize,
    pub size: Size,
    /// Top-left corner in root coordinates.
    pub position: Point,
    pub message: Option<Message>,
}

impl TargetEntry {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[derive(Debug, Clone)]
pub struct TargetRegistry {
    entries: AHashMap<usize, TargetEntry>,
}

impl TargetRegistry {
    pub fn new(greeting: Option<Message>) -> Self {
        let mut registry = Self {
            entries: AHashMap::new(),
        };
        registry.reset(greeting);
        registry
    }

    /// Drop every target and re-create the greeting slot.
    pub fn reset(&mut self, greeting: Option<Message>) {
        self.entries.clear();
        self.entries.insert(
            0,
            TargetEntry {
                index: 0,
                size: Size::ZERO,
                position: Point::ZERO,
                message: greeting,
            },
        );
    }

    /// Record or overwrite the target at `index`.
    pub fn register(
        &mut self,
        index: usize,
        size: Size,
        position: Point,
        message: Option<Message>,
    ) -> Result<()> {
        if index == 0 {
            return Err(ShowcaseError::InvalidTargetIndex { index });
        }
        self.entries.insert(
            index,
            TargetEntry {
                index,
                size,
                position,
                message,
            },
        );
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&TargetEntry> {
        self.entries.get(&index)
    }

    pub fn size_for(&self, index: usize) -> Size {
        self.get(index).map_or(Size::ZERO, |e| e.size)
    }

    /// Position of the target; index 0 reports target 1's position so the
    /// greeting sits where the first highlight will appear.
    pub fn position_for(&self, index: usize) -> Point {
        let index = if index == 0 { 1 } else { index };
        self.get(index).map_or(Point::ZERO, |e| e.position)
    }

    /// Highlight rectangle for `index`.
    pub fn rect_for(&self, index: usize) -> Rect {
        Rect::from_origin_size(self.position_for(index), self.size_for(index))
    }

    pub fn message_for(&self, index: usize) -> Option<&Message> {
        self.get(index).and_then(|e| e.message.as_ref())
    }

    /// Number of entries, including the index-0 slot.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// True when tapping `index` should finish rather than advance.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.count()
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_query_round_trips() {
        let mut registry = TargetRegistry::default();
        registry
            .register(1, Size::new(100.0, 50.0), Point::new(20.0, 30.0), None)
            .unwrap();
        assert_eq!(registry.size_for(1), Size::new(100.0, 50.0));
        assert_eq!(registry.position_for(1), Point::new(20.0, 30.0));
    }

    #[test]
    fn index_zero_is_rejected() {
        let mut registry = TargetRegistry::default();
        let err = registry
            .register(0, Size::new(1.0, 1.0), Point::ZERO, None)
            .unwrap_err();
        assert_eq!(err, ShowcaseError::InvalidTargetIndex { index: 0 });
        assert_eq!(registry.size_for(0), Size::ZERO);
    }

    #[test]
    fn count_includes_greeting_slot() {
        let mut registry = TargetRegistry::new(Some(Message::new("hi")));
        assert_eq!(registry.count(), 1);
        for i in 1..=4 {
            registry.register(i, Size::new(10.0, 10.0), Point::ZERO, None).unwrap();
        }
        assert_eq!(registry.count(), 5);
        assert!(!registry.is_last(3));
        assert!(registry.is_last(4));
        assert_eq!(registry.message_for(0).map(|m| m.text.as_str()), Some("hi"));
    }

    #[test]
    fn greeting_position_follows_first_target() {
        let mut registry = TargetRegistry::default();
        assert_eq!(registry.position_for(0), Point::ZERO);
        registry
            .register(1, Size::new(40.0, 40.0), Point::new(60.0, 70.0), None)
            .unwrap();
        assert_eq!(registry.position_for(0), Point::new(60.0, 70.0));
        assert_eq!(registry.size_for(0), Size::ZERO);
    }

    #[test]
    fn missing_index_reads_as_zero() {
        let registry = TargetRegistry::default();
        assert_eq!(registry.rect_for(7), Rect::default());
        assert!(registry.message_for(7).is_none());
    }

    #[test]
    fn reregistering_overwrites_and_reset_clears() {
        let mut registry = TargetRegistry::default();
        registry.register(1, Size::new(1.0, 1.0), Point::ZERO, None).unwrap();
        registry
            .register(1, Size::new(2.0, 3.0), Point::new(4.0, 5.0), None)
            .unwrap();
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.rect_for(1), Rect::new(4.0, 5.0, 2.0, 3.0));
        registry.reset(None);
        assert_eq!(registry.count(), 1);
        assert_eq!(registry.size_for(1), Size::ZERO);
    }
}
