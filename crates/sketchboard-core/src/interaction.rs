//! Interaction modes.
//!
//! Exactly one mode is active at a time. [`crate::canvas::Canvas`] owns the
//! current mode and moves between modes on pointer events; every mode drops
//! back to [`Mode::Idle`] on pointer-up or when the pointer leaves the surface.

use crate::nodes::{NodeId, NodeKind};
use crate::resize::{ResizeHandle, ResizeStart};
use kurbo::{Point, Rect};

/// Marquee rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionRect {
    pub start: Point,
    pub current: Point,
}

impl SelectionRect {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Normalized rectangle from the anchor to the current point.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}

/// The active interaction.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    /// View panning; `last` is the previous pointer position in screen space.
    Panning { last: Point },
    /// Marquee selection. `additive` records the modifier held on press and
    /// is used when the release carries no modifier state.
    BoxSelecting { rect: SelectionRect, additive: bool },
    /// A node being created by dragging from `origin`.
    Drawing {
        id: NodeId,
        kind: NodeKind,
        origin: Point,
        moved: bool,
    },
    /// A resize handle drag; `press` is the world point of the press.
    Resizing {
        id: NodeId,
        handle: ResizeHandle,
        start: ResizeStart,
        press: Point,
    },
    /// Moving the selection; `last` is the previous world position.
    Dragging { last: Point },
    /// The pen's newest anchor is receiving a handle drag.
    PenHandle,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Panning { .. } => "panning",
            Mode::BoxSelecting { .. } => "box-selecting",
            Mode::Drawing { .. } => "drawing",
            Mode::Resizing { .. } => "resizing",
            Mode::Dragging { .. } => "dragging",
            Mode::PenHandle => "pen-handle",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rect_any_direction() {
        let mut rect = SelectionRect::new(Point::new(100.0, 100.0));
        rect.current = Point::new(40.0, 150.0);
        assert_eq!(rect.to_rect(), Rect::new(40.0, 100.0, 100.0, 150.0));
    }

    #[test]
    fn test_default_is_idle() {
        assert!(Mode::default().is_idle());
        assert_eq!(Mode::PenHandle.name(), "pen-handle");
    }
}
