//! Tool system for the whiteboard.

mod pen;

pub use pen::{BakedPath, PathBuilder, PenPress};

use crate::nodes::NodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Pen,
    Pencil,
    Text,
    Sticky,
    Rectangle,
    Circle,
    Triangle,
    Star,
    Diamond,
    Hexagon,
    Pentagon,
    Line,
    Arrow,
}

impl ToolKind {
    pub const ALL: [ToolKind; 15] = [
        ToolKind::Select,
        ToolKind::Pan,
        ToolKind::Pen,
        ToolKind::Pencil,
        ToolKind::Text,
        ToolKind::Sticky,
        ToolKind::Rectangle,
        ToolKind::Circle,
        ToolKind::Triangle,
        ToolKind::Star,
        ToolKind::Diamond,
        ToolKind::Hexagon,
        ToolKind::Pentagon,
        ToolKind::Line,
        ToolKind::Arrow,
    ];

    /// Kind of node a press with this tool creates.
    /// The pen builds paths through its own state machine and returns `None`.
    pub fn creates(&self) -> Option<NodeKind> {
        match self {
            ToolKind::Select | ToolKind::Pan | ToolKind::Pen => None,
            ToolKind::Pencil => Some(NodeKind::Draw),
            ToolKind::Text => Some(NodeKind::Text),
            ToolKind::Sticky => Some(NodeKind::Sticky),
            ToolKind::Rectangle => Some(NodeKind::Rectangle),
            ToolKind::Circle => Some(NodeKind::Circle),
            ToolKind::Triangle => Some(NodeKind::Triangle),
            ToolKind::Star => Some(NodeKind::Star),
            ToolKind::Diamond => Some(NodeKind::Diamond),
            ToolKind::Hexagon => Some(NodeKind::Hexagon),
            ToolKind::Pentagon => Some(NodeKind::Pentagon),
            ToolKind::Line => Some(NodeKind::Line),
            ToolKind::Arrow => Some(NodeKind::Arrow),
        }
    }

    /// Whether the tool stays active after creating a node.
    pub fn is_sticky(&self) -> bool {
        matches!(self, ToolKind::Select | ToolKind::Pan | ToolKind::Pen | ToolKind::Pencil)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Pan => "pan",
            ToolKind::Pen => "pen",
            ToolKind::Pencil => "pencil",
            ToolKind::Text => "text",
            ToolKind::Sticky => "sticky",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Triangle => "triangle",
            ToolKind::Star => "star",
            ToolKind::Diamond => "diamond",
            ToolKind::Hexagon => "hexagon",
            ToolKind::Pentagon => "pentagon",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_tools() {
        assert_eq!(ToolKind::Pencil.creates(), Some(NodeKind::Draw));
        assert_eq!(ToolKind::Line.creates(), Some(NodeKind::Line));
        assert_eq!(ToolKind::Select.creates(), None);
        assert_eq!(ToolKind::Pen.creates(), None);
        assert_eq!(ToolKind::ALL.iter().filter(|t| t.creates().is_some()).count(), 12);
    }

    #[test]
    fn test_one_shot_tools() {
        assert!(ToolKind::Pencil.is_sticky());
        assert!(!ToolKind::Rectangle.is_sticky());
        assert!(!ToolKind::Text.is_sticky());
    }

    #[test]
    fn test_tool_serde_names() {
        for tool in ToolKind::ALL {
            let json = serde_json::to_string(&tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.name()));
        }
    }
}
