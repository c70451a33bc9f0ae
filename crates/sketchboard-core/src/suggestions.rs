//! Layout for externally generated follow-up ideas.
//!
//! Producing suggestions is someone else's job; this module only places
//! them on an arc below the node they were generated from.

use crate::nodes::{Fill, Node, NodeKind, NodePatch, TextStyle, palette_color};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One generated idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: NodeKind,
    pub content: String,
    /// Key into the sticky palette.
    #[serde(default)]
    pub color_key: String,
}

/// Centers of `count` nodes spread over the lower half of an ellipse
/// around `center`. The ends of the arc are left empty.
pub fn arc_positions(center: Point, count: usize, radius: f64, flatten: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = PI * (i + 1) as f64 / (count + 1) as f64;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * flatten * angle.sin(),
            )
        })
        .collect()
}

/// The kind a suggestion is placed as. Kinds without a box to hold the
/// idea (lines, arrows, strokes, paths, images) become sticky notes.
fn placed_kind(kind: NodeKind) -> NodeKind {
    match kind {
        NodeKind::Sticky | NodeKind::Text => kind,
        k if k.shape_kind().is_some() => k,
        _ => NodeKind::Sticky,
    }
}

/// Build nodes for `suggestions` laid out on an arc below `source`.
/// Sizes are floored at `min_size`.
pub fn layout_suggestions(
    source: &Node,
    suggestions: &[Suggestion],
    radius: f64,
    flatten: f64,
    min_size: f64,
    size_for: impl Fn(NodeKind) -> Size,
    text_style: &TextStyle,
) -> Vec<Node> {
    let centers = arc_positions(source.center(), suggestions.len(), radius, flatten);
    suggestions
        .iter()
        .zip(centers)
        .map(|(suggestion, center)| {
            let kind = placed_kind(suggestion.kind);
            let size = size_for(kind);
            let size = Size::new(size.width.max(min_size), size.height.max(min_size));
            let origin = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
            let mut node = Node::of_kind(kind, origin, size, text_style);
            let color = palette_color(&suggestion.color_key);
            let patch = match kind {
                NodeKind::Sticky => NodePatch::new().fill(Fill::solid(color)),
                _ => NodePatch::new(),
            };
            patch.content(suggestion.content.clone()).apply(&mut node, min_size);
            node
        })
        .collect()
}
