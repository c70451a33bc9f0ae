//! Partial node updates for style editors and the interaction engine.

use super::text::{FontFamily, FontWeight, TextAlign, TextDecoration};
use super::{Fill, Node, NodeBody, SerializableColor, StrokeAlign};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A partial `Node`: every `Some` field overwrites the node's value.
///
/// Fields a node kind does not carry are skipped for that node, so a font
/// patch applied to a mixed selection only reaches the text-bearing nodes.
/// Patches never change a node's id or kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodePatch {
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<String>,
    pub fill: Option<Fill>,
    pub stroke_color: Option<SerializableColor>,
    pub stroke_width: Option<f64>,
    pub stroke_align: Option<StrokeAlign>,
    pub font_family: Option<FontFamily>,
    pub font_size: Option<f64>,
    pub font_weight: Option<FontWeight>,
    pub decoration: Option<TextDecoration>,
    pub text_align: Option<TextAlign>,
    pub aspect_locked: Option<bool>,
    pub src: Option<String>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn stroke_color(mut self, color: SerializableColor) -> Self {
        self.stroke_color = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn stroke_align(mut self, align: StrokeAlign) -> Self {
        self.stroke_align = Some(align);
        self
    }

    pub fn font_family(mut self, family: FontFamily) -> Self {
        self.font_family = Some(family);
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = Some(weight);
        self
    }

    pub fn decoration(mut self, decoration: TextDecoration) -> Self {
        self.decoration = Some(decoration);
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn aspect_locked(mut self, locked: bool) -> Self {
        self.aspect_locked = Some(locked);
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Whether the patch touches position or size.
    pub fn touches_geometry(&self) -> bool {
        self.position.is_some() || self.width.is_some() || self.height.is_some()
    }

    /// Apply the patch. Width and height are floored at `min_size`; a
    /// non-positive font size or negative stroke width is ignored.
    pub fn apply(&self, node: &mut Node, min_size: f64) {
        if let Some(position) = self.position {
            node.position = position;
        }
        if let Some(width) = self.width {
            node.width = width.max(min_size);
        }
        if let Some(height) = self.height {
            node.height = height.max(min_size);
        }
        if let Some(locked) = self.aspect_locked {
            node.aspect_locked = locked;
        }

        if let Some(fill) = &self.fill {
            node.style.fill = fill.clone();
        }
        if let Some(color) = self.stroke_color {
            node.style.stroke_color = color;
        }
        if let Some(width) = self.stroke_width.filter(|w| *w >= 0.0) {
            node.style.stroke_width = width;
        }
        if let Some(align) = self.stroke_align {
            node.style.stroke_align = align;
        }

        if let Some(text) = node.text_mut() {
            if let Some(content) = &self.content {
                text.content = content.clone();
            }
            if let Some(family) = self.font_family {
                text.style.font_family = family;
            }
            if let Some(size) = self.font_size.filter(|s| *s > 0.0) {
                text.style.font_size = size;
            }
            if let Some(weight) = self.font_weight {
                text.style.font_weight = weight;
            }
            if let Some(decoration) = self.decoration {
                text.style.decoration = decoration;
            }
            if let Some(align) = self.text_align {
                text.style.align = align;
            }
        }

        if let (Some(new_src), NodeBody::Image { src }) = (&self.src, node.body_mut()) {
            *src = new_src.clone();
        }
    }
}
