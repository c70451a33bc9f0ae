//! Resize handles and the resize rules.

use crate::nodes::{Node, NodeBody, NodeKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A resize handle label: one edge or two adjacent edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResizeHandle {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NW,
        ResizeHandle::N,
        ResizeHandle::NE,
        ResizeHandle::E,
        ResizeHandle::SE,
        ResizeHandle::S,
        ResizeHandle::SW,
        ResizeHandle::W,
    ];

    pub fn has_n(self) -> bool {
        matches!(self, ResizeHandle::N | ResizeHandle::NE | ResizeHandle::NW)
    }

    pub fn has_s(self) -> bool {
        matches!(self, ResizeHandle::S | ResizeHandle::SE | ResizeHandle::SW)
    }

    pub fn has_e(self) -> bool {
        matches!(self, ResizeHandle::E | ResizeHandle::NE | ResizeHandle::SE)
    }

    pub fn has_w(self) -> bool {
        matches!(self, ResizeHandle::W | ResizeHandle::NW | ResizeHandle::SW)
    }

    pub fn is_corner(self) -> bool {
        (self.has_n() || self.has_s()) && (self.has_e() || self.has_w())
    }

    pub fn label(self) -> &'static str {
        match self {
            ResizeHandle::N => "n",
            ResizeHandle::S => "s",
            ResizeHandle::E => "e",
            ResizeHandle::W => "w",
            ResizeHandle::NE => "ne",
            ResizeHandle::NW => "nw",
            ResizeHandle::SE => "se",
            ResizeHandle::SW => "sw",
        }
    }

    /// Position of the handle on a box.
    pub fn position(self, rect: Rect) -> Point {
        let c = rect.center();
        let x = if self.has_w() {
            rect.x0
        } else if self.has_e() {
            rect.x1
        } else {
            c.x
        };
        let y = if self.has_n() {
            rect.y0
        } else if self.has_s() {
            rect.y1
        } else {
            c.y
        };
        Point::new(x, y)
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error parsing a compass label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown resize handle `{0}`")]
pub struct ParseHandleError(pub String);

impl FromStr for ResizeHandle {
    type Err = ParseHandleError;

    /// Accepts one or two letters of `n`, `s`, `e`, `w` in either order,
    /// case-insensitive. Opposite edges cannot be combined.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let (mut n, mut south, mut e, mut w) = (false, false, false, false);
        if lower.is_empty() || lower.len() > 2 {
            return Err(ParseHandleError(s.to_string()));
        }
        for c in lower.chars() {
            let flag = match c {
                'n' => &mut n,
                's' => &mut south,
                'e' => &mut e,
                'w' => &mut w,
                _ => return Err(ParseHandleError(s.to_string())),
            };
            if *flag {
                return Err(ParseHandleError(s.to_string()));
            }
            *flag = true;
        }
        match (n, south, e, w) {
            (true, false, false, false) => Ok(ResizeHandle::N),
            (false, true, false, false) => Ok(ResizeHandle::S),
            (false, false, true, false) => Ok(ResizeHandle::E),
            (false, false, false, true) => Ok(ResizeHandle::W),
            (true, false, true, false) => Ok(ResizeHandle::NE),
            (true, false, false, true) => Ok(ResizeHandle::NW),
            (false, true, true, false) => Ok(ResizeHandle::SE),
            (false, true, false, true) => Ok(ResizeHandle::SW),
            _ => Err(ParseHandleError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ResizeHandle {
    type Error = ParseHandleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ResizeHandle> for String {
    fn from(handle: ResizeHandle) -> Self {
        handle.label().to_string()
    }
}

/// A resize handle placed on a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in world coordinates.
    pub position: Point,
    pub kind: ResizeHandle,
}

impl Handle {
    /// Check if a world point hits this handle.
    /// `tolerance` should already be adjusted for camera zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Handles offered for a node. Text nodes get the four corners plus the
/// east and west sides; lines and arrows get none.
pub fn handles_for(node: &Node) -> Vec<Handle> {
    let rect = node.rect();
    let kinds: &[ResizeHandle] = match node.kind() {
        NodeKind::Line | NodeKind::Arrow => &[],
        NodeKind::Text => &[
            ResizeHandle::NW,
            ResizeHandle::NE,
            ResizeHandle::E,
            ResizeHandle::SE,
            ResizeHandle::SW,
            ResizeHandle::W,
        ],
        _ => &ResizeHandle::ALL,
    };
    kinds
        .iter()
        .map(|&kind| Handle {
            position: kind.position(rect),
            kind,
        })
        .collect()
}

/// The handle of `node` under a world point, if any.
pub fn hit_test_handle(node: &Node, point: Point, tolerance: f64) -> Option<ResizeHandle> {
    handles_for(node)
        .into_iter()
        .find(|h| h.hit_test(point, tolerance))
        .map(|h| h.kind)
}

/// Geometry captured when a resize starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub font_size: Option<f64>,
    pub kind: NodeKind,
    pub keeps_aspect: bool,
}

impl ResizeStart {
    pub fn capture(node: &Node) -> Self {
        Self {
            position: node.position,
            width: node.width,
            height: node.height,
            font_size: node.font_size(),
            kind: node.kind(),
            keeps_aspect: node.keeps_aspect(),
        }
    }
}

/// Limits applied while resizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRules {
    pub min_size: f64,
    pub min_font_size: f64,
}

/// New geometry produced by a resize step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeResult {
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub font_size: Option<f64>,
}

impl ResizeResult {
    /// Write the geometry into `node`, rescaling freehand samples with the box.
    pub fn apply(&self, node: &mut Node) {
        let sx = if node.width > f64::EPSILON { self.width / node.width } else { 1.0 };
        let sy = if node.height > f64::EPSILON { self.height / node.height } else { 1.0 };
        if let NodeBody::Draw { points } = node.body_mut() {
            for p in points.iter_mut() {
                *p = Point::new(p.x * sx, p.y * sy);
            }
        }
        node.position = self.position;
        node.width = self.width;
        node.height = self.height;
        if let (Some(size), Some(text)) = (self.font_size, node.text_mut()) {
            text.style.font_size = size;
        }
    }
}

/// Compute the geometry for dragging `handle` by `delta` (world units from
/// the press point).
///
/// Each letter of the handle licenses its edge; `n` and `w` move the origin
/// so the opposite edge stays put. Aspect-locked nodes keep their ratio,
/// driven by width when the handle has `e`/`w` and by height otherwise.
/// Text corners scale the font with the width; text sides change width only.
/// Width and height never drop below `rules.min_size`.
pub fn apply_resize(start: &ResizeStart, handle: ResizeHandle, delta: Vec2, rules: ResizeRules) -> ResizeResult {
    let (w0, h0) = (start.width, start.height);
    let mut w = w0;
    let mut h = h0;
    let mut font_size = start.font_size;
    let min = rules.min_size;

    if handle.has_e() {
        w = w0 + delta.x;
    } else if handle.has_w() {
        w = w0 - delta.x;
    }

    if start.kind == NodeKind::Text {
        if handle.is_corner() {
            let ratio = if w0 > f64::EPSILON { w / w0 } else { 1.0 };
            h = h0 * ratio;
            font_size = start
                .font_size
                .map(|f| (f * ratio).max(rules.min_font_size).round());
        }
    } else {
        if handle.has_s() {
            h = h0 + delta.y;
        } else if handle.has_n() {
            h = h0 - delta.y;
        }
        if start.keeps_aspect && w0 > f64::EPSILON && h0 > f64::EPSILON {
            // The driving edge is floored so that neither side drops below
            // the minimum once the ratio is applied.
            let ratio = w0 / h0;
            if handle.has_e() || handle.has_w() {
                w = w.max(min).max(min * ratio);
                h = w / ratio;
            } else {
                h = h.max(min).max(min / ratio);
                w = h * ratio;
            }
        }
    }

    let w = w.max(min);
    let h = h.max(min);
    let x = if handle.has_w() { start.position.x + w0 - w } else { start.position.x };
    let y = if handle.has_n() { start.position.y + h0 - h } else { start.position.y };

    ResizeResult {
        position: Point::new(x, y),
        width: w,
        height: h,
        font_size,
    }
}
