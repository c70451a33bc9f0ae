//! Node definitions for the whiteboard.

mod outline;
mod patch;
mod path;
mod style;
mod text;

pub use patch::NodePatch;
pub use path::{Handles, PathPoint, anchors_to_path};
pub use style::{Fill, NodeStyle, STICKY_PALETTE, SerializableColor, StrokeAlign, palette_color};
pub use text::{FontFamily, FontWeight, TextAlign, TextContent, TextDecoration, TextStyle};

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for nodes.
pub type NodeId = Uuid;

/// Kind tag of a node. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Sticky,
    Text,
    Rectangle,
    Circle,
    Triangle,
    Star,
    Diamond,
    Hexagon,
    Pentagon,
    Arrow,
    Line,
    Draw,
    Path,
    Image,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Sticky => "sticky",
            NodeKind::Text => "text",
            NodeKind::Rectangle => "rectangle",
            NodeKind::Circle => "circle",
            NodeKind::Triangle => "triangle",
            NodeKind::Star => "star",
            NodeKind::Diamond => "diamond",
            NodeKind::Hexagon => "hexagon",
            NodeKind::Pentagon => "pentagon",
            NodeKind::Arrow => "arrow",
            NodeKind::Line => "line",
            NodeKind::Draw => "draw",
            NodeKind::Path => "path",
            NodeKind::Image => "image",
        }
    }

    /// Geometric kind, if this is one of the plain shapes.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            NodeKind::Rectangle => Some(ShapeKind::Rectangle),
            NodeKind::Circle => Some(ShapeKind::Circle),
            NodeKind::Triangle => Some(ShapeKind::Triangle),
            NodeKind::Star => Some(ShapeKind::Star),
            NodeKind::Diamond => Some(ShapeKind::Diamond),
            NodeKind::Hexagon => Some(ShapeKind::Hexagon),
            NodeKind::Pentagon => Some(ShapeKind::Pentagon),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The plain geometric shapes, all described by their bounding box alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Diamond,
    Hexagon,
    Pentagon,
}

impl From<ShapeKind> for NodeKind {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => NodeKind::Rectangle,
            ShapeKind::Circle => NodeKind::Circle,
            ShapeKind::Triangle => NodeKind::Triangle,
            ShapeKind::Star => NodeKind::Star,
            ShapeKind::Diamond => NodeKind::Diamond,
            ShapeKind::Hexagon => NodeKind::Hexagon,
            ShapeKind::Pentagon => NodeKind::Pentagon,
        }
    }
}

/// Kind-specific payload. Each variant carries only the fields meaningful
/// to its kind; all coordinates are node-local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeBody {
    Sticky(TextContent),
    Text(TextContent),
    Shape(ShapeKind),
    /// Segment from the local origin to `end`.
    Line { end: Point },
    /// Segment from the local origin to `end`, with a head at `end`.
    Arrow { end: Point },
    /// Freehand samples.
    Draw { points: Vec<Point> },
    /// Anchors normalized to the node's box (0..1 on both axes).
    Path { points: Vec<PathPoint>, closed: bool },
    Image { src: String },
}

impl NodeBody {
    /// Default payload for a freshly created node of `kind`.
    pub fn for_kind(kind: NodeKind, text_style: &TextStyle) -> Self {
        match kind {
            NodeKind::Sticky => NodeBody::Sticky(TextContent::new("", text_style.clone())),
            NodeKind::Text => NodeBody::Text(TextContent::new("", text_style.clone())),
            NodeKind::Line => NodeBody::Line { end: Point::ZERO },
            NodeKind::Arrow => NodeBody::Arrow { end: Point::ZERO },
            NodeKind::Draw => NodeBody::Draw {
                points: vec![Point::ZERO],
            },
            NodeKind::Path => NodeBody::Path {
                points: Vec::new(),
                closed: false,
            },
            NodeKind::Image => NodeBody::Image { src: String::new() },
            other => match other.shape_kind() {
                Some(shape) => NodeBody::Shape(shape),
                None => NodeBody::Shape(ShapeKind::Rectangle),
            },
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeBody::Sticky(_) => NodeKind::Sticky,
            NodeBody::Text(_) => NodeKind::Text,
            NodeBody::Shape(shape) => (*shape).into(),
            NodeBody::Line { .. } => NodeKind::Line,
            NodeBody::Arrow { .. } => NodeKind::Arrow,
            NodeBody::Draw { .. } => NodeKind::Draw,
            NodeBody::Path { .. } => NodeKind::Path,
            NodeBody::Image { .. } => NodeKind::Image,
        }
    }
}

/// A placeable canvas entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    /// Top-left corner (for line/arrow: the start point).
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub aspect_locked: bool,
    pub style: NodeStyle,
    body: NodeBody,
}

impl Node {
    /// Create a node with a fresh id.
    pub fn new(position: Point, size: Size, style: NodeStyle, body: NodeBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width: size.width,
            height: size.height,
            aspect_locked: matches!(body, NodeBody::Image { .. }),
            style,
            body,
        }
    }

    /// Create a node of `kind` with its default payload and style.
    pub fn of_kind(kind: NodeKind, position: Point, size: Size, text_style: &TextStyle) -> Self {
        let style = match kind {
            NodeKind::Sticky => NodeStyle::sticky(palette_color("yellow")),
            NodeKind::Text | NodeKind::Line | NodeKind::Arrow | NodeKind::Draw | NodeKind::Path => {
                NodeStyle::stroke_only()
            }
            _ => NodeStyle::default(),
        };
        Self::new(position, size, style, NodeBody::for_kind(kind, text_style))
    }

    /// Create an image node.
    pub fn image(src: impl Into<String>, position: Point, size: Size) -> Self {
        Self::new(
            position,
            size,
            NodeStyle::stroke_only(),
            NodeBody::Image { src: src.into() },
        )
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.body.kind()
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    /// Mutable payload access. The variant itself cannot change through this
    /// borrow without replacing the whole value, which the engine never does.
    pub(crate) fn body_mut(&mut self) -> &mut NodeBody {
        &mut self.body
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The node's own box: `position` plus `width`/`height`.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// World-space bounding box.
    pub fn bounds(&self) -> Rect {
        match &self.body {
            NodeBody::Line { end } | NodeBody::Arrow { end } => {
                Rect::from_points(self.position, self.position + end.to_vec2())
            }
            _ => self.rect(),
        }
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Text payload of sticky and text nodes.
    pub fn text(&self) -> Option<&TextContent> {
        match &self.body {
            NodeBody::Sticky(t) | NodeBody::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextContent> {
        match &mut self.body {
            NodeBody::Sticky(t) | NodeBody::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn font_size(&self) -> Option<f64> {
        self.text().map(|t| t.style.font_size)
    }

    /// Both endpoints of a line or arrow, node-local. The first is always the origin.
    pub fn endpoints(&self) -> Option<[Point; 2]> {
        match &self.body {
            NodeBody::Line { end } | NodeBody::Arrow { end } => Some([Point::ZERO, *end]),
            _ => None,
        }
    }

    /// Whether corner resizing keeps the width/height ratio.
    pub fn keeps_aspect(&self) -> bool {
        self.aspect_locked || self.kind() == NodeKind::Image
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Raise width and height to at least `min`.
    pub fn floor_size(&mut self, min: f64) {
        self.width = self.width.max(min);
        self.height = self.height.max(min);
    }

    /// Check if a world point hits this node.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        match &self.body {
            NodeBody::Line { end } | NodeBody::Arrow { end } => {
                let local = point - self.position.to_vec2();
                point_to_segment_dist(local, Point::ZERO, *end) <= reach
            }
            NodeBody::Draw { points } if points.len() > 1 => {
                let local = point - self.position.to_vec2();
                point_to_polyline_dist(local, points) <= reach
            }
            _ => self.bounds().inflate(tolerance, tolerance).contains(point),
        }
    }

    /// Open-interval overlap of the node's bounding box with `rect`.
    pub fn overlaps(&self, rect: Rect) -> bool {
        let b = self.bounds();
        b.x0 < rect.x1 && b.x1 > rect.x0 && b.y0 < rect.y1 && b.y1 > rect.y0
    }

    /// Follow the pointer while the node is being created by a drag from
    /// `origin`: freehand strokes append a sample and grow their box, lines
    /// and arrows move their end point, every other kind spans the rectangle
    /// between `origin` and `world`.
    pub(crate) fn extend_creation(&mut self, origin: Point, world: Point) {
        let local = (world - self.position).to_point();
        match &mut self.body {
            NodeBody::Draw { points } => {
                points.push(local);
                self.width = self.width.max(local.x);
                self.height = self.height.max(local.y);
            }
            NodeBody::Line { end } | NodeBody::Arrow { end } => {
                *end = local;
                self.width = local.x.abs();
                self.height = local.y.abs();
            }
            _ => {
                let rect = Rect::from_points(origin, world);
                self.position = rect.origin();
                self.width = rect.width();
                self.height = rect.height();
            }
        }
    }

    /// Rebase a freehand stroke so its samples start at the local origin and
    /// the box matches their extent.
    pub(crate) fn normalize_stroke(&mut self) {
        let NodeBody::Draw { points } = &mut self.body else {
            return;
        };
        let Some(first) = points.first().copied() else {
            return;
        };
        let (min, max) = points.iter().fold((first, first), |(mn, mx), p| {
            (
                Point::new(mn.x.min(p.x), mn.y.min(p.y)),
                Point::new(mx.x.max(p.x), mx.y.max(p.y)),
            )
        });
        let shift = min.to_vec2();
        for p in points.iter_mut() {
            *p -= shift;
        }
        self.position += shift;
        self.width = max.x - min.x;
        self.height = max.y - min.y;
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}
