//! Bezier path anchors.

use kurbo::{BezPath, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Control handles of a path anchor, relative to the anchor.
///
/// Only mirrored handles exist today: the incoming handle is always the
/// negated outgoing handle. Independent handle editing would be a new
/// variant here rather than a change to how callers read handles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Handles {
    #[default]
    None,
    Mirrored { outgoing: Vec2 },
}

impl Handles {
    /// Incoming (left) handle offset.
    pub fn incoming(&self) -> Option<Vec2> {
        match self {
            Handles::None => None,
            Handles::Mirrored { outgoing } => Some(-*outgoing),
        }
    }

    /// Outgoing (right) handle offset.
    pub fn outgoing(&self) -> Option<Vec2> {
        match self {
            Handles::None => None,
            Handles::Mirrored { outgoing } => Some(*outgoing),
        }
    }

    /// Scale both handles component-wise.
    fn scaled(&self, sx: f64, sy: f64) -> Self {
        match self {
            Handles::None => Handles::None,
            Handles::Mirrored { outgoing } => Handles::Mirrored {
                outgoing: Vec2::new(outgoing.x * sx, outgoing.y * sy),
            },
        }
    }
}

/// An anchor of a bezier path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub position: Point,
    #[serde(default)]
    handles: Handles,
}

impl PathPoint {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            handles: Handles::None,
        }
    }

    /// Create an anchor with mirrored handles.
    pub fn with_mirrored(position: Point, outgoing: Vec2) -> Self {
        let mut point = Self::new(position);
        point.set_mirrored_handle(outgoing);
        point
    }

    pub fn handles(&self) -> Handles {
        self.handles
    }

    /// Set the outgoing handle; the incoming handle becomes its negation.
    /// A zero offset clears the handles.
    pub fn set_mirrored_handle(&mut self, outgoing: Vec2) {
        self.handles = if outgoing.hypot2() < f64::EPSILON {
            Handles::None
        } else {
            Handles::Mirrored { outgoing }
        };
    }

    /// Absolute position of the outgoing control point.
    pub fn outgoing_control(&self) -> Option<Point> {
        self.handles.outgoing().map(|h| self.position + h)
    }

    /// Absolute position of the incoming control point.
    pub fn incoming_control(&self) -> Option<Point> {
        self.handles.incoming().map(|h| self.position + h)
    }

    /// Express the anchor as fractions of a box: position relative to the
    /// box origin, then both position and handles divided by the box size.
    pub fn normalized(&self, origin: Point, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(
                (self.position.x - origin.x) / width,
                (self.position.y - origin.y) / height,
            ),
            handles: self.handles.scaled(1.0 / width, 1.0 / height),
        }
    }

    /// Inverse of [`PathPoint::normalized`].
    pub fn denormalized(&self, origin: Point, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(
                origin.x + self.position.x * width,
                origin.y + self.position.y * height,
            ),
            handles: self.handles.scaled(width, height),
        }
    }
}

/// Build a path through the anchors: a cubic segment where the previous
/// anchor has an outgoing handle and the current one an incoming handle,
/// a straight segment otherwise.
pub fn anchors_to_path(points: &[PathPoint], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(first.position);
    for pair in points.windows(2) {
        push_segment(&mut path, &pair[0], &pair[1]);
    }
    if closed && points.len() > 2 {
        if let Some(last) = points.last() {
            push_segment(&mut path, last, first);
        }
        path.close_path();
    }
    path
}

fn push_segment(path: &mut BezPath, from: &PathPoint, to: &PathPoint) {
    match (from.outgoing_control(), to.incoming_control()) {
        (Some(c1), Some(c2)) => path.curve_to(c1, c2, to.position),
        _ => path.line_to(to.position),
    }
}
