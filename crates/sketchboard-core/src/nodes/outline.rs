//! World-space outlines: the geometry a renderer paints for each node kind.

use super::path::anchors_to_path;
use super::{Node, NodeBody, ShapeKind};
use kurbo::{BezPath, Ellipse, Point, Rect, Shape as _};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Arrowhead length in world units.
pub const ARROW_HEAD_SIZE: f64 = 15.0;
/// Star inner radius as a fraction of the outer radius.
const STAR_INNER_RATIO: f64 = 0.5;

impl Node {
    /// Outline of the node in world coordinates.
    pub fn outline(&self) -> BezPath {
        let rect = self.rect();
        let origin = self.position;
        match &self.body {
            NodeBody::Sticky(_) | NodeBody::Text(_) | NodeBody::Image { .. } => rect.to_path(0.1),
            NodeBody::Shape(kind) => shape_outline(*kind, rect),
            NodeBody::Line { end } => {
                let mut path = BezPath::new();
                path.move_to(origin);
                path.line_to(origin + end.to_vec2());
                path
            }
            NodeBody::Arrow { end } => arrow_outline(origin, origin + end.to_vec2()),
            NodeBody::Draw { points } => {
                let mut path = BezPath::new();
                let mut iter = points.iter().map(|p| origin + p.to_vec2());
                if let Some(first) = iter.next() {
                    path.move_to(first);
                    for p in iter {
                        path.line_to(p);
                    }
                }
                path
            }
            NodeBody::Path { points, closed } => {
                let absolute: Vec<_> = points
                    .iter()
                    .map(|p| p.denormalized(origin, self.width, self.height))
                    .collect();
                anchors_to_path(&absolute, *closed)
            }
        }
    }
}

fn shape_outline(kind: ShapeKind, rect: Rect) -> BezPath {
    match kind {
        ShapeKind::Rectangle => rect.to_path(0.1),
        ShapeKind::Circle => Ellipse::from_rect(rect).to_path(0.1),
        ShapeKind::Triangle => polygon(&[
            Point::new(rect.center().x, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]),
        ShapeKind::Diamond => {
            let c = rect.center();
            polygon(&[
                Point::new(c.x, rect.y0),
                Point::new(rect.x1, c.y),
                Point::new(c.x, rect.y1),
                Point::new(rect.x0, c.y),
            ])
        }
        ShapeKind::Pentagon => polygon(&regular_vertices(rect, 5, -FRAC_PI_2)),
        ShapeKind::Hexagon => polygon(&regular_vertices(rect, 6, 0.0)),
        ShapeKind::Star => {
            let outer = regular_vertices(rect, 5, -FRAC_PI_2);
            let inner_rect = scale_about_center(rect, STAR_INNER_RATIO);
            let inner = regular_vertices(inner_rect, 5, -FRAC_PI_2 + PI / 5.0);
            let points: Vec<Point> = outer
                .iter()
                .zip(inner.iter())
                .flat_map(|(o, i)| [*o, *i])
                .collect();
            polygon(&points)
        }
    }
}

/// Vertices of a regular polygon inscribed in the ellipse of `rect`.
fn regular_vertices(rect: Rect, sides: usize, start_angle: f64) -> Vec<Point> {
    let c = rect.center();
    let rx = rect.width() / 2.0;
    let ry = rect.height() / 2.0;
    (0..sides)
        .map(|i| {
            let angle = start_angle + TAU * i as f64 / sides as f64;
            Point::new(c.x + rx * angle.cos(), c.y + ry * angle.sin())
        })
        .collect()
}

fn scale_about_center(rect: Rect, factor: f64) -> Rect {
    let c = rect.center();
    let hw = rect.width() * factor / 2.0;
    let hh = rect.height() * factor / 2.0;
    Rect::new(c.x - hw, c.y - hh, c.x + hw, c.y + hh)
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

fn arrow_outline(start: Point, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);

    let dir = end - start;
    let len = dir.hypot();
    if len < f64::EPSILON {
        return path;
    }
    let dir = dir / len;
    let perp = kurbo::Vec2::new(-dir.y, dir.x);
    let head = ARROW_HEAD_SIZE.min(len);
    let back = end - dir * head;
    path.move_to(back + perp * head * 0.5);
    path.line_to(end);
    path.line_to(back - perp * head * 0.5);
    path
}
