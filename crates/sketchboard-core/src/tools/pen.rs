//! Pen tool: click-to-place bezier path authoring.

use crate::nodes::{Node, NodeBody, NodeStyle, PathPoint, anchors_to_path};
use kurbo::{BezPath, Point, Rect, Size};

/// Outcome of a pen press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenPress {
    /// A new anchor was appended at this index and is armed for a handle drag.
    Added(usize),
    /// The press landed on the first anchor of a path with three or more
    /// points; the caller should finish the path as closed.
    Close,
}

/// A finished path, normalized to its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedPath {
    pub position: Point,
    pub size: Size,
    pub points: Vec<PathPoint>,
    pub closed: bool,
}

impl BakedPath {
    pub fn into_node(self) -> Node {
        Node::new(
            self.position,
            self.size,
            NodeStyle::stroke_only(),
            NodeBody::Path {
                points: self.points,
                closed: self.closed,
            },
        )
    }
}

/// In-progress pen path. Anchors are in world space until [`PathBuilder::finish`].
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    points: Vec<PathPoint>,
    /// Anchor currently receiving a handle drag.
    armed: Option<usize>,
    /// Last known cursor position, for the rubber-band segment.
    cursor: Option<Point>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Handle a pen press at a world point.
    ///
    /// `close_threshold` is in screen pixels and is divided by `scale` so the
    /// close target keeps the same on-screen size at every zoom level.
    pub fn press(&mut self, world: Point, scale: f64, close_threshold: f64) -> PenPress {
        self.cursor = Some(world);
        if self.points.len() >= 3 {
            let first = self.points[0].position;
            if (world - first).hypot() <= close_threshold / scale {
                self.armed = None;
                return PenPress::Close;
            }
        }
        self.points.push(PathPoint::new(world));
        let index = self.points.len() - 1;
        self.armed = Some(index);
        PenPress::Added(index)
    }

    /// Pointer moved with the button held: the offset from the armed anchor
    /// becomes its mirrored handle.
    pub fn drag(&mut self, world: Point) {
        self.cursor = Some(world);
        if let Some(point) = self.armed.and_then(|i| self.points.get_mut(i)) {
            point.set_mirrored_handle(world - point.position);
        }
    }

    pub fn release(&mut self) {
        self.armed = None;
    }

    pub fn hover(&mut self, world: Point) {
        self.cursor = Some(world);
    }

    /// Bake the buffered anchors into a normalized path and clear the buffer.
    /// Fewer than two anchors discards the buffer and returns `None`.
    pub fn finish(&mut self, closed: bool) -> Option<BakedPath> {
        let points = std::mem::take(&mut self.points);
        self.armed = None;
        self.cursor = None;
        if points.len() < 2 {
            return None;
        }

        let bbox = points
            .iter()
            .map(|p| Rect::from_points(p.position, p.position))
            .reduce(|acc, r| acc.union(r))?;
        let width = bbox.width().max(1.0);
        let height = bbox.height().max(1.0);
        let origin = bbox.origin();
        let points = points
            .iter()
            .map(|p| p.normalized(origin, width, height))
            .collect();

        Some(BakedPath {
            position: origin,
            size: Size::new(width, height),
            points,
            closed,
        })
    }

    /// Abandon the in-progress path.
    pub fn cancel(&mut self) {
        self.points.clear();
        self.armed = None;
        self.cursor = None;
    }

    /// Live preview in world space, with a straight segment to the cursor
    /// while no handle is being dragged.
    pub fn preview(&self) -> Option<BezPath> {
        let last = self.points.last()?;
        let mut path = anchors_to_path(&self.points, false);
        if let (None, Some(cursor)) = (self.armed, self.cursor) {
            if cursor != last.position {
                path.line_to(cursor);
            }
        }
        Some(path)
    }

    /// The preview as an SVG path string.
    pub fn preview_svg(&self) -> Option<String> {
        self.preview().map(|p| p.to_svg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Vec2};

    fn click(builder: &mut PathBuilder, x: f64, y: f64) -> PenPress {
        let press = builder.press(Point::new(x, y), 1.0, 10.0);
        builder.release();
        press
    }

    #[test]
    fn test_normalized_closed_triangle() {
        let mut pen = PathBuilder::new();
        click(&mut pen, 0.0, 0.0);
        click(&mut pen, 100.0, 0.0);
        click(&mut pen, 100.0, 100.0);
        assert_eq!(click(&mut pen, 2.0, 3.0), PenPress::Close);

        let baked = pen.finish(true).unwrap();
        assert_eq!(baked.position, Point::ZERO);
        assert_eq!(baked.size, Size::new(100.0, 100.0));
        let positions: Vec<Point> = baked.points.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(baked.closed);
        assert!(pen.is_empty());
    }

    #[test]
    fn test_close_needs_three_points() {
        let mut pen = PathBuilder::new();
        click(&mut pen, 0.0, 0.0);
        click(&mut pen, 100.0, 0.0);
        assert_eq!(click(&mut pen, 1.0, 1.0), PenPress::Added(2));
    }

    #[test]
    fn test_close_threshold_scales_with_zoom() {
        let mut pen = PathBuilder::new();
        for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
            pen.press(Point::new(x, y), 4.0, 10.0);
            pen.release();
        }
        // 10 screen px at 4x zoom is 2.5 world units.
        assert_eq!(pen.press(Point::new(3.0, 0.0), 4.0, 10.0), PenPress::Added(3));
        pen.release();
        assert_eq!(pen.press(Point::new(2.0, 0.0), 4.0, 10.0), PenPress::Close);
    }

    #[test]
    fn test_drag_sets_mirrored_handle() {
        let mut pen = PathBuilder::new();
        pen.press(Point::new(10.0, 10.0), 1.0, 10.0);
        pen.drag(Point::new(30.0, 15.0));
        pen.release();
        let handles = pen.points()[0].handles();
        assert_eq!(handles.outgoing(), Some(Vec2::new(20.0, 5.0)));
        assert_eq!(handles.incoming(), Some(Vec2::new(-20.0, -5.0)));

        // Moving after release does not touch the handle.
        pen.drag(Point::new(90.0, 90.0));
        assert_eq!(pen.points()[0].handles().outgoing(), Some(Vec2::new(20.0, 5.0)));
    }

    #[test]
    fn test_finish_discards_short_path() {
        let mut pen = PathBuilder::new();
        click(&mut pen, 5.0, 5.0);
        assert!(pen.finish(false).is_none());
        assert!(pen.is_empty());
    }

    #[test]
    fn test_degenerate_box_floors_at_one() {
        let mut pen = PathBuilder::new();
        click(&mut pen, 0.0, 50.0);
        click(&mut pen, 80.0, 50.0);
        let baked = pen.finish(false).unwrap();
        assert_eq!(baked.size, Size::new(80.0, 1.0));
    }

    #[test]
    fn test_handles_normalized_by_box() {
        let mut pen = PathBuilder::new();
        pen.press(Point::new(0.0, 0.0), 1.0, 10.0);
        pen.drag(Point::new(20.0, 10.0));
        pen.release();
        click(&mut pen, 200.0, 100.0);
        let baked = pen.finish(false).unwrap();
        let h = baked.points[0].handles().outgoing().unwrap();
        assert!((h.x - 0.1).abs() < 1e-12);
        assert!((h.y - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_preview_rubber_band() {
        let mut pen = PathBuilder::new();
        assert!(pen.preview().is_none());
        click(&mut pen, 0.0, 0.0);
        click(&mut pen, 50.0, 0.0);
        pen.hover(Point::new(50.0, 50.0));
        let els = pen.preview().unwrap().elements().to_vec();
        assert_eq!(els.len(), 3);
        assert_eq!(els[2], PathEl::LineTo(Point::new(50.0, 50.0)));

        // No rubber band while a handle is being dragged.
        pen.press(Point::new(100.0, 0.0), 1.0, 10.0);
        pen.drag(Point::new(120.0, 0.0));
        assert_eq!(pen.preview().unwrap().elements().len(), 3);
        assert!(pen.preview_svg().unwrap().starts_with("M0"));
    }

    #[test]
    fn test_cancel() {
        let mut pen = PathBuilder::new();
        click(&mut pen, 0.0, 0.0);
        click(&mut pen, 10.0, 0.0);
        pen.cancel();
        assert!(pen.is_empty());
        assert!(pen.preview().is_none());
    }
}
