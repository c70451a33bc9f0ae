//! Camera module for the screen/world transform.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower bound for the view scale.
pub const MIN_SCALE: f64 = 0.1;
/// Default upper bound for the view scale.
pub const MAX_SCALE: f64 = 10.0;

/// Camera manages the view transform for the canvas.
///
/// Screen points map to world points through a pan offset (screen units)
/// followed by a uniform scale:
///
/// ```text
/// world  = (screen - offset) / scale
/// screen = world * scale + offset
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CameraState")]
pub struct Camera {
    /// Current translation offset (pan), in screen units.
    pub offset: Vec2,
    /// Current scale factor. Always within `[min_scale, max_scale]`.
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

/// Serialized camera, re-validated on load.
#[derive(Deserialize)]
struct CameraState {
    offset: Vec2,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl From<CameraState> for Camera {
    fn from(state: CameraState) -> Self {
        let mut camera = Camera::with_bounds(state.min_scale, state.max_scale);
        camera.offset = state.offset;
        camera.set_scale(state.scale);
        camera
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom scale bounds.
    ///
    /// The bounds are sorted. Bounds that are not finite and positive fall
    /// back to [`MIN_SCALE`] and [`MAX_SCALE`].
    pub fn with_bounds(min_scale: f64, max_scale: f64) -> Self {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        let (min_scale, max_scale) = if usable(min_scale) && usable(max_scale) {
            (min_scale.min(max_scale), min_scale.max(max_scale))
        } else {
            (MIN_SCALE, MAX_SCALE)
        };
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    /// Current scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Set the scale, clamped to the allowed range. The offset is untouched.
    /// A non-finite scale is ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(self.min_scale, self.max_scale);
        }
    }

    /// World-to-screen transform for rendering.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Screen-to-world transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.scale,
            (screen_point.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.scale + self.offset.x,
            world_point.y * self.scale + self.offset.y,
        )
    }

    /// Convert a screen-space length (e.g. a hit radius in pixels) to world units.
    pub fn screen_len_to_world(&self, len: f64) -> f64 {
        len / self.scale
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.scale = new_scale;
        self.offset = Vec2::new(
            screen_point.x - world_point.x * new_scale,
            screen_point.y - world_point.y * new_scale,
        );
    }

    /// Apply a wheel event.
    ///
    /// With the zoom modifier held the wheel zooms about the cursor, otherwise
    /// it pans the view against the scroll direction.
    pub fn apply_wheel(&mut self, cursor: Point, delta: Vec2, zoom_modifier: bool, sensitivity: f64) {
        if zoom_modifier {
            let factor = (-delta.y * sensitivity).exp();
            self.zoom_at(cursor, factor);
        } else {
            self.pan(-delta);
        }
    }

    /// Reset camera to the origin at 100%.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
    }

    /// Fit the camera to show the given bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let padded_viewport = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded_viewport.width / bounds.width();
        let scale_y = padded_viewport.height / bounds.height();
        self.scale = scale_x.min(scale_y).clamp(self.min_scale, self.max_scale);

        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);

        self.offset = Vec2::new(
            viewport_center.x - bounds_center.x * self.scale,
            viewport_center.y - bounds_center.y * self.scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_scale() {
        let mut camera = Camera::new();
        camera.set_scale(2.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.set_scale(1.5);

        for &(sx, sy) in &[(123.0, 456.0), (-40.5, 0.25), (0.0, 0.0), (1e4, -3e3)] {
            let original = Point::new(sx, sy);
            let back = camera.world_to_screen(camera.screen_to_world(original));
            assert!((back.x - original.x).abs() < 1e-9);
            assert!((back.y - original.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_affines_match_point_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(12.0, 7.0);
        camera.set_scale(3.0);
        let p = Point::new(5.0, -2.0);
        let a = camera.transform() * p;
        let b = camera.world_to_screen(p);
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        let back = camera.inverse_transform() * a;
        assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(-35.0, 80.0);
        camera.set_scale(0.75);
        let cursor = Point::new(400.0, 300.0);
        let before = camera.screen_to_world(cursor);

        camera.zoom_at(cursor, 1.6);
        let after = camera.screen_to_world(cursor);

        assert!((camera.scale() - 1.2).abs() < 1e-9);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.scale() - camera.min_scale()).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 1e6);
        assert!((camera.scale() - camera.max_scale()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_bounds_sorts_and_sanitizes() {
        let camera = Camera::with_bounds(4.0, 0.5);
        assert!((camera.min_scale() - 0.5).abs() < f64::EPSILON);
        assert!((camera.max_scale() - 4.0).abs() < f64::EPSILON);

        let camera = Camera::with_bounds(f64::NAN, -1.0);
        assert!((camera.min_scale() - MIN_SCALE).abs() < f64::EPSILON);
        assert!((camera.max_scale() - MAX_SCALE).abs() < f64::EPSILON);

        let mut camera = Camera::with_bounds(2.0, 3.0);
        assert!((camera.scale() - 2.0).abs() < f64::EPSILON);
        camera.zoom_at(Point::new(10.0, 10.0), 100.0);
        assert!((camera.scale() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialized_bounds_revalidated() {
        let json = r#"{ "offset": { "x": 5.0, "y": 6.0 }, "scale": 50.0, "min_scale": 8.0, "max_scale": 2.0 }"#;
        let mut camera: Camera = serde_json::from_str(json).unwrap();
        assert!((camera.min_scale() - 2.0).abs() < f64::EPSILON);
        assert!((camera.max_scale() - 8.0).abs() < f64::EPSILON);
        assert!((camera.scale() - 8.0).abs() < f64::EPSILON);
        assert_eq!(camera.offset, Vec2::new(5.0, 6.0));
        camera.zoom_at(Point::ZERO, 0.01);
        assert!((camera.scale() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_pans_without_modifier() {
        let mut camera = Camera::new();
        camera.apply_wheel(Point::new(10.0, 10.0), Vec2::new(5.0, 30.0), false, 0.0015);
        assert_eq!(camera.offset, Vec2::new(-5.0, -30.0));
        assert!((camera.scale() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zooms_with_modifier() {
        let mut camera = Camera::new();
        let cursor = Point::new(200.0, 150.0);
        let before = camera.screen_to_world(cursor);
        camera.apply_wheel(cursor, Vec2::new(0.0, -100.0), true, 0.0015);
        assert!(camera.scale() > 1.0);
        let after = camera.screen_to_world(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_bounds_centers_content() {
        let mut camera = Camera::new();
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        camera.fit_to_bounds(bounds, Size::new(400.0, 400.0), 0.0);
        assert!((camera.scale() - 2.0).abs() < 1e-9);
        let center = camera.world_to_screen(bounds.center());
        assert!((center.x - 200.0).abs() < 1e-9);
        assert!((center.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        camera.pan(Vec2::new(-4.0, 1.0));
        assert!((camera.offset.x - 6.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 21.0).abs() < f64::EPSILON);
    }
}
