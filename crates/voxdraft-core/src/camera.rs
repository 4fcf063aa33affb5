//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%" in the UI.
pub const BASE_ZOOM: f64 = 1.0;

/// Zoom change per unit of vertical wheel delta.
const WHEEL_ZOOM_SPEED: f64 = -0.001;

/// Camera manages the view transform over the grid.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and grid-space coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan)
    pub offset: Vec2,
    /// Current zoom level (BASE_ZOOM = 100% in UI)
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: BASE_ZOOM,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts grid coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts screen coordinates to grid coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to grid coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a grid point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, keeping the given screen point fixed.
    pub fn set_zoom_at(&mut self, screen_point: Point, zoom: f64) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    /// Zoom the camera by a factor, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        self.set_zoom_at(screen_point, self.zoom * factor);
    }

    /// Apply a mouse wheel delta; scrolling down zooms out.
    pub fn zoom_by_wheel(&mut self, screen_point: Point, delta_y: f64) {
        self.set_zoom_at(screen_point, self.zoom + delta_y * WHEEL_ZOOM_SPEED);
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom / BASE_ZOOM * 100.0).round() as u32
    }

    /// Reset zoom to 100% and center content of the given size in the viewport.
    pub fn center_on(&mut self, content: Size, viewport: Size) {
        self.zoom = BASE_ZOOM;
        self.offset = Vec2::new(
            (viewport.width - content.width * self.zoom) / 2.0,
            (viewport.height - content.height * self.zoom) / 2.0,
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
        assert!((camera.zoom - BASE_ZOOM).abs() < f64::EPSILON);
        assert_eq!(camera.zoom_percent(), 100);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.zoom = 2.0;
        let world = camera.screen_to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(40.0, 10.0);
        let anchor = Point::new(200.0, 150.0);
        let before = camera.screen_to_world(anchor);

        camera.zoom_at(anchor, 2.0);
        let after = camera.screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.zoom_at(Point::ZERO, 1000.0);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zoom() {
        let mut camera = Camera::new();
        camera.zoom_by_wheel(Point::ZERO, -500.0);
        assert!((camera.zoom - 1.5).abs() < 1e-9);
        camera.zoom_by_wheel(Point::ZERO, 1000.0);
        assert!((camera.zoom - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_center_on() {
        let mut camera = Camera::new();
        camera.zoom = 3.0;
        camera.center_on(Size::new(960.0, 960.0), Size::new(1280.0, 1000.0));
        assert!((camera.zoom - BASE_ZOOM).abs() < f64::EPSILON);
        assert!((camera.offset.x - 160.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }
}
