//! Camera module for pan/zoom transforms.
//!
//! Three coordinate spaces are involved:
//! - *client*: logical (CSS) pixels as reported by pointer events,
//! - *backing*: physical pixels of the render surface (`client * device_pixel_ratio`),
//! - *world*: where element geometry lives.
//!
//! `screen = world * zoom + offset` holds in client space.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 3.0;
/// Increment used by zoom in/out.
pub const ZOOM_STEP: f64 = 0.1;
/// Backing-store density used when the host does not report one.
pub const DEFAULT_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Round to one decimal so repeated steps land on exact values.
fn round_step(zoom: f64) -> f64 {
    (zoom * 10.0).round() / 10.0
}

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling) operations,
/// converting between screen coordinates and world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    /// Current translation offset (pan) in client pixels.
    pub offset: Vec2,
    /// Current zoom level, always within `[MIN_ZOOM, MAX_ZOOM]`.
    zoom: f64,
    /// Physical pixels per client pixel.
    device_pixel_ratio: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera for a surface with the given device pixel ratio.
    pub fn with_device_pixel_ratio(device_pixel_ratio: f64) -> Self {
        let mut camera = Self::new();
        camera.set_device_pixel_ratio(device_pixel_ratio);
        camera
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Non-positive or non-finite ratios are ignored.
    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        if ratio.is_finite() && ratio > 0.0 {
            self.device_pixel_ratio = ratio;
        }
    }

    /// Get the affine transform for rendering.
    ///
    /// This transform converts world coordinates to client coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    ///
    /// This transform converts client coordinates to world coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// World to backing-store pixels: device scale, then pan, then zoom.
    pub fn backing_transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio) * self.transform()
    }

    /// Convert a client point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to client coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Convert a pointer position in client pixels to world coordinates,
    /// going through the backing store.
    pub fn client_to_world(&self, client_point: Point) -> Point {
        let backing = Affine::scale(self.device_pixel_ratio) * client_point;
        self.backing_transform().inverse() * backing
    }

    /// Pan the camera by a delta in client coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, clamped. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(round_step(self.zoom + ZOOM_STEP));
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(round_step(self.zoom - ZOOM_STEP));
    }

    /// Zoom back to 1.0; the pan offset is kept.
    pub fn zoom_reset(&mut self) {
        self.zoom = 1.0;
    }

    /// Zoom to `zoom` (clamped), keeping the given client point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, zoom: f64) {
        let world_point = self.screen_to_world(screen_point);
        self.set_zoom(zoom);

        // Adjust offset so world_point stays at screen_point
        let new_screen = self.world_to_screen(world_point);
        self.offset += screen_point - new_screen;
    }

    /// One zoom step in or out, keeping the given client point fixed.
    pub fn zoom_step_at(&mut self, screen_point: Point, zoom_in: bool) {
        let step = if zoom_in { ZOOM_STEP } else { -ZOOM_STEP };
        self.zoom_at(screen_point, round_step(self.zoom + step));
    }

    /// World-space rectangle visible in a viewport of the given client size.
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        let inverse = self.inverse_transform();
        Rect::from_points(inverse * Point::ZERO, inverse * Point::new(viewport.width, viewport.height))
    }

    /// Fit the camera to show the given bounding box.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.width() <= 0.0 && bounds.height() <= 0.0 {
            self.zoom = 1.0;
        } else {
            let padded_viewport = Size::new(
                (viewport.width - padding * 2.0).max(1.0),
                (viewport.height - padding * 2.0).max(1.0),
            );
            let scale_x = padded_viewport.width / bounds.width().max(f64::EPSILON);
            let scale_y = padded_viewport.height / bounds.height().max(f64::EPSILON);
            self.set_zoom(scale_x.min(scale_y));
        }

        // Center the bounds in the viewport
        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.offset = viewport_center.to_vec2() - bounds_center.to_vec2() * self.zoom;
    }
}
