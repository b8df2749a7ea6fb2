//! Grid snapping for drawing tools.

use kurbo::Point;

/// Grid size for snapping (matches the visual grid pattern).
pub const GRID_SIZE: f64 = 20.0;

/// Round a value to the nearest multiple of `grid_size`.
///
/// A non-positive grid size disables snapping.
pub fn snap_to_grid(value: f64, grid_size: f64) -> f64 {
    if grid_size <= 0.0 {
        return value;
    }
    (value / grid_size).round() * grid_size
}

/// Snap both coordinates of a point to the grid.
pub fn snap_point(point: Point, grid_size: f64) -> Point {
    Point::new(snap_to_grid(point.x, grid_size), snap_to_grid(point.y, grid_size))
}
