//! Arrow shape.

use super::ShapeTrait;
use super::line::{segment_bounds, segment_path};
use crate::geometry::{direction, point_to_segment_dist};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Arrowhead length as a multiple of the stroke width.
pub const HEAD_SIZE_FACTOR: f64 = 3.0;

/// A line with a filled arrowhead at `(x2, y2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Arrow {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// End point (where the arrowhead points).
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Triangle `[tip, left, right]` of the arrowhead for a given stroke width.
    ///
    /// Returns `None` for a zero-length arrow, which has no direction.
    pub fn head(&self, stroke_width: f64) -> Option<[Point; 3]> {
        let dir = direction(self.start(), self.end())?;
        let size = stroke_width.abs() * HEAD_SIZE_FACTOR;
        let perp = Vec2::new(-dir.y, dir.x);
        let tip = self.end();
        let back = tip - dir * size;
        Some([tip, back + perp * (size / 2.0), back - perp * (size / 2.0)])
    }

    /// Closed path of the arrowhead triangle.
    pub fn head_path(&self, stroke_width: f64) -> Option<BezPath> {
        let [tip, left, right] = self.head(stroke_width)?;
        let mut path = BezPath::new();
        path.move_to(tip);
        path.line_to(left);
        path.line_to(right);
        path.close_path();
        Some(path)
    }
}

impl ShapeTrait for Arrow {
    /// Bounds of the shaft; the head is a stroke-width decoration like the stroke itself.
    fn bounds(&self) -> Rect {
        segment_bounds(self.start(), self.end())
    }

    fn hit_test(&self, point: Point, band: f64) -> bool {
        point_to_segment_dist(point, self.start(), self.end()) <= band
    }

    fn to_path(&self) -> BezPath {
        segment_path(self.start(), self.end())
    }

    fn translate(&mut self, delta: Vec2) {
        self.x1 += delta.x;
        self.y1 += delta.y;
        self.x2 += delta.x;
        self.y2 += delta.y;
    }
}
