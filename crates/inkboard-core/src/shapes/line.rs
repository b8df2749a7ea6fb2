//! Line shape.

use super::ShapeTrait;
use crate::geometry::point_to_segment_dist;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight segment between two world-space endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Line {
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

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        (self.end() - self.start()).hypot()
    }
}

/// Shared segment geometry for lines and arrows.
pub(super) fn segment_bounds(start: Point, end: Point) -> Rect {
    Rect::from_points(start, end)
}

pub(super) fn segment_path(start: Point, end: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(end);
    path
}

impl ShapeTrait for Line {
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
