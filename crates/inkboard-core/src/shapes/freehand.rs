//! Freehand drawing shape.

use super::ShapeTrait;
use crate::geometry::{point_to_polyline_dist, points_bounds};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke: the ordered pointer samples of one drag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    /// Points in the freehand path (world space).
    pub points: Vec<Point>,
}

impl Freehand {
    /// Start a stroke at its first sample.
    pub fn new(start: Point) -> Self {
        Self { points: vec![start] }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Freehand {
    fn bounds(&self) -> Rect {
        points_bounds(&self.points).unwrap_or(Rect::ZERO)
    }

    fn hit_test(&self, point: Point, band: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= band
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some((first, rest)) = self.points.split_first() else {
            return path;
        };
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        path
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}
