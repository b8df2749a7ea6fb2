//! Rectangle shape.

use super::ShapeTrait;
use crate::geometry::{is_point_in_rectangle, normalized_rect};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at the drag start.
///
/// `width`/`height` keep their sign: a negative extent means the box was
/// dragged up or left of `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle spanning from the drag start to the current point.
    pub fn from_drag(start: Point, current: Point) -> Self {
        Self::new(start.x, start.y, current.x - start.x, current.y - start.y)
    }

    /// Get the rectangle as a positive-extent kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        normalized_rect(self.x, self.y, self.width, self.height)
    }
}

impl ShapeTrait for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, band: f64) -> bool {
        let rect = self.as_rect().inflate(band, band);
        is_point_in_rectangle(point, rect.x0, rect.y0, rect.width(), rect.height())
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}
