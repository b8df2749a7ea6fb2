//! Ellipse shape.

use super::ShapeTrait;
use crate::geometry::{is_point_in_ellipse, normalized_rect};
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the box spanned by `(x, y)` and the signed extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Ellipse {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Create an ellipse whose box spans from the drag start to the current point.
    pub fn from_drag(start: Point, current: Point) -> Self {
        Self::new(start.x, start.y, current.x - start.x, current.y - start.y)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Radii (always non-negative).
    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.width.abs() / 2.0, self.height.abs() / 2.0)
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center(), self.radii(), 0.0)
    }
}

impl ShapeTrait for Ellipse {
    fn bounds(&self) -> Rect {
        normalized_rect(self.x, self.y, self.width, self.height)
    }

    fn hit_test(&self, point: Point, band: f64) -> bool {
        let rect = self.bounds().inflate(band, band);
        is_point_in_ellipse(point, rect.x0, rect.y0, rect.width(), rect.height())
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}
