//! Element definitions for the whiteboard.

mod arrow;
mod color;
mod ellipse;
mod freehand;
mod line;
mod rectangle;
mod seed;

pub use arrow::Arrow;
pub use color::{ColorParseError, HexColor};
pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use seed::generate_seed;

use kurbo::{BezPath, Point, Rect, Vec2};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Read an element id, replacing anything that is not a UUID string
/// (older saves use numeric ids) with a fresh one.
fn deserialize_id<'de, D>(deserializer: D) -> Result<ElementId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Uuid(Uuid),
        Other(IgnoredAny),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Uuid(id) => id,
        RawId::Other(_) => Uuid::new_v4(),
    })
}

/// World-space offset applied to duplicated elements.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// Geometry shared by every shape variant.
pub trait ShapeTrait {
    /// Get the bounding box in world coordinates (always positive extent).
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this shape.
    ///
    /// `band` is the half-width of the hit zone around strokes.
    fn hit_test(&self, point: Point, band: f64) -> bool;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Move the shape by a world-space delta.
    fn translate(&mut self, delta: Vec2);
}

/// Shape variant of an element; serialized flat with a `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Arrow(Arrow),
    Freehand(Freehand),
}

/// Discriminant of [`Shape`], used for names and layer filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Freehand,
}

impl ShapeKind {
    /// Lowercase type name as it appears in the scene format.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Freehand => "freehand",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Freehand(_) => ShapeKind::Freehand,
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Arrow(s) => s,
            Shape::Freehand(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Arrow(s) => s,
            Shape::Freehand(s) => s,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point, band: f64) -> bool {
        self.as_trait().hit_test(point, band)
    }

    pub fn to_path(&self) -> BezPath {
        self.as_trait().to_path()
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.as_trait_mut().translate(delta);
    }
}

fn default_visible() -> bool {
    true
}

/// One drawable object on the canvas.
///
/// The wire form is a flat object: shared fields plus the variant's own
/// geometry fields, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default = "Uuid::new_v4", deserialize_with = "deserialize_id")]
    pub(crate) id: ElementId,
    /// Stroke color.
    pub color: HexColor,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Stable seed for the hand-drawn renderer; never regenerated.
    #[serde(default = "generate_seed", deserialize_with = "seed::deserialize")]
    pub seed: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
    /// Display label; empty until the canvas names it.
    #[serde(default)]
    pub name: String,
}

impl Element {
    /// Create a new element with a fresh id and seed.
    pub fn new(shape: Shape, color: HexColor, stroke_width: f64) -> Self {
        Self::with_seed(shape, color, stroke_width, generate_seed())
    }

    /// Create a new element with an explicit seed (e.g. one held by a tool gesture).
    pub fn with_seed(shape: Shape, color: HexColor, stroke_width: f64, seed: u32) -> Self {
        Self {
            shape,
            id: Uuid::new_v4(),
            color,
            stroke_width,
            seed,
            visible: true,
            locked: false,
            name: String::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Hit test with a band proportional to the stroke width.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.shape
            .hit_test(point, crate::geometry::stroke_band(self.stroke_width, tolerance))
    }

    /// Default display name for the `ordinal`-th element of the scene.
    pub fn default_name(kind: ShapeKind, ordinal: usize) -> String {
        format!("{kind} {ordinal}")
    }

    /// Copy with a fresh id, offset geometry and a `"<type> Copy"` name.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = Uuid::new_v4();
        copy.shape.translate(DUPLICATE_OFFSET);
        copy.name = format!("{} Copy", self.kind());
        copy
    }

    /// Assign a fresh id (used when importing records without one collides).
    pub(crate) fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }
}
