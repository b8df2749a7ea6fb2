//! Inkboard Core Library
//!
//! Platform-agnostic drawing engine for the Inkboard whiteboard: element
//! model, scene store, undo history, view transform, pointer interaction
//! and JSON/SVG export.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod export;
pub mod geometry;
pub mod history;
pub mod input;
mod interaction;
pub mod scene;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, ElementPatch};
pub use config::{BackgroundPattern, CanvasConfig, PanModifier};
pub use export::{ExportError, ExportFormat};
pub use history::History;
pub use input::{Modifiers, MouseButton, PointerEvent};
pub use scene::{LayerStats, ReorderDirection, Scene};
pub use shapes::{Element, ElementId, HexColor, Shape, ShapeKind};
pub use snap::{GRID_SIZE, snap_point, snap_to_grid};
pub use tools::{ToolKind, ToolManager};
