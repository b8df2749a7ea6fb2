//! Scripted input for driving a session without a window.
//!
//! A script is a JSON array of steps, e.g.
//! `[{"tool": "rectangle"}, {"pointer": {"down": {"position": {"x": 10, "y": 10}, "button": "left"}}}, "undo"]`.

use inkboard_core::shapes::HexColor;
use inkboard_core::{BackgroundPattern, PointerEvent, ToolKind};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// One host action, as a toolbar or the window system would issue it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptStep {
    Tool(ToolKind),
    Pointer(PointerEvent),
    StrokeColor(HexColor),
    StrokeWidth(f64),
    Background(HexColor),
    Pattern(BackgroundPattern),
    /// Pan by a client-space delta.
    Pan(Vec2),
    Zoom(f64),
    /// Resize the viewport (client pixels).
    Resize(Size),
    Undo,
    Redo,
    Clear,
    FitToContent,
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(json)
}
