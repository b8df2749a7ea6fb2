//! Canvas configuration.

use crate::camera::DEFAULT_DEVICE_PIXEL_RATIO;
use crate::input::Modifiers;
use crate::shapes::HexColor;
use crate::snap::GRID_SIZE;
use serde::{Deserialize, Serialize};

/// Repeating decoration drawn beneath the elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    #[default]
    Grid,
    Dots,
    Lines,
    None,
}

/// Modifier that turns a primary-button drag into a pan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanModifier {
    #[default]
    Alt,
    Shift,
    Ctrl,
    Meta,
}

impl PanModifier {
    pub fn is_held(self, modifiers: &Modifiers) -> bool {
        match self {
            PanModifier::Alt => modifiers.alt,
            PanModifier::Shift => modifiers.shift,
            PanModifier::Ctrl => modifiers.ctrl,
            PanModifier::Meta => modifiers.meta,
        }
    }
}

/// Engine configuration. Every field has a default, so partial JSON files load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Background fill color.
    pub background: HexColor,
    pub pattern: BackgroundPattern,
    /// Backing-store pixels per logical pixel.
    pub device_pixel_ratio: f64,
    /// Snap shape tool endpoints to the grid.
    pub snap_to_grid: bool,
    pub grid_size: f64,
    /// Stroke color for new elements.
    pub stroke_color: HexColor,
    /// Stroke width for new elements.
    pub stroke_width: f64,
    pub pan_modifier: PanModifier,
    /// Extra hit slack around strokes, in world units.
    pub hit_tolerance: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: HexColor::white(),
            pattern: BackgroundPattern::Grid,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
            snap_to_grid: false,
            grid_size: GRID_SIZE,
            stroke_color: HexColor::rgb(0x8b, 0x5c, 0xf6),
            stroke_width: 2.0,
            pan_modifier: PanModifier::Alt,
            hit_tolerance: 4.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
