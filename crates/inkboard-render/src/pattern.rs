//! Background pattern geometry.
//!
//! Patterns are laid out in world space at fixed spacing, so they pan and zoom
//! with the content. Only the dot radius is compensated for zoom.

use inkboard_core::config::BackgroundPattern;
use inkboard_core::shapes::HexColor;
use kurbo::{BezPath, Circle, Point, Rect, Shape as KurboShape};

/// Spacing of the square grid, in world units.
pub const GRID_SPACING: f64 = 20.0;
/// Spacing of the dot lattice, in world units.
pub const DOT_SPACING: f64 = 30.0;
/// Spacing of the horizontal rules, in world units.
pub const LINE_SPACING: f64 = 40.0;
/// Dot radius in screen pixels.
pub const DOT_RADIUS: f64 = 1.0;
/// Pattern stroke width in world units.
pub const PATTERN_STROKE_WIDTH: f64 = 0.5;

/// Backgrounds that get the light pattern color.
pub const DARK_BACKGROUNDS: [HexColor; 6] = [
    HexColor::rgb(0x00, 0x00, 0x00),
    HexColor::rgb(0x0f, 0x17, 0x2a),
    HexColor::rgb(0x11, 0x18, 0x27),
    HexColor::rgb(0x1e, 0x29, 0x3b),
    HexColor::rgb(0x1f, 0x29, 0x37),
    HexColor::rgb(0x18, 0x18, 0x1b),
];

const LIGHT_PATTERN_COLOR: HexColor = HexColor::rgb(0xe2, 0xe8, 0xf0);
const DARK_PATTERN_COLOR: HexColor = HexColor::rgba(0xff, 0xff, 0xff, 0x26);

/// Whether `color` is one of the known dark backgrounds (alpha ignored).
pub fn is_dark_background(color: HexColor) -> bool {
    DARK_BACKGROUNDS
        .iter()
        .any(|dark| dark.r == color.r && dark.g == color.g && dark.b == color.b)
}

/// Pattern color to use over the given background.
pub fn pattern_color(background: HexColor) -> HexColor {
    if is_dark_background(background) {
        DARK_PATTERN_COLOR
    } else {
        LIGHT_PATTERN_COLOR
    }
}

/// How a pattern path is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatternPaint {
    Stroke(f64),
    Fill,
}

/// Geometry for one background pattern, in world coordinates.
#[derive(Debug, Clone)]
pub struct PatternPath {
    pub path: BezPath,
    pub paint: PatternPaint,
}

/// Snap the visible window outward to whole tiles, plus one extra tile per side.
pub fn tile_window(visible: Rect, spacing: f64) -> Rect {
    Rect::new(
        (visible.x0 / spacing).floor() * spacing - spacing,
        (visible.y0 / spacing).floor() * spacing - spacing,
        (visible.x1 / spacing).ceil() * spacing + spacing,
        (visible.y1 / spacing).ceil() * spacing + spacing,
    )
}

/// Multiples of `spacing` from `start` to `end` inclusive.
fn steps(start: f64, end: f64, spacing: f64) -> impl Iterator<Item = f64> {
    let count = ((end - start) / spacing).round().max(0.0) as usize;
    (0..=count).map(move |i| start + i as f64 * spacing)
}

/// Build the pattern geometry covering `visible` (world space) at `zoom`.
///
/// Returns `None` for [`BackgroundPattern::None`] or a degenerate window.
pub fn build_pattern(pattern: BackgroundPattern, visible: Rect, zoom: f64) -> Option<PatternPath> {
    if !(visible.is_finite() && zoom > 0.0) {
        return None;
    }
    let mut path = BezPath::new();
    let paint = match pattern {
        BackgroundPattern::None => return None,
        BackgroundPattern::Grid => {
            let window = tile_window(visible, GRID_SPACING);
            for x in steps(window.x0, window.x1, GRID_SPACING) {
                path.move_to(Point::new(x, window.y0));
                path.line_to(Point::new(x, window.y1));
            }
            for y in steps(window.y0, window.y1, GRID_SPACING) {
                path.move_to(Point::new(window.x0, y));
                path.line_to(Point::new(window.x1, y));
            }
            PatternPaint::Stroke(PATTERN_STROKE_WIDTH)
        }
        BackgroundPattern::Dots => {
            let window = tile_window(visible, DOT_SPACING);
            let radius = DOT_RADIUS / zoom;
            for x in steps(window.x0, window.x1, DOT_SPACING) {
                for y in steps(window.y0, window.y1, DOT_SPACING) {
                    path.extend(Circle::new(Point::new(x, y), radius).path_elements(0.1));
                }
            }
            PatternPaint::Fill
        }
        BackgroundPattern::Lines => {
            let window = tile_window(visible, LINE_SPACING);
            for y in steps(window.y0, window.y1, LINE_SPACING) {
                path.move_to(Point::new(window.x0, y));
                path.line_to(Point::new(window.x1, y));
            }
            PatternPaint::Stroke(PATTERN_STROKE_WIDTH)
        }
    };
    Some(PatternPath { path, paint })
}
