//! Scene serialization: JSON round-trip format and SVG vector export.

use crate::scene::Scene;
use crate::shapes::{Element, Shape};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use thiserror::Error;

/// Margin added around the content bounds in SVG export, in world units.
pub const SVG_PADDING: f64 = 50.0;

/// Output format for [`crate::Canvas::export_scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

/// Errors at the serialization boundary.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0:?} export needs a renderer")]
    NeedsRenderer(ExportFormat),
}

/// Serialize the element sequence as pretty-printed JSON.
pub fn to_json(scene: &Scene) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(scene.elements())?)
}

/// Parse an element sequence. Missing `visible`/`locked`/`name`/`id` fields get defaults.
pub fn elements_from_json(json: &str) -> Result<Vec<Element>, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a scene from the JSON format.
pub fn scene_from_json(json: &str) -> Result<Scene, ExportError> {
    elements_from_json(json).map(Scene::from_elements)
}

fn fmt_num(value: f64) -> String {
    // Integral values print without a trailing ".0"
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Render the scene as a standalone SVG document in world space.
///
/// The document covers the bounds of the visible elements padded by
/// [`SVG_PADDING`]; with nothing visible it uses `fallback`, the world window
/// currently on screen.
pub fn to_svg(scene: &Scene, fallback: Rect) -> String {
    let view = scene
        .visible_elements()
        .map(Element::bounds)
        .reduce(|acc, rect| acc.union(rect))
        .map(|b| b.inflate(SVG_PADDING, SVG_PADDING))
        .unwrap_or(fallback);

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
        fmt_num(view.width()),
        fmt_num(view.height()),
        fmt_num(view.x0),
        fmt_num(view.y0),
        fmt_num(view.width()),
        fmt_num(view.height()),
    );

    for element in scene.visible_elements() {
        svg.push('\n');
        write_element(&mut svg, element);
    }
    svg.push_str("\n</svg>\n");
    svg
}

fn write_element(svg: &mut String, element: &Element) {
    let stroke = format!(
        r#"stroke="{}" stroke-width="{}" fill="none""#,
        element.color,
        fmt_num(element.stroke_width)
    );
    let _ = match &element.shape {
        Shape::Rectangle(rect) => {
            let r = rect.as_rect();
            write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" {stroke} />"#,
                fmt_num(r.x0),
                fmt_num(r.y0),
                fmt_num(r.width()),
                fmt_num(r.height()),
            )
        }
        Shape::Ellipse(ellipse) => {
            let center = ellipse.center();
            let radii = ellipse.radii();
            write!(
                svg,
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" {stroke} />"#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(radii.x),
                fmt_num(radii.y),
            )
        }
        Shape::Line(line) => write!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {stroke} />"#,
            fmt_num(line.x1),
            fmt_num(line.y1),
            fmt_num(line.x2),
            fmt_num(line.y2),
        ),
        // No arrowhead marker in the vector form.
        Shape::Arrow(arrow) => write!(
            svg,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {stroke} />"#,
            fmt_num(arrow.x1),
            fmt_num(arrow.y1),
            fmt_num(arrow.x2),
            fmt_num(arrow.y2),
        ),
        Shape::Freehand(stroke_path) => {
            let points = stroke_path
                .points
                .iter()
                .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                .collect::<Vec<_>>()
                .join(" ");
            write!(
                svg,
                r#"<polyline points="{points}" {stroke} stroke-linecap="round" stroke-linejoin="round" />"#
            )
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Arrow, Ellipse, Freehand, HexColor, Rectangle};
    use kurbo::Point;

    fn element(shape: Shape) -> Element {
        Element::new(shape, HexColor::rgb(255, 0, 0), 2.0)
    }

    #[test]
    fn test_json_round_trip() {
        let mut scene = Scene::new();
        scene.append(element(Shape::Rectangle(Rectangle::new(10.0, 10.0, 50.0, 30.0))));
        scene.append(element(Shape::Freehand(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
        ]))));
        let json = to_json(&scene).unwrap();
        let back = scene_from_json(&json).unwrap();
        assert_eq!(back.elements(), scene.elements());
    }

    #[test]
    fn test_import_legacy_records() {
        let json = r##"[
            {"type":"rectangle","x":0,"y":0,"width":10,"height":10,"color":"#000000","strokeWidth":2,"seed":0.42},
            {"type":"ellipse","x":0,"y":0,"width":10,"height":10,"color":"#000000","strokeWidth":2,"seed":7}
        ]"##;
        let scene = scene_from_json(json).unwrap();
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.elements()[0].name, "rectangle 1");
        assert_eq!(scene.elements()[1].name, "ellipse 2");
        assert!(scene.elements().iter().all(|el| el.visible && !el.locked));
        assert_ne!(scene.elements()[0].id(), scene.elements()[1].id());
    }

    #[test]
    fn test_import_numeric_ids() {
        let json = r##"[
            {"id":1712345678901.4321,"type":"rectangle","x":0,"y":0,"width":10,"height":10,"color":"#000000","strokeWidth":2,"seed":0.42},
            {"id":1712345678902,"type":"line","x1":0,"y1":0,"x2":5,"y2":5,"color":"#000000","strokeWidth":2,"seed":0.7},
            {"id":"not-a-uuid","type":"ellipse","x":0,"y":0,"width":10,"height":10,"color":"#000000","strokeWidth":2,"seed":3}
        ]"##;
        let scene = scene_from_json(json).unwrap();
        assert_eq!(scene.len(), 3);
        let ids: std::collections::HashSet<_> = scene.elements().iter().map(Element::id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_import_keeps_uuid_ids() {
        let id = uuid::Uuid::new_v4();
        let json = format!(
            r##"[{{"id":"{id}","type":"rectangle","x":0,"y":0,"width":10,"height":10,"color":"#000000","strokeWidth":2,"seed":1}}]"##
        );
        let scene = scene_from_json(&json).unwrap();
        assert_eq!(scene.elements()[0].id(), id);
    }

    #[test]
    fn test_import_rejects_malformed() {
        assert!(scene_from_json(r#"[{"type":"triangle"}]"#).is_err());
        assert!(scene_from_json("not json").is_err());
    }

    #[test]
    fn test_svg_bounds_and_padding() {
        let mut scene = Scene::new();
        scene.append(element(Shape::Rectangle(Rectangle::new(10.0, 10.0, 50.0, 30.0))));
        let svg = to_svg(&scene, Rect::ZERO);
        assert!(svg.contains(r#"width="150" height="130" viewBox="-40 -40 150 130""#));
        assert!(svg.contains(
            r##"<rect x="10" y="10" width="50" height="30" stroke="#ff0000" stroke-width="2" fill="none" />"##
        ));
    }

    #[test]
    fn test_svg_normalizes_negative_extent() {
        let mut scene = Scene::new();
        scene.append(element(Shape::Ellipse(Ellipse::new(100.0, 50.0, -100.0, -50.0))));
        let svg = to_svg(&scene, Rect::ZERO);
        assert!(svg.contains(r#"<ellipse cx="50" cy="25" rx="50" ry="25""#));
    }

    #[test]
    fn test_svg_arrow_is_plain_line() {
        let mut scene = Scene::new();
        scene.append(element(Shape::Arrow(Arrow::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)))));
        let svg = to_svg(&scene, Rect::ZERO);
        assert!(svg.contains(r#"<line x1="0" y1="0" x2="10" y2="0""#));
        assert!(!svg.contains("marker"));
    }

    #[test]
    fn test_svg_empty_scene_uses_fallback() {
        let svg = to_svg(&Scene::new(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(svg.contains(r#"viewBox="0 0 800 600""#));
    }

    #[test]
    fn test_svg_polyline() {
        let mut scene = Scene::new();
        scene.append(element(Shape::Freehand(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.5, 2.0),
        ]))));
        let svg = to_svg(&scene, Rect::ZERO);
        assert!(svg.contains(r#"<polyline points="0,0 1.5,2""#));
    }
}
