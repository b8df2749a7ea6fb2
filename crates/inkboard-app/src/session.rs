//! A drawing session: one canvas, its renderer and the redraw schedule.

use crate::error::AppError;
use crate::file_ops::write_export;
use crate::script::ScriptStep;
use inkboard_core::{Canvas, CanvasConfig, ElementId, ExportFormat};
use inkboard_render::{RenderContext, Renderer, SkiaRenderer};
use std::path::Path;

pub struct Session {
    canvas: Canvas,
    renderer: SkiaRenderer,
    /// Canvas revision shown by the last frame.
    rendered_revision: Option<u64>,
    frames_rendered: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Session {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            canvas: Canvas::with_config(config),
            renderer: SkiaRenderer::new(),
            rendered_revision: None,
            frames_rendered: 0,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn renderer(&self) -> &SkiaRenderer {
        &self.renderer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Import a JSON scene into the canvas. Returns the number of elements.
    pub fn load_scene(&mut self, json: &str) -> Result<usize, AppError> {
        Ok(self.canvas.import_json(json)?)
    }

    /// Whether the canvas changed since the last frame.
    pub fn needs_redraw(&self) -> bool {
        self.rendered_revision != Some(self.canvas.revision())
    }

    /// Render a frame if the canvas changed. Returns whether a frame was drawn.
    pub fn redraw_if_needed(&mut self) -> Result<bool, AppError> {
        if !self.needs_redraw() {
            return Ok(false);
        }
        let ctx = RenderContext::new(&self.canvas);
        self.renderer.render_frame(&ctx)?;
        self.rendered_revision = Some(self.canvas.revision());
        self.frames_rendered += 1;
        Ok(true)
    }

    /// Apply one host action. Returns the id of an element it committed.
    pub fn apply(&mut self, step: &ScriptStep) -> Option<ElementId> {
        let canvas = &mut self.canvas;
        match step {
            ScriptStep::Tool(tool) => canvas.set_tool(*tool),
            ScriptStep::Pointer(event) => return canvas.handle_pointer_event(event.clone()),
            ScriptStep::StrokeColor(color) => canvas.set_stroke_color(*color),
            ScriptStep::StrokeWidth(width) => canvas.set_stroke_width(*width),
            ScriptStep::Background(color) => canvas.set_background(*color),
            ScriptStep::Pattern(pattern) => canvas.set_pattern(*pattern),
            ScriptStep::Pan(delta) => canvas.pan(delta.x, delta.y),
            ScriptStep::Zoom(zoom) => canvas.set_zoom(*zoom),
            ScriptStep::Resize(size) => canvas.set_viewport_size(size.width, size.height),
            ScriptStep::Undo => {
                canvas.undo();
            }
            ScriptStep::Redo => {
                canvas.redo();
            }
            ScriptStep::Clear => canvas.clear(),
            ScriptStep::FitToContent => canvas.fit_to_content(),
        }
        None
    }

    /// Apply every step, redrawing after each one that changed the canvas.
    /// Returns the ids of committed elements in order.
    pub fn run_script(&mut self, steps: &[ScriptStep]) -> Result<Vec<ElementId>, AppError> {
        let mut committed = Vec::new();
        for step in steps {
            committed.extend(self.apply(step));
            self.redraw_if_needed()?;
        }
        log::info!(
            "Replayed {} steps: {} elements committed, {} frames",
            steps.len(),
            committed.len(),
            self.frames_rendered
        );
        Ok(committed)
    }

    /// Export the scene. PNG is a snapshot of the current frame.
    pub fn export(&mut self, format: ExportFormat) -> Result<Vec<u8>, AppError> {
        match format {
            ExportFormat::Png => {
                self.redraw_if_needed()?;
                Ok(self.renderer.encode_png()?)
            }
            ExportFormat::Json | ExportFormat::Svg => {
                Ok(self.canvas.export_scene(format)?.into_bytes())
            }
        }
    }

    pub fn export_to(&mut self, format: ExportFormat, path: &Path) -> Result<(), AppError> {
        let bytes = self.export(format)?;
        write_export(path, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use inkboard_core::shapes::HexColor;
    use inkboard_core::{BackgroundPattern, ToolKind};

    const SCENE: &str = r##"[
        {"type": "rectangle", "x": 10, "y": 10, "width": 50, "height": 30,
         "color": "#ff0000", "strokeWidth": 2, "seed": 7}
    ]"##;

    #[test]
    fn test_redraw_only_on_change() {
        let mut session = Session::default();
        assert!(session.redraw_if_needed().unwrap());
        assert!(!session.redraw_if_needed().unwrap());
        assert_eq!(session.frames_rendered(), 1);

        session.canvas_mut().zoom_in();
        assert!(session.needs_redraw());
        assert!(session.redraw_if_needed().unwrap());
        assert_eq!(session.frames_rendered(), 2);
    }

    #[test]
    fn test_pattern_change_redraws() {
        let mut session = Session::default();
        assert!(session.redraw_if_needed().unwrap());
        // (20, 20) logical lies on a grid line at the default 2x ratio
        let with_grid = session.renderer().pixel(40, 40);
        assert_ne!(with_grid, Some([255, 255, 255, 255]));

        session.apply(&ScriptStep::Pattern(BackgroundPattern::None));
        assert!(session.needs_redraw());
        assert!(session.redraw_if_needed().unwrap());
        assert_eq!(session.frames_rendered(), 2);
        assert_eq!(session.renderer().pixel(40, 40), Some([255, 255, 255, 255]));

        session.apply(&ScriptStep::Background(HexColor::black()));
        assert!(session.redraw_if_needed().unwrap());
        assert_eq!(session.renderer().pixel(40, 40), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_script_draws_and_redraws() {
        let steps = parse_script(
            r#"[
                {"tool": "rectangle"},
                {"pointer": {"down": {"position": {"x": 10, "y": 10}, "button": "left"}}},
                {"pointer": {"move": {"position": {"x": 40, "y": 30}}}},
                {"pointer": {"up": {"position": {"x": 60, "y": 40}, "button": "left"}}},
                {"tool": "arrow"},
                {"pointer": {"down": {"position": {"x": 0, "y": 0}, "button": "left"}}},
                {"pointer": "leave"}
            ]"#,
        )
        .unwrap();

        let mut session = Session::default();
        let committed = session.run_script(&steps).unwrap();
        assert_eq!(committed.len(), 2);
        assert_eq!(session.canvas().elements().len(), 2);
        assert_eq!(session.canvas().tool(), ToolKind::Arrow);
        assert!(!session.needs_redraw());
        assert!(session.frames_rendered() >= 4);
    }

    #[test]
    fn test_script_undo_redo() {
        let steps = parse_script(
            r#"[
                {"tool": "line"},
                {"pointer": {"down": {"position": {"x": 0, "y": 0}, "button": "left"}}},
                {"pointer": {"up": {"position": {"x": 30, "y": 30}, "button": "left"}}},
                "undo"
            ]"#,
        )
        .unwrap();
        let mut session = Session::default();
        session.run_script(&steps).unwrap();
        assert!(session.canvas().elements().is_empty());
        session.apply(&ScriptStep::Redo);
        assert_eq!(session.canvas().elements().len(), 1);
    }

    #[test]
    fn test_export_formats() {
        let mut session = Session::default();
        assert_eq!(session.load_scene(SCENE).unwrap(), 1);

        let json = String::from_utf8(session.export(ExportFormat::Json).unwrap()).unwrap();
        assert!(json.contains("\"rectangle\""));
        let svg = String::from_utf8(session.export(ExportFormat::Svg).unwrap()).unwrap();
        assert!(svg.starts_with("<svg"));
        let png = session.export(ExportFormat::Png).unwrap();
        assert_eq!(&png[..4], &[137, 80, 78, 71]);
        assert_eq!(session.renderer().size(), (1600, 1200));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.png");
        let mut session = Session::default();
        session.load_scene(SCENE).unwrap();
        session.export_to(ExportFormat::Png, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_bad_scene_is_reported() {
        let mut session = Session::default();
        assert!(matches!(
            session.load_scene(r#"[{"type": "hexagon"}]"#),
            Err(AppError::Export(_))
        ));
        assert!(session.canvas().elements().is_empty());
    }

    #[test]
    fn test_empty_viewport_fails_png() {
        let mut session = Session::default();
        session.apply(&ScriptStep::Resize(kurbo::Size::new(0.0, 0.0)));
        assert!(matches!(
            session.export(ExportFormat::Png),
            Err(AppError::Render(_))
        ));
    }
}
