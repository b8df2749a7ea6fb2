//! The drawing engine: one owner for the scene, history, view and tools.
//!
//! Every scene mutation goes through [`Canvas::commit`], which records
//! exactly one history snapshot. Every observable change bumps
//! [`Canvas::revision`] so hosts know when to redraw.

use crate::camera::Camera;
use crate::config::{BackgroundPattern, CanvasConfig};
use crate::export::{self, ExportError, ExportFormat};
use crate::history::History;
use crate::scene::{LayerStats, ReorderDirection, Scene};
use crate::shapes::{Element, ElementId, HexColor, Shape, ShapeKind};
use crate::tools::{StrokeStyle, ToolKind, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};

/// Padding around the content when fitting the view, in client pixels.
const FIT_PADDING: f64 = 50.0;

/// Partial update for [`Canvas::update_element`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub shape: Option<Shape>,
    pub color: Option<HexColor>,
    pub stroke_width: Option<f64>,
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

impl ElementPatch {
    /// Whether the patch touches geometry or style, which a lock protects.
    fn changes_content(&self) -> bool {
        self.shape.is_some() || self.color.is_some() || self.stroke_width.is_some()
    }

    fn apply(self, element: &mut Element) {
        if let Some(shape) = self.shape {
            element.shape = shape;
        }
        if let Some(color) = self.color {
            element.color = color;
        }
        if let Some(width) = self.stroke_width {
            element.stroke_width = width;
        }
        if let Some(name) = self.name {
            element.name = name;
        }
        if let Some(visible) = self.visible {
            element.visible = visible;
        }
        if let Some(locked) = self.locked {
            element.locked = locked;
        }
    }
}

/// Runtime canvas state.
#[derive(Debug, Clone)]
pub struct Canvas {
    scene: Scene,
    history: History,
    pub(crate) camera: Camera,
    pub(crate) tool_manager: ToolManager,
    selection: Option<ElementId>,
    viewport_size: Size,
    pub(crate) config: CanvasConfig,
    revision: u64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty scene and default configuration.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            scene: Scene::new(),
            history: History::new(),
            camera: Camera::with_device_pixel_ratio(config.device_pixel_ratio),
            tool_manager: ToolManager::new(StrokeStyle {
                color: config.stroke_color,
                width: config.stroke_width,
            }),
            selection: None,
            viewport_size: Size::new(800.0, 600.0),
            config,
            revision: 0,
        }
    }

    // --- observable state ---

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        self.scene.elements()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.scene.get(id)
    }

    /// Elements that are currently drawn.
    pub fn visible_elements(&self) -> Vec<&Element> {
        self.scene.visible_elements().collect()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.tool_manager.current_style
    }

    /// The element being drawn, if a gesture is in progress.
    pub fn preview(&self) -> Option<&Element> {
        self.tool_manager.preview()
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.selection
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Monotonic counter bumped on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn layer_stats(&self) -> LayerStats {
        self.scene.layer_stats()
    }

    pub fn find_layers(&self, query: &str, kind: Option<ShapeKind>) -> Vec<&Element> {
        self.scene.find_layers(query, kind).collect()
    }

    /// Topmost visible element under a world point.
    pub fn element_at(&self, world: Point) -> Option<&Element> {
        let tolerance = self.config.hit_tolerance / self.camera.zoom();
        self.scene
            .visible_elements()
            .filter(|el| el.hit_test(world, tolerance))
            .last()
    }

    /// World rectangle currently on screen.
    pub fn visible_world_rect(&self) -> Rect {
        self.camera.visible_world_rect(self.viewport_size)
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- scene mutations ---

    /// Apply a mutation to a copy of the scene and record it.
    ///
    /// `mutate` returns false to signal a no-op; nothing is recorded then.
    /// The first commit into an empty history also records the prior scene
    /// so it can be undone back to.
    fn commit(&mut self, action: &str, mutate: impl FnOnce(&mut Scene) -> bool) -> bool {
        let mut next = self.scene.clone();
        if !mutate(&mut next) {
            return false;
        }
        if self.history.is_empty() {
            self.history.record(self.scene.clone());
        }
        self.history.record(next.clone());
        self.scene = next;
        if self.selection.is_some_and(|id| !self.scene.contains(id)) {
            self.selection = None;
        }
        self.touch();
        log::debug!("{action}: {} elements", self.scene.len());
        true
    }

    /// Append an element on top of the scene. Returns its id.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let mut id = element.id();
        self.commit("add", |scene| {
            id = scene.append(element);
            true
        });
        id
    }

    /// Update fields of an element. Locked elements only accept flag, name,
    /// or unlocking patches. A stroke width must be finite and positive.
    pub fn update_element(&mut self, id: ElementId, patch: ElementPatch) -> bool {
        let Some(element) = self.scene.get(id) else {
            return false;
        };
        if patch.stroke_width.is_some_and(|width| !(width.is_finite() && width > 0.0)) {
            log::debug!("update: rejected stroke width {:?}", patch.stroke_width);
            return false;
        }
        if element.locked && patch.changes_content() && patch.locked != Some(false) {
            log::debug!("update: {id} is locked");
            return false;
        }
        self.commit("update", |scene| scene.update(id, |el| patch.apply(el)))
    }

    pub fn delete_element(&mut self, id: ElementId) -> bool {
        self.commit("delete", |scene| scene.remove(id).is_some())
    }

    /// Append an offset copy on top of the scene. Returns the new id.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let copy = self.scene.get(id).filter(|el| !el.locked)?.duplicate();
        let mut copy_id = copy.id();
        self.commit("duplicate", |scene| {
            copy_id = scene.append(copy);
            true
        });
        Some(copy_id)
    }

    /// Move an element one step in z-order.
    pub fn reorder(&mut self, id: ElementId, direction: ReorderDirection) -> bool {
        if self.scene.get(id).is_none_or(|el| el.locked) {
            return false;
        }
        self.commit("reorder", |scene| scene.swap(id, direction))
    }

    pub fn set_visibility(&mut self, id: ElementId, visible: bool) -> bool {
        self.commit("visibility", |scene| {
            let changed = scene
                .get(id)
                .is_some_and(|el| scene.is_visible(el) != visible || el.visible != visible);
            changed && scene.set_visibility(id, visible)
        })
    }

    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        self.commit("lock", |scene| {
            let changed = scene.get(id).is_some_and(|el| el.locked != locked);
            changed && scene.set_locked(id, locked)
        })
    }

    pub fn toggle_visibility(&mut self, id: ElementId) -> bool {
        let Some(visible) = self.scene.get(id).map(|el| self.scene.is_visible(el)) else {
            return false;
        };
        self.set_visibility(id, !visible)
    }

    pub fn toggle_locked(&mut self, id: ElementId) -> bool {
        let Some(locked) = self.scene.get(id).map(|el| el.locked) else {
            return false;
        };
        self.set_locked(id, !locked)
    }

    /// Make every element visible as one history entry.
    pub fn show_all_layers(&mut self) -> bool {
        self.commit("show all", |scene| {
            if scene.is_empty() {
                return false;
            }
            scene.set_all_visibility(true);
            true
        })
    }

    /// Hide every element as one history entry.
    pub fn hide_all_layers(&mut self) -> bool {
        self.commit("hide all", |scene| {
            if scene.is_empty() {
                return false;
            }
            scene.set_all_visibility(false);
            true
        })
    }

    pub fn undo(&mut self) -> bool {
        let Some(scene) = self.history.undo() else {
            return false;
        };
        self.scene = scene.clone();
        self.after_history_move();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(scene) = self.history.redo() else {
            return false;
        };
        self.scene = scene.clone();
        self.after_history_move();
        true
    }

    fn after_history_move(&mut self) {
        if self.selection.is_some_and(|id| !self.scene.contains(id)) {
            self.selection = None;
        }
        self.touch();
    }

    /// Remove everything and forget history. Not undoable.
    pub fn clear(&mut self) {
        self.scene.clear();
        self.history.clear();
        self.selection = None;
        self.tool_manager.cancel();
        self.touch();
        log::info!("canvas cleared");
    }

    /// Replace the scene with elements parsed from the JSON format.
    ///
    /// Recorded as one undoable step. Returns the number of elements loaded.
    pub fn import_json(&mut self, json: &str) -> Result<usize, ExportError> {
        let loaded = export::scene_from_json(json)?;
        let count = loaded.len();
        self.commit("import", |scene| {
            *scene = loaded;
            true
        });
        log::info!("imported {count} elements");
        Ok(count)
    }

    /// Serialize the scene. PNG needs pixels and is produced by the renderer.
    pub fn export_scene(&self, format: ExportFormat) -> Result<String, ExportError> {
        let output = match format {
            ExportFormat::Json => export::to_json(&self.scene)?,
            ExportFormat::Svg => export::to_svg(&self.scene, self.visible_world_rect()),
            ExportFormat::Png => return Err(ExportError::NeedsRenderer(format)),
        };
        log::info!("exported {} elements as {format:?}", self.scene.len());
        Ok(output)
    }

    // --- selection ---

    /// Select an element. Unknown ids are ignored.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.scene.contains(id) {
            return false;
        }
        self.selection = Some(id);
        self.touch();
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.touch();
        }
    }

    // --- view ---

    /// Pan by a client-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.camera.pan(Vec2::new(dx, dy));
        self.touch();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.camera.set_zoom(zoom);
        self.touch();
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_in();
        self.touch();
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_out();
        self.touch();
    }

    pub fn zoom_reset(&mut self) {
        self.camera.zoom_reset();
        self.touch();
    }

    /// Fit the view to show all elements.
    pub fn fit_to_content(&mut self) {
        if let Some(bounds) = self.scene.bounds() {
            self.camera.fit_to_bounds(bounds, self.viewport_size, FIT_PADDING);
            self.touch();
        }
    }

    /// Set the viewport size in client pixels. World content and any
    /// in-progress gesture are unaffected.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width.max(0.0), height.max(0.0));
        self.touch();
    }

    // --- tools and style ---

    /// Set the current tool, committing any drawing in progress first.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.finish_drawing(None);
        self.tool_manager.set_tool(tool);
        self.touch();
    }

    pub fn set_stroke_color(&mut self, color: HexColor) {
        self.tool_manager.current_style.color = color;
        self.touch();
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.tool_manager.current_style.width = width;
            self.touch();
        }
    }

    /// Change the background fill. Not recorded in history.
    pub fn set_background(&mut self, color: HexColor) {
        if self.config.background != color {
            self.config.background = color;
            self.touch();
        }
    }

    /// Change the background pattern. Not recorded in history.
    pub fn set_pattern(&mut self, pattern: BackgroundPattern) {
        if self.config.pattern != pattern {
            self.config.pattern = pattern;
            self.touch();
        }
    }

    /// End the current draw gesture and commit its element.
    pub(crate) fn finish_drawing(&mut self, point: Option<Point>) -> Option<ElementId> {
        let element = self.tool_manager.end(point)?;
        self.touch();
        Some(self.add_element(element))
    }
}
