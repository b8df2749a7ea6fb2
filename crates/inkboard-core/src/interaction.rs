//! Pointer handling: turns input events into pans, previews and committed elements.

use crate::canvas::Canvas;
use crate::input::{Modifiers, MouseButton, PointerEvent};
use crate::shapes::ElementId;
use crate::snap::snap_point;
use crate::tools::ToolKind;
use kurbo::Point;

impl Canvas {
    /// Process a pointer event. Returns the id of an element committed by it.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Option<ElementId> {
        log::trace!("pointer: {event:?}");

        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => {
                self.pointer_down(position, button, &modifiers);
                None
            }
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                None
            }
            PointerEvent::Up { position, button } => self.pointer_up(position, button),
            // Leaving finalizes at the last known position
            PointerEvent::Leave => self.end_gesture(None),
            PointerEvent::Scroll {
                position,
                delta,
                modifiers,
            } => {
                if modifiers.ctrl || modifiers.meta {
                    self.camera.zoom_step_at(position, delta.y < 0.0);
                } else {
                    self.camera.pan(-delta);
                }
                self.touch();
                None
            }
        }
    }

    fn wants_pan(&self, button: MouseButton, modifiers: &Modifiers) -> bool {
        match button {
            MouseButton::Middle => true,
            MouseButton::Left => {
                self.tool_manager.current_tool == ToolKind::Hand
                    || self.config.pan_modifier.is_held(modifiers)
            }
            MouseButton::Right => false,
        }
    }

    /// Client point to world, snapped for shape tools when enabled.
    fn drawing_point(&self, client: Point) -> Point {
        let world = self.camera.client_to_world(client);
        if self.config.snap_to_grid && self.tool_manager.current_tool != ToolKind::Freehand {
            snap_point(world, self.config.grid_size)
        } else {
            world
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton, modifiers: &Modifiers) {
        if self.tool_manager.is_drawing() || self.tool_manager.is_panning() {
            return;
        }
        if self.wants_pan(button, modifiers) {
            self.tool_manager.begin_pan(position);
            return;
        }
        if button != MouseButton::Left {
            return;
        }
        let world = self.drawing_point(position);
        if self.tool_manager.begin(world) {
            self.touch();
        }
    }

    fn pointer_move(&mut self, position: Point) {
        if let Some(delta) = self.tool_manager.pan_to(position) {
            self.camera.pan(delta);
            self.touch();
        } else if self.tool_manager.is_drawing() {
            let world = self.drawing_point(position);
            self.tool_manager.update(world);
            self.touch();
        }
    }

    fn pointer_up(&mut self, position: Point, button: MouseButton) -> Option<ElementId> {
        if self.tool_manager.is_panning() {
            self.tool_manager.cancel();
            return None;
        }
        if button != MouseButton::Left || !self.tool_manager.is_drawing() {
            return None;
        }
        let world = self.drawing_point(position);
        self.finish_drawing(Some(world))
    }

    fn end_gesture(&mut self, point: Option<Point>) -> Option<ElementId> {
        if self.tool_manager.is_panning() {
            self.tool_manager.cancel();
            return None;
        }
        self.finish_drawing(point)
    }
}
