//! Tool system for the whiteboard.

use crate::shapes::{Arrow, Element, Ellipse, Freehand, HexColor, Line, Rectangle, Shape, generate_seed};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Present for parity with the toolbar; pointer input is inert.
    #[default]
    Selection,
    Hand,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Freehand,
}

impl ToolKind {
    /// Whether this tool creates elements.
    pub fn is_drawing(self) -> bool {
        !matches!(self, ToolKind::Selection | ToolKind::Hand)
    }
}

/// Stroke settings applied to new elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: HexColor,
    pub width: f64,
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A draw gesture is in progress.
    Drawing {
        /// Starting point of the gesture (world space).
        start: Point,
        /// Latest pointer position (world space).
        current: Point,
        /// The element being drawn; its id and seed are fixed at pointer-down.
        element: Element,
    },
    /// The view is being dragged.
    Panning {
        /// Last pointer position in client coordinates.
        last: Point,
    },
}

/// Build the shape a drawing tool produces for a drag from `start` to `end`.
pub fn shape_from_drag(tool: ToolKind, start: Point, end: Point) -> Option<Shape> {
    match tool {
        ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::from_drag(start, end))),
        ToolKind::Ellipse => Some(Shape::Ellipse(Ellipse::from_drag(start, end))),
        ToolKind::Line => Some(Shape::Line(Line::new(start, end))),
        ToolKind::Arrow => Some(Shape::Arrow(Arrow::new(start, end))),
        ToolKind::Freehand => Some(Shape::Freehand(Freehand::new(start))),
        ToolKind::Selection | ToolKind::Hand => None,
    }
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Current style to apply to new elements.
    pub current_style: StrokeStyle,
}

impl ToolManager {
    pub fn new(current_style: StrokeStyle) -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::Idle,
            current_style,
        }
    }

    /// Set the current tool. Any gesture in progress is dropped; callers
    /// that want to keep it must [`end`](Self::end) it first.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a draw gesture at a world point. Returns false for non-drawing tools.
    pub fn begin(&mut self, point: Point) -> bool {
        let Some(shape) = shape_from_drag(self.current_tool, point, point) else {
            return false;
        };
        let element = Element::with_seed(
            shape,
            self.current_style.color,
            self.current_style.width,
            generate_seed(),
        );
        self.state = ToolState::Drawing {
            start: point,
            current: point,
            element,
        };
        true
    }

    /// Update the current gesture with a new world point.
    pub fn update(&mut self, point: Point) {
        let tool = self.current_tool;
        if let ToolState::Drawing {
            start,
            current,
            element,
        } = &mut self.state
        {
            *current = point;
            match &mut element.shape {
                Shape::Freehand(stroke) => stroke.add_point(point),
                shape => {
                    if let Some(next) = shape_from_drag(tool, *start, point) {
                        *shape = next;
                    }
                }
            }
        }
    }

    /// End the current gesture and return the finished element.
    ///
    /// Shape tools take their final extent from `point`; freehand strokes
    /// keep exactly the samples gathered so far.
    pub fn end(&mut self, point: Option<Point>) -> Option<Element> {
        if let Some(point) = point {
            if !matches!(self.current_tool, ToolKind::Freehand) {
                self.update(point);
            }
        }
        match std::mem::take(&mut self.state) {
            ToolState::Drawing { element, .. } => Some(element),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Start dragging the view from a client point.
    pub fn begin_pan(&mut self, client: Point) {
        self.state = ToolState::Panning { last: client };
    }

    /// Continue a pan; returns the client-space delta since the last call.
    pub fn pan_to(&mut self, client: Point) -> Option<Vec2> {
        if let ToolState::Panning { last } = &mut self.state {
            let delta = client - *last;
            *last = client;
            Some(delta)
        } else {
            None
        }
    }

    /// Check if a draw gesture is active.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, ToolState::Panning { .. })
    }

    /// Get the in-progress element for the preview pass.
    pub fn preview(&self) -> Option<&Element> {
        match &self.state {
            ToolState::Drawing { element, .. } => Some(element),
            _ => None,
        }
    }
}
