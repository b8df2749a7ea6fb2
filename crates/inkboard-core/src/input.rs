//! Pointer input events delivered by the host.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn alt() -> Self {
        Self { alt: true, ..Self::NONE }
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::NONE }
    }
}

/// Pointer event in client (logical pixel) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// The pointer left the drawing surface.
    Leave,
    Scroll {
        position: Point,
        delta: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_defaults_modifiers() {
        let event: PointerEvent = serde_json::from_str(
            r#"{"down": {"position": {"x": 1.0, "y": 2.0}, "button": "left"}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            PointerEvent::Down {
                position: Point::new(1.0, 2.0),
                button: MouseButton::Left,
                modifiers: Modifiers::NONE,
            }
        );
        let leave: PointerEvent = serde_json::from_str(r#""leave""#).unwrap();
        assert_eq!(leave, PointerEvent::Leave);
    }
}
