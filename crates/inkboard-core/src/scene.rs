//! Scene store: the ordered element list plus the visibility override layer.

use crate::shapes::{Element, ElementId, ShapeKind};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Direction for a one-step layer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    /// Towards the front (drawn later).
    Up,
    /// Towards the back (drawn earlier).
    Down,
}

/// Layer panel counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayerStats {
    pub total: usize,
    pub visible: usize,
    pub hidden: usize,
    pub locked: usize,
}

/// An ordered sequence of elements.
///
/// Order is z-order (back to front) and layer panel order. Ids are unique.
/// The visibility override is keyed by id and always agrees with each
/// element's own `visible` flag after any mutation made through this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    elements: Vec<Element>,
    visibility: HashMap<ElementId, bool>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from loaded elements, fixing up duplicate ids.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut scene = Self::new();
        for element in elements {
            scene.append(element);
        }
        scene
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id() == id)
    }

    /// Whether an element is rendered: its own flag and the override both allow it.
    pub fn is_visible(&self, element: &Element) -> bool {
        element.visible && self.visibility.get(&element.id()) != Some(&false)
    }

    /// Elements that should be drawn, in z-order.
    pub fn visible_elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| self.is_visible(el))
    }

    /// Append an element on top. A colliding id is replaced by a fresh one.
    ///
    /// Returns the id the element ends up with.
    pub fn append(&mut self, mut element: Element) -> ElementId {
        if self.contains(element.id()) {
            element.regenerate_id();
        }
        if element.name.is_empty() {
            element.name = Element::default_name(element.kind(), self.elements.len() + 1);
        }
        let id = element.id();
        if !element.visible {
            self.visibility.insert(id, false);
        }
        self.elements.push(element);
        id
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        self.visibility.remove(&id);
        Some(self.elements.remove(index))
    }

    /// Apply an in-place update to one element.
    ///
    /// The id cannot change; visibility edits made by `f` are mirrored into
    /// the override layer. Returns false for an unknown id.
    pub fn update(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) -> bool {
        let Some(element) = self.elements.iter_mut().find(|el| el.id() == id) else {
            return false;
        };
        f(element);
        element.id = id;
        let visible = element.visible;
        self.visibility.insert(id, visible);
        true
    }

    /// Swap an element with its neighbour. Returns false at the boundary or for an unknown id.
    pub fn swap(&mut self, id: ElementId, direction: ReorderDirection) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let other = match direction {
            ReorderDirection::Up if index + 1 < self.elements.len() => index + 1,
            ReorderDirection::Down if index > 0 => index - 1,
            _ => return false,
        };
        self.elements.swap(index, other);
        true
    }

    pub fn set_visibility(&mut self, id: ElementId, visible: bool) -> bool {
        self.update(id, |el| el.visible = visible)
    }

    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> bool {
        self.update(id, |el| el.locked = locked)
    }

    /// Set every element's visibility at once.
    pub fn set_all_visibility(&mut self, visible: bool) {
        self.visibility.clear();
        for element in &mut self.elements {
            element.visible = visible;
            self.visibility.insert(element.id(), visible);
        }
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.visibility.clear();
    }

    /// Union of all element bounds, `None` for an empty scene.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, rect| acc.union(rect))
    }

    pub fn layer_stats(&self) -> LayerStats {
        let visible = self.visible_elements().count();
        LayerStats {
            total: self.elements.len(),
            visible,
            hidden: self.elements.len() - visible,
            locked: self.elements.iter().filter(|el| el.locked).count(),
        }
    }

    /// Case-insensitive layer search over type and display name, optionally
    /// restricted to one kind.
    pub fn find_layers<'a>(
        &'a self,
        query: &str,
        kind: Option<ShapeKind>,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        let query = query.trim().to_lowercase();
        self.elements.iter().filter(move |el| {
            if kind.is_some_and(|k| k != el.kind()) {
                return false;
            }
            query.is_empty()
                || el.kind().name().contains(&query)
                || el.name.to_lowercase().contains(&query)
        })
    }
}
