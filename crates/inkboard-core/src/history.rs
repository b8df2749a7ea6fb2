//! Linear snapshot history for undo/redo.

use crate::scene::Scene;

/// Full-scene snapshots plus a cursor at the active one.
///
/// `cursor` is `None` iff there are no snapshots; otherwise it indexes a
/// valid snapshot. Recording discards every snapshot after the cursor.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Scene>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Truncate to `[0, cursor]`, append `snapshot`, and move the cursor onto it.
    pub fn record(&mut self, snapshot: Scene) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        self.cursor = Some(self.snapshots.len() - 1);
        log::debug!("history: recorded snapshot {} of {}", self.snapshots.len() - 1, self.snapshots.len());
    }

    /// Step back one snapshot. Returns the newly active scene, or `None` at the start.
    pub fn undo(&mut self) -> Option<&Scene> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        log::debug!("history: undo to {cursor}");
        self.snapshots.get(cursor)
    }

    /// Step forward one snapshot. Returns the newly active scene, or `None` at the end.
    pub fn redo(&mut self) -> Option<&Scene> {
        let cursor = self.cursor.filter(|&c| c + 1 < self.snapshots.len())? + 1;
        self.cursor = Some(cursor);
        log::debug!("history: redo to {cursor}");
        self.snapshots.get(cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Forget every snapshot. Not undoable.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }
}
