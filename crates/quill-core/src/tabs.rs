//! Open editor tabs and the active-tab pointer
//!
//! Tabs are file ids into the project tree; content is always read from the
//! tree so a tab never holds a stale copy.

use serde::{Deserialize, Serialize};

use crate::fs::FileNode;

/// Ordered set of open file ids plus the active one
///
/// The active id, when set, always names an open tab and the open list
/// never holds duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenFiles {
    open: Vec<String>,
    active: Option<String>,
}

impl OpenFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a single open, active file
    pub fn with_file(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            open: vec![id.clone()],
            active: Some(id),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.open
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.iter().any(|open| open == id)
    }

    /// Open `node` as a tab (appended if new) and make it active
    ///
    /// Folders are not tabs; returns `false` for them and changes nothing.
    pub fn select(&mut self, node: &FileNode) -> bool {
        if !node.is_file() {
            return false;
        }
        if !self.is_open(&node.id) {
            self.open.push(node.id.clone());
        }
        self.active = Some(node.id.clone());
        true
    }

    /// Switch to `node`, opening it first if it is not already a tab
    ///
    /// Activating a file that is not open opens it at the end, so the active
    /// id can never point outside the tab list. Folders are ignored.
    pub fn set_active(&mut self, node: &FileNode) -> bool {
        self.select(node)
    }

    /// Close tab `id`
    ///
    /// If it was active, focus moves to the tab on its left, or to its right
    /// when it was the first tab, or to nothing when it was the only tab.
    /// Closing a tab that is not open does nothing.
    pub fn close(&mut self, id: &str) -> bool {
        let Some(idx) = self.open.iter().position(|open| open == id) else {
            return false;
        };

        if self.active.as_deref() == Some(id) {
            self.active = if self.open.len() == 1 {
                None
            } else if idx > 0 {
                Some(self.open[idx - 1].clone())
            } else {
                Some(self.open[idx + 1].clone())
            };
        }

        self.open.remove(idx);
        true
    }

    /// Move the tab at `from` so it ends up at index `to`
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from >= self.open.len() || from == to {
            return;
        }
        let id = self.open.remove(from);
        let to = to.min(self.open.len());
        self.open.insert(to, id);
    }
}
