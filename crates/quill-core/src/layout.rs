//! Pointer-driven pane resizing
//!
//! Each divider is a two-state machine: `Idle` until pressed, `Dragging`
//! until released. While dragging, every pointer move sets the pane size
//! from the pointer's absolute position minus a fixed offset (the tool bar
//! width for the explorer, the header height for the editor), clamped to the
//! divider's bounds. There is no easing; sizes follow the pointer directly.

use serde::{Deserialize, Serialize};

/// Which pointer coordinate drives a divider
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Column divider, sized from the pointer's `x`
    Horizontal,
    /// Row divider, sized from the pointer's `y`
    Vertical,
}

impl Axis {
    /// Cursor shown everywhere while this divider is dragged
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Horizontal => "col-resize",
            Self::Vertical => "row-resize",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Page-wide styling applied for the duration of a drag
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragStyle {
    pub cursor: &'static str,
    /// CSS `user-select` value; text selection is suppressed while dragging
    pub user_select: &'static str,
}

impl DragStyle {
    /// Inline CSS for the page root
    pub fn css(self) -> String {
        format!("cursor: {}; user-select: {};", self.cursor, self.user_select)
    }
}

/// Sizes and bounds for the IDE panes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub initial_explorer_width: f64,
    pub initial_editor_height: f64,
    pub min_explorer_width: f64,
    pub min_editor_height: f64,
    /// Width of the tool window bar left of the explorer
    pub toolbar_width: f64,
    /// Height of the header above the editor
    pub header_height: f64,
    /// Height of the status bar below the bottom panel
    pub status_bar_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            initial_explorer_width: 280.0,
            initial_editor_height: 500.0,
            min_explorer_width: 200.0,
            min_editor_height: 150.0,
            toolbar_width: 48.0,
            header_height: 45.0,
            status_bar_height: 30.0,
        }
    }
}

/// A draggable divider controlling one pane size
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    axis: Axis,
    #[serde(skip)]
    state: DragState,
    size: f64,
    min: f64,
    offset: f64,
    /// Upper bound on the size, if any
    max: Option<f64>,
}

impl Divider {
    pub fn new(axis: Axis, size: f64, min: f64, offset: f64) -> Self {
        Self {
            axis,
            state: DragState::Idle,
            size: size.max(min),
            min,
            offset,
            max: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Set the largest allowed size; `None` removes the cap
    ///
    /// The current size is pulled back into bounds right away.
    pub fn set_max(&mut self, max: Option<f64>) {
        self.max = max;
        self.size = self.clamp(self.size);
    }

    /// Idle -> Dragging; returns the page styling to apply
    pub fn press(&mut self) -> DragStyle {
        self.state = DragState::Dragging;
        DragStyle {
            cursor: self.axis.cursor(),
            user_select: "none",
        }
    }

    /// Resize from an absolute pointer position while dragging
    ///
    /// Returns `true` if the size changed. Moves while idle are ignored.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.is_dragging() {
            return false;
        }
        let position = match self.axis {
            Axis::Horizontal => x,
            Axis::Vertical => y,
        };
        let size = self.clamp(position - self.offset);
        let changed = (size - self.size).abs() > f64::EPSILON;
        self.size = size;
        changed
    }

    /// Dragging -> Idle
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }

    fn clamp(&self, size: f64) -> f64 {
        let size = size.max(self.min);
        match self.max {
            // A window too small for both minimums pins this pane at its own
            Some(max) => size.min(max.max(self.min)),
            None => size,
        }
    }
}

/// The explorer-width and editor-height dividers of the IDE
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    pub explorer: Divider,
    pub editor: Divider,
    config: LayoutConfig,
}

impl PaneLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            explorer: Divider::new(
                Axis::Horizontal,
                config.initial_explorer_width,
                config.min_explorer_width,
                config.toolbar_width,
            ),
            editor: Divider::new(
                Axis::Vertical,
                config.initial_editor_height,
                config.min_editor_height,
                config.header_height,
            ),
            config,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Track the window height so the bottom panel keeps its minimum
    ///
    /// The editor may grow up to the space between header and status bar,
    /// minus the bottom panel's minimum height.
    pub fn set_viewport_height(&mut self, height: f64) {
        let available = height - self.config.header_height - self.config.status_bar_height;
        self.editor
            .set_max(Some(available - self.config.min_editor_height));
    }

    /// Forward a pointer move to whichever divider is being dragged
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let explorer = self.explorer.pointer_move(x, y);
        let editor = self.editor.pointer_move(x, y);
        explorer || editor
    }

    /// Release every divider
    pub fn release(&mut self) {
        self.explorer.release();
        self.editor.release();
    }

    pub fn is_dragging(&self) -> bool {
        self.explorer.is_dragging() || self.editor.is_dragging()
    }

    /// Page styling for the current drag, if one is in progress
    pub fn drag_style(&self) -> Option<DragStyle> {
        [&self.explorer, &self.editor]
            .into_iter()
            .find(|d| d.is_dragging())
            .map(|d| DragStyle {
                cursor: d.axis.cursor(),
                user_select: "none",
            })
    }
}

impl Default for PaneLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_sequence_sets_width_from_pointer() {
        let mut divider = Divider::new(Axis::Horizontal, 280.0, 200.0, 48.0);
        let style = divider.press();
        assert_eq!(style.cursor, "col-resize");
        assert_eq!(style.user_select, "none");

        // press at x=300 does not move anything by itself
        assert!(divider.pointer_move(500.0, 10.0));
        divider.release();
        assert_eq!(divider.size(), 452.0);
        assert_eq!(divider.state(), DragState::Idle);
    }

    #[test]
    fn test_overshoot_clamps_to_minimum() {
        let mut divider = Divider::new(Axis::Horizontal, 280.0, 200.0, 48.0);
        divider.press();
        divider.pointer_move(-300.0, 0.0);
        assert_eq!(divider.size(), 200.0);
        divider.pointer_move(100.0, 0.0);
        assert_eq!(divider.size(), 200.0);
    }

    #[test]
    fn test_moves_while_idle_are_ignored() {
        let mut divider = Divider::new(Axis::Horizontal, 280.0, 200.0, 48.0);
        assert!(!divider.pointer_move(900.0, 0.0));
        assert_eq!(divider.size(), 280.0);

        divider.press();
        divider.release();
        assert!(!divider.pointer_move(900.0, 0.0));
        assert_eq!(divider.size(), 280.0);
    }

    #[test]
    fn test_vertical_divider_keeps_bottom_panel_minimum() {
        let mut layout = PaneLayout::default();
        layout.set_viewport_height(800.0);
        // 800 - 45 - 30 = 725 available, bottom panel needs 150
        layout.editor.press();
        layout.pointer_move(0.0, 2000.0);
        assert_eq!(layout.editor.size(), 575.0);
        layout.pointer_move(0.0, 0.0);
        assert_eq!(layout.editor.size(), 150.0);
        layout.pointer_move(0.0, 345.0);
        assert_eq!(layout.editor.size(), 300.0);
        layout.release();
        assert!(!layout.is_dragging());
    }

    #[test]
    fn test_layout_routes_moves_to_dragged_divider_only() {
        let mut layout = PaneLayout::default();
        layout.explorer.press();
        assert_eq!(
            layout.drag_style().map(|s| s.css()),
            Some("cursor: col-resize; user-select: none;".to_string())
        );
        layout.pointer_move(400.0, 400.0);
        assert_eq!(layout.explorer.size(), 352.0);
        assert_eq!(layout.editor.size(), 500.0);
        layout.release();
        assert_eq!(layout.drag_style(), None);
    }

    #[test]
    fn test_tiny_viewport_keeps_editor_minimum() {
        let mut layout = PaneLayout::default();
        layout.set_viewport_height(200.0);
        assert_eq!(layout.editor.size(), 150.0);
        layout.editor.press();
        layout.pointer_move(0.0, 1000.0);
        assert_eq!(layout.editor.size(), 150.0);
    }
}
