//! Resizable main area: explorer | editor over bottom panel
//!
//! Dragging a divider shows a full-window overlay that receives every mouse
//! move until the button is released, so the pointer can leave the handle
//! (and cross the preview iframe) without losing the drag.

use dioxus::prelude::*;

use quill_core::state::Action;

use crate::bottom_panel::BottomPanel;
use crate::editor::{CodeEditor, EditorTabs};
use crate::explorer::Explorer;
use crate::ide::Ide;

#[component]
pub fn Workspace() -> Element {
    let ide = use_context::<Ide>();
    let mut state = ide.state;

    let (explorer_visible, explorer_width, editor_height, drag_css) = {
        let s = state.read();
        (
            s.explorer_visible,
            s.layout.explorer.size(),
            s.layout.editor.size(),
            s.layout.drag_style().map(|style| style.css()),
        )
    };

    rsx! {
        main { class: "workspace",
            ToolWindowBar {}

            div { class: "content-area",
                if explorer_visible {
                    aside {
                        class: "explorer-panel",
                        style: "width: {explorer_width}px;",
                        Explorer {}
                    }
                    div {
                        class: "divider divider-col",
                        aria_label: "Resize file explorer",
                        onmousedown: move |evt| {
                            evt.prevent_default();
                            state.write().layout.explorer.press();
                        },
                    }
                }

                div { class: "editor-column",
                    div {
                        class: "editor-area",
                        style: "height: {editor_height}px;",
                        EditorTabs {}
                        CodeEditor {}
                    }
                    div {
                        class: "divider divider-row",
                        aria_label: "Resize terminal panel",
                        onmousedown: move |evt| {
                            evt.prevent_default();
                            let height = window_height();
                            let mut s = state.write();
                            s.layout.set_viewport_height(height);
                            s.layout.editor.press();
                        },
                    }
                    div { class: "bottom-area",
                        BottomPanel {}
                    }
                }
            }

            if let Some(css) = drag_css {
                div {
                    class: "resize-overlay",
                    style: "{css}",
                    onmousemove: move |evt| {
                        let point = evt.client_coordinates();
                        state.write().layout.pointer_move(point.x, point.y);
                    },
                    onmouseup: move |_| {
                        state.write().layout.release();
                        ide.persist_layout();
                    },
                }
            }
        }
    }
}

/// Narrow bar left of the explorer with the "Project" toggle
#[component]
fn ToolWindowBar() -> Element {
    let ide = use_context::<Ide>();
    let visible = ide.state.read().explorer_visible;
    let class = if visible {
        "tool-button active"
    } else {
        "tool-button"
    };

    rsx! {
        nav { class: "tool-window-bar",
            button {
                class: "{class}",
                title: "Project",
                onclick: move |_| {
                    ide.dispatch(Action::ToggleExplorer);
                    ide.persist_layout();
                },
                "\u{1F4C1}"
            }
        }
    }
}

/// Logical height of the window's client area
pub fn window_height() -> f64 {
    let window = dioxus::desktop::window();
    window
        .window
        .inner_size()
        .to_logical::<f64>(window.window.scale_factor())
        .height
}
