//! Project tree in the left panel

use dioxus::prelude::*;
use std::sync::Arc;

use quill_core::fs::FileNode;
use quill_core::state::Action;

use crate::ide::Ide;

#[component]
pub fn Explorer() -> Element {
    let ide = use_context::<Ide>();
    let roots = ide.state.read().tree.roots().to_vec();

    rsx! {
        div { class: "explorer",
            h2 { class: "explorer-title", "Project" }
            for node in roots {
                TreeEntry { key: "{node.id}", node: node.clone(), depth: 0 }
            }
        }
    }
}

#[component]
fn TreeEntry(node: Arc<FileNode>, depth: usize) -> Element {
    let ide = use_context::<Ide>();
    let (is_open, is_active) = {
        let state = ide.state.read();
        (
            state.is_expanded(&node.id),
            state.tabs.active() == Some(node.id.as_str()),
        )
    };

    let icon = match (node.is_folder(), is_open) {
        (true, true) => "\u{25BE}",
        (true, false) => "\u{25B8}",
        (false, _) => "\u{1F4C4}",
    };
    let class = if is_active {
        "tree-entry active"
    } else {
        "tree-entry"
    };
    let indent = depth as f64 * 1.5 + 1.0;
    let id = node.id.clone();

    rsx! {
        div {
            div {
                class: "{class}",
                style: "padding-left: {indent}rem;",
                onclick: move |_| ide.dispatch(Action::Select(id.clone())),
                span { class: "tree-icon", "{icon}" }
                span { class: "tree-name", "{node.name}" }
            }
            if node.is_folder() && is_open {
                div { class: "tree-children",
                    for child in node.children.iter().cloned() {
                        TreeEntry { key: "{child.id}", node: child.clone(), depth: depth + 1 }
                    }
                }
            }
        }
    }
}
