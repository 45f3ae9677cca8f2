//! Editor tabs and the text area for the active file

use dioxus::prelude::*;

use quill_core::state::Action;

use crate::ide::Ide;

#[component]
pub fn EditorTabs() -> Element {
    let ide = use_context::<Ide>();
    let (tabs, active) = {
        let state = ide.state.read();
        let tabs: Vec<(String, String)> = state
            .open_files()
            .map(|file| (file.id.clone(), file.name.clone()))
            .collect();
        (tabs, state.tabs.active().map(str::to_string))
    };

    rsx! {
        div { class: "editor-tabs",
            for (id, name) in tabs {
                EditorTab {
                    key: "{id}",
                    is_active: active.as_deref() == Some(id.as_str()),
                    id: id.clone(),
                    name,
                }
            }
        }
    }
}

#[component]
fn EditorTab(id: String, name: String, is_active: bool) -> Element {
    let ide = use_context::<Ide>();
    let class = if is_active { "tab active" } else { "tab" };
    let select_id = id.clone();

    rsx! {
        div {
            class: "{class}",
            onclick: move |_| ide.dispatch(Action::Activate(select_id.clone())),
            span { class: "tab-icon", "\u{1F4C4}" }
            span { class: "tab-name", "{name}" }
            button {
                class: "tab-close",
                title: "Close",
                onclick: move |evt| {
                    // Closing must not also select the tab
                    evt.stop_propagation();
                    ide.dispatch(Action::Close(id.clone()));
                },
                "\u{00D7}"
            }
        }
    }
}

#[component]
pub fn CodeEditor() -> Element {
    let ide = use_context::<Ide>();
    let font_size = ide.settings.read().font_size;
    let file = ide
        .state
        .read()
        .active_file()
        .map(|file| (file.id.clone(), file.content.clone()));

    let Some((id, content)) = file else {
        return rsx! {
            div { class: "editor-empty",
                p { "Select a file to start editing or open one from the explorer" }
            }
        };
    };

    rsx! {
        textarea {
            key: "{id}",
            class: "code-input",
            style: "font-size: {font_size}px;",
            spellcheck: "false",
            value: "{content}",
            oninput: move |evt| {
                ide.dispatch(Action::Edit {
                    id: id.clone(),
                    content: evt.value(),
                });
            },
        }
    }
}
