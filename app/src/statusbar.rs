//! Bottom status bar component

use dioxus::prelude::*;

use crate::ide::Ide;

/// Application version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[component]
pub fn StatusBar() -> Element {
    let ide = use_context::<Ide>();
    let active = ide
        .state
        .read()
        .active_file()
        .map(|file| (file.path.clone(), file.language()));

    rsx! {
        footer { class: "status-bar",
            div { class: "status-left",
                if let Some((path, language)) = active {
                    span { class: "status-item", "{path}" }
                    span { class: "status-separator" }
                    span { class: "status-item", "{language}" }
                } else {
                    span { class: "status-item", "No file selected" }
                }
            }
            div { class: "status-right",
                span { class: "status-item", "UTF-8" }
                span { class: "status-item version", "v{VERSION}" }
            }
        }
    }
}
