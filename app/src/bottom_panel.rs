//! Console / Preview panel under the editor

use dioxus::prelude::*;

use quill_core::console::LineKind;
use quill_core::sandbox::SANDBOX_FLAGS;
use quill_core::state::{Action, BottomTab};

use crate::bridge::FRAME_CLASS;
use crate::ide::Ide;

const SCROLL_TO_END: &str =
    "var el = document.getElementById('console-output'); if (el) el.scrollTop = el.scrollHeight;";

#[component]
pub fn BottomPanel() -> Element {
    let ide = use_context::<Ide>();
    let (tab, loading) = {
        let state = ide.state.read();
        (state.bottom_tab, state.is_loading())
    };

    rsx! {
        div { class: "bottom-panel",
            div { class: "bottom-header",
                div { class: "bottom-tabs",
                    PanelTab { label: "Console", tab: BottomTab::Console, active: tab == BottomTab::Console }
                    PanelTab { label: "Preview", tab: BottomTab::Preview, active: tab == BottomTab::Preview }
                }
                if tab == BottomTab::Preview {
                    button {
                        class: "icon-button",
                        title: "Refresh Preview",
                        disabled: loading,
                        onclick: move |_| ide.dispatch(Action::RefreshPreview),
                        "\u{21BB}"
                    }
                } else {
                    button {
                        class: "icon-button",
                        title: "Clear Console",
                        onclick: move |_| ide.dispatch(Action::ClearConsole),
                        "\u{2298}"
                    }
                }
            }
            div { class: "bottom-content",
                ConsoleView { visible: tab == BottomTab::Console }
                PreviewFrame { visible: tab == BottomTab::Preview }
            }
        }
    }
}

#[component]
fn PanelTab(label: &'static str, tab: BottomTab, active: bool) -> Element {
    let ide = use_context::<Ide>();
    let class = if active {
        "panel-tab active"
    } else {
        "panel-tab"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| ide.dispatch(Action::ShowBottomTab(tab)),
            "{label}"
        }
    }
}

#[component]
fn ConsoleView(visible: bool) -> Element {
    let ide = use_context::<Ide>();
    let lines: Vec<(String, String, &'static str)> = ide
        .state
        .read()
        .console
        .numbered()
        .map(|(gutter, line)| (gutter, line.to_string(), LineKind::of(line).css_class()))
        .collect();

    // Keep the newest line in view
    use_effect(move || {
        if ide.state.read().console.is_empty() {
            return;
        }
        spawn(async move {
            let _ = document::eval(SCROLL_TO_END).await;
        });
    });

    rsx! {
        div {
            id: "console-output",
            class: "console",
            hidden: !visible,
            for (idx, (gutter, line, class)) in lines.into_iter().enumerate() {
                div { key: "{idx}", class: "console-line {class}",
                    span { class: "console-gutter", "{gutter}" }
                    span { class: "console-text", "{line}" }
                }
            }
        }
    }
}

/// The sandboxed frame for the current preview
///
/// Keyed by instance so every load replaces the element, discarding the old
/// document with all its timers and listeners. It stays mounted while the
/// console is shown so output keeps arriving.
#[component]
fn PreviewFrame(visible: bool) -> Element {
    let ide = use_context::<Ide>();
    let frame = ide
        .sandbox
        .read()
        .frame()
        .map(|frame| (frame.instance(), frame.srcdoc().to_string()));

    let Some((instance, srcdoc)) = frame else {
        return rsx! {
            div { class: "preview-empty", hidden: !visible, "Run the project to see a preview" }
        };
    };

    rsx! {
        iframe {
            key: "{instance}",
            class: FRAME_CLASS,
            title: "Preview",
            hidden: !visible,
            "data-instance": "{instance}",
            sandbox: SANDBOX_FLAGS,
            srcdoc: "{srcdoc}",
        }
    }
}
