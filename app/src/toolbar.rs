//! Header bar: title, project actions and the run/assistant toolbar

use dioxus::prelude::*;
use tracing::{error, info};

use quill_core::fs::{export_dir, import_dir};
use quill_core::state::{Action, AssistKind};

use crate::ide::Ide;
use crate::settings::save_settings;

#[component]
pub fn Header() -> Element {
    let ide = use_context::<Ide>();
    let loading = ide.state.read().is_loading();

    rsx! {
        header { class: "header",
            h1 { class: "app-title",
                span { class: "accent", "Quill" }
                " Studio"
            }

            div { class: "toolbar-group",
                ToolbarButton {
                    title: "Open a project folder",
                    label: "Open",
                    disabled: loading,
                    onclick: move |_| open_project(ide),
                }
                ToolbarButton {
                    title: "Write the project to a folder",
                    label: "Export",
                    onclick: move |_| export_project(ide),
                }
            }

            div { class: "toolbar-group",
                if loading {
                    div { class: "spinner", title: "Waiting for the assistant" }
                }
                ToolbarButton {
                    title: "Ask AI",
                    label: "\u{2728}",
                    class: "ask-ai",
                    disabled: loading,
                    onclick: move |_| ide.dispatch(Action::Assist(AssistKind::Explain)),
                }
                div { class: "toolbar-separator" }
                ToolbarButton {
                    title: "Run",
                    label: "\u{25B6}",
                    class: "run",
                    disabled: loading,
                    onclick: move |_| ide.dispatch(Action::Run),
                }
                ToolbarButton {
                    title: "Generate Tests",
                    label: "\u{2697}",
                    class: "tests",
                    disabled: loading,
                    onclick: move |_| ide.dispatch(Action::Assist(AssistKind::GenerateTests)),
                }
            }
        }
    }
}

#[component]
fn ToolbarButton(
    title: &'static str,
    label: &'static str,
    onclick: EventHandler<MouseEvent>,
    #[props(default = "")] class: &'static str,
    #[props(default = false)] disabled: bool,
) -> Element {
    let button_class = if class.is_empty() {
        "toolbar-button".to_string()
    } else {
        format!("toolbar-button {}", class)
    };

    rsx! {
        button {
            class: "{button_class}",
            title: "{title}",
            disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

/// Pick a folder and replace the project with its contents
fn open_project(ide: Ide) {
    spawn(async move {
        let Some(folder) = rfd::AsyncFileDialog::new().pick_folder().await else {
            return;
        };
        let dir = folder.path().to_path_buf();
        let import_from = dir.clone();
        match tokio::task::spawn_blocking(move || import_dir(&import_from)).await {
            Ok(Ok(tree)) => {
                ide.dispatch(Action::OpenProject(tree));
                let mut settings = ide.settings;
                settings.write().project_dir = Some(dir);
                if let Err(e) = save_settings(&settings.peek()) {
                    error!("Failed to save settings: {e:#}");
                }
            }
            Ok(Err(e)) => error!("Import failed: {e}"),
            Err(e) => error!("Import task failed: {e}"),
        }
    });
}

/// Pick a folder and write every project file into it
fn export_project(ide: Ide) {
    let tree = ide.state.read().tree.clone();
    spawn(async move {
        if let Some(folder) = rfd::AsyncFileDialog::new().pick_folder().await {
            let dest = folder.path().to_path_buf();
            match tokio::task::spawn_blocking(move || export_dir(&tree, &dest)).await {
                Ok(Ok(written)) => info!("Exported {written} files"),
                Ok(Err(e)) => error!("Export failed: {e}"),
                Err(e) => error!("Export task failed: {e}"),
            }
        }
    });
}
