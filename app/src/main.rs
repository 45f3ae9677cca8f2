//! Quill Studio - a small IDE for HTML/CSS/JS projects with a live preview

mod bottom_panel;
mod bridge;
mod editor;
mod explorer;
mod ide;
mod panes;
mod settings;
mod statusbar;
mod toolbar;

use dioxus::desktop::tao::dpi::LogicalSize;
use dioxus::desktop::{Config, WindowBuilder};
use dioxus::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use quill_assist::Assistant;
use quill_core::fs::{FileTree, import_dir, seed_project};
use quill_core::relay::relay_channel;
use quill_core::sandbox::SandboxHost;
use quill_core::state::{Action, IdeState};

use ide::Ide;
use settings::{Settings, load_settings};

const WINDOW_WIDTH: f64 = 1280.0;
const WINDOW_HEIGHT: f64 = 800.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let window = WindowBuilder::new()
        .with_title("Quill Studio")
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

    let config = Config::new().with_window(window);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(App);
}

/// The last opened project, or the starter project
fn initial_tree(settings: &Settings) -> FileTree {
    let Some(dir) = &settings.project_dir else {
        return seed_project();
    };
    match import_dir(dir) {
        Ok(tree) => {
            info!("Reopened project {}", dir.display());
            tree
        }
        Err(e) => {
            warn!("Could not reopen {}: {}", dir.display(), e);
            seed_project()
        }
    }
}

#[component]
fn App() -> Element {
    let ide = use_hook(|| {
        let settings = load_settings();
        let height = panes::window_height();

        let mut state = IdeState::new(initial_tree(&settings), settings.layout_config(height));
        state.explorer_visible = settings.explorer_visible;
        state.layout.set_viewport_height(height);

        let assistant = Assistant::from_env().map_err(|e| {
            warn!("Assistant unavailable: {e}");
            e.to_string()
        });

        let (sender, mut relay) = relay_channel();
        let ide = Ide {
            state: Signal::new(state),
            sandbox: Signal::new(SandboxHost::new(sender)),
            settings: Signal::new(settings),
            assistant: Signal::new(assistant),
        };

        // Console output from the preview, in arrival order
        spawn(async move {
            while let Some(envelope) = relay.recv().await {
                if !ide.sandbox.peek().is_current(envelope.instance) {
                    debug!(instance = envelope.instance, "Dropping queued message from a replaced frame");
                    continue;
                }
                ide.dispatch(Action::Sandbox(envelope.message));
            }
        });

        ide
    });
    use_context_provider(|| ide);

    rsx! {
        style { {include_str!("../assets/style.css")} }

        bridge::SandboxBridge {}

        div { class: "app-container",
            toolbar::Header {}
            panes::Workspace {}
            statusbar::StatusBar {}
        }
    }
}
