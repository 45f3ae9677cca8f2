//! Glue between the UI, the IDE state and the services it drives
//!
//! Components never mutate [`IdeState`] directly: they call
//! [`Ide::dispatch`], which applies the action and then carries out the
//! returned effect (replace the preview frame, or run an assistant call in
//! the background and feed its result back in).

use dioxus::prelude::*;
use tracing::{debug, warn};

use quill_assist::Assistant;
use quill_core::relay::RelayMessage;
use quill_core::sandbox::SandboxHost;
use quill_core::state::{Action, AssistRequest, Effect, IdeState};

use crate::settings::{Settings, save_settings};

/// Handles to everything the UI works with
#[derive(Clone, Copy)]
pub struct Ide {
    pub state: Signal<IdeState>,
    pub sandbox: Signal<SandboxHost>,
    pub settings: Signal<Settings>,
    /// The configured assistant, or why there is none
    pub assistant: Signal<Result<Assistant, String>>,
}

impl Ide {
    pub fn dispatch(self, action: Action) {
        let mut state = self.state;
        let effect = state.write().dispatch(action);
        match effect {
            Some(Effect::LoadPreview(document)) => {
                let mut sandbox = self.sandbox;
                let instance = sandbox.write().load(document).instance();
                debug!(instance, "Preview frame replaced");
            }
            Some(Effect::Assist(request)) => self.assist(request),
            None => {}
        }
    }

    fn assist(self, request: AssistRequest) {
        let assistant = (*self.assistant.peek()).clone();
        spawn(async move {
            let action = match assistant {
                Ok(assistant) => assistant.handle(request).await,
                Err(reason) => Action::AssistFinished {
                    kind: request.kind,
                    outcome: Err(reason),
                },
            };
            self.dispatch(action);
        });
    }

    /// Route a message posted by a preview frame into its relay port
    ///
    /// `instance` is the frame the bridge saw the message come from. Messages
    /// from a frame that has since been replaced are dropped; messages whose
    /// sender could not be identified go to the current frame.
    pub fn deliver(self, instance: Option<u64>, message: RelayMessage) {
        let sandbox = self.sandbox.peek();
        let Some(frame) = sandbox.frame() else {
            debug!("Message before any preview was loaded");
            return;
        };
        match instance {
            Some(instance) if instance != frame.instance() => {
                debug!(instance, current = frame.instance(), "Dropping message from a replaced frame");
            }
            _ => {
                frame.post(message);
            }
        }
    }

    /// Copy pane sizes and visibility into the settings and write them out
    pub fn persist_layout(self) {
        let mut settings_signal = self.settings;
        let settings = {
            let state = self.state.peek();
            let mut settings = (*settings_signal.peek()).clone();
            settings.explorer_visible = state.explorer_visible;
            settings.explorer_width = state.layout.explorer.size();
            settings.editor_height = Some(state.layout.editor.size());
            settings
        };
        if let Err(e) = save_settings(&settings) {
            warn!("Failed to save settings: {e:#}");
        }
        settings_signal.set(settings);
    }
}
