//! Host side of the preview message channel
//!
//! Preview frames report console output with `window.parent.postMessage`.
//! A window-level listener forwards every message, together with the
//! instance number of the frame it came from, to Rust through the eval
//! channel, where it is decoded and posted into that frame's relay port.

use dioxus::prelude::*;
use tracing::{debug, warn};

use quill_core::relay::RelayMessage;

use crate::ide::Ide;

/// Class carried by every preview iframe; its `data-instance` attribute is
/// the sandbox instance number
pub const FRAME_CLASS: &str = "preview-frame";

const LISTENER_JS: &str = r#"
    window.addEventListener('message', function (event) {
        var instance = null;
        var frames = document.querySelectorAll('iframe.preview-frame');
        for (var i = 0; i < frames.length; i++) {
            if (frames[i].contentWindow === event.source) {
                instance = Number(frames[i].dataset.instance);
                break;
            }
        }
        dioxus.send({ instance: instance, payload: event.data });
    });
"#;

/// Installs the window message listener once; renders nothing
#[component]
pub fn SandboxBridge() -> Element {
    let ide = use_context::<Ide>();

    use_effect(move || {
        let mut eval = document::eval(LISTENER_JS);
        spawn(async move {
            loop {
                match eval.recv::<serde_json::Value>().await {
                    Ok(mut msg) => {
                        let instance = msg.get("instance").and_then(serde_json::Value::as_u64);
                        let payload = msg
                            .get_mut("payload")
                            .map(serde_json::Value::take)
                            .unwrap_or_default();
                        if let Some(message) = RelayMessage::from_value(payload) {
                            ide.deliver(instance, message);
                        }
                    }
                    Err(e) => {
                        warn!("Preview message bridge closed: {e:?}");
                        break;
                    }
                }
            }
            debug!("Preview message bridge stopped");
        });
    });

    rsx! {}
}
