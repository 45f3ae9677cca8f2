//! Sandboxed execution host
//!
//! A preview runs in an `<iframe srcdoc>` with embedding restrictions. Every
//! refresh replaces the frame entirely: a new instance number, a new document
//! and a new port into the relay. Nothing is patched in place.
//!
//! The restrictions are best-effort isolation for the user's own code, not a
//! security boundary.

use tracing::info;

use crate::preview::ComposedDocument;
use crate::relay::{ERROR_EVENT, LOG_EVENT, RelayMessage, RelaySender, SandboxPort};

/// Value of the frame's `sandbox` attribute
pub const SANDBOX_FLAGS: &str = "allow-scripts allow-same-origin";

/// One loaded preview frame
#[derive(Clone, Debug)]
pub struct SandboxFrame {
    document: ComposedDocument,
    port: SandboxPort,
}

impl SandboxFrame {
    pub fn instance(&self) -> u64 {
        self.port.instance()
    }

    pub fn document(&self) -> &ComposedDocument {
        &self.document
    }

    /// Value for the frame's `srcdoc` attribute
    pub fn srcdoc(&self) -> &str {
        self.document.html()
    }

    /// Port handed to whatever forwards this frame's window messages
    pub fn port(&self) -> &SandboxPort {
        &self.port
    }

    /// Forward a message emitted by this frame
    pub fn post(&self, message: RelayMessage) -> bool {
        self.port.post(message)
    }
}

/// Owns the current preview frame and hands out relay ports
#[derive(Debug)]
pub struct SandboxHost {
    relay: RelaySender,
    loads: u64,
    frame: Option<SandboxFrame>,
}

impl SandboxHost {
    pub fn new(relay: RelaySender) -> Self {
        Self {
            relay,
            loads: 0,
            frame: None,
        }
    }

    /// Replace the current frame with a fresh instance showing `document`
    pub fn load(&mut self, document: ComposedDocument) -> &SandboxFrame {
        self.loads += 1;
        info!(
            instance = self.loads,
            bytes = document.html().len(),
            "Reloading preview sandbox"
        );
        self.frame.insert(SandboxFrame {
            document,
            port: self.relay.port(self.loads),
        })
    }

    pub fn frame(&self) -> Option<&SandboxFrame> {
        self.frame.as_ref()
    }

    /// Whether `instance` is the frame currently on screen
    ///
    /// Messages already queued by a replaced frame fail this check.
    pub fn is_current(&self, instance: u64) -> bool {
        self.frame
            .as_ref()
            .is_some_and(|frame| frame.instance() == instance)
    }

    /// Number of frames created so far
    pub fn loads(&self) -> u64 {
        self.loads
    }
}

/// Escape text for use inside a double-quoted HTML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A standalone page embedding `document` in a sandboxed frame, with a
/// console pane fed by the same relay protocol the desktop app uses
///
/// Lets a preview be opened in any browser outside the IDE.
pub fn host_page(document: &ComposedDocument) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Quill Preview</title>
  <style>
    body {{ margin: 0; display: flex; flex-direction: column; height: 100vh; font-family: sans-serif; }}
    iframe {{ flex: 1; border: 0; background: #fff; }}
    pre {{ margin: 0; height: 30vh; overflow: auto; padding: 8px; background: #0f172a; color: #cbd5e1; }}
  </style>
</head>
<body>
  <iframe title="Preview" sandbox="{flags}" srcdoc="{srcdoc}"></iframe>
  <pre id="console"></pre>
  <script>
    window.addEventListener('message', function (event) {{
      var data = event.data || {{}};
      var prefix = data.type === '{log}' ? '[LOG] ' : data.type === '{error}' ? '[ERR] ' : null;
      if (prefix === null) return;
      document.getElementById('console').textContent += prefix + data.message + '\n';
    }});
  </script>
</body>
</html>
"#,
        flags = SANDBOX_FLAGS,
        srcdoc = escape_attribute(document.html()),
        log = LOG_EVENT,
        error = ERROR_EVENT,
    )
}
