//! Sandbox to host message relay
//!
//! The preview document runs in an isolated frame and can only talk to the
//! host by posting `{ type, message }` objects. This module defines that
//! payload, decodes it, and carries it over a one-way FIFO channel into the
//! host console.
//!
//! The sender's origin is not checked. Preview content is the user's own
//! project code, so any frame is trusted to post console output.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::console::ConsoleLog;
use crate::Result;

/// Message type posted for `console.log` calls
pub const LOG_EVENT: &str = "console_log";
/// Message type posted for `console.error` calls and uncaught errors
pub const ERROR_EVENT: &str = "console_error";

/// A structured message posted by the sandboxed document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RelayMessage {
    #[serde(rename = "console_log")]
    Log { message: String },
    #[serde(rename = "console_error")]
    Error { message: String },
}

impl RelayMessage {
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Decode a JSON payload
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Decode an already parsed payload
    ///
    /// Frames and browser extensions post all kinds of unrelated messages to
    /// the host window; anything that is not a console event yields `None`.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value(value) {
            Ok(message) => Some(message),
            Err(e) => {
                debug!("Ignoring foreign window message: {e}");
                None
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Log { message } | Self::Error { message } => message,
        }
    }

    /// Console text for this event, `[LOG] ...` or `[ERR] ...`
    pub fn console_text(&self) -> String {
        match self {
            Self::Log { message } => format!("[LOG] {message}"),
            Self::Error { message } => format!("[ERR] {message}"),
        }
    }

    /// Append this event to `console`, one entry per line
    pub fn append_to(&self, console: &mut ConsoleLog) {
        console.push(&self.console_text());
    }
}

/// A message tagged with the sandbox instance that produced it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub instance: u64,
    pub message: RelayMessage,
}

/// Create a relay: a sender handed to sandbox instances and the host end
pub fn relay_channel() -> (RelaySender, HostRelay) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RelaySender { tx }, HostRelay { rx })
}

/// Cloneable sending side, bound to a sandbox instance via [`RelaySender::port`]
#[derive(Clone, Debug)]
pub struct RelaySender {
    tx: mpsc::UnboundedSender<Envelope>,
}

impl RelaySender {
    /// Sending port for one sandbox instance
    pub fn port(&self, instance: u64) -> SandboxPort {
        SandboxPort {
            instance,
            tx: self.tx.clone(),
        }
    }
}

/// The only way out of a sandbox instance
///
/// Posting is fire-and-forget: there is no reply and no acknowledgement.
#[derive(Clone, Debug)]
pub struct SandboxPort {
    instance: u64,
    tx: mpsc::UnboundedSender<Envelope>,
}

impl SandboxPort {
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Post a message to the host; returns `false` once the host is gone
    pub fn post(&self, message: RelayMessage) -> bool {
        self.tx
            .send(Envelope {
                instance: self.instance,
                message,
            })
            .is_ok()
    }
}

/// Receiving end owned by the host
#[derive(Debug)]
pub struct HostRelay {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl HostRelay {
    /// Wait for the next message; `None` once every sender is dropped
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    /// Next queued message, without waiting
    pub fn try_recv(&mut self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }

    /// Move every queued message into `console` without waiting
    pub fn drain_into(&mut self, console: &mut ConsoleLog) -> usize {
        let mut count = 0;
        while let Some(envelope) = self.try_recv() {
            envelope.message.append_to(console);
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_decode_wire_format() {
        let msg = RelayMessage::from_json(r#"{"type":"console_log","message":"hi"}"#).unwrap();
        assert_eq!(msg, RelayMessage::log("hi"));
        let msg = RelayMessage::from_json(r#"{"type":"console_error","message":"boom"}"#).unwrap();
        assert_eq!(msg, RelayMessage::error("boom"));
    }

    #[test]
    fn test_encode_wire_format() {
        let json = serde_json::to_value(RelayMessage::error("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "type": ERROR_EVENT, "message": "x" }));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(RelayMessage::from_json(r#"{"type":"resize","message":"x"}"#).is_err());
        assert!(RelayMessage::from_value(serde_json::json!({ "source": "devtools" })).is_none());
        assert!(RelayMessage::from_value(serde_json::json!("plain string")).is_none());
    }

    #[test]
    fn test_append_prefixes_and_splits() {
        let mut console = ConsoleLog::new();
        RelayMessage::log("{\n  \"a\": 1\n}").append_to(&mut console);
        RelayMessage::error("bad").append_to(&mut console);
        assert_eq!(console.lines(), ["[LOG] {", "  \"a\": 1", "}", "[ERR] bad"]);
    }

    #[test]
    fn test_channel_is_fifo_per_instance() {
        let (sender, mut host) = relay_channel();
        let port = sender.port(7);
        assert_eq!(port.instance(), 7);
        assert!(port.post(RelayMessage::log("first")));
        assert!(port.post(RelayMessage::error("second")));
        assert!(port.post(RelayMessage::log("third")));

        let mut console = ConsoleLog::new();
        assert_eq!(host.drain_into(&mut console), 3);
        assert_eq!(console.lines(), ["[LOG] first", "[ERR] second", "[LOG] third"]);
        assert_eq!(host.drain_into(&mut console), 0);
    }

    #[test]
    fn test_post_after_host_dropped() {
        let (sender, host) = relay_channel();
        drop(host);
        assert!(!sender.port(1).post(RelayMessage::log("lost")));
    }

    #[tokio::test]
    async fn test_recv_tags_instance() {
        let (sender, mut host) = relay_channel();
        sender.port(3).post(RelayMessage::log("a"));
        let envelope = host.recv().await.unwrap();
        assert_eq!(envelope.instance, 3);
        assert_eq!(envelope.message.message(), "a");
    }
}
