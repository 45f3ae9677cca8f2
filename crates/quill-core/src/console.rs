//! Console output shown in the bottom panel
//!
//! An append-only list of physical lines. Anything pushed is split on `\n`
//! so a multi-line message becomes several entries.

use serde::{Deserialize, Serialize};

/// Line printed when the application starts
pub const WELCOME_LINE: &str = "Welcome to Quill!";

/// How a console line should be styled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Relayed `console.log` output
    Log,
    /// Relayed `console.error` output or uncaught errors
    Error,
    /// A `> ...` status line written by the IDE itself
    Status,
    /// Anything else (assistant responses, continuation lines)
    Plain,
}

impl LineKind {
    /// Classify a line by its prefix
    pub fn of(line: &str) -> Self {
        if line.starts_with("[LOG] ") {
            Self::Log
        } else if line.starts_with("[ERR] ") || line.starts_with("Error ") {
            Self::Error
        } else if line.starts_with("> ") {
            Self::Status
        } else {
            Self::Plain
        }
    }

    /// CSS class name for styling
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Log => "console-log",
            Self::Error => "console-error",
            Self::Status => "console-status",
            Self::Plain => "console-plain",
        }
    }
}

/// Ordered console lines
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLog {
    lines: Vec<String>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console holding only the welcome line
    pub fn welcome() -> Self {
        let mut log = Self::new();
        log.push(WELCOME_LINE);
        log
    }

    /// Append `text`, one entry per physical line
    pub fn push(&mut self, text: &str) {
        self.lines.extend(text.split('\n').map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines with their 1-based gutter numbers, right aligned to width 3
    pub fn numbered(&self) -> impl Iterator<Item = (String, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| (format!("{:>3}", idx + 1), line.as_str()))
    }
}
