//! # Quill Core
//!
//! The model behind the Quill web-project IDE, free of any UI toolkit.
//!
//! - [`fs`]: the in-memory project tree with structurally shared edits
//! - [`tabs`]: open tabs and the active file
//! - [`preview`]: turns the tree into one self-contained HTML document
//! - [`sandbox`] and [`relay`]: load that document in an isolated frame and
//!   carry its console output back to the host
//! - [`console`]: the console lines shown to the user
//! - [`layout`]: pointer-driven pane resizing
//! - [`state`]: the application state and its actions
//!
//! ## Quick Start
//!
//! ```rust
//! use quill_core::prelude::*;
//!
//! let mut state = IdeState::default();
//! if let Some(Effect::LoadPreview(doc)) = state.dispatch(Action::Run) {
//!     assert!(doc.html().contains("<style>"));
//! }
//! ```

pub mod console;
pub mod fs;
pub mod layout;
pub mod preview;
pub mod relay;
pub mod sandbox;
pub mod state;
pub mod tabs;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::console::{ConsoleLog, LineKind};
    pub use crate::fs::{FileKind, FileNode, FileTree, seed_project};
    pub use crate::layout::{Axis, Divider, DragState, LayoutConfig, PaneLayout};
    pub use crate::preview::{ComposedDocument, compose};
    pub use crate::relay::{HostRelay, RelayMessage, SandboxPort, relay_channel};
    pub use crate::sandbox::{SANDBOX_FLAGS, SandboxFrame, SandboxHost};
    pub use crate::state::{Action, AssistKind, AssistRequest, BottomTab, Effect, IdeState};
    pub use crate::tabs::OpenFiles;

    pub use crate::{Error, Result};
}
