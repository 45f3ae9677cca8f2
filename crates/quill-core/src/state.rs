//! Application state and its transitions
//!
//! All IDE state lives in one [`IdeState`]. UI events become [`Action`]s fed
//! to [`IdeState::dispatch`], which updates the state synchronously and may
//! return an [`Effect`] for the host to carry out: loading a new preview
//! frame or calling the assistant. The outcome of an assistant call comes back
//! as another action.

use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::console::ConsoleLog;
use crate::fs::{DEFAULT_OPEN_FILE_ID, FileNode, FileTree, seed_project};
use crate::layout::{LayoutConfig, PaneLayout};
use crate::preview::{ComposedDocument, compose};
use crate::relay::RelayMessage;
use crate::tabs::OpenFiles;

/// Which view the bottom panel shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BottomTab {
    #[default]
    Console,
    Preview,
}

/// The two assistant operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssistKind {
    /// Explain the code, suggest improvements and point out bugs
    Explain,
    /// Write a unit test suite for the code
    GenerateTests,
}

impl AssistKind {
    /// Status line written before the call starts
    pub fn start_line(self, file_name: &str) -> String {
        match self {
            Self::Explain => format!("> Asking AI about {file_name}..."),
            Self::GenerateTests => format!("> Generating tests for {file_name}..."),
        }
    }

    /// Console line for a call that failed outright
    pub fn failure_line(self, reason: &str) -> String {
        match self {
            Self::Explain => format!("Error asking AI: {reason}"),
            Self::GenerateTests => format!("Error generating tests: {reason}"),
        }
    }
}

/// An assistant call the host must perform
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistRequest {
    pub kind: AssistKind,
    pub file_name: String,
    pub code: String,
}

/// Something the host has to do after a transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Tear down the preview frame and load this document in a new one
    LoadPreview(ComposedDocument),
    /// Start an assistant call, then dispatch [`Action::AssistFinished`]
    Assist(AssistRequest),
}

/// Everything the UI can ask the state to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Click on a tree entry: open a file, or toggle a folder
    Select(String),
    /// Click on a tab
    Activate(String),
    /// Close button of a tab
    Close(String),
    /// Editor content changed
    Edit { id: String, content: String },
    /// Clear the console, compose and show the preview
    Run,
    /// Compose and show the preview, keeping the console
    RefreshPreview,
    ClearConsole,
    ShowBottomTab(BottomTab),
    ToggleExplorer,
    /// Ask the assistant about the active file
    Assist(AssistKind),
    /// An assistant call settled
    AssistFinished {
        kind: AssistKind,
        outcome: Result<String, String>,
    },
    /// A message relayed out of the preview sandbox
    Sandbox(RelayMessage),
    /// Replace the whole project, e.g. after importing a directory
    OpenProject(FileTree),
}

/// The whole IDE state
#[derive(Clone, Debug, PartialEq)]
pub struct IdeState {
    pub tree: FileTree,
    pub tabs: OpenFiles,
    pub console: ConsoleLog,
    pub bottom_tab: BottomTab,
    pub explorer_visible: bool,
    /// Expanded folder ids in the explorer (presentation only)
    pub expanded: BTreeSet<String>,
    pub layout: PaneLayout,
    /// An assistant call is in flight; AI and run actions are disabled
    pub loading: Option<AssistKind>,
}

impl Default for IdeState {
    fn default() -> Self {
        Self::new(seed_project(), LayoutConfig::default())
    }
}

impl IdeState {
    /// Start with `tree`, opening the default file when the tree has it
    pub fn new(tree: FileTree, layout: LayoutConfig) -> Self {
        let tabs = match tree.find_by_id(DEFAULT_OPEN_FILE_ID) {
            Some(node) if node.is_file() => OpenFiles::with_file(DEFAULT_OPEN_FILE_ID),
            _ => OpenFiles::new(),
        };
        let expanded = tree
            .iter()
            .filter(|node| node.is_folder())
            .map(|node| node.id.clone())
            .collect();

        Self {
            tree,
            tabs,
            console: ConsoleLog::welcome(),
            bottom_tab: BottomTab::Console,
            explorer_visible: true,
            expanded,
            layout: PaneLayout::new(layout),
            loading: None,
        }
    }

    /// The active file, read from the current tree
    pub fn active_file(&self) -> Option<&FileNode> {
        self.tabs.active().and_then(|id| self.tree.find_by_id(id))
    }

    /// Open tabs in order, skipping ids no longer in the tree
    pub fn open_files(&self) -> impl Iterator<Item = &FileNode> {
        self.tabs.ids().iter().filter_map(|id| self.tree.find_by_id(id))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn is_expanded(&self, folder_id: &str) -> bool {
        self.expanded.contains(folder_id)
    }

    /// Apply `action`, returning the effect the host must run, if any
    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Select(id) => {
                self.select(&id);
                None
            }
            Action::Activate(id) => {
                if let Some(node) = self.tree.find_by_id(&id) {
                    self.tabs.set_active(node);
                }
                None
            }
            Action::Close(id) => {
                self.tabs.close(&id);
                None
            }
            Action::Edit { id, content } => {
                self.tree = self.tree.update_content(&id, content);
                None
            }
            Action::Run => self.run(),
            Action::RefreshPreview => Some(self.refresh_preview()),
            Action::ClearConsole => {
                self.console.clear();
                None
            }
            Action::ShowBottomTab(tab) => {
                self.bottom_tab = tab;
                None
            }
            Action::ToggleExplorer => {
                self.explorer_visible = !self.explorer_visible;
                None
            }
            Action::Assist(kind) => self.start_assist(kind),
            Action::AssistFinished { kind, outcome } => {
                self.finish_assist(kind, outcome);
                None
            }
            Action::Sandbox(message) => {
                message.append_to(&mut self.console);
                None
            }
            Action::OpenProject(tree) => {
                self.open_project(tree);
                None
            }
        }
    }

    fn select(&mut self, id: &str) {
        let Some(node) = self.tree.find_by_id(id) else {
            return;
        };
        if node.is_folder() {
            if !self.expanded.remove(id) {
                self.expanded.insert(id.to_string());
            }
        } else {
            self.tabs.select(node);
        }
    }

    fn open_project(&mut self, tree: FileTree) {
        let fresh = Self::new(tree, self.layout.config().clone());
        info!(files = fresh.tree.file_count(), "Opened project");
        self.tree = fresh.tree;
        self.tabs = fresh.tabs;
        self.expanded = fresh.expanded;
        self.console.push(&format!("> Opened project ({} files)", self.tree.file_count()));
    }

    fn run(&mut self) -> Option<Effect> {
        if self.is_loading() {
            debug!("Run ignored while the assistant is busy");
            return None;
        }
        self.console.clear();
        self.console.push("> Executing code...");
        let effect = self.refresh_preview();
        self.console
            .push("> View the result in the Preview tab. Console is listening for logs.");
        Some(effect)
    }

    fn refresh_preview(&mut self) -> Effect {
        self.bottom_tab = BottomTab::Preview;
        Effect::LoadPreview(compose(&self.tree))
    }

    fn start_assist(&mut self, kind: AssistKind) -> Option<Effect> {
        if self.is_loading() {
            debug!(?kind, "Assistant already busy, ignoring trigger");
            return None;
        }
        let file = self.active_file()?;
        let request = AssistRequest {
            kind,
            file_name: file.name.clone(),
            code: file.content.clone(),
        };

        info!(?kind, file = %request.file_name, "Starting assistant request");
        self.bottom_tab = BottomTab::Console;
        self.loading = Some(kind);
        self.console.clear();
        self.console.push(&kind.start_line(&request.file_name));
        Some(Effect::Assist(request))
    }

    fn finish_assist(&mut self, kind: AssistKind, outcome: Result<String, String>) {
        match outcome {
            Ok(text) => self.console.push(&text),
            Err(reason) => self.console.push(&kind.failure_line(&reason)),
        }
        self.loading = None;
    }
}
