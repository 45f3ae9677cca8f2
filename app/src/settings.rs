//! Application settings
//!
//! Settings are stored in `{config_dir}/quill/settings.json`. Anything
//! missing or unreadable falls back to the defaults.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use quill_core::layout::LayoutConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub explorer_visible: bool,
    pub explorer_width: f64,
    /// Editor height in pixels; `None` means 60% of the window
    pub editor_height: Option<f64>,
    /// Editor font size in pixels
    pub font_size: u32,
    /// Last project folder opened, reopened on startup
    pub project_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            explorer_visible: true,
            explorer_width: LayoutConfig::default().initial_explorer_width,
            editor_height: None,
            font_size: 14,
            project_dir: None,
        }
    }
}

impl Settings {
    /// Pane configuration for a window `window_height` pixels tall
    pub fn layout_config(&self, window_height: f64) -> LayoutConfig {
        LayoutConfig {
            initial_explorer_width: self.explorer_width,
            initial_editor_height: self.editor_height.unwrap_or(window_height * 0.6),
            ..LayoutConfig::default()
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("quill").join("settings.json"))
}

pub fn load_settings() -> Settings {
    settings_path().map_or_else(Settings::default, |path| load_from(&path))
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let Some(path) = settings_path() else {
        bail!("Could not determine config directory");
    };
    save_to(settings, &path)
}

fn load_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

fn save_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, json).context("Failed to write settings file")
}
