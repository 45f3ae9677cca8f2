//! Recompose a project directory whenever a file below it changes

use anyhow::{Context, Result, anyhow};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebouncedEvent, new_debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use tracing::{error, info};

use quill_core::fs::{import_dir_excluding, resolve};
use quill_core::preview::compose;

/// Whether a change below the project should trigger a rebuild
///
/// Hidden entries are never part of a project, and the output file may live
/// inside the watched directory.
fn is_relevant(path: &Path, root: &Path, output: &Path) -> bool {
    if path == output {
        return false;
    }
    let relative = path.strip_prefix(root).unwrap_or(path);
    !relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// `output` must already be resolved; it is left out of the imported tree
fn rebuild(project: &Path, output: &Path, wrap: bool) -> Result<()> {
    let tree = import_dir_excluding(project, &[output.to_path_buf()])?;
    let document = compose(&tree);
    std::fs::write(output, crate::render(&document, wrap))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        files = tree.file_count(),
        found = !document.is_not_found(),
        "Preview rebuilt"
    );
    Ok(())
}

/// Block until the watcher shuts down, rebuilding `output` on every change
pub fn run_watch(project: &Path, output: &Path, wrap: bool, debounce_ms: u64) -> Result<()> {
    if !project.is_dir() {
        anyhow::bail!("Project directory not found: {}", project.display());
    }
    let root = project.canonicalize().unwrap_or_else(|_| project.to_path_buf());
    // Resolved like `root` so events for our own writes match it
    let output_abs = resolve(output);

    let (tx, rx) = channel::<Vec<PathBuf>>();
    let mut debouncer = new_debouncer(
        Duration::from_millis(debounce_ms),
        move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
            Ok(events) => {
                let _ = tx.send(events.into_iter().map(|e| e.path).collect());
            }
            Err(e) => error!("Watch error: {e:?}"),
        },
    )
    .map_err(|e| anyhow!("Failed to create file watcher: {e:?}"))?;

    debouncer
        .watcher()
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| anyhow!("Failed to watch {}: {e}", root.display()))?;

    info!("Watching {} -> {}", root.display(), output.display());
    rebuild(&root, &output_abs, wrap)?;

    while let Ok(paths) = rx.recv() {
        if !paths
            .iter()
            .any(|path| is_relevant(path, &root, &output_abs))
        {
            continue;
        }
        // Keep watching through broken intermediate states
        if let Err(e) = rebuild(&root, &output_abs, wrap) {
            error!("Rebuild failed: {e:#}");
        }
    }
    Ok(())
}
