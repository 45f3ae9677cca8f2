//! Quill CLI - compose previews, inspect projects and ask the assistant

mod watch;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quill_assist::Assistant;
use quill_core::console::ConsoleLog;
use quill_core::fs::{FileNode, FileTree, export_dir, import_dir, seed_project};
use quill_core::preview::{ComposedDocument, compose};
use quill_core::relay::{RelayMessage, relay_channel};
use quill_core::sandbox::host_page;

#[derive(Parser)]
#[command(name = "quill")]
#[command(about = "A small web-project IDE with a sandboxed live preview", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a project into one self-contained HTML document
    Compose {
        /// Project directory (uses the built-in starter project if omitted)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Wrap the document in a sandboxed page with a console pane
        #[arg(long)]
        host_page: bool,
    },

    /// Write the starter project to a directory
    Seed {
        /// Destination directory
        dir: PathBuf,
    },

    /// Print a project's file tree with node ids
    Tree {
        /// Project directory (uses the built-in starter project if omitted)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Read sandbox messages as JSON lines on stdin and print console output
    Relay,

    /// Ask the assistant to explain a source file
    Explain {
        /// Source file
        file: PathBuf,
    },

    /// Ask the assistant to write unit tests for a source file
    Tests {
        /// Source file
        file: PathBuf,
    },

    /// Recompose a project whenever one of its files changes
    Watch {
        /// Project directory
        project: PathBuf,

        /// Output file, rewritten on every change
        #[arg(short, long)]
        output: PathBuf,

        /// Wrap the document in a sandboxed page with a console pane
        #[arg(long)]
        host_page: bool,

        /// Debounce interval in milliseconds
        #[arg(long, default_value = "200")]
        debounce: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command output only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compose {
            project,
            output,
            host_page,
        } => {
            run_compose(project.as_deref(), output.as_deref(), host_page)?;
        }
        Commands::Seed { dir } => {
            let written = export_dir(&seed_project(), &dir)?;
            println!("Wrote {written} files to {}", dir.display());
        }
        Commands::Tree { project } => {
            let tree = load_project(project.as_deref())?;
            print!("{}", render_tree(&tree));
        }
        Commands::Relay => {
            run_relay().await?;
        }
        Commands::Explain { file } => {
            let code = read_source(&file).await?;
            println!("{}", Assistant::from_env()?.explain(&code).await);
        }
        Commands::Tests { file } => {
            let code = read_source(&file).await?;
            println!("{}", Assistant::from_env()?.generate_tests(&code).await);
        }
        Commands::Watch {
            project,
            output,
            host_page,
            debounce,
        } => {
            tokio::task::spawn_blocking(move || {
                watch::run_watch(&project, &output, host_page, debounce)
            })
            .await??;
        }
    }

    Ok(())
}

fn load_project(project: Option<&Path>) -> Result<FileTree> {
    match project {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("Project directory not found: {}", dir.display());
            }
            import_dir(dir).with_context(|| format!("Failed to import {}", dir.display()))
        }
        None => Ok(seed_project()),
    }
}

/// The composed document, or the standalone page wrapping it
pub(crate) fn render(document: &ComposedDocument, wrap: bool) -> String {
    if wrap {
        host_page(document)
    } else {
        document.html().to_string()
    }
}

fn run_compose(project: Option<&Path>, output: Option<&Path>, wrap: bool) -> Result<()> {
    let tree = load_project(project)?;
    let document = compose(&tree);
    if document.is_not_found() {
        warn!("Project has no index.html");
    }
    let html = render(&document, wrap);

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                output = %path.display(),
                style = document.inlined_style(),
                script = document.inlined_script(),
                "Composed preview"
            );
        }
        None => {
            std::io::stdout().write_all(html.as_bytes())?;
        }
    }
    Ok(())
}

fn render_tree(tree: &FileTree) -> String {
    fn walk(node: &FileNode, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        if node.is_folder() {
            out.push_str(&format!("{indent}{}/ [{}]\n", node.name, node.id));
            for child in &node.children {
                walk(child, depth + 1, out);
            }
        } else {
            out.push_str(&format!(
                "{indent}{} [{}] {} bytes\n",
                node.name,
                node.id,
                node.content.len()
            ));
        }
    }

    let mut out = String::new();
    for root in tree.roots() {
        walk(root, 0, &mut out);
    }
    out
}

async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Pipe stdin through the relay: one sandbox instance posts every decoded
/// line, the host side prints console output in arrival order
async fn run_relay() -> Result<()> {
    let (sender, mut host) = relay_channel();
    let port = sender.port(1);
    drop(sender);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match RelayMessage::from_json(&line) {
                Ok(message) => {
                    if !port.post(message) {
                        break;
                    }
                }
                Err(e) => warn!("Skipping malformed message: {e}"),
            }
        }
        anyhow::Ok(())
    });

    let mut console = ConsoleLog::new();
    while let Some(envelope) = host.recv().await {
        let start = console.len();
        envelope.message.append_to(&mut console);
        for line in &console.lines()[start..] {
            println!("{line}");
        }
    }

    reader.await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_seed_tree() {
        let rendered = render_tree(&seed_project());
        assert!(rendered.starts_with("public/ [1]\n  index.html [2] "));
        assert!(rendered.contains("src/ [3]\n  style.css [4] "));
        assert!(rendered.contains("\npackage.json [6] "));
    }

    #[test]
    fn test_render_wraps_on_request() {
        let document = compose(&seed_project());
        assert_eq!(render(&document, false), document.html());
        assert!(render(&document, true).contains("sandbox=\"allow-scripts allow-same-origin\""));
    }
}
