//! Import a project directory from disk and write one back out

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::tree::{FileNode, FileTree};
use crate::{Error, Result};

/// Load `root` as a project tree
///
/// Hidden entries are skipped, folders sort before files and names compare
/// case-insensitively. Ids are assigned sequentially in pre-order starting at
/// `"1"`. Symbolic links are followed; a link back into one of its own
/// ancestor folders is skipped, as are dangling links and files that are not
/// valid UTF-8.
pub fn import_dir(root: &Path) -> Result<FileTree> {
    import_dir_excluding(root, &[])
}

/// Load `root` like [`import_dir`], leaving out the files at `excluded`
///
/// Paths are compared after resolving symbolic links, so a generated file
/// written inside the project never feeds back into its own input.
pub fn import_dir_excluding(root: &Path, excluded: &[PathBuf]) -> Result<FileTree> {
    let root = fs::canonicalize(root).map_err(|e| Error::io(root, e))?;
    let excluded: Vec<PathBuf> = excluded.iter().map(|path| resolve(path)).collect();
    let mut walk = Walk {
        next_id: 1,
        ancestors: Vec::new(),
        excluded: &excluded,
    };
    let roots = walk.read_children(&root, "")?;
    debug!(root = %root.display(), nodes = walk.next_id - 1, "Imported project");
    Ok(FileTree::from_trusted(roots))
}

/// Canonical form of `path`, also for a file that does not exist yet
pub fn resolve(path: &Path) -> PathBuf {
    if let Ok(path) = fs::canonicalize(path) {
        return path;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|parent| parent.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    }
}

struct Walk<'a> {
    next_id: u64,
    /// Canonical folders on the path from the root to the current one
    ancestors: Vec<PathBuf>,
    excluded: &'a [PathBuf],
}

impl Walk<'_> {
    fn read_children(&mut self, dir: &Path, parent_path: &str) -> Result<Vec<FileNode>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            // Follows links, unlike `DirEntry::file_type`
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(path = %path.display(), "Skipping unreadable entry: {e}");
                    continue;
                }
            };
            entries.push((name, path, metadata.is_dir()));
        }

        entries.sort_by(|a, b| match (a.2, b.2) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            _ => a.0.to_lowercase().cmp(&b.0.to_lowercase()),
        });

        self.ancestors.push(dir.to_path_buf());
        let mut nodes = Vec::with_capacity(entries.len());
        for (name, path, is_dir) in entries {
            let node_path = format!("{parent_path}/{name}");
            let Ok(real) = fs::canonicalize(&path) else {
                warn!(path = %path.display(), "Skipping unresolvable entry");
                continue;
            };
            if is_dir {
                if self.ancestors.contains(&real) {
                    warn!(path = %path.display(), "Skipping link cycle");
                    continue;
                }
                let id = self.take_id();
                let children = self.read_children(&real, &node_path)?;
                nodes.push(FileNode::folder(id, name, node_path, children));
            } else {
                if self.excluded.contains(&real) {
                    debug!(path = %path.display(), "Skipping excluded file");
                    continue;
                }
                let content = match fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) if e.kind() == ErrorKind::InvalidData => {
                        warn!(path = %path.display(), "Skipping non-UTF-8 file");
                        continue;
                    }
                    Err(e) => return Err(Error::io(path, e)),
                };
                let id = self.take_id();
                nodes.push(FileNode::file(id, name, node_path, content));
            }
        }
        self.ancestors.pop();
        Ok(nodes)
    }

    fn take_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }
}

/// Write every node of `tree` below `dest`, returning the number of files
///
/// Existing files with the same path are overwritten.
pub fn export_dir(tree: &FileTree, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    let mut written = 0;
    for node in tree.iter() {
        let target = dest.join(node.path.trim_start_matches('/'));
        if node.is_folder() {
            fs::create_dir_all(&target).map_err(|e| Error::io(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            fs::write(&target, &node.content).map_err(|e| Error::io(&target, e))?;
            written += 1;
        }
    }
    debug!(dest = %dest.display(), files = written, "Exported project");
    Ok(written)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::fs::seed_project;

    #[test]
    fn test_export_then_import_seed() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_dir(&seed_project(), dir.path()).unwrap();
        assert_eq!(written, 4);
        assert!(dir.path().join("public/index.html").exists());

        let tree = import_dir(dir.path()).unwrap();
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        // Folders first, then files, case-insensitive
        assert_eq!(
            names,
            ["public", "index.html", "src", "script.js", "style.css", "package.json"]
        );
        assert_eq!(tree.find_by_id("1").unwrap().path, "/public");
        assert_eq!(
            tree.find_file_by_name("style.css").unwrap().content,
            seed_project().find_file_by_name("style.css").unwrap().content
        );
    }

    #[test]
    fn test_import_skips_hidden_and_binary() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "SECRET=1").unwrap();
        fs::write(dir.path().join("logo.bin"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();

        let tree = import_dir(dir.path()).unwrap();
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["a.txt"]);
    }

    #[test]
    fn test_import_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_dir(&dir.path().join("nope"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_import_follows_folder_links_and_skips_dangling() {
        use std::os::unix::fs::symlink;

        let shared = tempfile::tempdir().unwrap();
        fs::write(shared.path().join("lib.js"), "export {}").unwrap();

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        symlink(shared.path(), dir.path().join("vendor")).unwrap();
        symlink(dir.path().join("gone.css"), dir.path().join("stale.css")).unwrap();

        let tree = import_dir(dir.path()).unwrap();
        let paths: Vec<&str> = tree.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, ["/vendor", "/vendor/lib.js", "/index.html"]);
        assert!(tree.find_by_id("1").unwrap().is_folder());
        assert_eq!(tree.find_file_by_name("lib.js").unwrap().content, "export {}");
    }

    #[cfg(unix)]
    #[test]
    fn test_import_skips_link_cycles() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/app.js"), "run()").unwrap();
        symlink(dir.path(), dir.path().join("src/root")).unwrap();

        let tree = import_dir(dir.path()).unwrap();
        let paths: Vec<&str> = tree.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, ["/src", "/src/app.js"]);
    }

    #[test]
    fn test_import_leaves_out_excluded_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build/index.html"), "generated").unwrap();
        fs::write(dir.path().join("index.html"), "source").unwrap();

        let output = dir.path().join("build/index.html");
        let tree = import_dir_excluding(dir.path(), &[output]).unwrap();
        let paths: Vec<&str> = tree.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, ["/build", "/index.html"]);
        assert_eq!(tree.find_file_by_name("index.html").unwrap().content, "source");
    }

    #[test]
    fn test_resolve_missing_file_uses_canonical_parent() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve(&dir.path().join("out.html"));
        assert_eq!(resolved, fs::canonicalize(dir.path()).unwrap().join("out.html"));
    }
}
