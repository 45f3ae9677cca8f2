//! In-memory project tree with structural sharing
//!
//! Nodes are reference counted so that an edit only rebuilds the chain of
//! folders leading to the edited file. Every untouched sibling and subtree in
//! the new tree is the same allocation as in the old one, which lets a UI
//! detect changes by pointer identity instead of deep comparison.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use crate::{Error, Result};

/// Whether a node holds text or other nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Folder,
}

/// A file or folder in the project tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// Unique across the whole tree
    pub id: String,
    /// File name, e.g. `index.html`
    pub name: String,
    /// Absolute slash-separated path (informational only)
    pub path: String,
    pub kind: FileKind,
    /// Text content; always empty for folders
    #[serde(default)]
    pub content: String,
    /// Ordered children; always empty for files
    #[serde(default)]
    pub children: Vec<Arc<FileNode>>,
}

impl FileNode {
    /// Create a file node
    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            kind: FileKind::File,
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Create a folder node owning `children`
    pub fn folder(
        id: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        children: Vec<FileNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            kind: FileKind::Folder,
            content: String::new(),
            children: children.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Display name of the file's language, for the status bar
    pub fn language(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("html" | "htm") => "HTML",
            Some("css") => "CSS",
            Some("js" | "mjs" | "cjs") => "JavaScript",
            Some("ts") => "TypeScript",
            Some("json") => "JSON",
            Some("md") => "Markdown",
            Some("svg" | "xml") => "XML",
            _ => "Plain Text",
        }
    }
}

/// The project: an ordered list of root nodes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTree {
    roots: Vec<Arc<FileNode>>,
}

impl FileTree {
    /// Build a tree, checking id uniqueness and node shape
    pub fn new(roots: Vec<FileNode>) -> Result<Self> {
        let tree = Self::from_trusted(roots);
        tree.validate()?;
        Ok(tree)
    }

    /// Build a tree from nodes that are known to be well formed
    pub(crate) fn from_trusted(roots: Vec<FileNode>) -> Self {
        Self {
            roots: roots.into_iter().map(Arc::new).collect(),
        }
    }

    /// Check the tree invariants
    ///
    /// Ids must be unique, folders carry no content and files no children.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in self.iter() {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::DuplicateId(node.id.clone()));
            }
            match node.kind {
                FileKind::Folder if !node.content.is_empty() => {
                    return Err(Error::InvalidNode {
                        id: node.id.clone(),
                        reason: "folder has content",
                    });
                }
                FileKind::File if !node.children.is_empty() => {
                    return Err(Error::InvalidNode {
                        id: node.id.clone(),
                        reason: "file has children",
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn roots(&self) -> &[Arc<FileNode>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal over every node
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.roots.iter().rev().map(Arc::as_ref).collect(),
        }
    }

    /// Depth-first lookup by id
    pub fn find_by_id(&self, id: &str) -> Option<&FileNode> {
        self.iter().find(|node| node.id == id)
    }

    /// First file (never a folder) named exactly `name`, in pre-order
    pub fn find_file_by_name(&self, name: &str) -> Option<&FileNode> {
        self.iter().find(|node| node.is_file() && node.name == name)
    }

    /// Return a tree where file `id` holds `content`
    ///
    /// Only the ancestors of the edited file are new allocations. Unknown ids
    /// and folder ids leave the tree unchanged.
    pub fn update_content(&self, id: &str, content: impl Into<String>) -> FileTree {
        let content = content.into();
        match rebuild_path(&self.roots, id, &content) {
            Some(roots) => FileTree { roots },
            None => self.clone(),
        }
    }

    /// Number of file nodes
    pub fn file_count(&self) -> usize {
        self.iter().filter(|node| node.is_file()).count()
    }
}

/// Rebuild the sibling list containing `id` (directly or in a subtree)
///
/// Returns `None` when nothing below `nodes` matched, so callers can keep
/// their existing allocation.
fn rebuild_path(nodes: &[Arc<FileNode>], id: &str, content: &str) -> Option<Vec<Arc<FileNode>>> {
    for (idx, node) in nodes.iter().enumerate() {
        let replacement = if node.id == id {
            if !node.is_file() {
                return None;
            }
            let mut edited = FileNode::clone(node);
            edited.content = content.to_string();
            Some(edited)
        } else if node.is_folder() {
            rebuild_path(&node.children, id, content).map(|children| FileNode {
                children,
                ..FileNode::clone(node)
            })
        } else {
            None
        };

        if let Some(replacement) = replacement {
            let mut siblings = nodes.to_vec();
            siblings[idx] = Arc::new(replacement);
            return Some(siblings);
        }
    }
    None
}

/// Iterator returned by [`FileTree::iter`]
pub struct PreOrder<'a> {
    stack: Vec<&'a FileNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(Arc::as_ref));
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn sample() -> FileTree {
        FileTree::new(vec![
            FileNode::folder(
                "1",
                "public",
                "/public",
                vec![FileNode::file("2", "index.html", "/public/index.html", "<html></html>")],
            ),
            FileNode::folder(
                "3",
                "src",
                "/src",
                vec![
                    FileNode::file("4", "style.css", "/src/style.css", "body {}"),
                    FileNode::file("5", "script.js", "/src/script.js", "console.log(1)"),
                ],
            ),
            FileNode::file("6", "package.json", "/package.json", "{}"),
        ])
        .unwrap()
    }

    #[test]
    fn test_pre_order_traversal() {
        let tree = sample();
        let ids: Vec<&str> = tree.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_find_by_id() {
        let tree = sample();
        assert_eq!(tree.find_by_id("4").unwrap().name, "style.css");
        assert_eq!(tree.find_by_id("3").unwrap().kind, FileKind::Folder);
        assert!(tree.find_by_id("42").is_none());
        assert!(FileTree::default().find_by_id("1").is_none());
    }

    #[test]
    fn test_find_file_by_name_ignores_folders() {
        let tree = FileTree::new(vec![
            FileNode::folder("1", "script.js", "/script.js", vec![]),
            FileNode::file("2", "script.js", "/other/script.js", "second"),
        ])
        .unwrap();
        assert_eq!(tree.find_file_by_name("script.js").unwrap().id, "2");
        assert!(tree.find_file_by_name("Script.js").is_none());
    }

    #[test]
    fn test_update_content_shares_untouched_subtrees() {
        let tree = sample();
        let updated = tree.update_content("5", "console.log(2)");

        assert_eq!(updated.find_by_id("5").unwrap().content, "console.log(2)");
        assert_eq!(tree.find_by_id("5").unwrap().content, "console.log(1)");

        // public/ and package.json are untouched and shared
        assert!(Arc::ptr_eq(&tree.roots()[0], &updated.roots()[0]));
        assert!(Arc::ptr_eq(&tree.roots()[2], &updated.roots()[2]));
        // src/ is on the path and rebuilt, but its other child is shared
        assert!(!Arc::ptr_eq(&tree.roots()[1], &updated.roots()[1]));
        assert!(Arc::ptr_eq(
            &tree.roots()[1].children[0],
            &updated.roots()[1].children[0]
        ));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let tree = sample();
        let updated = tree.update_content("missing", "x");
        assert_eq!(tree, updated);
        assert!(Arc::ptr_eq(&tree.roots()[1], &updated.roots()[1]));
    }

    #[test]
    fn test_update_folder_is_noop() {
        let tree = sample();
        let updated = tree.update_content("3", "not allowed");
        assert!(updated.find_by_id("3").unwrap().content.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = FileTree::new(vec![
            FileNode::file("1", "a.txt", "/a.txt", ""),
            FileNode::folder("2", "dir", "/dir", vec![FileNode::file("1", "b.txt", "/dir/b.txt", "")]),
        ]);
        assert!(matches!(result, Err(Error::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn test_folder_with_content_rejected() {
        let mut folder = FileNode::folder("1", "dir", "/dir", vec![]);
        folder.content = "oops".to_string();
        assert!(matches!(
            FileTree::new(vec![folder]),
            Err(Error::InvalidNode { .. })
        ));
    }

    #[test]
    fn test_extension() {
        assert_eq!(
            FileNode::file("1", "Index.HTML", "/Index.HTML", "").extension().as_deref(),
            Some("html")
        );
        assert_eq!(FileNode::file("2", ".gitignore", "/.gitignore", "").extension(), None);
        assert_eq!(FileNode::file("3", "Makefile", "/Makefile", "").extension(), None);
    }

    #[test]
    fn test_language_label() {
        let label = |name: &str| FileNode::file("1", name, format!("/{name}"), "").language();
        assert_eq!(label("script.js"), "JavaScript");
        assert_eq!(label("STYLE.CSS"), "CSS");
        assert_eq!(label("package.json"), "JSON");
        assert_eq!(label("LICENSE"), "Plain Text");
    }

    #[test]
    fn test_serializes_like_project_json() {
        let tree = FileTree::new(vec![FileNode::file("1", "a.js", "/a.js", "x")]).unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["kind"], "file");
        let back: FileTree = serde_json::from_value(json).unwrap();
        assert_eq!(back, tree);
    }
}
