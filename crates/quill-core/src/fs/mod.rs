//! Project file tree: the in-memory store, the starter project and disk I/O

mod disk;
mod seed;
mod tree;

pub use disk::{export_dir, import_dir, import_dir_excluding, resolve};
pub use seed::{DEFAULT_OPEN_FILE_ID, seed_project};
pub use tree::{FileKind, FileNode, FileTree, PreOrder};
