//! Shared test utilities for the strata test suite.
//!
//! Provides fixture setup, node builders and lookup helpers that work with
//! the [`ContentTree`] arena.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut tree = ContentTree::new();
//! let root = tree.add_directory("root");
//! let post = text(&mut tree, "post", &["md"], "# Hi");
//! tree.attach(root, post).unwrap();
//!
//! assert_eq!(find(&tree, root, "post.md"), post);
//! assert_eq!(text_at(&tree, root, "post.md"), "# Hi");
//! assert_eq!(child_names(&tree, root), vec!["post.md"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{ContentTree, FileName, NodeId, Value};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Builders
// =========================================================================

/// Create a detached text file node.
pub fn text(tree: &mut ContentTree, basename: &str, exts: &[&str], text: &str) -> NodeId {
    tree.add_text_file(
        FileName::new(basename, exts),
        text.to_string(),
        format!("Test file {}", FileName::new(basename, exts)),
    )
}

/// Create a text file and attach it under `parent`.
pub fn text_in(
    tree: &mut ContentTree,
    parent: NodeId,
    basename: &str,
    exts: &[&str],
    body: &str,
) -> NodeId {
    let id = text(tree, basename, exts, body);
    tree.attach(parent, id).unwrap();
    id
}

/// Create a directory and attach it under `parent`.
pub fn dir_in(tree: &mut ContentTree, parent: NodeId, name: &str) -> NodeId {
    let id = tree.add_directory(name);
    tree.attach(parent, id).unwrap();
    id
}

/// Set one metadata key on a node.
pub fn set(tree: &mut ContentTree, id: NodeId, key: &str, value: impl Into<Value>) {
    tree.node_mut(id).data.insert(key.to_string(), value.into());
}

// =========================================================================
// Lookups
// =========================================================================

/// Find a node by path below `root`. Panics with the available names if missing.
pub fn find(tree: &ContentTree, root: NodeId, path: &str) -> NodeId {
    tree.get_path(root, path).unwrap_or_else(|| {
        panic!(
            "Path '{}' not found under '{}'. Children: {:?}",
            path,
            tree.name(root),
            child_names(tree, root)
        )
    })
}

/// Text of the text file at `path` below `root`.
pub fn text_at<'a>(tree: &'a ContentTree, root: NodeId, path: &str) -> &'a str {
    let id = find(tree, root, path);
    match tree.node(id).as_text() {
        Some(file) => &file.text,
        None => panic!("'{}' is not a text file: {}", path, tree.node(id)),
    }
}

/// String metadata value on a node, panicking when absent or not a string.
pub fn data_str<'a>(tree: &'a ContentTree, id: NodeId, key: &str) -> &'a str {
    tree.node(id)
        .data
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_else(|| {
            panic!(
                "'{}' has no string '{}'. Keys: {:?}",
                tree.path_of(id),
                key,
                tree.node(id).data.keys().collect::<Vec<_>>()
            )
        })
}

/// Display names of a directory's children, in order.
pub fn child_names(tree: &ContentTree, id: NodeId) -> Vec<String> {
    tree.children(id).iter().map(|&c| tree.name(c)).collect()
}
