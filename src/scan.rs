//! Filesystem reader.
//!
//! Stage one of every build: each of the layout, site and blog directories
//! is read into its own root in the [`ContentTree`]. The directory structure
//! maps one-to-one onto the tree:
//!
//! ```text
//! site/                        Directory "site"
//! ├── index.md                 ├── TextFile index.[md]
//! ├── about/                   ├── Directory "about"
//! │   └── team.html            │   └── TextFile team.[html]
//! ├── style.css                ├── BinaryFile style.[css]
//! └── .DS_Store                (skipped)
//! ```
//!
//! ## Rules
//!
//! - Entries are read in file-name order, which becomes the output order.
//! - Dotfiles and dot-directories are skipped entirely.
//! - A file whose *last* extension is one of the configured text extensions is
//!   read into memory as a text file; passes can rewrite it.
//! - Everything else is a binary file that is only opened when written out.
//! - A file or directory that cannot be read is a resource diagnostic and is
//!   left out; the rest of the tree is still read.

use crate::content::{BinarySource, ContentTree, NodeId, TreeError};
use crate::diagnostics::Diagnostics;
use crate::naming::{is_hidden, is_text_file, split_file_name};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("content directory not found: {0}")]
    Missing(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Read the directory at `path` into a new root of `tree`.
///
/// The root directory node is named after the last component of `path`.
pub fn read_content_root(
    tree: &mut ContentTree,
    path: &Path,
    text_extensions: &[String],
    diag: &mut Diagnostics,
) -> Result<NodeId, ScanError> {
    if !path.exists() {
        return Err(ScanError::Missing(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ScanError::NotADirectory(path.to_path_buf()));
    }

    let root_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let root = tree.add_directory(root_name);
    let mut directories: HashMap<PathBuf, NodeId> = HashMap::from([(path.to_path_buf(), root)]);

    let walker = WalkDir::new(path)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(&e.file_name().to_string_lossy()));

    let mut files = 0;
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let subject = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| path.display().to_string());
                diag.resource(subject, e.to_string());
                continue;
            }
        };
        let Some(&parent) = entry.path().parent().and_then(|p| directories.get(p)) else {
            continue;
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let id = if entry.file_type().is_dir() {
            let id = tree.add_directory(name);
            directories.insert(entry.path().to_path_buf(), id);
            id
        } else {
            let file_name = split_file_name(&name);
            if is_text_file(&file_name, text_extensions) {
                match fs::read_to_string(entry.path()) {
                    Ok(text) => tree.add_text_file(
                        file_name,
                        text,
                        format!("Text file {}", entry.path().display()),
                    ),
                    Err(e) => {
                        diag.resource(entry.path().display().to_string(), e.to_string());
                        continue;
                    }
                }
            } else {
                tree.add_binary_file(file_name, BinarySource::Path(entry.path().to_path_buf()))
            }
        };
        tree.attach(parent, id)?;
        if !tree.node(id).is_directory() {
            files += 1;
        }
    }

    debug!(path = %path.display(), files, "read content root");
    Ok(root)
}
