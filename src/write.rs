//! Filesystem writer.
//!
//! The final stage: the tree rooted at the traversal root is written below the
//! output directory, which stands in for the root itself. Directories are
//! created, text files written from memory and binary files streamed from
//! their source.
//!
//! Writing never aborts the build. A path that already exists with the wrong
//! kind (a file where a directory belongs, or the other way round) or an I/O
//! failure is a resource diagnostic, and that entry (with everything below it,
//! for a directory) is left out.

use crate::content::{ContentTree, Cursor, NodeId, NodeKind, Visitor};
use crate::diagnostics::Diagnostics;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub directories: usize,
    pub files: usize,
}

/// Write the subtree at `root` into `output_dir`.
pub fn write_content_root(
    tree: &mut ContentTree,
    root: NodeId,
    output_dir: &Path,
    diag: &mut Diagnostics,
) -> WriteSummary {
    let mut writer = TreeWriter {
        output_dir,
        diag,
        failed: Vec::new(),
        summary: WriteSummary::default(),
    };
    tree.accept(root, &mut writer);
    writer.summary
}

struct TreeWriter<'a> {
    output_dir: &'a Path,
    diag: &'a mut Diagnostics,
    /// Directories that could not be created; nothing below them is written.
    failed: Vec<NodeId>,
    summary: WriteSummary,
}

impl TreeWriter<'_> {
    /// Output path for a node. `parents[0]` is the traversal root, which maps
    /// to the output directory. `None` below a directory that failed.
    fn target(&self, cursor: &Cursor<'_>, id: NodeId, parents: &[NodeId]) -> Option<PathBuf> {
        if parents.iter().any(|p| self.failed.contains(p)) {
            return None;
        }
        let mut path = self.output_dir.to_path_buf();
        for &dir in parents.iter().skip(1) {
            path.push(cursor.tree().name(dir));
        }
        if !parents.is_empty() {
            path.push(cursor.tree().name(id));
        }
        Some(path)
    }

    fn write_file(&mut self, cursor: &Cursor<'_>, id: NodeId, parents: &[NodeId]) {
        let Some(path) = self.target(cursor, id, parents) else {
            return;
        };
        if path.is_dir() {
            self.diag.resource(
                path.display().to_string(),
                "a directory exists where a file should be written",
            );
            return;
        }

        let result = match &cursor.node(id).kind {
            NodeKind::Text(file) => fs::write(&path, &file.text),
            NodeKind::Binary(file) => copy_binary(file.source.open(), &path),
            NodeKind::Directory(_) => return,
        };
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "wrote file");
                self.summary.files += 1;
            }
            Err(e) => self.diag.resource(path.display().to_string(), e.to_string()),
        }
    }
}

fn copy_binary(source: io::Result<Box<dyn io::Read + '_>>, path: &Path) -> io::Result<()> {
    let mut reader = source?;
    let mut out = File::create(path)?;
    io::copy(&mut reader, &mut out)?;
    Ok(())
}

impl Visitor for TreeWriter<'_> {
    fn directory(&mut self, cursor: &mut Cursor<'_>, dir: NodeId, parents: &[NodeId]) {
        let Some(path) = self.target(cursor, dir, parents) else {
            return;
        };
        if path.exists() && !path.is_dir() {
            self.diag.resource(
                path.display().to_string(),
                "a file exists where a directory should be created",
            );
            self.failed.push(dir);
            return;
        }
        match fs::create_dir_all(&path) {
            Ok(()) => self.summary.directories += 1,
            Err(e) => {
                self.diag.resource(path.display().to_string(), e.to_string());
                self.failed.push(dir);
            }
        }
    }

    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, parents: &[NodeId]) {
        self.write_file(cursor, file, parents);
    }

    fn binary_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, parents: &[NodeId]) {
        self.write_file(cursor, file, parents);
    }
}
