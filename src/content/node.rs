//! Node variants of the content tree.
//!
//! The variant set is closed: a node is a [`Directory`], a [`TextFile`] or a
//! [`BinaryFile`], and every traversal matches on [`NodeKind`] exhaustively.
//! Nodes never own each other directly; a directory holds the [`NodeId`]s of
//! its children and each node holds a non-owning back-reference to its parent.
//! Both live in the [`ContentTree`](super::ContentTree) arena.

use super::value::Data;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor as IoCursor, Read};
use std::path::PathBuf;

/// Index of a node in its [`ContentTree`](super::ContentTree).
///
/// Node identity is `NodeId` equality. Two nodes with the same name in
/// different places are different nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A file name split into its basename and extension chain.
///
/// `post.md.erb` is basename `post` with extensions `["md", "erb"]`. Passes
/// rewrite the chain as content changes format (markdown becomes `html`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    pub basename: String,
    pub extensions: Vec<String>,
}

impl FileName {
    pub fn new(basename: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            basename: basename.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// `basename.ext1.ext2`, or just the basename when there are no extensions.
    pub fn display_name(&self) -> String {
        if self.extensions.is_empty() {
            self.basename.clone()
        } else {
            format!("{}.{}", self.basename, self.extensions.join("."))
        }
    }

    /// The extension adjacent to the basename.
    pub fn innermost(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// The extension at the end of the name.
    pub fn outermost(&self) -> Option<&str> {
        self.extensions.last().map(String::as_str)
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[derive(Debug, Default)]
pub struct Directory {
    pub(crate) children: Vec<NodeId>,
}

impl Directory {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A file whose contents live in memory and may be rewritten by passes.
#[derive(Debug)]
pub struct TextFile {
    pub file_name: FileName,
    pub text: String,
    /// Where the file came from, for log messages.
    pub origin: String,
}

/// A file whose contents are streamed from a source when written.
#[derive(Debug)]
pub struct BinaryFile {
    pub file_name: FileName,
    pub source: BinarySource,
}

#[derive(Debug, Clone)]
pub enum BinarySource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

impl BinarySource {
    /// Open the byte stream. Path sources are opened lazily, here.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match self {
            BinarySource::Path(path) => Ok(Box::new(File::open(path)?)),
            BinarySource::Memory(bytes) => Ok(Box::new(IoCursor::new(bytes.as_slice()))),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            BinarySource::Path(path) => format!("Binary file {}", path.display()),
            BinarySource::Memory(bytes) => format!("In-memory binary ({} bytes)", bytes.len()),
        }
    }
}

#[derive(Debug)]
pub enum NodeKind {
    Directory(Directory),
    Text(TextFile),
    Binary(BinaryFile),
}

#[derive(Debug)]
pub struct Node {
    /// Directory name. Files keep their name in [`FileName`] instead.
    pub(crate) dir_name: String,
    pub(crate) parent: Option<NodeId>,
    pub data: Data,
    pub kind: NodeKind,
}

impl Node {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            dir_name: String::new(),
            parent: None,
            data: Data::new(),
            kind,
        }
    }

    /// Display name: the directory name, or `basename.ext...` for files.
    pub fn name(&self) -> String {
        match &self.kind {
            NodeKind::Directory(_) => self.dir_name.clone(),
            NodeKind::Text(file) => file.file_name.display_name(),
            NodeKind::Binary(file) => file.file_name.display_name(),
        }
    }

    /// Rename the node. For files this replaces the basename and keeps the
    /// extension chain.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match &mut self.kind {
            NodeKind::Directory(_) => self.dir_name = name,
            NodeKind::Text(file) => file.file_name.basename = name,
            NodeKind::Binary(file) => file.file_name.basename = name,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn file_name(&self) -> Option<&FileName> {
        match &self.kind {
            NodeKind::Directory(_) => None,
            NodeKind::Text(file) => Some(&file.file_name),
            NodeKind::Binary(file) => Some(&file.file_name),
        }
    }

    pub fn as_text(&self) -> Option<&TextFile> {
        match &self.kind {
            NodeKind::Text(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextFile> {
        match &mut self.kind {
            NodeKind::Text(file) => Some(file),
            _ => None,
        }
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Directory(dir) => dir.children(),
            _ => &[],
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Directory(_) => write!(f, "Directory{{{}}}", self.dir_name),
            NodeKind::Text(file) => write!(f, "TextFile{{{}}}", file.origin),
            NodeKind::Binary(file) => write!(f, "BinaryFile{{{}}}", file.source.describe()),
        }
    }
}
