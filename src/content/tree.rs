//! The [`ContentTree`] arena and the structural tree operations.
//!
//! One arena holds every node of a build: the layout tree, the site tree, the
//! blog tree and the merged target all live side by side as separate roots.
//! Nodes under different roots are disjoint; [`ContentTree::relative_path`]
//! between them fails.
//!
//! Structural operations ([`attach`](ContentTree::attach),
//! [`detach`](ContentTree::detach), [`merge`](ContentTree::merge)) enforce the
//! at-most-one-parent and acyclicity invariants and fail without mutating
//! anything when a precondition does not hold.

use super::node::{BinaryFile, BinarySource, Directory, FileName, Node, NodeId, NodeKind, TextFile};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("{0} already has a parent")]
    AlreadyAttached(String),
    #[error("{0} is not a directory")]
    NotADirectory(String),
    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: String, child: String },
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: String, child: String },
    #[error("donor directory {0} must not be attached to a content tree")]
    DonorAttached(String),
    #[error("{from} and {to} do not share a common parent")]
    Disjoint { from: String, to: String },
}

#[derive(Debug, Default)]
pub struct ContentTree {
    nodes: Vec<Node>,
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached, empty directory.
    pub fn add_directory(&mut self, name: impl Into<String>) -> NodeId {
        let mut node = Node::new(NodeKind::Directory(Directory::default()));
        node.dir_name = name.into();
        self.push(node)
    }

    /// Create a detached text file.
    pub fn add_text_file(
        &mut self,
        file_name: FileName,
        text: impl Into<String>,
        origin: impl Into<String>,
    ) -> NodeId {
        self.push(Node::new(NodeKind::Text(TextFile {
            file_name,
            text: text.into(),
            origin: origin.into(),
        })))
    }

    /// Create a detached binary file.
    pub fn add_binary_file(&mut self, file_name: FileName, source: BinarySource) -> NodeId {
        self.push(Node::new(NodeKind::Binary(BinaryFile { file_name, source })))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: NodeId) -> String {
        self.node(id).name()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children in iteration order. Files have none.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    /// Attach a detached `child` as the last child of the directory `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.node(parent).is_directory() {
            return Err(TreeError::NotADirectory(self.path_of(parent)));
        }
        if self.node(child).parent.is_some() {
            return Err(TreeError::AlreadyAttached(self.path_of(child)));
        }
        if self.all_parents(parent).contains(&child) {
            return Err(TreeError::WouldCycle {
                parent: self.path_of(parent),
                child: self.path_of(child),
            });
        }
        self.node_mut(child).parent = Some(parent);
        if let NodeKind::Directory(dir) = &mut self.node_mut(parent).kind {
            dir.children.push(child);
        }
        Ok(())
    }

    /// Remove `child` from `parent`, leaving it detached and free to be
    /// attached elsewhere.
    pub fn detach(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let not_a_child = || TreeError::NotAChild {
            parent: self.path_of(parent),
            child: self.path_of(child),
        };
        if self.node(child).parent != Some(parent) {
            return Err(not_a_child());
        }
        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == child)
            .ok_or_else(not_a_child)?;
        if let NodeKind::Directory(dir) = &mut self.node_mut(parent).kind {
            dir.children.remove(position);
        }
        self.node_mut(child).parent = None;
        Ok(())
    }

    /// Move every child of the root directory `donor` to the end of
    /// `target`'s children, preserving order. `donor` is left empty.
    pub fn merge(&mut self, target: NodeId, donor: NodeId) -> Result<(), TreeError> {
        if self.node(donor).parent.is_some() {
            return Err(TreeError::DonorAttached(self.path_of(donor)));
        }
        if !self.node(donor).is_directory() {
            return Err(TreeError::NotADirectory(self.path_of(donor)));
        }
        if !self.node(target).is_directory() {
            return Err(TreeError::NotADirectory(self.path_of(target)));
        }
        if target == donor || self.all_parents(target).contains(&donor) {
            return Err(TreeError::WouldCycle {
                parent: self.path_of(target),
                child: self.path_of(donor),
            });
        }

        let moved = match &mut self.node_mut(donor).kind {
            NodeKind::Directory(dir) => std::mem::take(&mut dir.children),
            _ => Vec::new(),
        };
        for &child in &moved {
            self.node_mut(child).parent = Some(target);
        }
        if let NodeKind::Directory(dir) = &mut self.node_mut(target).kind {
            dir.children.extend(moved);
        }
        Ok(())
    }

    fn child_by_name(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.children(dir)
            .iter()
            .copied()
            .find(|&child| self.node(child).name() == name)
    }

    /// Look up a `/`-separated path below `from`.
    ///
    /// Only the final segment may name a file; anything else in the way makes
    /// the lookup miss.
    pub fn get_path(&self, from: NodeId, path: &str) -> Option<NodeId> {
        let (first, rest) = match path.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (path, None),
        };
        let child = self.child_by_name(from, first)?;
        match rest {
            None => Some(child),
            Some(rest) if self.node(child).is_directory() => self.get_path(child, rest),
            Some(_) => None,
        }
    }

    /// Like [`get_path`](Self::get_path), but every missing segment is created
    /// as a directory. Returns the node at the end of the path.
    pub fn get_path_or_create(&mut self, from: NodeId, path: &str) -> Result<NodeId, TreeError> {
        let mut current = from;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            if !self.node(current).is_directory() {
                return Err(TreeError::NotADirectory(self.path_of(current)));
            }
            current = match self.child_by_name(current, segment) {
                Some(existing) => existing,
                None => {
                    let created = self.add_directory(segment);
                    self.attach(current, created)?;
                    created
                }
            };
        }
        Ok(current)
    }

    /// The ancestor chain from the root down to `id`, inclusive.
    pub fn all_parents(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain.reverse();
        chain
    }

    /// The deepest node that is an ancestor of (or equal to) both `a` and `b`.
    pub fn nearest_common_parent(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        self.all_parents(a)
            .into_iter()
            .zip(self.all_parents(b))
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| x)
    }

    /// A POSIX-style relative link from `from`'s location (its parent
    /// directory) to `to`, usable as an href between two rendered pages.
    ///
    /// One `..` per step from `from`'s parent up to the nearest common
    /// parent, then the names below it down to `to`. When `from` is itself an
    /// ancestor of `to` the walk starts at `from`'s parent all the same, so
    /// the link always resolves from where `from` lives. A link to `from`'s
    /// own directory is `.`.
    pub fn relative_path(&self, from: NodeId, to: NodeId) -> Result<String, TreeError> {
        if self.nearest_common_parent(from, to).is_none() {
            return Err(TreeError::Disjoint {
                from: self.path_of(from),
                to: self.path_of(to),
            });
        }

        let mut location = self.all_parents(from);
        location.pop();
        let target = self.all_parents(to);
        let shared = location
            .iter()
            .zip(&target)
            .take_while(|(a, b)| a == b)
            .count();

        let mut segments: Vec<String> = vec!["..".to_string(); location.len() - shared];
        segments.extend(target[shared..].iter().map(|&n| self.name(n)));

        if segments.is_empty() {
            Ok(".".to_string())
        } else {
            Ok(segments.join("/"))
        }
    }

    /// Names from the root down to `id`, joined with `/`.
    pub fn path_of(&self, id: NodeId) -> String {
        self.all_parents(id)
            .into_iter()
            .map(|n| self.name(n))
            .collect::<Vec<_>>()
            .join("/")
    }
}
