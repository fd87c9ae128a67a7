//! The traversal protocol.
//!
//! [`ContentTree::accept`] walks a subtree depth-first in pre-order. Each node
//! receives exactly one callback, chosen by matching on its variant, together
//! with its ancestors ordered root-to-parent. Every recursion step builds its
//! own extended copy of the ancestor list, so nothing a callback sees is
//! shared with its siblings.
//!
//! Visitors only ever get a [`Cursor`], which can read the whole tree and edit
//! node payloads (metadata, text, extension chain) but cannot attach, detach or
//! merge. Structural changes have to wait until the walk has finished.

use super::node::{Node, NodeId, NodeKind, TextFile};
use super::tree::ContentTree;
use super::value::Data;

pub trait Visitor {
    fn directory(&mut self, _cursor: &mut Cursor<'_>, _dir: NodeId, _parents: &[NodeId]) {}

    fn text_file(&mut self, _cursor: &mut Cursor<'_>, _file: NodeId, _parents: &[NodeId]) {}

    fn binary_file(&mut self, _cursor: &mut Cursor<'_>, _file: NodeId, _parents: &[NodeId]) {}
}

/// A visitor's view of the tree during a walk.
pub struct Cursor<'t> {
    tree: &'t mut ContentTree,
}

impl Cursor<'_> {
    pub fn tree(&self) -> &ContentTree {
        self.tree
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.node(id)
    }

    pub fn data_mut(&mut self, id: NodeId) -> &mut Data {
        &mut self.tree.node_mut(id).data
    }

    /// Mutable access to a text file's payload; `None` for other variants.
    pub fn text_file_mut(&mut self, id: NodeId) -> Option<&mut TextFile> {
        self.tree.node_mut(id).as_text_mut()
    }
}

impl ContentTree {
    /// Walk the subtree rooted at `root`, starting with no ancestors.
    pub fn accept<V: Visitor + ?Sized>(&mut self, root: NodeId, visitor: &mut V) {
        let mut cursor = Cursor { tree: self };
        walk(&mut cursor, root, &[], visitor);
    }
}

fn walk<V: Visitor + ?Sized>(
    cursor: &mut Cursor<'_>,
    id: NodeId,
    parents: &[NodeId],
    visitor: &mut V,
) {
    let variant = match &cursor.node(id).kind {
        NodeKind::Directory(_) => Variant::Directory,
        NodeKind::Text(_) => Variant::Text,
        NodeKind::Binary(_) => Variant::Binary,
    };
    match variant {
        Variant::Directory => {
            visitor.directory(cursor, id, parents);

            let mut child_parents = parents.to_vec();
            child_parents.push(id);
            let children = cursor.tree().children(id).to_vec();
            for child in children {
                walk(cursor, child, &child_parents, visitor);
            }
        }
        Variant::Text => visitor.text_file(cursor, id, parents),
        Variant::Binary => visitor.binary_file(cursor, id, parents),
    }
}

enum Variant {
    Directory,
    Text,
    Binary,
}
