//! `rootPath` for every text file: the relative prefix that leads from the
//! file back to the traversal root (`""`, `"../"`, `"../../"`, ...), so
//! layouts can link shared assets as `{{rootPath}}style.css`.

use crate::content::{ContentTree, Cursor, NodeId, Value, Visitor};

pub const ROOT_PATH_KEY: &str = "rootPath";

#[derive(Debug, Default)]
pub struct RootPathPass;

impl RootPathPass {
    pub fn run(&self, tree: &mut ContentTree, root: NodeId) {
        tree.accept(root, &mut RootPathVisitor);
    }
}

struct RootPathVisitor;

impl Visitor for RootPathVisitor {
    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, parents: &[NodeId]) {
        let prefix = "../".repeat(parents.len().saturating_sub(1));
        cursor
            .data_mut(file)
            .insert(ROOT_PATH_KEY.to_string(), Value::String(prefix));
    }
}
