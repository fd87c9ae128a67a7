//! Read-more snippets.
//!
//! A post can mark the end of its teaser with `<!--more-->` (or
//! `<!-- more -->`). Everything before the first marker is stored as the
//! `snippet` key so index pages can show teasers instead of whole posts.

use crate::content::{ContentTree, Cursor, NodeId, Value, Visitor};
use tracing::debug;

pub const SNIPPET_KEY: &str = "snippet";

const MARKERS: &[&str] = &["<!--more-->", "<!-- more -->"];

#[derive(Debug, Default)]
pub struct ReadMorePass;

impl ReadMorePass {
    /// Returns the number of snippets stored.
    pub fn run(&self, tree: &mut ContentTree, root: NodeId) -> usize {
        let mut visitor = ReadMoreVisitor { snippets: 0 };
        tree.accept(root, &mut visitor);
        visitor.snippets
    }
}

fn snippet_end(text: &str) -> Option<usize> {
    MARKERS.iter().find_map(|marker| text.find(marker))
}

struct ReadMoreVisitor {
    snippets: usize,
}

impl Visitor for ReadMoreVisitor {
    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        let Some(payload) = cursor.node(file).as_text() else {
            return;
        };
        let Some(end) = snippet_end(&payload.text) else {
            return;
        };

        let snippet = payload.text[..end].to_string();
        debug!(file = %cursor.tree().path_of(file), len = end, "read-more snippet");
        cursor
            .data_mut(file)
            .insert(SNIPPET_KEY.to_string(), Value::String(snippet));
        self.snippets += 1;
    }
}
