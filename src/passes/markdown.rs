//! Markdown conversion.
//!
//! Only the extension next to the basename decides whether a file is
//! markdown, because that is the format the text is in once every outer
//! extension has been processed:
//!
//! | Extension chain | Outcome |
//! |-----------------|---------|
//! | `["md"]` | converted, chain becomes `["html"]` |
//! | `["md", "erb"]` | deferred: another conversion has to run first |
//! | `["foo", "md"]` | left alone, the text is not markdown |
//! | `["css"]` | not markdown, skipped |
//!
//! Deferred files are reported in [`MarkdownOutcome::deferred`] so a driver
//! can run the pass again once their outer extension has been handled.

use crate::content::{ContentTree, Cursor, NodeId, Visitor};
use crate::diagnostics::Diagnostics;
use crate::engines::MarkdownEngine;
use tracing::debug;

pub const HTML_EXTENSION: &str = "html";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MarkdownOutcome {
    pub converted: usize,
    pub deferred: Vec<NodeId>,
}

pub struct MarkdownPass<'e> {
    engine: &'e dyn MarkdownEngine,
    extensions: Vec<String>,
}

impl<'e> MarkdownPass<'e> {
    pub fn new(engine: &'e dyn MarkdownEngine, extensions: Vec<String>) -> Self {
        Self { engine, extensions }
    }

    pub fn run(&self, tree: &mut ContentTree, root: NodeId, diag: &mut Diagnostics) -> MarkdownOutcome {
        let mut visitor = MarkdownVisitor {
            pass: self,
            diag,
            outcome: MarkdownOutcome::default(),
        };
        tree.accept(root, &mut visitor);
        visitor.outcome
    }

    fn is_markdown(&self, ext: &str) -> bool {
        self.extensions.iter().any(|m| m.eq_ignore_ascii_case(ext))
    }
}

struct MarkdownVisitor<'a, 'e> {
    pass: &'a MarkdownPass<'e>,
    diag: &'a mut Diagnostics,
    outcome: MarkdownOutcome,
}

impl Visitor for MarkdownVisitor<'_, '_> {
    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        let Some(payload) = cursor.node(file).as_text() else {
            return;
        };
        let exts = &payload.file_name.extensions;

        if !exts.iter().any(|e| self.pass.is_markdown(e)) {
            return;
        }
        if !exts.first().is_some_and(|e| self.pass.is_markdown(e)) {
            debug!(file = %cursor.tree().path_of(file), "markdown extension is not innermost, leaving as is");
            return;
        }
        if exts.len() > 1 {
            let message = format!(
                "markdown waits for .{} to be processed first",
                exts[1..].join(".")
            );
            self.diag.deferred(cursor.tree().path_of(file), message);
            self.outcome.deferred.push(file);
            return;
        }

        let html = self.pass.engine.to_html(&payload.text);
        debug!(file = %cursor.tree().path_of(file), "converted markdown");
        if let Some(payload) = cursor.text_file_mut(file) {
            payload.text = html;
            if let Some(last) = payload.file_name.extensions.last_mut() {
                *last = HTML_EXTENSION.to_string();
            }
        }
        self.outcome.converted += 1;
    }
}
