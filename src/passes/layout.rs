//! Layout composition.
//!
//! The layout for a text file is inherited: the `layout` value closest to the
//! file wins, scanning its ancestors from the root down and finishing with the
//! file's own metadata. Layouts are text files in a separate layout tree,
//! looked up by path, and each layout can name a further layout the same way
//! (through its own metadata or its directories in the layout tree). A post
//! therefore renders as `post.hbs`, then `blogPage.hbs`, then `base.hbs`, each
//! step wrapping the output of the previous one.
//!
//! ## Algorithm
//!
//! 1. Walk the content tree once and queue `(file, layout)` for every text
//!    file that resolves to a layout.
//! 2. Pop requests in FIFO order. Each one looks the layout up, renders it with
//!    the file's metadata and the file's current text as the body, replaces
//!    the text, then queues `(file, next)` if the layout itself resolves to a
//!    further layout.
//!
//! A missing layout is a lookup miss and a failed render a format diagnostic;
//! in both cases the file keeps the text it had before that step and its chain
//! stops there. A chain longer than `max_depth` is abandoned, which is what
//! stops a cyclic layout graph.

use crate::content::{ContentTree, Cursor, NodeId, Value, Visitor};
use crate::diagnostics::Diagnostics;
use crate::engines::TemplateEngine;
use std::collections::VecDeque;
use tracing::debug;

pub const LAYOUT_KEY: &str = "layout";

pub const DEFAULT_MAX_DEPTH: usize = 32;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LayoutOutcome {
    /// Number of successful template applications.
    pub rendered: usize,
}

struct RenderRequest {
    file: NodeId,
    layout: String,
    depth: usize,
}

pub struct LayoutPass<'e> {
    engine: &'e dyn TemplateEngine,
    layouts: NodeId,
    max_depth: usize,
}

impl<'e> LayoutPass<'e> {
    /// `layouts` is the root of the layout tree, which must live in the same
    /// arena as the content it is applied to.
    pub fn new(engine: &'e dyn TemplateEngine, layouts: NodeId) -> Self {
        Self {
            engine,
            layouts,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn run(&self, tree: &mut ContentTree, root: NodeId, diag: &mut Diagnostics) -> LayoutOutcome {
        let mut collector = RequestCollector::default();
        tree.accept(root, &mut collector);

        let mut outcome = LayoutOutcome::default();
        let mut queue = collector.queue;
        while let Some(request) = queue.pop_front() {
            if let Step::Rendered(next) = self.apply(tree, request, diag) {
                outcome.rendered += 1;
                queue.extend(next);
            }
        }
        outcome
    }

    fn apply(&self, tree: &mut ContentTree, request: RenderRequest, diag: &mut Diagnostics) -> Step {
        let RenderRequest { file, layout, depth } = request;
        let subject = tree.path_of(file);

        if depth > self.max_depth {
            diag.format(
                subject,
                format!("layout chain exceeds {} levels at {layout}, giving up", self.max_depth),
            );
            return Step::Skipped;
        }

        let Some(template) = tree.get_path(self.layouts, &layout) else {
            diag.lookup_miss(subject, format!("layout {layout} not found"));
            return Step::Skipped;
        };
        let Some(source) = tree.node(template).as_text() else {
            diag.lookup_miss(subject, format!("layout {layout} is not a text file"));
            return Step::Skipped;
        };
        let Some(body) = tree.node(file).as_text() else {
            return Step::Skipped;
        };

        debug!(file = %subject, %layout, depth, "applying layout");
        let rendered = match self
            .engine
            .render(&layout, &source.text, &tree.node(file).data, &body.text)
        {
            Ok(rendered) => rendered,
            Err(e) => {
                diag.format(subject, e.to_string());
                return Step::Skipped;
            }
        };
        if let Some(payload) = tree.node_mut(file).as_text_mut() {
            payload.text = rendered;
        }

        let next = resolve_layout(tree, template).map(|layout| RenderRequest {
            file,
            layout,
            depth: depth + 1,
        });
        Step::Rendered(next)
    }
}

enum Step {
    /// Applied; carries the parent layout request, if any.
    Rendered(Option<RenderRequest>),
    Skipped,
}

/// The `layout` closest to `id`: its own value, else the nearest ancestor's.
pub fn resolve_layout(tree: &ContentTree, id: NodeId) -> Option<String> {
    tree.all_parents(id)
        .into_iter()
        .filter_map(|n| tree.node(n).data.get(LAYOUT_KEY).and_then(Value::as_str))
        .last()
        .map(str::to_string)
}

#[derive(Default)]
struct RequestCollector {
    queue: VecDeque<RenderRequest>,
}

impl Visitor for RequestCollector {
    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        if let Some(layout) = resolve_layout(cursor.tree(), file) {
            self.queue.push_back(RenderRequest {
                file,
                layout,
                depth: 1,
            });
        }
    }
}
