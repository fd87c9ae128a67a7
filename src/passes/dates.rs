//! Date parsing.
//!
//! For each configured key holding a string, on any node, the parsed
//! timestamp is stored as `<key>_raw` (milliseconds since the Unix epoch) and
//! `<key>_formatted` (e.g. `Jan 5, 2024 10:30 +0000`). Pagination sorts on
//! `date_raw`; templates display `date_formatted`.

use crate::content::{ContentTree, Cursor, NodeId, Value, Visitor};
use crate::diagnostics::Diagnostics;
use crate::engines::DateParser;
use tracing::debug;

pub const DISPLAY_FORMAT: &str = "%b %-d, %Y %H:%M %z";

pub struct DatePass<'e> {
    parser: &'e dyn DateParser,
    keys: Vec<String>,
}

impl<'e> DatePass<'e> {
    pub fn new(parser: &'e dyn DateParser, keys: Vec<String>) -> Self {
        Self { parser, keys }
    }

    /// Returns the number of dates parsed.
    pub fn run(&self, tree: &mut ContentTree, root: NodeId, diag: &mut Diagnostics) -> usize {
        let mut visitor = DateVisitor {
            pass: self,
            diag,
            parsed: 0,
        };
        tree.accept(root, &mut visitor);
        visitor.parsed
    }

    fn visit(&self, cursor: &mut Cursor<'_>, id: NodeId, diag: &mut Diagnostics) -> usize {
        let mut parsed = 0;
        for key in &self.keys {
            let Some(input) = cursor.node(id).data.get(key).and_then(Value::as_str) else {
                continue;
            };
            let Some(date) = self.parser.parse(input) else {
                let message = format!("could not parse {key} {input:?} as a date");
                diag.format(cursor.tree().path_of(id), message);
                continue;
            };

            let formatted = date.format(DISPLAY_FORMAT).to_string();
            debug!(node = %cursor.tree().path_of(id), key = %key, %formatted, "parsed date");
            let data = cursor.data_mut(id);
            data.insert(format!("{key}_raw"), Value::Integer(date.timestamp_millis()));
            data.insert(format!("{key}_formatted"), Value::String(formatted));
            parsed += 1;
        }
        parsed
    }
}

struct DateVisitor<'a, 'e> {
    pass: &'a DatePass<'e>,
    diag: &'a mut Diagnostics,
    parsed: usize,
}

impl Visitor for DateVisitor<'_, '_> {
    fn directory(&mut self, cursor: &mut Cursor<'_>, dir: NodeId, _parents: &[NodeId]) {
        self.parsed += self.pass.visit(cursor, dir, self.diag);
    }

    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        self.parsed += self.pass.visit(cursor, file, self.diag);
    }

    fn binary_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        self.parsed += self.pass.visit(cursor, file, self.diag);
    }
}
