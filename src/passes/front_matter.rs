//! Front matter extraction.
//!
//! Text files that open with a front matter block have it parsed into their
//! metadata, and their text replaced by what follows the block. Files without
//! one are untouched. A block that fails to parse is a format diagnostic and
//! the file keeps its raw text.

use crate::content::{ContentTree, Cursor, NodeId, Visitor};
use crate::diagnostics::Diagnostics;
use crate::engines::FrontMatterExtractor;
use tracing::debug;

pub struct FrontMatterPass<'e> {
    extractor: &'e dyn FrontMatterExtractor,
}

impl<'e> FrontMatterPass<'e> {
    pub fn new(extractor: &'e dyn FrontMatterExtractor) -> Self {
        Self { extractor }
    }

    /// Returns the number of files that had front matter.
    pub fn run(&self, tree: &mut ContentTree, root: NodeId, diag: &mut Diagnostics) -> usize {
        let mut visitor = FrontMatterVisitor {
            extractor: self.extractor,
            diag,
            extracted: 0,
        };
        tree.accept(root, &mut visitor);
        visitor.extracted
    }
}

struct FrontMatterVisitor<'a> {
    extractor: &'a dyn FrontMatterExtractor,
    diag: &'a mut Diagnostics,
    extracted: usize,
}

impl Visitor for FrontMatterVisitor<'_> {
    fn text_file(&mut self, cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        let Some(payload) = cursor.node(file).as_text() else {
            return;
        };

        match self.extractor.extract(&payload.text) {
            Ok(None) => {}
            Ok(Some((data, body))) => {
                debug!(file = %cursor.tree().path_of(file), keys = data.len(), "front matter");
                cursor.data_mut(file).extend(data);
                if let Some(payload) = cursor.text_file_mut(file) {
                    payload.text = body;
                }
                self.extracted += 1;
            }
            Err(e) => self.diag.format(cursor.tree().path_of(file), e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Value;
    use crate::diagnostics::DiagnosticKind;
    use crate::engines::YamlFrontMatter;
    use crate::test_helpers::*;

    #[test]
    fn extracts_into_data_and_strips_block() {
        let mut tree = ContentTree::new();
        let root = tree.add_directory("site");
        let a = text_in(&mut tree, root, "a", &["md"], "---\ntitle: A\n---\n# A\n");
        let mut diag = Diagnostics::new();

        let n = FrontMatterPass::new(&YamlFrontMatter).run(&mut tree, root, &mut diag);

        assert_eq!(n, 1);
        assert_eq!(data_str(&tree, a, "title"), "A");
        assert_eq!(text_at(&tree, root, "a.md"), "# A\n");
        assert!(diag.is_empty());
    }

    #[test]
    fn front_matter_overrides_existing_keys() {
        let mut tree = ContentTree::new();
        let root = tree.add_directory("site");
        let a = text_in(&mut tree, root, "a", &["md"], "---\nlayout: own.hbs\n---\n");
        set(&mut tree, a, "layout", "stamped.hbs");
        set(&mut tree, a, "kept", Value::Integer(1));

        FrontMatterPass::new(&YamlFrontMatter).run(&mut tree, root, &mut Diagnostics::new());

        assert_eq!(data_str(&tree, a, "layout"), "own.hbs");
        assert_eq!(tree.node(a).data["kept"], Value::Integer(1));
    }

    #[test]
    fn files_without_front_matter_are_untouched() {
        let mut tree = ContentTree::new();
        let root = tree.add_directory("site");
        let a = text_in(&mut tree, root, "a", &["css"], "body { color: red }");

        let n = FrontMatterPass::new(&YamlFrontMatter).run(&mut tree, root, &mut Diagnostics::new());

        assert_eq!(n, 0);
        assert!(tree.node(a).data.is_empty());
        assert_eq!(text_at(&tree, root, "a.css"), "body { color: red }");
    }

    #[test]
    fn malformed_block_keeps_raw_text_and_continues() {
        let mut tree = ContentTree::new();
        let root = tree.add_directory("site");
        let raw = "---\ntitle: [oops\n---\nbody";
        text_in(&mut tree, root, "bad", &["md"], raw);
        let good = text_in(&mut tree, root, "good", &["md"], "---\ntitle: ok\n---\nbody");
        let mut diag = Diagnostics::new();

        FrontMatterPass::new(&YamlFrontMatter).run(&mut tree, root, &mut diag);

        assert_eq!(text_at(&tree, root, "bad.md"), raw);
        assert_eq!(data_str(&tree, good, "title"), "ok");
        assert_eq!(diag.count(DiagnosticKind::Format), 1);
        assert_eq!(diag.iter().next().unwrap().subject, "site/bad.md");
    }
}
