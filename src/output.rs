//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output describes what the build produced, not how it got there. The tree
//! listing shows each output file with the layout it was rendered through;
//! the summary reports counts per stage; diagnostics are grouped by kind so a
//! run with many missing layouts reads as one block rather than a scattered log.
//!
//! # Output Format
//!
//! ## Tree (`check`)
//!
//! ```text
//! target/
//!     index.html  (layout: blogPage.hbs, page 1)
//!     about.html  (layout: page.hbs)
//!     style.css
//!     page/
//!         2/
//!             index.html  (layout: blogPage.hbs, page 2)
//! ```
//!
//! ## Build summary
//!
//! ```text
//! Read 3 layouts, 12 files
//! Front matter in 10 files, 4 dates parsed
//! Converted 9 markdown files
//! Generated 2 blog pages
//! Applied 21 layouts
//! Wrote 14 files in 4 directories
//! ```
//!
//! ## Diagnostics
//!
//! ```text
//! missing (1)
//!     site/old.html: layout gone.hbs not found
//! format (1)
//!     blog/draft.md: could not parse date "someday" as a date
//! ```
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::content::{ContentTree, NodeId, NodeKind, Value};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::passes::layout::LAYOUT_KEY;
use crate::pipeline::BuildReport;
use serde_json::json;

const INDENT: &str = "    ";

// ============================================================================
// Tree
// ============================================================================

/// Indented listing of the tree below `root`.
pub fn format_tree(tree: &ContentTree, root: NodeId) -> Vec<String> {
    let mut lines = Vec::new();
    tree_lines(tree, root, 0, &mut lines);
    lines
}

fn tree_lines(tree: &ContentTree, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let node = tree.node(id);
    let indent = INDENT.repeat(depth);
    match &node.kind {
        NodeKind::Directory(dir) => {
            lines.push(format!("{indent}{}/", node.name()));
            for &child in dir.children() {
                tree_lines(tree, child, depth + 1, lines);
            }
        }
        NodeKind::Text(_) | NodeKind::Binary(_) => {
            let mut details = Vec::new();
            if let Some(layout) = node.data.get(LAYOUT_KEY).and_then(Value::as_str) {
                details.push(format!("layout: {layout}"));
            }
            if let Some(page) = node.data.get("page").and_then(Value::as_i64) {
                details.push(format!("page {page}"));
            }
            if details.is_empty() {
                lines.push(format!("{indent}{}", node.name()));
            } else {
                lines.push(format!("{indent}{}  ({})", node.name(), details.join(", ")));
            }
        }
    }
}

pub fn print_tree(tree: &ContentTree, root: NodeId) {
    for line in format_tree(tree, root) {
        println!("{line}");
    }
}

/// The tree below `root` with every node's metadata, for `check --json`.
/// Text bodies are left out; they are what `build` writes.
pub fn tree_json(tree: &ContentTree, id: NodeId) -> serde_json::Value {
    let node = tree.node(id);
    match &node.kind {
        NodeKind::Directory(dir) => json!({
            "name": node.name(),
            "kind": "directory",
            "data": node.data,
            "children": dir
                .children()
                .iter()
                .map(|&child| tree_json(tree, child))
                .collect::<Vec<_>>(),
        }),
        NodeKind::Text(file) => json!({
            "name": node.name(),
            "kind": "text",
            "origin": file.origin,
            "data": node.data,
        }),
        NodeKind::Binary(file) => json!({
            "name": node.name(),
            "kind": "binary",
            "origin": file.source.describe(),
            "data": node.data,
        }),
    }
}

// ============================================================================
// Build summary
// ============================================================================

pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Read {}, {}",
            plural(report.layouts_read, "layout"),
            plural(report.files_read, "file")
        ),
        format!(
            "Front matter in {}, {} parsed",
            plural(report.front_matter, "file"),
            plural(report.dates_parsed, "date")
        ),
        format!("Converted {}", plural(report.markdown_converted, "markdown file")),
    ];
    if !report.markdown_deferred.is_empty() {
        lines.push(format!(
            "Deferred {}:",
            plural(report.markdown_deferred.len(), "markdown file")
        ));
        for path in &report.markdown_deferred {
            lines.push(format!("{INDENT}{path}"));
        }
    }
    if report.pages_generated > 0 {
        lines.push(format!("Generated {}", plural(report.pages_generated, "blog page")));
    }
    lines.push(format!("Applied {}", plural(report.layouts_applied, "layout")));
    if let Some(written) = report.written {
        lines.push(format!(
            "Wrote {} in {}",
            plural(written.files, "file"),
            plural(written.directories, "directory")
        ));
    }
    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{line}");
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Diagnostics grouped by kind, in kind order, each group headed by its count.
pub fn format_diagnostics(diag: &Diagnostics) -> Vec<String> {
    let mut lines = Vec::new();
    for kind in [
        DiagnosticKind::LookupMiss,
        DiagnosticKind::Format,
        DiagnosticKind::Resource,
        DiagnosticKind::Deferred,
    ] {
        let count = diag.count(kind);
        if count == 0 {
            continue;
        }
        lines.push(format!("{} ({count})", kind.label()));
        for d in diag.iter().filter(|d| d.kind == kind) {
            lines.push(format!("{INDENT}{}: {}", d.subject, d.message));
        }
    }
    lines
}

pub fn print_diagnostics(diag: &Diagnostics) {
    for line in format_diagnostics(diag) {
        println!("{line}");
    }
}

fn plural(count: usize, noun: &str) -> String {
    match (count, noun) {
        (1, _) => format!("1 {noun}"),
        (_, "directory") => format!("{count} directories"),
        _ => format!("{count} {noun}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::write::WriteSummary;

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(0, "file"), "0 files");
        assert_eq!(plural(2, "directory"), "2 directories");
        assert_eq!(plural(1, "directory"), "1 directory");
    }

    #[test]
    fn tree_listing_indents_and_annotates() {
        let mut tree = ContentTree::new();
        let root = tree.add_directory("target");
        let index = text_in(&mut tree, root, "index", &["html"], "");
        set(&mut tree, index, "layout", "blogPage.hbs");
        set(&mut tree, index, "page", Value::Integer(1));
        let sub = dir_in(&mut tree, root, "css");
        text_in(&mut tree, sub, "site", &["css"], "");

        assert_eq!(
            format_tree(&tree, root),
            vec![
                "target/",
                "    index.html  (layout: blogPage.hbs, page 1)",
                "    css/",
                "        site.css",
            ]
        );
    }

    #[test]
    fn build_report_lines() {
        let report = BuildReport {
            layouts_read: 3,
            files_read: 12,
            front_matter: 10,
            dates_parsed: 4,
            markdown_converted: 9,
            markdown_deferred: vec![],
            snippets: 2,
            pages_generated: 2,
            layouts_applied: 21,
            written: Some(WriteSummary {
                directories: 4,
                files: 14,
            }),
        };
        assert_eq!(
            format_build_report(&report),
            vec![
                "Read 3 layouts, 12 files",
                "Front matter in 10 files, 4 dates parsed",
                "Converted 9 markdown files",
                "Generated 2 blog pages",
                "Applied 21 layouts",
                "Wrote 14 files in 4 directories",
            ]
        );
    }

    #[test]
    fn build_report_lists_deferred_files() {
        let report = BuildReport {
            markdown_deferred: vec!["site/a.md.erb".into()],
            ..Default::default()
        };
        let lines = format_build_report(&report);
        assert!(lines.contains(&"Deferred 1 markdown file:".to_string()));
        assert!(lines.contains(&"    site/a.md.erb".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Wrote")));
    }

    #[test]
    fn diagnostics_grouped_by_kind() {
        let mut diag = Diagnostics::new();
        diag.format("blog/a.md", "bad date");
        diag.lookup_miss("site/b.html", "layout x.hbs not found");
        diag.format("blog/c.md", "bad yaml");

        assert_eq!(
            format_diagnostics(&diag),
            vec![
                "missing (1)",
                "    site/b.html: layout x.hbs not found",
                "format (2)",
                "    blog/a.md: bad date",
                "    blog/c.md: bad yaml",
            ]
        );
    }

    #[test]
    fn tree_json_nests_children_with_data() {
        let mut tree = ContentTree::new();
        let root = tree.add_directory("target");
        let a = text_in(&mut tree, root, "a", &["html"], "<p>a</p>");
        set(&mut tree, a, "title", "A");

        let dump = tree_json(&tree, root);

        assert_eq!(dump["kind"], "directory");
        assert_eq!(dump["children"][0]["name"], "a.html");
        assert_eq!(dump["children"][0]["data"]["title"], "A");
        assert!(dump["children"][0].get("text").is_none());
    }

    #[test]
    fn no_diagnostics_no_lines() {
        assert!(format_diagnostics(&Diagnostics::new()).is_empty());
    }
}
