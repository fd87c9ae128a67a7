//! Build driver.
//!
//! Runs the passes in a fixed order over the three content trees and merges
//! them into one output tree:
//!
//! ```text
//! layout/ ──read──▶ front matter ───────────────────────────────────────┐
//!                                                                        │
//! site/   ──read──▶ front matter ─▶ markdown ────────────┐               │
//!                                                         ├─merge─▶ target ─▶ root path ─▶ layouts ─▶ write
//! blog/   ──read──▶ stamp layout ─▶ front matter ─▶ dates │
//!                   ─▶ markdown ─▶ read more ─▶ pages ────┘
//! ```
//!
//! All four trees live in one [`ContentTree`] arena. The blog directory is
//! optional; a project without one simply has no posts and no index pages.

use crate::config::SiteConfig;
use crate::content::{ContentTree, NodeId, NodeKind, TreeError, Value};
use crate::diagnostics::Diagnostics;
use crate::engines::Engines;
use crate::passes::layout::LAYOUT_KEY;
use crate::passes::{
    DatePass, FrontMatterPass, LayoutPass, MarkdownPass, PaginationPass, ReadMorePass,
    RootPathPass,
};
use crate::scan::{self, ScanError};
use crate::write::{self, WriteSummary};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Name of the merged output root.
pub const TARGET_ROOT: &str = "target";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),
}

/// What a build did, for the CLI summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub layouts_read: usize,
    pub files_read: usize,
    pub front_matter: usize,
    pub dates_parsed: usize,
    pub markdown_converted: usize,
    /// Tree paths of markdown files waiting on another conversion.
    pub markdown_deferred: Vec<String>,
    pub snippets: usize,
    pub pages_generated: usize,
    pub layouts_applied: usize,
    /// `None` when the build was not written out.
    pub written: Option<WriteSummary>,
}

/// The result of a build: the arena and the merged output root.
pub struct Site {
    pub tree: ContentTree,
    pub root: NodeId,
    pub report: BuildReport,
}

/// Run every pass over the project at `source`.
///
/// When `output` is `Some`, the merged tree is written there; otherwise the
/// build stops after layout composition.
pub fn build(
    config: &SiteConfig,
    source: &Path,
    output: Option<&Path>,
    engines: &Engines,
    diag: &mut Diagnostics,
) -> Result<Site, BuildError> {
    let mut tree = ContentTree::new();
    let mut report = BuildReport::default();
    let text_exts = &config.content.text_extensions;
    let front_matter = FrontMatterPass::new(&*engines.front_matter);
    let markdown = MarkdownPass::new(
        &*engines.markdown,
        config.content.markdown_extensions.clone(),
    );

    // Layouts
    let layouts_dir = config.paths.layouts_dir(source);
    info!(path = %layouts_dir.display(), "reading layouts");
    let layouts = scan::read_content_root(&mut tree, &layouts_dir, text_exts, diag)?;
    report.layouts_read = count_files(&tree, layouts);
    report.front_matter += front_matter.run(&mut tree, layouts, diag);

    // Site
    let site_dir = config.paths.site_dir(source);
    info!(path = %site_dir.display(), "reading site");
    let site = scan::read_content_root(&mut tree, &site_dir, text_exts, diag)?;
    report.files_read += count_files(&tree, site);
    report.front_matter += front_matter.run(&mut tree, site, diag);
    let outcome = markdown.run(&mut tree, site, diag);
    report.markdown_converted += outcome.converted;
    report
        .markdown_deferred
        .extend(outcome.deferred.iter().map(|&id| tree.path_of(id)));

    // Blog
    let blog_dir = config.paths.blog_dir(source);
    let blog = if blog_dir.is_dir() {
        info!(path = %blog_dir.display(), "reading blog");
        let blog = scan::read_content_root(&mut tree, &blog_dir, text_exts, diag)?;
        report.files_read += count_files(&tree, blog);
        stamp_layout(&mut tree, blog, &config.blog.layout);

        report.front_matter += front_matter.run(&mut tree, blog, diag);
        report.dates_parsed += DatePass::new(&*engines.dates, config.content.date_keys.clone())
            .run(&mut tree, blog, diag);
        let outcome = markdown.run(&mut tree, blog, diag);
        report.markdown_converted += outcome.converted;
        report
            .markdown_deferred
            .extend(outcome.deferred.iter().map(|&id| tree.path_of(id)));
        report.snippets += ReadMorePass.run(&mut tree, blog);
        let pages = PaginationPass::new(config.blog.pagination_options()).run(&mut tree, blog)?;
        report.pages_generated = pages.len();
        Some(blog)
    } else {
        info!(path = %blog_dir.display(), "no blog directory, skipping posts");
        None
    };

    // Merge
    let target = tree.add_directory(TARGET_ROOT);
    tree.merge(target, site)?;
    if let Some(blog) = blog {
        tree.merge(target, blog)?;
    }

    // Render
    RootPathPass.run(&mut tree, target);
    let outcome = LayoutPass::new(&*engines.templates, layouts)
        .with_max_depth(config.layouts.max_depth)
        .run(&mut tree, target, diag);
    report.layouts_applied = outcome.rendered;

    if let Some(output) = output {
        info!(path = %output.display(), "writing output");
        report.written = Some(write::write_content_root(&mut tree, target, output, diag));
    }

    Ok(Site {
        tree,
        root: target,
        report,
    })
}

/// Set `layout` on every direct child of the blog root. Front matter read
/// afterwards still overrides it.
fn stamp_layout(tree: &mut ContentTree, blog: NodeId, layout: &str) {
    let children = tree.children(blog).to_vec();
    for child in children {
        tree.node_mut(child)
            .data
            .insert(LAYOUT_KEY.to_string(), Value::from(layout));
    }
}

/// Number of files (not directories) below `root`.
pub fn count_files(tree: &ContentTree, root: NodeId) -> usize {
    match &tree.node(root).kind {
        NodeKind::Directory(dir) => dir.children().iter().map(|&c| count_files(tree, c)).sum(),
        NodeKind::Text(_) | NodeKind::Binary(_) => 1,
    }
}
