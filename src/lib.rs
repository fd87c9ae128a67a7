//! # Strata
//!
//! A static site generator built from tree passes. Three directories in a
//! project become three trees: `layout/` holds templates, `site/` holds pages
//! that are mirrored into the output and `blog/` holds dated posts that also
//! get paginated index pages. Each tree is transformed by a fixed sequence of
//! passes, `site` and `blog` are merged into one output tree, every page is
//! wrapped in its layouts and the result is written to disk.
//!
//! # Architecture: Passes Over One Arena
//!
//! ```text
//! 1. Scan       layout/ site/ blog/  →  ContentTree roots   (filesystem → nodes)
//! 2. Transform  per-root passes      →  metadata + new text (front matter, dates, markdown, pages)
//! 3. Merge      site + blog          →  target root         (one output tree)
//! 4. Render     target               →  composed HTML       (root paths, nested layouts)
//! 5. Write      target               →  output/             (nodes → filesystem)
//! ```
//!
//! Every node lives in a single [`content::ContentTree`] arena and is
//! addressed by [`content::NodeId`], so a node in `target` can name a
//! template in `layout` without any shared ownership. A pass is a
//! [`content::Visitor`] that walks a subtree; it may rewrite payloads while
//! walking, and changes to the tree's shape happen after the walk has
//! finished.
//!
//! Problems found along the way (a layout that doesn't exist, a date that
//! doesn't parse, a file that can't be written) go into a
//! [`diagnostics::Diagnostics`] sink rather than aborting the build, so a
//! single run reports everything that is wrong.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Node arena, metadata values, tree operations and the visitor protocol |
//! | [`scan`] | Reads a directory into a tree root |
//! | [`passes`] | Front matter, dates, markdown, read-more, pagination, root path, layouts |
//! | [`engines`] | Pluggable collaborators: markdown, templates, front matter, dates |
//! | [`pipeline`] | Runs the passes in order and merges the roots |
//! | [`write`] | Writes a tree root to the output directory |
//! | [`config`] | `config.toml` loading, merging with stock defaults, validation |
//! | [`naming`] | Filename splitting into basename and extension chain |
//! | [`diagnostics`] | Non-fatal problems collected during a build |
//! | [`output`] | CLI output formatting: tree listing, build summary, diagnostics |
//!
//! # Design Decisions
//!
//! ## Extension Chains
//!
//! `post.html.md` is read as basename `post` with extensions `[html, md]`.
//! A conversion consumes the outermost extension and leaves the rest, so a
//! file names the conversions it still needs. Markdown only converts a file
//! whose outermost extension is the last one left to strip; anything longer
//! is reported as deferred rather than guessed at.
//!
//! ## Layouts by Path, Inherited by Directory
//!
//! A `layout` value is a path into the layout tree. Directories carry it down
//! to everything below them and the nearest value wins. A layout may itself
//! name a layout, which wraps the rendered result again; nesting is bounded
//! by `layouts.max_depth` so a cycle ends in a diagnostic, not a hang.
//!
//! ## Engines Behind Traits
//!
//! Markdown, templating, front matter and date parsing each sit behind a
//! trait in [`engines`]. Passes only see the trait, which keeps them testable
//! with tiny fakes and lets the bundled engines (pulldown-cmark, mustache,
//! serde_yaml, chrono) be swapped without touching a pass.

pub mod config;
pub mod content;
pub mod diagnostics;
pub mod engines;
pub mod naming;
pub mod output;
pub mod passes;
pub mod pipeline;
pub mod scan;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
