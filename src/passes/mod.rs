//! Transformation passes over a content tree.
//!
//! Every pass is a small struct holding its options (and the engine it calls,
//! if any) with a `run(tree, root, diag)` entry point. Internally each one is a
//! [`Visitor`](crate::content::Visitor), so it sees each node exactly once with
//! its ancestors, and records per-file problems in the build's
//! [`Diagnostics`](crate::diagnostics::Diagnostics) instead of failing.
//!
//! | Pass | Reads | Writes |
//! |------|-------|--------|
//! | [`FrontMatterPass`] | leading YAML block | node data, body text |
//! | [`DatePass`] | `date` (configurable) | `date_raw`, `date_formatted` |
//! | [`MarkdownPass`] | `.md` text | HTML text, `md` → `html` |
//! | [`ReadMorePass`] | `<!--more-->` marker | `snippet` |
//! | [`PaginationPass`] | posts, `date_raw` | generated index pages |
//! | [`RootPathPass`] | depth | `rootPath` |
//! | [`LayoutPass`] | `layout`, layout tree | rendered text |
//!
//! The driver in [`pipeline`](crate::pipeline) fixes the order; the passes
//! themselves are independent of one another.

pub mod dates;
pub mod front_matter;
pub mod layout;
pub mod markdown;
pub mod pagination;
pub mod read_more;
pub mod root_path;

pub use dates::DatePass;
pub use front_matter::FrontMatterPass;
pub use layout::{LayoutOutcome, LayoutPass};
pub use markdown::{MarkdownOutcome, MarkdownPass};
pub use pagination::{PaginationOptions, PaginationPass};
pub use read_more::ReadMorePass;
pub use root_path::RootPathPass;
