//! Blog index pages.
//!
//! Collects every text file under the blog root, newest first, and generates
//! index pages listing `posts_per_page` posts each:
//!
//! ```text
//! blog/
//! ├── index.html          ← page 1 (first_page_pattern "index")
//! ├── page/2/index.html   ← page 2 (page_pattern "page/{n}/index")
//! ├── page/3/index.html
//! ├── first-post.html
//! └── ...
//! ```
//!
//! Each page's metadata carries:
//! - `layout`: the configured page layout
//! - `page`: the 1-based page number
//! - `posts`: one map per post with `text`, `link` (relative to the page) and
//!   a copy of the post's own metadata
//! - `previous` / `next`: relative links to the neighbouring pages, absent on
//!   the first and last page
//!
//! Posts are ordered by `date_raw`, newest first. Posts without a numeric
//! `date_raw` keep their relative order and come after every dated post.

use crate::content::{ContentTree, Cursor, Data, FileName, NodeId, TreeError, Value, Visitor};
use std::cmp::Reverse;
use tracing::debug;

pub const SORT_KEY: &str = "date_raw";

/// Placeholder for the page number in page patterns.
pub const PAGE_NUMBER: &str = "{n}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    pub posts_per_page: usize,
    pub first_page_pattern: String,
    pub page_pattern: String,
    pub layout: String,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            posts_per_page: 3,
            first_page_pattern: "index".to_string(),
            page_pattern: "page/{n}/index".to_string(),
            layout: "blogPage.hbs".to_string(),
        }
    }
}

impl PaginationOptions {
    /// Path of page `number` relative to the blog root, without extension.
    pub fn page_path(&self, number: usize) -> String {
        let pattern = if number == 1 {
            &self.first_page_pattern
        } else {
            &self.page_pattern
        };
        pattern.replace(PAGE_NUMBER, &number.to_string())
    }
}

pub struct PaginationPass {
    options: PaginationOptions,
}

impl PaginationPass {
    pub fn new(options: PaginationOptions) -> Self {
        Self { options }
    }

    /// Generate and attach the index pages. Returns their ids in page order.
    pub fn run(&self, tree: &mut ContentTree, root: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let mut collector = PostCollector::default();
        tree.accept(root, &mut collector);
        let mut posts = collector.posts;
        sort_newest_first(tree, &mut posts);

        let per_page = self.options.posts_per_page.max(1);
        let mut pages = Vec::new();
        for (index, chunk) in posts.chunks(per_page).enumerate() {
            let number = index + 1;
            let page = self.place_page(tree, root, number)?;
            pages.push((page, chunk));
        }

        for (position, &(page, chunk)) in pages.iter().enumerate() {
            let mut data = Data::new();
            data.insert("layout".into(), Value::from(self.options.layout.as_str()));
            data.insert("page".into(), Value::Integer(position as i64 + 1));
            data.insert("posts".into(), Value::List(post_entries(tree, page, chunk)?));
            if position > 0 {
                let previous = tree.relative_path(page, pages[position - 1].0)?;
                data.insert("previous".into(), Value::String(previous));
            }
            if let Some(&(next, _)) = pages.get(position + 1) {
                data.insert("next".into(), Value::String(tree.relative_path(page, next)?));
            }
            tree.node_mut(page).data.extend(data);
        }

        Ok(pages.into_iter().map(|(page, _)| page).collect())
    }

    fn place_page(&self, tree: &mut ContentTree, root: NodeId, number: usize) -> Result<NodeId, TreeError> {
        let path = self.options.page_path(number);
        let (dir, basename) = match path.rsplit_once('/') {
            Some((dir, basename)) => (tree.get_path_or_create(root, dir)?, basename),
            None => (root, path.as_str()),
        };

        let page = tree.add_text_file(
            FileName::new(basename, &["html"]),
            String::new(),
            format!("Generated blog page {number}"),
        );
        tree.attach(dir, page)?;
        debug!(page = number, path = %tree.path_of(page), "placed blog page");
        Ok(page)
    }
}

fn sort_newest_first(tree: &ContentTree, posts: &mut [NodeId]) {
    posts.sort_by_key(|&post| {
        let date = tree.node(post).data.get(SORT_KEY).and_then(Value::as_i64);
        (date.is_none(), Reverse(date))
    });
}

fn post_entries(tree: &ContentTree, page: NodeId, posts: &[NodeId]) -> Result<Vec<Value>, TreeError> {
    posts
        .iter()
        .map(|&post| {
            let node = tree.node(post);
            let mut entry = Data::new();
            let text = node.as_text().map(|t| t.text.as_str()).unwrap_or_default();
            entry.insert("text".into(), Value::from(text));
            entry.insert("link".into(), Value::String(tree.relative_path(page, post)?));
            entry.extend(node.data.clone());
            Ok(Value::Map(entry))
        })
        .collect()
}

#[derive(Default)]
struct PostCollector {
    posts: Vec<NodeId>,
}

impl Visitor for PostCollector {
    fn text_file(&mut self, _cursor: &mut Cursor<'_>, file: NodeId, _parents: &[NodeId]) {
        self.posts.push(file);
    }
}
