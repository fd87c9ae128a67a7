//! Markdown to HTML.

use pulldown_cmark::{Options, Parser, html as md_html};

pub trait MarkdownEngine {
    /// Convert a markdown document to an HTML fragment.
    fn to_html(&self, markdown: &str) -> String;
}

/// CommonMark via `pulldown-cmark`, with the GitHub-style extensions
/// (tables, strikethrough, footnotes, task lists) switched on.
#[derive(Debug, Clone, Copy)]
pub struct PulldownMarkdown {
    options: Options,
}

impl Default for PulldownMarkdown {
    fn default() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl MarkdownEngine for PulldownMarkdown {
    fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html = String::new();
        md_html::push_html(&mut html, parser);
        html
    }
}
