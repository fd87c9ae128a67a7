//! Template rendering.
//!
//! A layout receives the page's metadata as its context and the page's current
//! text as the body. The body is bound to the reserved key `content`, so a
//! mustache layout places it with the unescaped form `{{{content}}}`. The body
//! is only ever a value in the context, never part of the template source, so
//! it is neither escaped nor parsed as a template itself.

use crate::content::{Data, Value};
use thiserror::Error;

/// Context key the body is bound to.
pub const CONTENT_KEY: &str = "content";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template {name} failed to compile: {message}")]
    Compile { name: String, message: String },
    #[error("template {name} failed to render: {message}")]
    Render { name: String, message: String },
}

pub trait TemplateEngine {
    /// Render `source` (the template called `name`) against `context`, with
    /// `body` available under [`CONTENT_KEY`].
    fn render(
        &self,
        name: &str,
        source: &str,
        context: &Data,
        body: &str,
    ) -> Result<String, TemplateError>;
}

/// Logic-less templates via the `mustache` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MustacheEngine;

impl TemplateEngine for MustacheEngine {
    fn render(
        &self,
        name: &str,
        source: &str,
        context: &Data,
        body: &str,
    ) -> Result<String, TemplateError> {
        let template = mustache::compile_str(source).map_err(|e| TemplateError::Compile {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let mut scope = context.clone();
        scope.insert(CONTENT_KEY.to_string(), Value::from(body));

        template
            .render_to_string(&scope)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Template engine that ignores the template language and records every
    /// call. Output is `name[body]`, which makes nesting order visible.
    #[derive(Default)]
    pub struct RecordingTemplates {
        pub calls: RefCell<Vec<String>>,
        /// Template names that fail to render.
        pub failing: Vec<String>,
    }

    impl TemplateEngine for RecordingTemplates {
        fn render(
            &self,
            name: &str,
            _source: &str,
            _context: &Data,
            body: &str,
        ) -> Result<String, TemplateError> {
            self.calls.borrow_mut().push(name.to_string());
            if self.failing.iter().any(|f| f == name) {
                return Err(TemplateError::Render {
                    name: name.to_string(),
                    message: "forced failure".into(),
                });
            }
            Ok(format!("{name}[{body}]"))
        }
    }

    fn data(pairs: &[(&str, Value)]) -> Data {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn body_is_injected_unescaped() {
        let out = MustacheEngine
            .render("base", "<main>{{{content}}}</main>", &Data::new(), "<p>hi</p>")
            .unwrap();
        assert_eq!(out, "<main><p>hi</p></main>");
    }

    #[test]
    fn body_is_not_parsed_as_template() {
        let out = MustacheEngine
            .render("base", "{{{content}}}", &Data::new(), "{{title}}")
            .unwrap();
        assert_eq!(out, "{{title}}");
    }

    #[test]
    fn context_values_are_escaped_by_default() {
        let ctx = data(&[("title", Value::from("A & B"))]);
        let out = MustacheEngine
            .render("base", "<h1>{{title}}</h1>", &ctx, "")
            .unwrap();
        assert_eq!(out, "<h1>A &amp; B</h1>");
    }

    #[test]
    fn sections_iterate_lists_of_maps() {
        let post = data(&[("link", Value::from("a.html")), ("title", Value::from("A"))]);
        let ctx = data(&[("posts", Value::List(vec![Value::Map(post)]))]);
        let out = MustacheEngine
            .render("page", "{{#posts}}<a href=\"{{link}}\">{{title}}</a>{{/posts}}", &ctx, "")
            .unwrap();
        assert_eq!(out, "<a href=\"a.html\">A</a>");
    }

    #[test]
    fn unclosed_section_is_a_compile_error() {
        let err = MustacheEngine
            .render("broken.hbs", "{{#posts}}never closed", &Data::new(), "")
            .unwrap_err();
        assert!(err.to_string().contains("broken.hbs"));
    }
}
