//! External collaborators behind narrow traits.
//!
//! The passes never talk to a markdown library, a template language, a YAML
//! parser or a date grammar directly. Each is reached through one trait, and
//! [`Engines`] bundles the four implementations a build uses.
//!
//! | Trait | Default implementation | Crate |
//! |-------|------------------------|-------|
//! | [`MarkdownEngine`] | [`PulldownMarkdown`] | `pulldown-cmark` |
//! | [`TemplateEngine`] | [`MustacheEngine`] | `mustache` |
//! | [`FrontMatterExtractor`] | [`YamlFrontMatter`] | `serde_yaml` |
//! | [`DateParser`] | [`ChronoDateParser`] | `chrono` |
//!
//! Tests swap individual engines for mocks without touching the passes.

pub mod dates;
pub mod front_matter;
pub mod markdown;
pub mod template;

pub use dates::{ChronoDateParser, DateParser};
pub use front_matter::{FrontMatterError, FrontMatterExtractor, YamlFrontMatter};
pub use markdown::{MarkdownEngine, PulldownMarkdown};
pub use template::{MustacheEngine, TemplateEngine, TemplateError};

/// The set of collaborators one build runs with.
pub struct Engines {
    pub markdown: Box<dyn MarkdownEngine>,
    pub templates: Box<dyn TemplateEngine>,
    pub front_matter: Box<dyn FrontMatterExtractor>,
    pub dates: Box<dyn DateParser>,
}

impl Default for Engines {
    fn default() -> Self {
        Self {
            markdown: Box::new(PulldownMarkdown::default()),
            templates: Box::new(MustacheEngine),
            front_matter: Box::new(YamlFrontMatter),
            dates: Box::new(ChronoDateParser),
        }
    }
}
