//! Site configuration module.
//!
//! Handles loading, validating, and merging the project's `config.toml`.
//! Stock defaults are the base layer; the user's file overrides any subset of
//! keys on top of them.
//!
//! ## Config File Location
//!
//! Place `config.toml` in the project root, next to the content directories:
//!
//! ```text
//! project/
//! ├── config.toml              # Overrides stock defaults
//! ├── layout/                  # Templates, looked up by path
//! ├── site/                    # Pages, mirrored into the output
//! └── blog/                    # Posts, paginated into index pages
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! layouts = "layout"        # Layout templates
//! site = "site"             # Pages
//! blog = "blog"             # Posts (skipped when the directory is absent)
//! output = "target"         # Where the rendered site is written
//!
//! [content]
//! text_extensions = ["hbs", "html", "md", "markdown", "txt"]
//! markdown_extensions = ["md", "markdown"]
//! date_keys = ["date"]      # Front matter keys parsed as dates
//!
//! [blog]
//! layout = "blog.hbs"       # Stamped on every top-level post
//! posts_per_page = 3
//! first_page_pattern = "index"
//! page_pattern = "page/{n}/index"
//! page_layout = "blogPage.hbs"
//!
//! [layouts]
//! max_depth = 32            # Longest layout chain before giving up
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [blog]
//! posts_per_page = 10
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::passes::PaginationOptions;
use crate::passes::pagination::PAGE_NUMBER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the content trees are read from and the output written to.
    pub paths: PathsConfig,
    /// File classification and metadata handling.
    pub content: ContentConfig,
    /// Blog post layout and pagination.
    pub blog: BlogConfig,
    /// Layout composition limits.
    pub layouts: LayoutsConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blog.posts_per_page == 0 {
            return Err(ConfigError::Validation(
                "blog.posts_per_page must be greater than 0".into(),
            ));
        }
        if !self.blog.page_pattern.contains(PAGE_NUMBER) {
            return Err(ConfigError::Validation(format!(
                "blog.page_pattern must contain {PAGE_NUMBER}"
            )));
        }
        for (key, pattern) in [
            ("blog.first_page_pattern", &self.blog.first_page_pattern),
            ("blog.page_pattern", &self.blog.page_pattern),
        ] {
            if pattern.is_empty() || pattern.starts_with('/') || pattern.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a relative path to a file"
                )));
            }
        }
        if self.layouts.max_depth == 0 {
            return Err(ConfigError::Validation(
                "layouts.max_depth must be greater than 0".into(),
            ));
        }
        if self.content.markdown_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "content.markdown_extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Project-relative directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub layouts: String,
    pub site: String,
    pub blog: String,
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            layouts: "layout".to_string(),
            site: "site".to_string(),
            blog: "blog".to_string(),
            output: "target".to_string(),
        }
    }
}

impl PathsConfig {
    pub fn layouts_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.layouts)
    }

    pub fn site_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.site)
    }

    pub fn blog_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.blog)
    }

    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Files whose last extension is listed here are loaded as text.
    pub text_extensions: Vec<String>,
    /// Extensions the markdown pass converts to HTML.
    pub markdown_extensions: Vec<String>,
    /// Metadata keys parsed by the date pass.
    pub date_keys: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            text_extensions: ["hbs", "html", "md", "markdown", "txt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            markdown_extensions: vec!["md".to_string(), "markdown".to_string()],
            date_keys: vec!["date".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Layout stamped on each entry directly under the blog directory.
    pub layout: String,
    pub posts_per_page: usize,
    pub first_page_pattern: String,
    /// Must contain `{n}`, replaced by the page number.
    pub page_pattern: String,
    /// Layout for generated index pages.
    pub page_layout: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        let pagination = PaginationOptions::default();
        Self {
            layout: "blog.hbs".to_string(),
            posts_per_page: pagination.posts_per_page,
            first_page_pattern: pagination.first_page_pattern,
            page_pattern: pagination.page_pattern,
            page_layout: pagination.layout,
        }
    }
}

impl BlogConfig {
    pub fn pagination_options(&self) -> PaginationOptions {
        PaginationOptions {
            posts_per_page: self.posts_per_page,
            first_page_pattern: self.first_page_pattern.clone(),
            page_pattern: self.page_pattern.clone(),
            layout: self.page_layout.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutsConfig {
    /// Maximum number of layouts applied to one file.
    pub max_depth: usize,
}

impl Default for LayoutsConfig {
    fn default() -> Self {
        Self {
            max_depth: crate::passes::layout::DEFAULT_MAX_DEPTH,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# strata configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Only the keys you want to change need to be present.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Directories, relative to the project root
# ---------------------------------------------------------------------------
[paths]
# Layout templates. A page asks for one with `layout: name.hbs` in its
# front matter; nested directories are addressed as `dir/name.hbs`.
layouts = "layout"

# Pages. The directory structure is mirrored into the output.
site = "site"

# Blog posts. Merged into the output next to the site pages, with generated
# index pages listing them. Skipped when the directory does not exist.
blog = "blog"

# Output directory. Existing files are overwritten, others are left alone.
output = "target"

# ---------------------------------------------------------------------------
# Content handling
# ---------------------------------------------------------------------------
[content]
# A file is loaded as text (and can be transformed) when its LAST extension
# is listed here. Everything else is copied verbatim.
text_extensions = ["hbs", "html", "md", "markdown", "txt"]

# Converted to HTML. Only a markdown extension directly after the basename
# counts: `post.md` becomes `post.html`, `post.md.erb` is left for later.
markdown_extensions = ["md", "markdown"]

# Front matter keys parsed as dates. Each parsed key K also gets
# K_raw (milliseconds since epoch) and K_formatted ("Jan 5, 2024 10:30 +0000").
date_keys = ["date"]

# ---------------------------------------------------------------------------
# Blog
# ---------------------------------------------------------------------------
[blog]
# Layout stamped on every entry directly inside the blog directory. A post's
# own front matter `layout` still wins.
layout = "blog.hbs"

# Number of posts on each generated index page (must be > 0).
posts_per_page = 3

# Path of the first index page, relative to the blog directory, without
# extension. Generated pages are always `.html`.
first_page_pattern = "index"

# Path of pages 2, 3, ... `{n}` is replaced by the page number.
page_pattern = "page/{n}/index"

# Layout for generated index pages. The page sees `posts` (each with `text`,
# `link` and the post's own metadata), `page`, `previous` and `next`.
page_layout = "blogPage.hbs"

# ---------------------------------------------------------------------------
# Layout composition
# ---------------------------------------------------------------------------
[layouts]
# A layout can itself declare a layout. Chains longer than this are abandoned
# with an error, which also stops layouts that refer to each other in a cycle.
max_depth = 32
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.paths.layouts, "layout");
        assert_eq!(config.paths.site, "site");
        assert_eq!(config.paths.blog, "blog");
        assert_eq!(config.paths.output, "target");
    }

    #[test]
    fn default_config_has_blog_settings() {
        let config = SiteConfig::default();
        assert_eq!(config.blog.layout, "blog.hbs");
        assert_eq!(config.blog.posts_per_page, 3);
        assert_eq!(config.blog.first_page_pattern, "index");
        assert_eq!(config.blog.page_pattern, "page/{n}/index");
        assert_eq!(config.blog.page_layout, "blogPage.hbs");
        assert_eq!(config.layouts.max_depth, 32);
    }

    #[test]
    fn default_config_is_valid() {
        SiteConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[blog]
posts_per_page = 10
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        // Overridden value
        assert_eq!(config.blog.posts_per_page, 10);
        // Default values preserved
        assert_eq!(config.blog.layout, "blog.hbs");
        assert_eq!(config.paths.site, "site");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r##"
[blog]
posts_per_pgae = 10
"##;
        let result: Result<SiteConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn pagination_options_from_blog_config() {
        let blog = BlogConfig {
            posts_per_page: 5,
            page_layout: "list.hbs".into(),
            ..Default::default()
        };
        let options = blog.pagination_options();
        assert_eq!(options.posts_per_page, 5);
        assert_eq!(options.layout, "list.hbs");
        assert_eq!(options.page_pattern, "page/{n}/index");
    }

    #[test]
    fn paths_resolve_against_root() {
        let paths = PathsConfig::default();
        let root = Path::new("/project");
        assert_eq!(paths.layouts_dir(root), Path::new("/project/layout"));
        assert_eq!(paths.output_dir(root), Path::new("/project/target"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn zero_posts_per_page_is_invalid() {
        let mut config = SiteConfig::default();
        config.blog.posts_per_page = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn page_pattern_without_number_is_invalid() {
        let mut config = SiteConfig::default();
        config.blog.page_pattern = "page/index".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn absolute_pattern_is_invalid() {
        let mut config = SiteConfig::default();
        config.blog.first_page_pattern = "/index".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn zero_max_depth_is_invalid() {
        let mut config = SiteConfig::default();
        config.layouts.max_depth = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn empty_markdown_extensions_is_invalid() {
        let mut config = SiteConfig::default();
        config.content.markdown_extensions.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_overlay_replaces_scalars_and_keeps_siblings() {
        let base: toml::Value = toml::from_str("[blog]\nlayout = \"a\"\nposts_per_page = 3").unwrap();
        let overlay: toml::Value = toml::from_str("[blog]\nposts_per_page = 7").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["blog"]["layout"].as_str(), Some("a"));
        assert_eq!(merged["blog"]["posts_per_page"].as_integer(), Some(7));
    }

    #[test]
    fn merge_overlay_replaces_arrays_entirely() {
        let base: toml::Value = toml::from_str("exts = [\"a\", \"b\"]").unwrap();
        let overlay: toml::Value = toml::from_str("exts = [\"c\"]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["exts"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn stock_defaults_round_trip() {
        let value = stock_defaults_value().unwrap();
        let config: SiteConfig = value.try_into().unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[paths]
output = "public"

[content]
date_keys = ["date", "updated"]
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.paths.output, "public");
        assert_eq!(config.content.date_keys, vec!["date", "updated"]);
        // Unspecified values should be defaults
        assert_eq!(config.paths.site, "site");
        assert_eq!(config.content.markdown_extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[blog\nbroken").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_merged_result() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[blog]\nposts_per_page = 0").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn load_config_unknown_section_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[images]\nquality = 90").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }
}
