//! File name conventions shared by the reader and the passes.
//!
//! Every file name is split on `.` into a basename and an ordered extension
//! chain. The chain is what passes rewrite as content changes format, so it is
//! kept apart from the basename for the whole build:
//! - `about.md` → basename `about`, extensions `["md"]`
//! - `post.md.erb` → basename `post`, extensions `["md", "erb"]`
//! - `jquery.min.js` → basename `jquery`, extensions `["min", "js"]`
//! - `README` → basename `README`, no extensions
//!
//! ## Text vs Binary
//!
//! A file is read as text when its *last* extension is in the configured text
//! set (by default `hbs`, `html`, `md`, `markdown`, `txt`). Everything else is
//! binary and is streamed to the output untouched.

use crate::content::FileName;

/// Split a file name at every `.`: the first segment is the basename, the rest
/// is the extension chain in order.
///
/// - `"about.md"` → `("about", ["md"])`
/// - `"post.md.erb"` → `("post", ["md", "erb"])`
/// - `"README"` → `("README", [])`
/// - `"archive.tar.gz"` → `("archive", ["tar", "gz"])`
pub fn split_file_name(name: &str) -> FileName {
    let mut parts = name.split('.');
    let basename = parts.next().unwrap_or_default().to_string();
    FileName {
        basename,
        extensions: parts.map(str::to_string).collect(),
    }
}

/// Whether a file with this name should be loaded as text.
pub fn is_text_file(file_name: &FileName, text_extensions: &[String]) -> bool {
    file_name
        .outermost()
        .is_some_and(|ext| text_extensions.iter().any(|t| t == ext))
}

/// Dotfiles and dot-directories are never part of the content tree.
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_set() -> Vec<String> {
        ["hbs", "html", "md", "markdown", "txt"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn single_extension() {
        let f = split_file_name("about.md");
        assert_eq!(f.basename, "about");
        assert_eq!(f.extensions, vec!["md"]);
    }

    #[test]
    fn extension_chain_keeps_order() {
        let f = split_file_name("post.md.erb");
        assert_eq!(f.basename, "post");
        assert_eq!(f.extensions, vec!["md", "erb"]);
    }

    #[test]
    fn no_extension() {
        let f = split_file_name("README");
        assert_eq!(f.basename, "README");
        assert!(f.extensions.is_empty());
    }

    #[test]
    fn split_round_trips_display_name() {
        for name in ["a.md", "post.md.erb", "README", "x.tar.gz"] {
            assert_eq!(split_file_name(name).display_name(), name);
        }
    }

    #[test]
    fn text_classification_uses_last_extension() {
        assert!(is_text_file(&split_file_name("post.md"), &text_set()));
        assert!(is_text_file(&split_file_name("base.hbs"), &text_set()));
        assert!(!is_text_file(&split_file_name("post.md.erb"), &text_set()));
        assert!(!is_text_file(&split_file_name("photo.jpg"), &text_set()));
        assert!(!is_text_file(&split_file_name("Makefile"), &text_set()));
    }

    #[test]
    fn hidden_names() {
        assert!(is_hidden(".DS_Store"));
        assert!(is_hidden(".git"));
        assert!(!is_hidden("index.html"));
    }
}
