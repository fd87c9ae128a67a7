//! YAML front matter.
//!
//! A text file has front matter when its first line is exactly `---` and a
//! later line is exactly `---`. The lines in between are a YAML mapping; the
//! text after the closing line, with leading whitespace dropped, is the body:
//!
//! ```text
//! ---
//! title: Hello
//! layout: post.hbs
//! ---
//! Body starts here.
//! ```

use crate::content::{Data, Value};
use thiserror::Error;

const DELIMITER: &str = "---";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

pub trait FrontMatterExtractor {
    /// Split `text` into its metadata and body.
    ///
    /// `Ok(None)` means the text has no front matter and should be left alone.
    fn extract(&self, text: &str) -> Result<Option<(Data, String)>, FrontMatterError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFrontMatter;

impl FrontMatterExtractor for YamlFrontMatter {
    fn extract(&self, text: &str) -> Result<Option<(Data, String)>, FrontMatterError> {
        let Some((block, body)) = split_front_matter(text) else {
            return Ok(None);
        };

        if block.trim().is_empty() {
            return Ok(Some((Data::new(), body.to_string())));
        }

        let yaml: serde_yaml::Value = serde_yaml::from_str(block)?;
        match Value::from(yaml) {
            Value::Map(data) => Ok(Some((data, body.to_string()))),
            Value::Null => Ok(Some((Data::new(), body.to_string()))),
            other => Err(FrontMatterError::NotAMapping(kind_name(&other))),
        }
    }
}

/// Locate the delimited block. Returns `(yaml, body)` borrowed from `text`.
fn split_front_matter(text: &str) -> Option<(&str, &str)> {
    let rest = strip_delimiter_line(text)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let block = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start();
            return Some((block, body));
        }
        offset += line.len();
    }
    None
}

fn strip_delimiter_line(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Integer(_) | Value::Float(_) => "a number",
        Value::String(_) => "a string",
        Value::List(_) => "a list",
        Value::Map(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Result<Option<(Data, String)>, FrontMatterError> {
        YamlFrontMatter.extract(text)
    }

    #[test]
    fn splits_metadata_and_body() {
        let (data, body) = extract("---\ntitle: Hello\nlayout: post.hbs\n---\nBody here.\n")
            .unwrap()
            .unwrap();
        assert_eq!(data["title"], Value::from("Hello"));
        assert_eq!(data["layout"], Value::from("post.hbs"));
        assert_eq!(body, "Body here.\n");
    }

    #[test]
    fn whitespace_after_closing_delimiter_is_dropped() {
        let (_, body) = extract("---\na: 1\n---\n\n\n  Body").unwrap().unwrap();
        assert_eq!(body, "Body");
    }

    #[test]
    fn crlf_line_endings() {
        let (data, body) = extract("---\r\ntitle: Hi\r\n---\r\nBody").unwrap().unwrap();
        assert_eq!(data["title"], Value::from("Hi"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn empty_block_is_empty_map() {
        let (data, body) = extract("---\n---\nBody").unwrap().unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn no_leading_delimiter_is_not_front_matter() {
        assert!(extract("# Title\n---\nnot: yaml\n---\n").unwrap().is_none());
        assert!(extract("").unwrap().is_none());
    }

    #[test]
    fn unclosed_block_is_not_front_matter() {
        assert!(extract("---\ntitle: Hi\nno closing line").unwrap().is_none());
    }

    #[test]
    fn delimiter_must_be_whole_line() {
        assert!(extract("----\na: 1\n----\n").unwrap().is_none());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let err = extract("---\ntitle: [unclosed\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn scalar_block_is_not_a_mapping() {
        let err = extract("---\njust a string\n---\nBody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("a string")));
    }

    #[test]
    fn nested_values_survive() {
        let (data, _) = extract("---\ntags:\n  - rust\n  - web\nauthor:\n  name: Ada\n---\n")
            .unwrap()
            .unwrap();
        assert_eq!(data["tags"].as_list().unwrap().len(), 2);
        assert_eq!(
            data["author"].as_map().unwrap()["name"],
            Value::from("Ada")
        );
    }
}
