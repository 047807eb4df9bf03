//! Front-matter parsing

use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

lazy_static! {
    /// `---` line, payload, `---` line, body. Both `\n` and `\r\n` endings.
    static ref FRONT_MATTER: Regex = Regex::new(r"(?s)^---\r?\n(.*?)\r?\n---\r?\n(.*)$").unwrap();
}

/// A document split into its metadata mapping and markdown body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    /// Decoded front-matter; empty when the document has none
    pub metadata: Mapping,
    /// Markdown body following the closing delimiter
    pub body: String,
}

impl ParsedDocument {
    /// The whole raw text as body, with no metadata
    pub fn body_only(raw: &str) -> Self {
        Self {
            metadata: Mapping::new(),
            body: raw.to_string(),
        }
    }
}

/// Why a front-matter block could not be decoded
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter is a {0}, expected a mapping")]
    NotAMapping(&'static str),
}

/// Split a raw document into metadata and body.
///
/// Never fails: a missing block yields the raw text as body, and an
/// undecodable block degrades the same way.
pub fn parse(raw: &str) -> ParsedDocument {
    match decode(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!("Front-matter ignored, treating document as body: {}", e);
            ParsedDocument::body_only(raw)
        }
    }
}

/// Strict variant of [`parse`] that reports decode failures
pub fn decode(raw: &str) -> Result<ParsedDocument, FrontMatterError> {
    let Some(caps) = FRONT_MATTER.captures(raw) else {
        return Ok(ParsedDocument::body_only(raw));
    };

    let payload = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let metadata = match serde_yaml::from_str::<Value>(payload)? {
        Value::Mapping(map) => map,
        Value::Null => Mapping::new(),
        other => return Err(FrontMatterError::NotAMapping(kind_of(&other))),
    };

    Ok(ParsedDocument {
        metadata,
        body: body.to_string(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(parsed: &'a ParsedDocument, key: &str) -> Option<&'a Value> {
        parsed.metadata.get(Value::String(key.to_string()))
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15
tags:
  - rust
  - kernel
---

This is the content.
"#;

        let parsed = parse(content);
        assert_eq!(get(&parsed, "title").and_then(Value::as_str), Some("Hello World"));
        assert_eq!(get(&parsed, "date").and_then(Value::as_str), Some("2024-01-15"));
        let tags = get(&parsed, "tags").and_then(Value::as_sequence).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(parsed.body, "\nThis is the content.\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody line\r\nSecond\r\n";
        let parsed = parse(content);
        assert_eq!(get(&parsed, "title").and_then(Value::as_str), Some("Windows"));
        assert_eq!(parsed.body, "Body line\r\nSecond\r\n");
    }

    #[test]
    fn test_body_is_verbatim_after_closing_delimiter() {
        let body = "# Heading\n\n---\n\nA thematic break above, not front-matter.\n";
        let content = format!("---\ntitle: x\n---\n{}", body);
        assert_eq!(parse(&content).body, body);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just markdown\n\nNo metadata here.";
        let parsed = parse(content);
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_unterminated_block_is_body() {
        let content = "---\ntitle: never closed\n\nbody";
        let parsed = parse(content);
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_malformed_yaml_degrades_to_raw() {
        let content = "---\ntitle: [unclosed\n  : : :\n---\nbody\n";
        assert!(decode(content).is_err());

        let parsed = parse(content);
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, content);
    }

    #[test]
    fn test_scalar_payload_is_not_a_mapping() {
        let content = "---\njust some words\n---\nbody\n";
        assert!(matches!(
            decode(content),
            Err(FrontMatterError::NotAMapping("string"))
        ));
        assert_eq!(parse(content).body, content);
    }

    #[test]
    fn test_null_payload_is_empty_mapping() {
        let content = "---\n~\n---\nbody\n";
        let parsed = parse(content);
        assert!(parsed.metadata.is_empty());
        assert_eq!(parsed.body, "body\n");
    }
}
