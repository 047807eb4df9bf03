//! Record normalizer - maps parsed front-matter onto typed records

use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_yaml::{Mapping, Value};

use super::frontmatter::ParsedDocument;
use super::markdown::RenderBody;
use super::post::{Post, Project};
use crate::helpers::date::parse_date_string;

/// Builds records from parsed documents, filling defaults for anything
/// absent or of the wrong type.
pub struct Normalizer<'a, R: ?Sized> {
    renderer: &'a R,
    loaded_at: DateTime<Utc>,
}

impl<'a, R: RenderBody + ?Sized> Normalizer<'a, R> {
    /// `loaded_at` stands in for missing dates
    pub fn new(renderer: &'a R, loaded_at: DateTime<Utc>) -> Self {
        Self {
            renderer,
            loaded_at,
        }
    }

    /// Normalize a post. Render failures propagate.
    pub fn post(&self, parsed: &ParsedDocument, source: &str) -> Result<Post> {
        let meta = &parsed.metadata;
        let (date, timestamp) = self.date(meta);

        Ok(Post {
            title: string_field(meta, "title").unwrap_or_else(|| Post::DEFAULT_TITLE.to_string()),
            date,
            slug: slug_for(meta, source),
            featured: bool_field(meta, "featured").unwrap_or(false),
            color: string_field(meta, "color").unwrap_or_else(|| Post::DEFAULT_COLOR.to_string()),
            excerpt: string_field(meta, "excerpt").unwrap_or_default(),
            category: string_field(meta, "category")
                .unwrap_or_else(|| Post::DEFAULT_CATEGORY.to_string()),
            tags: tags_field(meta, "tags"),
            content: self.renderer.render_body(&parsed.body)?,
            source: source.to_string(),
            timestamp,
        })
    }

    /// Normalize a project. The slug is always the file stem; a `slug` key
    /// in the metadata is ignored. Render failures propagate.
    pub fn project(&self, parsed: &ParsedDocument, source: &str) -> Result<Project> {
        let meta = &parsed.metadata;
        let (date, timestamp) = self.date(meta);

        Ok(Project {
            title: string_field(meta, "title")
                .unwrap_or_else(|| Project::DEFAULT_TITLE.to_string()),
            date,
            slug: slug_from_source(source),
            description: string_field(meta, "description").unwrap_or_default(),
            link: string_field(meta, "link").unwrap_or_else(|| Project::DEFAULT_LINK.to_string()),
            tags: tags_field(meta, "tags"),
            status: string_field(meta, "status")
                .unwrap_or_else(|| Project::DEFAULT_STATUS.to_string()),
            featured: bool_field(meta, "featured").unwrap_or(false),
            content: self.renderer.render_body(&parsed.body)?,
            source: source.to_string(),
            timestamp,
        })
    }

    fn date(&self, meta: &Mapping) -> (String, Option<DateTime<Utc>>) {
        match string_field(meta, "date") {
            Some(date) => {
                let timestamp = parse_date_string(&date);
                if timestamp.is_none() {
                    tracing::debug!("Unparseable date {:?}, sorting it last", date);
                }
                (date, timestamp)
            }
            None => (
                self.loaded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                Some(self.loaded_at),
            ),
        }
    }
}

/// Derive a slug from a source path: directories and extension removed
pub fn slug_from_source(source: &str) -> String {
    let file_name = source.rsplit(['/', '\\']).next().unwrap_or(source);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

fn slug_for(meta: &Mapping, source: &str) -> String {
    string_field(meta, "slug").unwrap_or_else(|| slug_from_source(source))
}

/// Non-empty string value, or `None`
fn string_field(meta: &Mapping, key: &str) -> Option<String> {
    match meta.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn bool_field(meta: &Mapping, key: &str) -> Option<bool> {
    meta.get(key).and_then(Value::as_bool)
}

/// Accepts a list or a single string; scalar list items are stringified
fn tags_field(meta: &Mapping, key: &str) -> Vec<String> {
    match meta.get(key) {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
