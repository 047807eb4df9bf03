//! Post and Project models

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Behaviour shared by every record kind the repository holds
pub trait Record {
    /// Unique identifier used for lookups
    fn slug(&self) -> &str;

    /// Source path the record was loaded from
    fn source(&self) -> &str;

    /// Sort instant parsed from the record's date, if parseable
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date as written in the front-matter (ISO-8601)
    pub date: String,

    /// Slug (URL-friendly name)
    pub slug: String,

    /// Whether this is the featured article
    pub featured: bool,

    /// Presentation hint, passed through untouched
    pub color: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Single category
    pub category: String,

    /// Post tags, in authoring order
    pub tags: Vec<String>,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: String,

    #[serde(skip)]
    pub(crate) timestamp: Option<DateTime<Utc>>,
}

impl Post {
    pub const DEFAULT_TITLE: &'static str = "Untitled";
    pub const DEFAULT_COLOR: &'static str = "white";
    pub const DEFAULT_CATEGORY: &'static str = "Uncategorized";

    /// Whether the post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Record for Post {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}

/// A project write-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub title: String,

    /// Date as written in the front-matter (ISO-8601)
    pub date: String,

    pub slug: String,

    pub description: String,

    /// External link, `#` when there is none
    pub link: String,

    pub tags: Vec<String>,

    /// Free-form status such as `active` or `archived`
    pub status: String,

    pub featured: bool,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: String,

    #[serde(skip)]
    pub(crate) timestamp: Option<DateTime<Utc>>,
}

impl Project {
    pub const DEFAULT_TITLE: &'static str = "Untitled Project";
    pub const DEFAULT_LINK: &'static str = "#";
    pub const DEFAULT_STATUS: &'static str = "unknown";
}

impl Record for Project {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}

/// A tag with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// A category with the number of posts filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}
