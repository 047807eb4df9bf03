//! Content module - loads posts and projects and serves queries over them

pub mod frontmatter;
mod markdown;
pub mod normalize;
mod post;
pub mod repository;
pub mod source;

pub use frontmatter::ParsedDocument;
pub use markdown::{MarkdownRenderer, RenderBody};
pub use post::{CategoryCount, Post, Project, Record, TagCount};
pub use repository::ContentRepository;
pub use source::{DirectorySource, DocumentSource, MemorySource, RawDocument};
