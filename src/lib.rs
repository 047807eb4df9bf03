//! garden-rs: content repository for a markdown-authored personal site
//!
//! Posts and project write-ups are markdown files with a YAML front-matter
//! header. This crate loads them once, normalizes them into typed records,
//! sorts and caches them, and answers slug lookups, tag/category facet
//! queries and fuzzy free-text search for the presentation layer.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod search;

use anyhow::Result;
use std::path::Path;

use content::{ContentRepository, DirectorySource, MarkdownRenderer};

/// Repository over a site directory, rendering with syntax highlighting
pub type SiteRepository = ContentRepository<DirectorySource, MarkdownRenderer>;

/// A site on disk
#[derive(Clone)]
pub struct Garden {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Posts directory
    pub posts_dir: std::path::PathBuf,
    /// Projects directory
    pub projects_dir: std::path::PathBuf,
}

impl Garden {
    /// Open a site directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let projects_dir = base_dir.join(&config.projects_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            projects_dir,
        })
    }

    /// Build the content repository. Nothing is read until the first query.
    pub fn repository(&self) -> SiteRepository {
        ContentRepository::new(
            DirectorySource::new(&self.posts_dir),
            DirectorySource::new(&self.projects_dir),
            MarkdownRenderer::from_config(&self.config.highlight),
        )
        .with_search_options(self.config.search.clone())
    }
}
