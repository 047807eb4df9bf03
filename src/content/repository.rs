//! Content repository - lazily loads, normalizes, sorts and caches posts and
//! projects, and answers lookups, facet and search queries over them.

use anyhow::Result;
use chrono::Utc;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::frontmatter;
use super::markdown::RenderBody;
use super::normalize::Normalizer;
use super::post::{CategoryCount, Post, Project, Record, TagCount};
use super::source::DocumentSource;
use crate::search::{SearchIndex, SearchOptions};

/// A loaded collection, in sorted order, with its slug lookup table
#[derive(Debug)]
struct Collection<T> {
    records: Vec<T>,
    /// slug -> position in `records`; later documents overwrite earlier ones
    by_slug: HashMap<String, usize>,
    /// slugs claimed by more than one document, with sources in load order
    duplicates: Vec<(String, Vec<String>)>,
}

impl<T: Record> Collection<T> {
    /// Sort `loaded` (in load order) newest first and index its slugs
    fn new(loaded: Vec<T>) -> Self {
        let mut order: Vec<usize> = (0..loaded.len()).collect();
        // Stable: equal dates keep load order
        order.sort_by(|&a, &b| newest_first(&loaded[a], &loaded[b]));

        let mut position = vec![0; loaded.len()];
        for (sorted, &original) in order.iter().enumerate() {
            position[original] = sorted;
        }

        let mut by_slug = HashMap::new();
        let mut claims: IndexMap<String, Vec<String>> = IndexMap::new();
        for (i, record) in loaded.iter().enumerate() {
            by_slug.insert(record.slug().to_string(), position[i]);
            claims
                .entry(record.slug().to_string())
                .or_default()
                .push(record.source().to_string());
        }

        let duplicates: Vec<(String, Vec<String>)> = claims
            .into_iter()
            .filter(|(_, sources)| sources.len() > 1)
            .collect();
        for (slug, sources) in &duplicates {
            tracing::warn!(
                "Slug {:?} is used by {} documents, the last one wins: {:?}",
                slug,
                sources.len(),
                sources
            );
        }

        let mut slots: Vec<Option<T>> = loaded.into_iter().map(Some).collect();
        let records = order.iter().filter_map(|&i| slots[i].take()).collect();

        Self {
            records,
            by_slug,
            duplicates,
        }
    }

    fn by_slug(&self, slug: &str) -> Option<&T> {
        self.by_slug.get(slug).and_then(|&i| self.records.get(i))
    }
}

/// Descending by date; unparseable dates sort after every parseable one
fn newest_first<T: Record>(a: &T, b: &T) -> Ordering {
    match (a.timestamp(), b.timestamp()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Posts and projects of one site.
///
/// Each collection is loaded on first access, exactly once, and held
/// immutably afterwards. Every later query reads the cached records.
/// A failed load (a render error) leaves the cache empty so the next
/// access retries.
pub struct ContentRepository<S, R> {
    posts_source: S,
    projects_source: S,
    renderer: R,
    search_options: SearchOptions,
    posts: OnceCell<Collection<Post>>,
    projects: OnceCell<Collection<Project>>,
    search_index: OnceCell<SearchIndex>,
}

impl<S: DocumentSource, R: RenderBody> ContentRepository<S, R> {
    pub fn new(posts_source: S, projects_source: S, renderer: R) -> Self {
        Self {
            posts_source,
            projects_source,
            renderer,
            search_options: SearchOptions::default(),
            posts: OnceCell::new(),
            projects: OnceCell::new(),
            search_index: OnceCell::new(),
        }
    }

    /// Replace the search configuration used when the index is first built
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    fn posts(&self) -> Result<&Collection<Post>> {
        self.posts.get_or_try_init(|| {
            let documents = self.posts_source.discover()?;
            let normalizer = Normalizer::new(&self.renderer, Utc::now());
            let mut posts = Vec::with_capacity(documents.len());
            for doc in &documents {
                let parsed = frontmatter::parse(&doc.text);
                posts.push(normalizer.post(&parsed, &doc.path)?);
                tracing::debug!("Loaded post {}", doc.path);
            }
            tracing::info!("Loaded {} posts", posts.len());
            Ok(Collection::new(posts))
        })
    }

    fn projects(&self) -> Result<&Collection<Project>> {
        self.projects.get_or_try_init(|| {
            let documents = self.projects_source.discover()?;
            let normalizer = Normalizer::new(&self.renderer, Utc::now());
            let mut projects = Vec::with_capacity(documents.len());
            for doc in &documents {
                let parsed = frontmatter::parse(&doc.text);
                projects.push(normalizer.project(&parsed, &doc.path)?);
                tracing::debug!("Loaded project {}", doc.path);
            }
            tracing::info!("Loaded {} projects", projects.len());
            Ok(Collection::new(projects))
        })
    }

    /// All posts, newest first
    pub fn all_posts(&self) -> Result<&[Post]> {
        Ok(&self.posts()?.records)
    }

    /// All projects, newest first
    pub fn all_projects(&self) -> Result<&[Project]> {
        Ok(&self.projects()?.records)
    }

    /// Post with this slug. When several documents share a slug, the one
    /// loaded last is returned.
    pub fn post_by_slug(&self, slug: &str) -> Result<Option<&Post>> {
        Ok(self.posts()?.by_slug(slug))
    }

    /// Project with this slug, last-loaded wins like [`Self::post_by_slug`]
    pub fn project_by_slug(&self, slug: &str) -> Result<Option<&Project>> {
        Ok(self.projects()?.by_slug(slug))
    }

    /// The newest featured post
    pub fn featured_post(&self) -> Result<Option<&Post>> {
        Ok(self.all_posts()?.iter().find(|p| p.featured))
    }

    /// Every featured project, newest first
    pub fn featured_projects(&self) -> Result<Vec<&Project>> {
        Ok(self.all_projects()?.iter().filter(|p| p.featured).collect())
    }

    /// The newest `n` posts that are not featured
    pub fn recent_posts(&self, n: usize) -> Result<Vec<&Post>> {
        Ok(self
            .all_posts()?
            .iter()
            .filter(|p| !p.featured)
            .take(n)
            .collect())
    }

    /// Posts carrying `tag`, newest first
    pub fn posts_by_tag(&self, tag: &str) -> Result<Vec<&Post>> {
        Ok(self.all_posts()?.iter().filter(|p| p.has_tag(tag)).collect())
    }

    /// Posts filed under `category`, newest first
    pub fn posts_by_category(&self, category: &str) -> Result<Vec<&Post>> {
        Ok(self
            .all_posts()?
            .iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Tag counts, most used first; equal counts keep first-seen order
    pub fn all_tags(&self) -> Result<Vec<TagCount>> {
        let counts = count_facets(
            self.all_posts()?
                .iter()
                .flat_map(|p| p.tags.iter().map(String::as_str)),
        );
        Ok(counts
            .into_iter()
            .map(|(tag, count)| TagCount { tag, count })
            .collect())
    }

    /// Category counts, most used first; equal counts keep first-seen order
    pub fn all_categories(&self) -> Result<Vec<CategoryCount>> {
        let counts = count_facets(self.all_posts()?.iter().map(|p| p.category.as_str()));
        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    /// Post slugs claimed by more than one document, with their sources in
    /// load order
    pub fn duplicate_post_slugs(&self) -> Result<&[(String, Vec<String>)]> {
        Ok(&self.posts()?.duplicates)
    }

    /// Project slugs claimed by more than one document
    pub fn duplicate_project_slugs(&self) -> Result<&[(String, Vec<String>)]> {
        Ok(&self.projects()?.duplicates)
    }

    /// Fuzzy search over posts, best match first. The index is built on
    /// the first search and reused afterwards.
    pub fn search(&self, query: &str) -> Result<Vec<&Post>> {
        let posts = self.all_posts()?;
        let index = self
            .search_index
            .get_or_init(|| SearchIndex::build(posts, self.search_options.clone()));
        Ok(index.search(posts, query))
    }
}

/// Count labels, sorted by count descending. The sort is stable over
/// insertion order, so ties keep first-seen order.
fn count_facets<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for label in labels {
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
