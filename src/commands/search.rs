//! Fuzzy search from the command line

use anyhow::Result;

use super::print_json;
use crate::Garden;

/// Search posts, optionally overriding the configured result limit
pub fn run(garden: &Garden, query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    let mut options = garden.config.search.clone();
    if let Some(limit) = limit {
        options.limit = limit;
    }
    let repo = garden.repository().with_search_options(options);

    let results = repo.search(query)?;
    tracing::debug!("Query {:?} matched {} posts", query, results.len());

    if json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("No posts match {:?}", query);
        return Ok(());
    }
    for post in results {
        println!("  {} [{}] - {}", post.title, post.slug, post.category);
    }

    Ok(())
}
