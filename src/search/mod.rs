//! Fuzzy free-text search over posts
//!
//! The index precomputes lower-cased, tokenized text for the configured
//! fields of every post. A query is scored against each field with a
//! normalized edit distance (0 is an exact hit, 1 shares nothing) and the
//! best field wins. Matches at or under the threshold are returned best
//! first, capped at the configured limit.

use serde::{Deserialize, Serialize};
use strsim::normalized_damerau_levenshtein;

use crate::content::Post;

/// Post fields that can be searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Excerpt,
    Tags,
    Category,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Fields to index
    pub fields: Vec<SearchField>,
    /// Highest distance still counted as a match, in `[0, 1]`
    pub threshold: f64,
    /// Maximum number of results
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fields: vec![
                SearchField::Title,
                SearchField::Excerpt,
                SearchField::Tags,
                SearchField::Category,
            ],
            threshold: 0.4,
            limit: 5,
        }
    }
}

/// One ranked result: the position of the post in the indexed slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchMatch {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug)]
struct FieldText {
    text: String,
    words: Vec<String>,
}

impl FieldText {
    fn new(raw: &str) -> Self {
        let text = raw.to_lowercase();
        let words = tokenize(&text);
        Self { text, words }
    }
}

/// Search index over one post collection
#[derive(Debug)]
pub struct SearchIndex {
    entries: Vec<Vec<FieldText>>,
    options: SearchOptions,
    origin: (usize, usize),
}

impl SearchIndex {
    /// Index `posts` with the given options
    pub fn build(posts: &[Post], options: SearchOptions) -> Self {
        let entries = posts
            .iter()
            .map(|post| {
                let mut fields = Vec::new();
                for field in &options.fields {
                    match field {
                        SearchField::Title => fields.push(FieldText::new(&post.title)),
                        SearchField::Excerpt => fields.push(FieldText::new(&post.excerpt)),
                        SearchField::Tags => {
                            fields.extend(post.tags.iter().map(|t| FieldText::new(t)))
                        }
                        SearchField::Category => fields.push(FieldText::new(&post.category)),
                    }
                }
                fields
            })
            .collect();

        tracing::debug!("Built search index over {} posts", posts.len());

        Self {
            entries,
            options,
            origin: (posts.as_ptr() as usize, posts.len()),
        }
    }

    /// Whether this index was built from this exact slice.
    ///
    /// Callers holding a changing list rebuild only when this is false.
    pub fn is_built_for(&self, posts: &[Post]) -> bool {
        self.origin == (posts.as_ptr() as usize, posts.len())
    }

    /// Ranked matches, best first
    pub fn matches(&self, query: &str) -> Vec<SearchMatch> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let query_words = tokenize(&query);
        let threshold = self.options.threshold.clamp(0.0, 1.0);

        let mut hits: Vec<SearchMatch> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                let score = fields
                    .iter()
                    .map(|field| field_distance(field, &query, &query_words))
                    .fold(1.0_f64, f64::min);
                (score <= threshold).then_some(SearchMatch { index, score })
            })
            .collect();

        // Stable: equal scores keep collection order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits.truncate(self.options.limit);
        hits
    }

    /// Ranked posts, best first. `posts` must be the slice this index was
    /// built from.
    pub fn search<'p>(&self, posts: &'p [Post], query: &str) -> Vec<&'p Post> {
        debug_assert!(self.is_built_for(posts), "search index used with another collection");
        self.matches(query)
            .into_iter()
            .filter_map(|m| posts.get(m.index))
            .collect()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn field_distance(field: &FieldText, query: &str, query_words: &[String]) -> f64 {
    if field.text.contains(query) {
        return 0.0;
    }
    if query_words.is_empty() || field.words.is_empty() {
        return 1.0;
    }

    let total: f64 = query_words
        .iter()
        .map(|q| {
            field
                .words
                .iter()
                .map(|w| word_distance(q, w))
                .fold(1.0_f64, f64::min)
        })
        .sum();

    total / query_words.len() as f64
}

/// Edit distance against the whole word and against its prefix of the
/// query's length, so partially typed words still match.
fn word_distance(query: &str, word: &str) -> f64 {
    let whole = 1.0 - normalized_damerau_levenshtein(query, word);

    let query_len = query.chars().count();
    if word.chars().count() <= query_len {
        return whole;
    }
    let prefix: String = word.chars().take(query_len).collect();
    whole.min(1.0 - normalized_damerau_levenshtein(query, &prefix))
}
