//! Document sources - obtain the raw text of every document in a collection

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A source document before parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Where the document came from; its file stem is the fallback slug
    pub path: String,
    /// Full raw content
    pub text: String,
}

impl RawDocument {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Anything that can list the documents of one collection.
///
/// The order of the returned documents is the load order.
pub trait DocumentSource {
    fn discover(&self) -> Result<Vec<RawDocument>>;
}

/// A fixed set of documents bundled with the process
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<RawDocument>,
}

impl MemorySource {
    pub fn new(documents: Vec<RawDocument>) -> Self {
        Self { documents }
    }

    /// Append a document, keeping insertion order
    pub fn with(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(RawDocument::new(path, text));
        self
    }
}

impl DocumentSource for MemorySource {
    fn discover(&self) -> Result<Vec<RawDocument>> {
        Ok(self.documents.clone())
    }
}

/// Markdown files directly inside one directory, in file-name order
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for DirectorySource {
    fn discover(&self) -> Result<Vec<RawDocument>> {
        if !self.dir.exists() {
            tracing::debug!("Content directory {:?} does not exist", self.dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(text) => documents.push(RawDocument::new(path.to_string_lossy(), text)),
                Err(e) => {
                    tracing::warn!("Failed to read document {:?}: {}", path, e);
                }
            }
        }

        tracing::debug!("Discovered {} documents in {:?}", documents.len(), self.dir);

        Ok(documents)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
