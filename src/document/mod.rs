//! Search corpus loading and document access
//!
//! Documents are schema-less JSON records. The corpus file is either
//! `{ "entries": [...] }` or a bare array, normalised to the former.

mod extract;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::error::{Result, SearchError};

pub use extract::extract_candidates;

/// A corpus entry; identity is its position in the corpus
pub type Document = Value;

/// A fixed, ordered set of documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub entries: Vec<Document>,
}

impl Corpus {
    /// Normalise a parsed JSON value into a corpus
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(entries) => Ok(Self { entries }),
            Value::Object(mut map) => match map.remove("entries") {
                Some(Value::Array(entries)) => Ok(Self { entries }),
                Some(_) => Err(SearchError::UnsupportedCorpus(
                    "'entries' must be an array".to_string(),
                )),
                None => Err(SearchError::UnsupportedCorpus(
                    "expected an 'entries' array or a top-level array".to_string(),
                )),
            },
            _ => Err(SearchError::UnsupportedCorpus(
                "expected a JSON object or array".to_string(),
            )),
        }
    }

    /// Read and parse a corpus file
    ///
    /// Missing files and invalid JSON are fatal; there is no partial corpus.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SearchError::CorpusLoad {
                path: path.to_path_buf(),
                source,
            })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|source| SearchError::CorpusParse {
                path: path.to_path_buf(),
                source,
            })?;

        let corpus = Self::from_value(value)?;
        if corpus.is_empty() {
            tracing::warn!("Search index {:?} has no entries", path);
        }
        tracing::info!("Loaded search index {:?}: {} entries", path, corpus.len());
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Top-level string field of a document, if present
pub fn str_field<'a>(document: &'a Document, name: &str) -> Option<&'a str> {
    document.get(name).and_then(Value::as_str)
}

/// Human-facing label for a document
pub fn display_title(document: &Document) -> &str {
    str_field(document, "title")
        .filter(|t| !t.is_empty())
        .or_else(|| str_field(document, "pageName").filter(|t| !t.is_empty()))
        .unwrap_or("Untitled")
}
