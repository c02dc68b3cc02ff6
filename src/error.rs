//! Error types shared by the search engine and the test harness
//!
//! Configuration and corpus errors are fatal and surface at build/load time.
//! Query errors are per-query: the harness records them on the term and
//! moves on to the next one.

use std::path::PathBuf;

/// Errors raised by index construction, corpus loading and querying
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Field specs or match options failed validation
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    /// The corpus file could not be read
    #[error("Failed to read search index {path}: {source}")]
    CorpusLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The corpus file is not valid JSON
    #[error("Failed to parse search index {path}: {source}")]
    CorpusParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but neither `{ "entries": [...] }` nor a bare array
    #[error("Unsupported search index shape: {0}")]
    UnsupportedCorpus(String),

    /// Query exceeds the configured maximum length
    #[error("Query too long ({len} > {max} characters)")]
    QueryTooLong { len: usize, max: usize },

    /// The harness was asked to run before a corpus was loaded
    #[error("Search index not loaded; load a corpus first")]
    IndexNotLoaded,

    /// Query rejected before matching
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
