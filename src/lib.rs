//! Searchprobe - weighted fuzzy search over static-site indexes
//!
//! The engine scores schema-less JSON documents against a query with an
//! approximate string matcher, aggregates per-field scores by weight and
//! ranks documents best first. The harness runs curated valid, invalid and
//! edge-case terms against an index and grades the result quality.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod harness;
pub mod index;
pub mod matcher;
pub mod output;
pub mod report;
pub mod scorer;

pub use analyzer::{analyze, quality_grade, QualityAnalysis};
pub use config::{FieldSpec, MatchOptions, SearchOptions, SearchProfile, TesterConfig};
pub use document::{Corpus, Document};
pub use error::{Result, SearchError};
pub use harness::{SearchTester, TermCategory, TermRecord, TestRun, TestTerms};
pub use index::{QueryOutcome, RankedResult, SearchIndex};
pub use report::TestReport;
