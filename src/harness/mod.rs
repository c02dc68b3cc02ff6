//! Search quality test harness
//!
//! Drives a `SearchIndex` with curated terms tagged as valid, invalid or
//! edge case, one term at a time, and hands the records to the analyzer.
//!
//! Run lifecycle: Idle -> Loading -> Ready -> Executing(term) ... ->
//! Analyzing -> Done. A failing term is recorded with its error and the
//! run carries on; only corpus loading can fail a run.

mod terms;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use crate::analyzer::{analyze, QualityAnalysis};
use crate::config::TesterConfig;
use crate::document::Corpus;
use crate::error::{Result, SearchError};
use crate::index::{RankedResult, SearchIndex};

pub use terms::TestTerms;

/// Opaque label attached to each test term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TermCategory {
    ValidTerms,
    InvalidTerms,
    EdgeCases,
}

impl TermCategory {
    pub const ALL: [TermCategory; 3] = [
        TermCategory::ValidTerms,
        TermCategory::InvalidTerms,
        TermCategory::EdgeCases,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TermCategory::ValidTerms => "validTerms",
            TermCategory::InvalidTerms => "invalidTerms",
            TermCategory::EdgeCases => "edgeCases",
        }
    }

    /// "Valid terms", "Invalid terms", "Edge cases"
    pub fn label(&self) -> &'static str {
        match self {
            TermCategory::ValidTerms => "Valid terms",
            TermCategory::InvalidTerms => "Invalid terms",
            TermCategory::EdgeCases => "Edge cases",
        }
    }
}

impl fmt::Display for TermCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TermCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "validTerms" | "valid" => Ok(TermCategory::ValidTerms),
            "invalidTerms" | "invalid" => Ok(TermCategory::InvalidTerms),
            "edgeCases" | "edgeCase" | "edge" => Ok(TermCategory::EdgeCases),
            other => Err(format!(
                "unknown category '{}' (expected validTerms, invalidTerms or edgeCases)",
                other
            )),
        }
    }
}

/// Outcome of running one test term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermRecord {
    pub term: String,
    pub category: TermCategory,
    pub results: Vec<RankedResult>,
    pub total_results: usize,
    pub relevant_results: usize,
    pub execution_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TermRecord {
    fn failed(term: &str, category: TermCategory, elapsed_ms: f64, error: String) -> Self {
        Self {
            term: term.to_string(),
            category,
            results: Vec::new(),
            total_results: 0,
            relevant_results: 0,
            execution_time_ms: elapsed_ms,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    Idle,
    Loading,
    /// Corpus loaded, index built
    Ready,
    Executing { current: usize, total: usize },
    Analyzing,
    Done,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct TestRun {
    pub records: Vec<TermRecord>,
    pub analysis: QualityAnalysis,
    pub categories: Vec<TermCategory>,
    pub index_size: usize,
}

/// Runs categorised terms against one search index
pub struct SearchTester {
    config: TesterConfig,
    index: Option<SearchIndex>,
    state: HarnessState,
}

impl SearchTester {
    pub fn new(config: TesterConfig) -> Self {
        Self {
            config,
            index: None,
            state: HarnessState::Idle,
        }
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Load the corpus file and build the index
    pub async fn load_corpus(&mut self, path: &Path) -> Result<usize> {
        self.transition(HarnessState::Loading);
        let corpus = match Corpus::load(path).await {
            Ok(corpus) => corpus,
            Err(e) => {
                self.index = None;
                self.transition(HarnessState::Idle);
                return Err(e);
            }
        };
        self.load_documents(corpus)
    }

    /// Build the index from an in-memory corpus
    pub fn load_documents(&mut self, corpus: Corpus) -> Result<usize> {
        let index = SearchIndex::from_corpus(
            corpus,
            self.config.fields().to_vec(),
            self.config.search_options(),
        );
        match index {
            Ok(index) => {
                let size = index.len();
                self.index = Some(index);
                self.transition(HarnessState::Ready);
                Ok(size)
            }
            Err(e) => {
                self.index = None;
                self.transition(HarnessState::Idle);
                Err(e)
            }
        }
    }

    /// Run a single term; failures end up on the record, never as `Err`
    pub fn test_term(&self, term: &str, category: TermCategory) -> Result<TermRecord> {
        let index = self.index.as_ref().ok_or(SearchError::IndexNotLoaded)?;
        let min = self.config.min_characters;
        let len = term.chars().count();

        if len < min && !term.trim().is_empty() {
            return Ok(TermRecord::failed(
                term,
                category,
                0.0,
                format!("Term too short ({} < {})", len, min),
            ));
        }

        let start = Instant::now();
        let outcome = index.query(term);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(match outcome {
            Ok(outcome) => TermRecord {
                term: term.to_string(),
                category,
                results: outcome.results,
                total_results: outcome.total_results,
                relevant_results: outcome.relevant_results,
                execution_time_ms: elapsed_ms,
                error: None,
            },
            Err(e) => {
                tracing::debug!("Term {:?} failed: {}", term, e);
                TermRecord::failed(term, category, elapsed_ms, e.to_string())
            }
        })
    }

    /// Run every term of the selected categories, sequentially
    pub fn run(&mut self, terms: &TestTerms, categories: &[TermCategory]) -> Result<TestRun> {
        self.run_with_progress(terms, categories, |_, _| {})
    }

    /// Like `run`, calling `progress(done, total)` after each term
    pub fn run_with_progress<F>(
        &mut self,
        terms: &TestTerms,
        categories: &[TermCategory],
        mut progress: F,
    ) -> Result<TestRun>
    where
        F: FnMut(usize, usize),
    {
        if self.index.is_none() {
            return Err(SearchError::IndexNotLoaded);
        }

        let planned: Vec<(TermCategory, &str)> = categories
            .iter()
            .flat_map(|&c| terms.get(c).iter().map(move |t| (c, t.as_str())))
            .collect();
        let total = planned.len();

        tracing::info!(
            "Testing {} terms (relevance >= {}%, max {} results, min {} chars)",
            total,
            self.config.relevance_threshold,
            self.config.max_results,
            self.config.min_characters
        );

        let mut records = Vec::with_capacity(total);
        for (i, (category, term)) in planned.into_iter().enumerate() {
            self.state = HarnessState::Executing {
                current: i + 1,
                total,
            };
            records.push(self.test_term(term, category)?);
            progress(i + 1, total);
        }

        self.transition(HarnessState::Analyzing);
        let analysis = analyze(&records);
        self.transition(HarnessState::Done);

        Ok(TestRun {
            records,
            analysis,
            categories: categories.to_vec(),
            index_size: self.index.as_ref().map_or(0, SearchIndex::len),
        })
    }

    fn transition(&mut self, next: HarnessState) {
        tracing::debug!("Harness state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
