//! In-memory search index
//!
//! Architecture: a brute-force scan. Building only validates configuration
//! and takes ownership of the corpus; every query scores every document.
//! Corpora are page-count sized, so no inverted index is kept.
//!
//! Query pipeline:
//! 1. Reject queries shorter than `min_characters` (after trimming)
//! 2. Aggregate each document, dropping those with no admissible field
//! 3. Keep results whose relevance `(1 - score) * 100` meets the cutoff
//! 4. Stable sort by score, best first
//! 5. Truncate to `max_results`

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::{validate_fields, FieldSpec, SearchOptions};
use crate::document::{str_field, Corpus, Document};
use crate::error::{Result, SearchError};
use crate::matcher::Matcher;
use crate::scorer::{aggregate_with, FieldMatch};

/// A scored, relevance-filtered hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Position of the document in the corpus
    pub ref_index: usize,
    pub item: Document,
    /// 0 is a perfect match
    pub score: f64,
    pub relevance_percent: u32,
    pub matches: Vec<FieldMatch>,
}

/// Results of one query along with the pre-truncation counts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOutcome {
    /// Documents with at least one admissible field
    pub total_results: usize,
    /// Documents that also passed the relevance cutoff
    pub relevant_results: usize,
    pub results: Vec<RankedResult>,
}

/// Relevance percentage of a score, rounded to the nearest integer
pub fn relevance_percent(score: f64) -> u32 {
    ((1.0 - score) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Read-only search index over a fixed corpus
#[derive(Debug, Clone)]
pub struct SearchIndex {
    documents: Vec<Document>,
    fields: Vec<FieldSpec>,
    options: SearchOptions,
}

impl SearchIndex {
    /// Validate configuration and wrap the corpus
    ///
    /// Malformed field specs or options fail here, never at query time.
    pub fn build(
        documents: Vec<Document>,
        fields: Vec<FieldSpec>,
        options: SearchOptions,
    ) -> Result<Self> {
        validate_fields(&fields)?;
        options.validate()?;

        tracing::debug!(
            "Built search index: {} documents, {} fields",
            documents.len(),
            fields.len()
        );

        Ok(Self {
            documents,
            fields,
            options,
        })
    }

    pub fn from_corpus(
        corpus: Corpus,
        fields: Vec<FieldSpec>,
        options: SearchOptions,
    ) -> Result<Self> {
        Self::build(corpus.entries, fields, options)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Ranked results for `text`
    pub fn search(&self, text: &str) -> Result<Vec<RankedResult>> {
        Ok(self.query(text)?.results)
    }

    /// Run the full query pipeline, keeping the intermediate counts
    pub fn query(&self, text: &str) -> Result<QueryOutcome> {
        let start = Instant::now();
        let query = text.trim();
        let query_len = query.chars().count();

        if query_len < self.options.min_characters {
            return Ok(QueryOutcome::default());
        }
        if query_len > self.options.max_query_length {
            return Err(SearchError::QueryTooLong {
                len: query_len,
                max: self.options.max_query_length,
            });
        }
        if query.chars().any(char::is_control) {
            return Err(SearchError::InvalidQuery(
                "query contains control characters".to_string(),
            ));
        }

        let matching = &self.options.matching;
        let Some(matcher) = Matcher::new(query, matching) else {
            return Ok(QueryOutcome::default());
        };
        if matcher.query_len() < matching.min_match_char_length {
            return Ok(QueryOutcome::default());
        }

        let mut hits: Vec<RankedResult> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(ref_index, doc)| {
                let agg = aggregate_with(&matcher, doc, &self.fields)?;
                if matching.require_substring && !agg.literal {
                    return None;
                }
                Some(RankedResult {
                    ref_index,
                    item: doc.clone(),
                    score: agg.score,
                    relevance_percent: relevance_percent(agg.score),
                    matches: agg.matches,
                })
            })
            .collect();

        let total_results = hits.len();
        let cutoff = self.options.relevance_threshold;
        hits.retain(|hit| (1.0 - hit.score) * 100.0 >= cutoff);
        // sort_by is stable: tied scores keep corpus order
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));

        let relevant_results = hits.len();
        hits.truncate(self.options.max_results);

        tracing::debug!(
            "Query {:?}: {} matched, {} relevant, {:.2}ms",
            query,
            total_results,
            relevant_results,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(QueryOutcome {
            total_results,
            relevant_results,
            results: hits,
        })
    }
}

/// Keep results whose top-level string `field` equals `value`
pub fn filter_by_field(results: Vec<RankedResult>, field: &str, value: &str) -> Vec<RankedResult> {
    results
        .into_iter()
        .filter(|r| str_field(&r.item, field) == Some(value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatchOptions;
    use serde_json::json;

    fn corpus() -> Vec<Document> {
        vec![
            json!({ "title": "Home Page", "tags": ["home"], "type": "page" }),
            json!({ "title": "Contact Information", "tags": ["contact"], "type": "page" }),
            json!({ "title": "Homepage Hero", "tags": ["home", "hero"], "type": "section" }),
        ]
    }

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::new("title", 10.0), FieldSpec::new("tags", 5.0)]
    }

    fn options() -> SearchOptions {
        SearchOptions {
            relevance_threshold: 60.0,
            ..SearchOptions::default()
        }
    }

    #[test]
    fn test_home_scenario() {
        let index = SearchIndex::build(corpus()[..2].to_vec(), fields(), options()).unwrap();
        let results = index.search("home").unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].item["title"], "Home Page");
        assert!(results[0].relevance_percent >= 60);
        let title = results[0].matches.iter().find(|m| m.field == "title").unwrap();
        assert_eq!(title.indices, vec![(0, 3)]);
    }

    #[test]
    fn test_short_and_blank_queries() {
        let index = SearchIndex::build(corpus(), fields(), options()).unwrap();
        assert!(index.search("").unwrap().is_empty());
        assert!(index.search("x").unwrap().is_empty());
        assert!(index.search(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_query_below_match_granularity() {
        // "hom" passes min_characters but not min_match_char_length (4)
        let index = SearchIndex::build(corpus(), fields(), options()).unwrap();
        assert!(index.search("hom").unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_corpus_order() {
        let index = SearchIndex::build(corpus(), fields(), options()).unwrap();
        let results = index.search("home").unwrap();
        let order: Vec<usize> = results.iter().map(|r| r.ref_index).collect();
        assert_eq!(order, vec![0, 2]);
    }

    #[test]
    fn test_truncates_but_reports_counts() {
        let opts = SearchOptions {
            max_results: 1,
            ..options()
        };
        let index = SearchIndex::build(corpus(), fields(), opts).unwrap();
        let outcome = index.query("home").unwrap();
        assert_eq!(outcome.total_results, 2);
        assert_eq!(outcome.relevant_results, 2);
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_relevance_cutoff_is_independent() {
        let opts = SearchOptions {
            relevance_threshold: 95.0,
            ..options()
        };
        let index = SearchIndex::build(corpus(), fields(), opts).unwrap();
        let outcome = index.query("home").unwrap();
        assert_eq!(outcome.total_results, 2);
        assert_eq!(outcome.relevant_results, 0);
    }

    #[test]
    fn test_require_substring_drops_fuzzy_only_hits() {
        let fuzzy = SearchOptions {
            matching: MatchOptions {
                threshold: 0.4,
                min_match_char_length: 2,
                ignore_location: true,
                ..MatchOptions::default()
            },
            relevance_threshold: 0.0,
            ..SearchOptions::default()
        };
        let docs = vec![json!({ "title": "search" })];

        let index = SearchIndex::build(docs.clone(), fields(), fuzzy.clone()).unwrap();
        assert_eq!(index.search("serch").unwrap().len(), 1);

        let mut strict = fuzzy;
        strict.matching.require_substring = true;
        let index = SearchIndex::build(docs, fields(), strict).unwrap();
        assert!(index.search("serch").unwrap().is_empty());
    }

    #[test]
    fn test_fuzzy_hit_without_long_run_is_dropped() {
        let opts = SearchOptions {
            matching: MatchOptions {
                threshold: 0.5,
                min_match_char_length: 3,
                ignore_location: true,
                ..MatchOptions::default()
            },
            relevance_threshold: 0.0,
            ..SearchOptions::default()
        };
        let docs = vec![json!({ "title": "aybyc" }), json!({ "title": "axbyc" })];
        let index = SearchIndex::build(docs, fields(), opts).unwrap();

        let results = index.search("axbxc").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ref_index, 1);
        assert!(results[0].matches.iter().all(|m| !m.indices.is_empty()));
    }

    #[test]
    fn test_malformed_queries() {
        let opts = SearchOptions {
            max_query_length: 10,
            ..options()
        };
        let index = SearchIndex::build(corpus(), fields(), opts).unwrap();
        assert!(matches!(
            index.query("a very long query"),
            Err(SearchError::QueryTooLong { len: 17, max: 10 })
        ));
        assert!(matches!(
            index.query("home\tpage"),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_build_rejects_bad_fields() {
        let dup = vec![FieldSpec::new("title", 1.0), FieldSpec::new("title", 2.0)];
        assert!(matches!(
            SearchIndex::build(corpus(), dup, options()),
            Err(SearchError::InvalidConfig(_))
        ));
        let negative = vec![FieldSpec::new("title", -1.0)];
        assert!(SearchIndex::build(corpus(), negative, options()).is_err());
    }

    #[test]
    fn test_filter_by_field() {
        let index = SearchIndex::build(corpus(), fields(), options()).unwrap();
        let results = filter_by_field(index.search("home").unwrap(), "type", "section");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ref_index, 2);
    }

    #[test]
    fn test_relevance_percent_rounding() {
        assert_eq!(relevance_percent(0.1), 90);
        assert_eq!(relevance_percent(0.0), 100);
        assert_eq!(relevance_percent(0.125), 88);
    }
}
