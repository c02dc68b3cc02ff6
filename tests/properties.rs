//! Property-based tests using proptest.
//!
//! Invariants of the matcher and the query pipeline over random queries
//! and corpora.

use proptest::prelude::*;
use searchprobe::matcher::{match_score, SUBSTRING_SCORE};
use searchprobe::{FieldSpec, MatchOptions, SearchIndex, SearchOptions};
use serde_json::json;

// ============================================================================
// STRATEGIES
// ============================================================================

fn query_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{4,8}").unwrap()
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z ]{0,30}").unwrap()
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(text_strategy(), 1..12)
}

fn loose_matching() -> MatchOptions {
    MatchOptions {
        threshold: 0.7,
        min_match_char_length: 2,
        ignore_location: true,
        ..MatchOptions::default()
    }
}

fn build(titles: &[String], relevance_threshold: f64) -> SearchIndex {
    let docs = titles.iter().map(|t| json!({ "title": t })).collect();
    let options = SearchOptions {
        matching: loose_matching(),
        relevance_threshold,
        max_results: usize::MAX,
        ..SearchOptions::default()
    };
    SearchIndex::build(docs, vec![FieldSpec::new("title", 1.0)], options).unwrap()
}

// ============================================================================
// MATCHER
// ============================================================================

proptest! {
    #[test]
    fn substring_dominates_fuzzy(
        query in query_strategy(),
        prefix in text_strategy(),
        suffix in text_strategy(),
        other in text_strategy(),
    ) {
        let options = MatchOptions::default();
        let containing = format!("{}{}{}", prefix, query.to_uppercase(), suffix);

        let literal = match_score(&query, &containing, &options).unwrap();
        let fuzzy = match_score(&query, &other, &options).unwrap();

        prop_assert_eq!(literal, SUBSTRING_SCORE);
        prop_assert!(literal <= fuzzy);
    }

    #[test]
    fn scores_stay_in_unit_range(query in query_strategy(), text in text_strategy()) {
        let score = match_score(&query, &text, &loose_matching()).unwrap();
        prop_assert!((0.0..=1.0).contains(&score));
    }
}

// ============================================================================
// QUERY PIPELINE
// ============================================================================

proptest! {
    #[test]
    fn query_is_deterministic(titles in corpus_strategy(), query in query_strategy()) {
        let index = build(&titles, 0.0);
        prop_assert_eq!(index.query(&query).unwrap(), index.query(&query).unwrap());
    }

    #[test]
    fn raising_threshold_never_adds_results(
        titles in corpus_strategy(),
        query in query_strategy(),
        low in 0.0f64..100.0,
        delta in 0.0f64..50.0,
    ) {
        let high = (low + delta).min(100.0);
        let loose = build(&titles, low).query(&query).unwrap();
        let strict = build(&titles, high).query(&query).unwrap();

        prop_assert_eq!(loose.total_results, strict.total_results);
        prop_assert!(strict.relevant_results <= loose.relevant_results);
        for hit in &strict.results {
            prop_assert!(loose.results.iter().any(|r| r.ref_index == hit.ref_index));
        }
    }

    #[test]
    fn ranking_is_sorted_and_ties_keep_corpus_order(
        titles in corpus_strategy(),
        query in query_strategy(),
    ) {
        let results = build(&titles, 0.0).search(&query).unwrap();
        for pair in results.windows(2) {
            prop_assert!(pair[0].score <= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].ref_index < pair[1].ref_index);
            }
        }
    }

    #[test]
    fn duplicated_documents_rank_in_corpus_order(title in text_strategy(), query in query_strategy()) {
        let titles = vec![title.clone(), title.clone(), title];
        let results = build(&titles, 0.0).search(&query).unwrap();
        let order: Vec<usize> = results.iter().map(|r| r.ref_index).collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(order, sorted);
    }

    #[test]
    fn queries_below_min_characters_are_empty(
        titles in corpus_strategy(),
        query in prop::string::string_regex("[a-z]{0,2}").unwrap(),
    ) {
        let mut index_titles = titles;
        index_titles.push(query.clone());
        let docs = index_titles.iter().map(|t| json!({ "title": t })).collect();
        let options = SearchOptions {
            matching: MatchOptions { min_match_char_length: 1, ..loose_matching() },
            min_characters: 3,
            relevance_threshold: 0.0,
            ..SearchOptions::default()
        };
        let index = SearchIndex::build(docs, vec![FieldSpec::new("title", 1.0)], options).unwrap();
        prop_assert!(index.search(&query).unwrap().is_empty());
    }
}
