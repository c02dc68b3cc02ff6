//! Approximate string matching
//!
//! Scores run from 0 (perfect) to 1 (nothing in common):
//! - Literal containment of the query short-circuits to `SUBSTRING_SCORE`
//! - Otherwise the normalised Levenshtein distance is used, floored at
//!   `SUBSTRING_SCORE` so a fuzzy match never outranks a literal one
//!
//! Comparison is done per character on case-folded text. Folding maps each
//! char to exactly one char, so match ranges index the original text.

mod levenshtein;

use crate::config::MatchOptions;

pub use levenshtein::{aligned_positions, levenshtein};

/// Score given to any text that contains the query literally
pub const SUBSTRING_SCORE: f64 = 0.1;

/// An admissible match of a query against one text
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatch {
    pub score: f64,
    /// The query occurs literally in the text
    pub literal: bool,
    /// Inclusive `(start, end)` character ranges in the text
    pub indices: Vec<(usize, usize)>,
}

/// A query prepared for repeated matching against many texts
#[derive(Debug, Clone)]
pub struct Matcher<'o> {
    query: Vec<char>,
    options: &'o MatchOptions,
}

impl<'o> Matcher<'o> {
    /// Returns `None` for an empty query, which never matches anything
    pub fn new(query: &str, options: &'o MatchOptions) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            query: fold(query, options.is_case_sensitive),
            options,
        })
    }

    pub fn query_len(&self) -> usize {
        self.query.len()
    }

    /// Raw score of the query against `text`
    pub fn score(&self, text: &str) -> f64 {
        let text = fold(text, self.options.is_case_sensitive);
        if contains(&text, &self.query) {
            return SUBSTRING_SCORE;
        }
        self.fuzzy_score(&text)
    }

    /// Score plus match ranges, or `None` if the match is not admissible
    pub fn find(&self, text: &str) -> Option<TextMatch> {
        let min_len = self.options.min_match_char_length;
        if self.query.len() < min_len {
            return None;
        }
        let text = fold(text, self.options.is_case_sensitive);

        let literal = occurrences(&text, &self.query);
        if !literal.is_empty() {
            if !is_admissible(SUBSTRING_SCORE, self.options) {
                return None;
            }
            return Some(TextMatch {
                score: SUBSTRING_SCORE,
                literal: true,
                indices: keep_long_ranges(literal, min_len),
            });
        }

        if self.length_gap(&text) >= self.options.threshold {
            return None;
        }
        let score = self.fuzzy_score(&text);
        if !is_admissible(score, self.options) {
            return None;
        }

        let window = self.window(&text);
        let ranges = group_ranges(&aligned_positions(&self.query, window));
        let indices = keep_long_ranges(ranges, min_len);
        if indices.is_empty() {
            return None;
        }
        Some(TextMatch {
            score,
            literal: false,
            indices,
        })
    }

    fn fuzzy_score(&self, text: &[char]) -> f64 {
        let window = self.window(text);
        let longest = self.query.len().max(window.len());
        let distance = levenshtein(&self.query, window);
        (distance as f64 / longest as f64).max(SUBSTRING_SCORE)
    }

    /// Lower bound of the fuzzy score: the length difference alone
    fn length_gap(&self, text: &[char]) -> f64 {
        let window = self.window(text);
        let longest = self.query.len().max(window.len());
        self.query.len().abs_diff(window.len()) as f64 / longest as f64
    }

    /// Portion of the text the fuzzy fallback compares against
    fn window<'t>(&self, text: &'t [char]) -> &'t [char] {
        if self.options.ignore_location {
            text
        } else {
            let end = text.len().min(self.query.len() + self.options.distance);
            &text[..end]
        }
    }
}

/// Score `query` against `text`; `None` when the query is empty
pub fn match_score(query: &str, text: &str, options: &MatchOptions) -> Option<f64> {
    Matcher::new(query, options).map(|m| m.score(text))
}

/// A score is admissible when it is strictly below the threshold
pub fn is_admissible(score: f64, options: &MatchOptions) -> bool {
    score < options.threshold
}

/// Characters `start..=end` of `text`
pub fn slice_chars(text: &str, (start, end): (usize, usize)) -> String {
    text.chars().skip(start).take(end + 1 - start).collect()
}

fn fold(text: &str, case_sensitive: bool) -> Vec<char> {
    if case_sensitive {
        text.chars().collect()
    } else {
        text.chars()
            .map(|c| c.to_lowercase().next().unwrap_or(c))
            .collect()
    }
}

fn contains(text: &[char], query: &[char]) -> bool {
    query.len() <= text.len() && text.windows(query.len()).any(|w| w == query)
}

/// Start/end of every (possibly overlapping) literal occurrence
fn occurrences(text: &[char], query: &[char]) -> Vec<(usize, usize)> {
    if query.len() > text.len() {
        return Vec::new();
    }
    text.windows(query.len())
        .enumerate()
        .filter(|(_, w)| *w == query)
        .map(|(i, _)| (i, i + query.len() - 1))
        .collect()
}

fn group_ranges(positions: &[usize]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for &pos in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == pos => *end = pos,
            _ => ranges.push((pos, pos)),
        }
    }
    ranges
}

fn keep_long_ranges(ranges: Vec<(usize, usize)>, min_len: usize) -> Vec<(usize, usize)> {
    ranges
        .into_iter()
        .filter(|(start, end)| end + 1 - start >= min_len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MatchOptions {
        MatchOptions {
            threshold: 0.4,
            min_match_char_length: 2,
            ignore_location: true,
            ..MatchOptions::default()
        }
    }

    #[test]
    fn test_substring_fast_path() {
        let opts = options();
        assert_eq!(match_score("home", "Home Page", &opts), Some(SUBSTRING_SCORE));
        assert_eq!(match_score("page", "home page", &opts), Some(SUBSTRING_SCORE));
    }

    #[test]
    fn test_empty_query_never_matches() {
        let opts = options();
        assert_eq!(match_score("", "anything", &opts), None);
        assert!(Matcher::new("", &opts).is_none());
    }

    #[test]
    fn test_normalised_edit_distance() {
        let opts = options();
        // kitten -> sitting is the textbook distance of 3 over 7 chars
        let score = match_score("kitten", "sitting", &opts).unwrap();
        assert!((score - 3.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_fuzzy_never_beats_literal() {
        let opts = options();
        let fuzzy = match_score("abcdefghijk", "abcdefghijx", &opts).unwrap();
        assert!(fuzzy >= SUBSTRING_SCORE);
    }

    #[test]
    fn test_case_sensitivity() {
        let mut opts = options();
        opts.is_case_sensitive = true;
        assert!(match_score("home", "Home", &opts).unwrap() > SUBSTRING_SCORE);
        opts.is_case_sensitive = false;
        assert_eq!(match_score("home", "Home", &opts), Some(SUBSTRING_SCORE));
    }

    #[test]
    fn test_find_reports_literal_ranges() {
        let opts = options();
        let matcher = Matcher::new("home", &opts).unwrap();
        let found = matcher.find("Home Page home").unwrap();
        assert!(found.literal);
        assert_eq!(found.indices, vec![(0, 3), (10, 13)]);
    }

    #[test]
    fn test_find_overlapping_occurrences() {
        let opts = options();
        let matcher = Matcher::new("aa", &opts).unwrap();
        assert_eq!(matcher.find("aaa").unwrap().indices, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_find_fuzzy_ranges() {
        let opts = options();
        let matcher = Matcher::new("serch", &opts).unwrap();
        let found = matcher.find("search").unwrap();
        assert!(!found.literal);
        // 'se' and 'rch' align; the inserted 'a' splits the run
        assert_eq!(found.indices, vec![(0, 1), (3, 5)]);
    }

    #[test]
    fn test_find_rejects_inadmissible() {
        let opts = options();
        let matcher = Matcher::new("qwerty", &opts).unwrap();
        assert!(matcher.find("Contact Information").is_none());
    }

    #[test]
    fn test_location_window_limits_fuzzy_fallback() {
        let mut opts = options();
        opts.ignore_location = false;
        opts.distance = 1;
        let matcher = Matcher::new("serch", &opts).unwrap();
        // Window is "search" (5 + 1 chars), the trailing noise is ignored
        assert!(matcher.find("search and a lot of trailing words").is_some());

        opts.ignore_location = true;
        let matcher = Matcher::new("serch", &opts).unwrap();
        assert!(matcher.find("search and a lot of trailing words").is_none());
    }

    #[test]
    fn test_short_ranges_dropped() {
        let mut opts = options();
        opts.min_match_char_length = 3;
        let matcher = Matcher::new("serch", &opts).unwrap();
        assert_eq!(matcher.find("search").unwrap().indices, vec![(3, 5)]);
    }

    #[test]
    fn test_fuzzy_match_needs_a_long_enough_run() {
        let opts = MatchOptions {
            threshold: 0.5,
            min_match_char_length: 3,
            ignore_location: true,
            ..MatchOptions::default()
        };
        let matcher = Matcher::new("axbxc", &opts).unwrap();
        // two edits out of five is admissible, but no aligned run reaches 3 chars
        assert!(matcher.score("aybyc") < opts.threshold);
        assert!(matcher.find("aybyc").is_none());
    }

    #[test]
    fn test_query_below_min_length_never_matches() {
        let mut opts = options();
        opts.min_match_char_length = 5;
        let matcher = Matcher::new("home", &opts).unwrap();
        assert!(matcher.find("Home Page").is_none());
    }

    #[test]
    fn test_length_gap_rejects_before_distance() {
        let opts = options();
        let matcher = Matcher::new("serch", &opts).unwrap();
        let text = fold("a search box on every page", false);
        assert!(matcher.length_gap(&text) >= opts.threshold);
        assert!(matcher.find("a search box on every page").is_none());
        // the lower bound never exceeds the exact score
        assert!(matcher.length_gap(&text) <= matcher.fuzzy_score(&text));
    }

    #[test]
    fn test_slice_chars_handles_unicode() {
        assert_eq!(slice_chars("café au lait", (0, 3)), "café");
        assert_eq!(slice_chars("Home Page", (5, 8)), "Page");
    }
}
