//! Per-document score aggregation
//!
//! Each field contributes its best admissible candidate score, weighted by
//! the field weight. Fields without an admissible candidate are left out of
//! both numerator and denominator; a document where no field matched is
//! excluded rather than scored.

use serde::{Deserialize, Serialize};

use crate::config::{FieldSpec, MatchOptions};
use crate::document::{extract_candidates, Document};
use crate::matcher::Matcher;

/// Match metadata for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub field: String,
    /// The first admissible candidate string of the field
    pub value: String,
    /// Inclusive character ranges within `value`
    pub indices: Vec<(usize, usize)>,
}

/// Aggregated score of one document against one query
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub score: f64,
    pub matches: Vec<FieldMatch>,
    /// Some admissible candidate contains the query literally
    pub literal: bool,
}

/// Score a document with a prepared matcher
pub fn aggregate_with(
    matcher: &Matcher<'_>,
    document: &Document,
    fields: &[FieldSpec],
) -> Option<Aggregate> {
    let mut total_score = 0.0;
    let mut total_weight = 0.0;
    let mut matches = Vec::new();
    let mut literal = false;

    for field in fields {
        let mut best: Option<f64> = None;

        for candidate in extract_candidates(document, &field.name) {
            let Some(found) = matcher.find(candidate) else {
                continue;
            };

            literal |= found.literal;
            if best.is_none() {
                matches.push(FieldMatch {
                    field: field.name.clone(),
                    value: candidate.to_string(),
                    indices: found.indices,
                });
            }
            best = Some(best.map_or(found.score, |b: f64| b.min(found.score)));
        }

        if let Some(score) = best {
            total_score += score * field.weight;
            total_weight += field.weight;
        }
    }

    if total_weight <= 0.0 {
        return None;
    }

    Some(Aggregate {
        score: total_score / total_weight,
        matches,
        literal,
    })
}

/// Score a document against a raw query; `None` if nothing matched
pub fn aggregate(
    query: &str,
    document: &Document,
    fields: &[FieldSpec],
    options: &MatchOptions,
) -> Option<Aggregate> {
    let matcher = Matcher::new(query, options)?;
    aggregate_with(&matcher, document, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::SUBSTRING_SCORE;
    use serde_json::json;

    fn options() -> MatchOptions {
        MatchOptions {
            threshold: 0.4,
            min_match_char_length: 2,
            ignore_location: true,
            ..MatchOptions::default()
        }
    }

    fn fields() -> Vec<FieldSpec> {
        vec![FieldSpec::new("title", 10.0), FieldSpec::new("tags", 5.0)]
    }

    #[test]
    fn test_literal_match_in_every_field() {
        let doc = json!({ "title": "Home Page", "tags": ["home"] });
        let agg = aggregate("home", &doc, &fields(), &options()).unwrap();

        assert!((agg.score - SUBSTRING_SCORE).abs() < 1e-12);
        assert!(agg.literal);
        assert_eq!(agg.matches.len(), 2);
        assert_eq!(agg.matches[0].field, "title");
        assert_eq!(agg.matches[0].indices, vec![(0, 3)]);
    }

    #[test]
    fn test_weighted_mean_over_matching_fields_only() {
        // title matches fuzzily (1 edit over 6 chars), tags do not match at all
        let doc = json!({ "title": "search", "tags": ["zzzzzzzz"] });
        let agg = aggregate("serch", &doc, &fields(), &options()).unwrap();

        assert!((agg.score - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(agg.matches.len(), 1);
        assert!(!agg.literal);
    }

    #[test]
    fn test_weights_blend_field_scores() {
        let doc = json!({ "title": "search", "tags": ["search"] });
        let agg = aggregate("serch", &doc, &fields(), &options()).unwrap();
        assert!((agg.score - 1.0 / 6.0).abs() < 1e-12);

        let doc = json!({ "title": "search", "tags": ["serch"] });
        let agg = aggregate("serch", &doc, &fields(), &options()).unwrap();
        let expected = (10.0 * (1.0 / 6.0) + 5.0 * SUBSTRING_SCORE) / 15.0;
        assert!((agg.score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_first_admissible_candidate_carries_matches() {
        let doc = json!({ "title": "x", "tags": ["nothing", "homes", "home"] });
        let agg = aggregate("home", &doc, &fields(), &options()).unwrap();
        assert_eq!(agg.matches.len(), 1);
        assert_eq!(agg.matches[0].value, "homes");
    }

    #[test]
    fn test_no_admissible_field_excludes_document() {
        let doc = json!({ "title": "Contact Information", "tags": ["contact"] });
        assert!(aggregate("home", &doc, &fields(), &options()).is_none());
        assert!(aggregate("", &doc, &fields(), &options()).is_none());
    }
}
