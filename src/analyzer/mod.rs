//! Quality analysis of a harness run
//!
//! `analyze` is a pure function of the term records. Issues say what is
//! wrong, recommendations say what to change; both are derived from the
//! same thresholds independently.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::harness::{TermCategory, TermRecord};

/// Run-wide totals
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_terms: usize,
    pub terms_with_results: usize,
    pub terms_with_errors: usize,
    pub avg_execution_time_ms: f64,
}

/// Per-category statistics; rates and averages are rounded integers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_terms: usize,
    pub terms_with_results: usize,
    pub terms_with_errors: usize,
    /// Mean relevant result count per term
    pub avg_results: u32,
    /// Mean of each term's mean relevance percent, over terms with results
    pub avg_score: u32,
    /// Mean relevance percent of each term's best result
    pub avg_top_score: u32,
    /// Percent of terms with at least one relevant result
    pub success_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    fn penalty(&self) -> i64 {
        match self {
            Severity::Critical | Severity::High => 20,
            Severity::Medium => 10,
            Severity::Low => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    FalsePositives,
    FalseNegatives,
    HighErrorRate,
    LowRecall,
    Performance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Example terms that triggered the issue
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<String>,
    /// Percentage behind the issue, when one applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<u32>,
    pub description: String,
    pub impact: String,
}

/// Declaration order is sort order: critical first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Precision,
    Recall,
    Balance,
    Content,
    Performance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub action: String,
    pub reason: String,
    pub expected_impact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAnalysis {
    pub summary: Summary,
    pub by_category: BTreeMap<TermCategory, CategoryStats>,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<Recommendation>,
    pub quality_score: u32,
}

impl QualityAnalysis {
    /// Any high or critical issue; the CLI exits non-zero on these
    pub fn has_blocking_issues(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity, Severity::High | Severity::Critical))
    }

    pub fn grade(&self) -> char {
        quality_grade(self.quality_score)
    }
}

/// Letter grade for a 0-100 quality score
pub fn quality_grade(score: u32) -> char {
    match score {
        90.. => 'A',
        80..=89 => 'B',
        70..=79 => 'C',
        60..=69 => 'D',
        _ => 'F',
    }
}

/// Analyze a run's records
pub fn analyze(records: &[TermRecord]) -> QualityAnalysis {
    let summary = summarize(records);

    let by_category: BTreeMap<TermCategory, CategoryStats> = TermCategory::ALL
        .iter()
        .filter_map(|&category| {
            let members: Vec<&TermRecord> =
                records.iter().filter(|r| r.category == category).collect();
            (!members.is_empty()).then(|| (category, category_stats(&members)))
        })
        .collect();

    let issues = detect_issues(records, &summary, &by_category);
    let recommendations = recommend(&summary, &by_category);

    let mut analysis = QualityAnalysis {
        summary,
        by_category,
        issues,
        recommendations,
        quality_score: 0,
    };
    analysis.quality_score = quality_score(&analysis);
    analysis
}

fn summarize(records: &[TermRecord]) -> Summary {
    let total = records.len();
    let avg_execution_time_ms = if total == 0 {
        0.0
    } else {
        records.iter().map(|r| r.execution_time_ms).sum::<f64>() / total as f64
    };

    Summary {
        total_terms: total,
        terms_with_results: records.iter().filter(|r| r.relevant_results > 0).count(),
        terms_with_errors: records.iter().filter(|r| r.error.is_some()).count(),
        avg_execution_time_ms,
    }
}

fn rounded_mean(sum: f64, count: usize) -> u32 {
    if count == 0 {
        0
    } else {
        (sum / count as f64).round() as u32
    }
}

fn category_stats(members: &[&TermRecord]) -> CategoryStats {
    let total = members.len();
    let with_results = members.iter().filter(|r| r.relevant_results > 0).count();
    let scored: Vec<&&TermRecord> = members.iter().filter(|r| !r.results.is_empty()).collect();

    let mean_scores: f64 = scored
        .iter()
        .map(|r| {
            let sum: u32 = r.results.iter().map(|res| res.relevance_percent).sum();
            f64::from(sum) / r.results.len() as f64
        })
        .sum();
    let top_scores: f64 = scored
        .iter()
        .map(|r| f64::from(r.results[0].relevance_percent))
        .sum();

    CategoryStats {
        total_terms: total,
        terms_with_results: with_results,
        terms_with_errors: members.iter().filter(|r| r.error.is_some()).count(),
        avg_results: rounded_mean(
            members.iter().map(|r| r.relevant_results as f64).sum(),
            total,
        ),
        avg_score: rounded_mean(mean_scores, scored.len()),
        avg_top_score: rounded_mean(top_scores, scored.len()),
        success_rate: rounded_mean(with_results as f64 * 100.0, total),
    }
}

fn detect_issues(
    records: &[TermRecord],
    summary: &Summary,
    by_category: &BTreeMap<TermCategory, CategoryStats>,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    let false_positives: Vec<&TermRecord> = records
        .iter()
        .filter(|r| r.category == TermCategory::InvalidTerms && r.relevant_results > 0)
        .collect();
    if !false_positives.is_empty() {
        issues.push(Issue {
            kind: IssueKind::FalsePositives,
            severity: Severity::High,
            count: Some(false_positives.len()),
            terms: false_positives.iter().map(|r| r.term.clone()).collect(),
            rate: None,
            description: "Invalid terms returning results (false positives)".to_string(),
            impact: "Users may see irrelevant results for nonsense queries".to_string(),
        });
    }

    let false_negatives: Vec<&TermRecord> = records
        .iter()
        .filter(|r| r.category == TermCategory::ValidTerms && r.relevant_results == 0)
        .collect();
    if !false_negatives.is_empty() {
        issues.push(Issue {
            kind: IssueKind::FalseNegatives,
            severity: if false_negatives.len() > 20 {
                Severity::High
            } else {
                Severity::Medium
            },
            count: Some(false_negatives.len()),
            terms: false_negatives
                .iter()
                .take(10)
                .map(|r| r.term.clone())
                .collect(),
            rate: None,
            description: "Valid terms returning no results (false negatives)".to_string(),
            impact: "Users may not find relevant content for common terms".to_string(),
        });
    }

    if summary.total_terms > 0 {
        let error_rate = summary.terms_with_errors as f64 / summary.total_terms as f64 * 100.0;
        if error_rate > 5.0 {
            let rounded = error_rate.round() as u32;
            issues.push(Issue {
                kind: IssueKind::HighErrorRate,
                severity: if error_rate > 15.0 {
                    Severity::High
                } else {
                    Severity::Medium
                },
                count: Some(summary.terms_with_errors),
                terms: Vec::new(),
                rate: Some(rounded),
                description: format!("High error rate ({}% of tests)", rounded),
                impact: "Search functionality may be unstable for edge cases".to_string(),
            });
        }
    }

    if let Some(valid) = by_category.get(&TermCategory::ValidTerms) {
        if valid.success_rate < 50 {
            issues.push(Issue {
                kind: IssueKind::LowRecall,
                severity: Severity::High,
                count: None,
                terms: Vec::new(),
                rate: Some(valid.success_rate),
                description: format!(
                    "Low recall for valid terms ({}% success rate)",
                    valid.success_rate
                ),
                impact: "Search may be too restrictive, missing relevant content".to_string(),
            });
        }
    }

    let avg_time = summary.avg_execution_time_ms;
    if avg_time > 100.0 {
        issues.push(Issue {
            kind: IssueKind::Performance,
            severity: if avg_time > 500.0 {
                Severity::High
            } else {
                Severity::Medium
            },
            count: None,
            terms: Vec::new(),
            rate: None,
            description: format!("Slow search performance ({:.0}ms average)", avg_time),
            impact: "Users may experience delays when searching".to_string(),
        });
    }

    issues
}

fn recommend(
    summary: &Summary,
    by_category: &BTreeMap<TermCategory, CategoryStats>,
) -> Vec<Recommendation> {
    let valid = by_category.get(&TermCategory::ValidTerms);
    let invalid = by_category.get(&TermCategory::InvalidTerms);
    let mut recs = Vec::new();

    if let Some(invalid) = invalid.filter(|c| c.terms_with_results > 0) {
        recs.push(Recommendation {
            kind: RecommendationKind::Precision,
            priority: Priority::High,
            action: "Increase search threshold or reduce fuzzy matching distance".to_string(),
            reason: format!(
                "{} invalid terms returning results",
                invalid.terms_with_results
            ),
            expected_impact: "Reduce irrelevant results for nonsense queries".to_string(),
        });
    }

    if let Some(valid) = valid.filter(|c| c.success_rate < 70) {
        recs.push(Recommendation {
            kind: RecommendationKind::Recall,
            priority: Priority::High,
            action: "Reduce search threshold or increase fuzzy matching flexibility".to_string(),
            reason: format!("Only {}% of valid terms return results", valid.success_rate),
            expected_impact: "Help users find more relevant content".to_string(),
        });
    }

    if let (Some(valid), Some(invalid)) = (valid, invalid) {
        if invalid.terms_with_results > 5 && valid.success_rate < 60 {
            recs.push(Recommendation {
                kind: RecommendationKind::Balance,
                priority: Priority::Critical,
                action: "Review search configuration - may need different thresholds for different content types".to_string(),
                reason: "Both precision and recall issues detected".to_string(),
                expected_impact: "Achieve better balance between relevant and irrelevant results"
                    .to_string(),
            });
        }
    }

    if valid.is_some_and(|c| c.avg_results < 2) {
        recs.push(Recommendation {
            kind: RecommendationKind::Content,
            priority: Priority::Medium,
            action: "Review search index content quality and field weighting".to_string(),
            reason: "Low average results for valid terms suggests sparse or poorly indexed content"
                .to_string(),
            expected_impact: "Improve content discoverability".to_string(),
        });
    }

    if summary.avg_execution_time_ms > 50.0 {
        recs.push(Recommendation {
            kind: RecommendationKind::Performance,
            priority: Priority::Medium,
            action: "Optimize search configuration or consider index size reduction".to_string(),
            reason: format!(
                "Average search time is {:.0}ms",
                summary.avg_execution_time_ms
            ),
            expected_impact: "Improve user experience with faster searches".to_string(),
        });
    }

    // stable: equal priorities keep rule order
    recs.sort_by_key(|r| r.priority);
    recs
}

fn quality_score(analysis: &QualityAnalysis) -> u32 {
    let mut score: i64 = 100;
    for issue in &analysis.issues {
        score -= issue.severity.penalty();
    }

    if let Some(valid) = analysis.by_category.get(&TermCategory::ValidTerms) {
        if valid.success_rate > 80 {
            score += 5;
        }
        if valid.avg_score > 85 {
            score += 5;
        }
    }

    if analysis
        .by_category
        .get(&TermCategory::InvalidTerms)
        .is_some_and(|c| c.terms_with_results == 0)
    {
        score += 10;
    }

    if analysis.summary.avg_execution_time_ms < 10.0 {
        score += 5;
    }

    score.clamp(0, 100) as u32
}
