//! Self-contained HTML rendering of a test report

use std::fmt::Write;

use super::{ReportedResult, ReportedTerm, TestReport};
use crate::analyzer::{CategoryStats, Issue, Recommendation};
use crate::harness::TermCategory;

const STYLE: &str = r#"
:root { --primary: #2563eb; --success: #059669; --warning: #d97706; --error: #dc2626; --gray-50: #f9fafb; --gray-100: #f3f4f6; --gray-200: #e5e7eb; --gray-600: #4b5563; --gray-900: #111827; }
* { box-sizing: border-box; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; margin: 0; padding: 20px; background: var(--gray-50); color: var(--gray-900); }
.container { max-width: 1200px; margin: 0 auto; }
.panel { background: white; padding: 2rem; border-radius: 12px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); margin-bottom: 2rem; }
.quality-score { display: inline-block; padding: 0.5rem 1rem; border-radius: 8px; font-weight: 600; font-size: 1.1rem; }
.grade-A { background: #dcfce7; color: #166534; }
.grade-B { background: #dbeafe; color: #1d4ed8; }
.grade-C { background: #fef3c7; color: #92400e; }
.grade-D { background: #fed7aa; color: #9a3412; }
.grade-F { background: #fecaca; color: #991b1b; }
.summary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1rem; margin: 1.5rem 0; }
.summary-card { background: white; padding: 1.5rem; border-radius: 8px; border-left: 4px solid var(--primary); box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
.summary-number { font-size: 2rem; font-weight: 700; color: var(--primary); }
.item { padding: 1rem; border-radius: 8px; margin-bottom: 1rem; border-left: 4px solid; }
.severity-critical, .severity-high, .priority-critical { background: #fef2f2; border-color: var(--error); }
.severity-medium, .priority-high { background: #fffbeb; border-color: var(--warning); }
.severity-low, .priority-medium, .priority-low { background: #f0f9ff; border-color: var(--primary); }
.category-stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 1rem; margin: 1rem 0; }
.stat-item { text-align: center; padding: 1rem; background: var(--gray-50); border-radius: 8px; }
.stat-value { font-size: 1.5rem; font-weight: 600; color: var(--primary); }
.search-result { margin-bottom: 1.5rem; padding: 1rem; border: 1px solid var(--gray-200); border-radius: 8px; }
.term { font-weight: 600; font-size: 1.1rem; }
.category { padding: 0.25rem 0.5rem; background: var(--gray-100); border-radius: 4px; font-size: 0.8rem; margin-left: 0.5rem; }
.result-stats { display: flex; gap: 1rem; margin: 0.5rem 0; font-size: 0.9rem; color: var(--gray-600); }
.result-item { background: var(--gray-50); margin: 0.5rem 0; padding: 1rem; border-radius: 6px; border-left: 3px solid var(--success); }
.matches { font-size: 0.8rem; color: var(--gray-600); margin-top: 0.5rem; }
.no-results { color: var(--gray-600); font-style: italic; padding: 1rem; background: var(--gray-50); border-radius: 6px; }
.error { color: var(--error); background: #fef2f2; padding: 1rem; border-radius: 6px; }
.tabs { display: flex; border-bottom: 1px solid var(--gray-200); margin-bottom: 1rem; }
.tab { padding: 0.75rem 1.5rem; background: none; border: none; cursor: pointer; border-bottom: 2px solid transparent; font-size: 1rem; }
.tab.active { border-bottom-color: var(--primary); color: var(--primary); font-weight: 600; }
.tab-content { display: none; }
.tab-content.active { display: block; }
.timestamp { color: var(--gray-600); font-size: 0.9rem; }
"#;

const SCRIPT: &str = r#"
function showTab(name) {
  document.querySelectorAll('.tab-content').forEach(c => c.classList.remove('active'));
  document.querySelectorAll('.tab').forEach(t => t.classList.remove('active'));
  document.getElementById(name + '-content').classList.add('active');
  document.getElementById(name + '-tab').classList.add('active');
}
document.addEventListener('DOMContentLoaded', function () {
  const first = document.querySelector('.tab');
  if (first) first.click();
});
"#;

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole report page
pub fn render_html(report: &TestReport) -> String {
    let analysis = &report.analysis;
    let grade = analysis.grade();
    let mut html = String::new();

    // write! into a String cannot fail
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Search Quality Report</title>
<style>{style}</style>
</head>
<body>
<div class="container">
<div class="panel">
<h1>Search Quality Report</h1>
<div class="timestamp">Generated: {timestamp}</div>
<div style="margin-top: 1rem;"><span class="quality-score grade-{grade}">Quality Score: {score}/100 (Grade {grade})</span></div>
</div>
<div class="summary-grid">
{cards}</div>
"#,
        style = STYLE,
        timestamp = report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        grade = grade,
        score = analysis.quality_score,
        cards = summary_cards(report),
    );

    if !analysis.issues.is_empty() {
        html.push_str(&issues_section(&analysis.issues));
    }
    if !analysis.recommendations.is_empty() {
        html.push_str(&recommendations_section(&analysis.recommendations));
    }
    html.push_str(&category_section(analysis.by_category.iter()));
    html.push_str(&detailed_results(&report.results));

    let _ = write!(html, "</div>\n<script>{}</script>\n</body>\n</html>\n", SCRIPT);
    html
}

fn summary_cards(report: &TestReport) -> String {
    let summary = &report.analysis.summary;
    [
        (summary.total_terms.to_string(), "Total Terms Tested"),
        (summary.terms_with_results.to_string(), "Terms with Results"),
        (summary.terms_with_errors.to_string(), "Terms with Errors"),
        (
            format!("{:.1}ms", summary.avg_execution_time_ms),
            "Average Response Time",
        ),
    ]
    .iter()
    .map(|(value, label)| {
        format!(
            "<div class=\"summary-card\"><div class=\"summary-number\">{}</div><div>{}</div></div>\n",
            value, label
        )
    })
    .collect()
}

fn issues_section(issues: &[Issue]) -> String {
    let mut out = format!(
        "<div class=\"panel\">\n<h2>Issues Found ({})</h2>\n",
        issues.len()
    );
    for issue in issues {
        let severity = issue.severity.as_str();
        let _ = write!(
            out,
            "<div class=\"item severity-{}\">\n<h3>{}</h3>\n<p><strong>Severity:</strong> {}</p>\n<p><strong>Impact:</strong> {}</p>\n",
            severity,
            escape_html(&issue.description),
            severity.to_uppercase(),
            escape_html(&issue.impact)
        );
        if !issue.terms.is_empty() {
            let shown: Vec<String> = issue.terms.iter().take(10).map(|t| escape_html(t)).collect();
            let more = issue.terms.len().saturating_sub(10);
            let _ = write!(
                out,
                "<p><strong>Example Terms:</strong> {}{}</p>\n",
                shown.join(", "),
                if more > 0 {
                    format!(" (and {} more)", more)
                } else {
                    String::new()
                }
            );
        }
        if let Some(count) = issue.count {
            let _ = writeln!(out, "<p><strong>Affected Terms:</strong> {}</p>", count);
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
    out
}

fn recommendations_section(recommendations: &[Recommendation]) -> String {
    let mut out = format!(
        "<div class=\"panel\">\n<h2>Recommendations ({})</h2>\n",
        recommendations.len()
    );
    for rec in recommendations {
        let priority = rec.priority.as_str();
        let _ = write!(
            out,
            "<div class=\"item priority-{}\">\n<h3>{}</h3>\n<p><strong>Priority:</strong> {}</p>\n<p><strong>Reason:</strong> {}</p>\n<p><strong>Expected Impact:</strong> {}</p>\n</div>\n",
            priority,
            escape_html(&rec.action),
            priority.to_uppercase(),
            escape_html(&rec.reason),
            escape_html(&rec.expected_impact)
        );
    }
    out.push_str("</div>\n");
    out
}

fn category_section<'a>(
    categories: impl Iterator<Item = (&'a TermCategory, &'a CategoryStats)>,
) -> String {
    let mut out = String::from("<div class=\"panel\">\n<h2>Results by Category</h2>\n");
    for (category, stats) in categories {
        let _ = write!(
            out,
            "<div style=\"margin-bottom: 2rem;\">\n<h3>{}</h3>\n<div class=\"category-stats\">\n",
            category.label()
        );
        for (value, label) in [
            (stats.total_terms.to_string(), "Total Terms"),
            (stats.terms_with_results.to_string(), "With Results"),
            (format!("{}%", stats.success_rate), "Success Rate"),
            (format!("{}%", stats.avg_score), "Avg Score"),
            (stats.avg_results.to_string(), "Avg Results"),
        ] {
            let _ = writeln!(
                out,
                "<div class=\"stat-item\"><div class=\"stat-value\">{}</div><div>{}</div></div>",
                value, label
            );
        }
        out.push_str("</div>\n</div>\n");
    }
    out.push_str("</div>\n");
    out
}

fn detailed_results(terms: &[ReportedTerm]) -> String {
    // categories in first-seen order
    let mut categories: Vec<TermCategory> = Vec::new();
    for term in terms {
        if !categories.contains(&term.category) {
            categories.push(term.category);
        }
    }

    let mut out = String::from("<div class=\"panel\">\n<h2>Detailed Results</h2>\n<div class=\"tabs\">\n");
    for category in &categories {
        let _ = writeln!(
            out,
            "<button class=\"tab\" id=\"{0}-tab\" onclick=\"showTab('{0}')\">{1}</button>",
            category.as_str(),
            category.label()
        );
    }
    out.push_str("</div>\n");

    for category in &categories {
        let _ = writeln!(
            out,
            "<div id=\"{}-content\" class=\"tab-content\">",
            category.as_str()
        );
        for term in terms.iter().filter(|t| t.category == *category) {
            out.push_str(&term_block(term));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n");
    out
}

fn term_block(term: &ReportedTerm) -> String {
    let mut out = format!(
        "<div class=\"search-result\">\n<div><span class=\"term\">\"{}\"</span><span class=\"category\">{}</span></div>\n",
        escape_html(&term.term),
        term.category.as_str()
    );
    let _ = writeln!(
        out,
        "<div class=\"result-stats\"><span>Total Results: {}</span><span>Relevant Results: {}</span><span>Execution Time: {:.2}ms</span></div>",
        term.total_results, term.relevant_results, term.execution_time_ms
    );

    if let Some(error) = &term.error {
        let _ = writeln!(
            out,
            "<div class=\"error\"><strong>Error:</strong> {}</div>",
            escape_html(error)
        );
    }

    if !term.results.is_empty() {
        for result in &term.results {
            out.push_str(&result_block(result));
        }
    } else if term.error.is_none() {
        out.push_str("<div class=\"no-results\">No results found</div>\n");
    }

    out.push_str("</div>\n");
    out
}

fn result_block(result: &ReportedResult) -> String {
    let mut location = result.kind.clone().unwrap_or_default();
    if let Some(section) = &result.section_type {
        let _ = write!(location, " / {}", section);
    }
    if let Some(url) = &result.url {
        let _ = write!(location, " - {}", url);
    }

    let mut out = format!(
        "<div class=\"result-item\"><strong>{}</strong> ({}% relevance)<br><small>{}</small>\n",
        escape_html(&result.title),
        result.score,
        escape_html(&location)
    );
    if !result.matches.is_empty() {
        let matches: Vec<String> = result
            .matches
            .iter()
            .map(|m| format!("{}: \"{}\"", escape_html(&m.field), escape_html(&m.matched_text)))
            .collect();
        let _ = writeln!(
            out,
            "<div class=\"matches\"><strong>Matches:</strong> {}</div>",
            matches.join(" | ")
        );
    }
    out.push_str("</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;
    use crate::config::TesterConfig;
    use crate::harness::{TermRecord, TestRun};

    fn report(term: &str, category: TermCategory) -> TestReport {
        let records = vec![TermRecord {
            term: term.to_string(),
            category,
            results: Vec::new(),
            total_results: 0,
            relevant_results: 0,
            execution_time_ms: 1.0,
            error: None,
        }];
        let analysis = analyze(&records);
        let run = TestRun {
            records,
            analysis,
            categories: vec![category],
            index_size: 0,
        };
        TestReport::new(&run, &TesterConfig::default())
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_terms_are_escaped() {
        let html = render_html(&report("<script>alert(1)</script>", TermCategory::EdgeCases));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_page_sections() {
        let html = render_html(&report("home", TermCategory::ValidTerms));
        assert!(html.contains("Quality Score:"));
        assert!(html.contains("Results by Category"));
        assert!(html.contains("<h3>Valid terms</h3>"));
        assert!(html.contains("id=\"validTerms-content\""));
        assert!(html.contains("No results found"));
        // a valid term without results is a false negative
        assert!(html.contains("Issues Found (2)"));
    }
}
