//! Pretty terminal output
//!
//! Uses colored for terminal colors. Search hits show the matched field
//! text with the matched ranges highlighted.

use anyhow::Result;
use colored::*;

use crate::analyzer::{Priority, QualityAnalysis, Severity};
use crate::document::{display_title, str_field};
use crate::harness::{TermCategory, TestTerms};
use crate::index::RankedResult;
use crate::scorer::FieldMatch;

/// Handles formatting and printing search results and quality summaries
pub struct ResultPrinter {
    verbose: bool,
}

impl ResultPrinter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print ranked search results
    pub fn print_results(&self, results: &[RankedResult]) {
        if results.is_empty() {
            println!("\n{}", "No results found.".yellow());
            return;
        }

        println!(
            "\n{} {}",
            "Found".green().bold(),
            format!("{} results:", results.len()).green()
        );
        println!();

        for (i, result) in results.iter().enumerate() {
            self.print_result(i + 1, result);
        }
    }

    /// Print results as JSON (for tool integration)
    pub fn print_json(&self, results: &[RankedResult]) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(results)?);
        Ok(())
    }

    fn print_result(&self, index: usize, result: &RankedResult) {
        println!(
            "{} {} {} {}",
            format!("[{}]", index).cyan().bold(),
            display_title(&result.item).blue().bold(),
            "·".dimmed(),
            format!("{}% relevance", result.relevance_percent).dimmed()
        );

        let mut location = Vec::new();
        if let Some(kind) = str_field(&result.item, "type") {
            location.push(kind.magenta().to_string());
        }
        if let Some(section) = str_field(&result.item, "sectionType") {
            location.push(section.magenta().to_string());
        }
        if let Some(url) = str_field(&result.item, "url") {
            location.push(url.underline().to_string());
        }
        if !location.is_empty() {
            println!("    {}", location.join(" / "));
        }

        let shown = if self.verbose {
            result.matches.len()
        } else {
            result.matches.len().min(2)
        };
        for m in &result.matches[..shown] {
            println!("    {} {}", format!("{}:", m.field).dimmed(), highlight(m));
        }
        if shown < result.matches.len() {
            println!(
                "    {}",
                format!("(+{} more fields)", result.matches.len() - shown).dimmed()
            );
        }

        if self.verbose {
            println!(
                "    {}",
                format!("score: {:.4} · ref: {}", result.score, result.ref_index).dimmed()
            );
        }
        println!();
    }

    /// Print the outcome of a harness run
    pub fn print_analysis(&self, analysis: &QualityAnalysis) {
        let summary = &analysis.summary;
        let grade = analysis.grade();
        let badge = format!(
            " Quality Score: {}/100 (Grade {}) ",
            analysis.quality_score, grade
        );
        let badge = match grade {
            'A' | 'B' => badge.black().on_green(),
            'C' | 'D' => badge.black().on_yellow(),
            _ => badge.white().on_red(),
        };

        println!("\n{}", "📊 Search Quality Summary".bold());
        println!("   {}", badge.bold());
        println!("   Terms tested: {}", summary.total_terms);
        println!("   With results: {}", summary.terms_with_results);
        println!("   With errors:  {}", summary.terms_with_errors);
        println!("   Avg time:     {:.2}ms", summary.avg_execution_time_ms);

        println!("\n{}", "By category".bold());
        for (category, stats) in &analysis.by_category {
            println!(
                "   {:<14} {:>4} terms · {:>3}% success · avg {} results · avg score {}%",
                category.label(),
                stats.total_terms,
                stats.success_rate,
                stats.avg_results,
                stats.avg_score
            );
        }

        if !analysis.issues.is_empty() {
            println!("\n{}", format!("⚠️  Issues ({})", analysis.issues.len()).bold());
            for issue in &analysis.issues {
                println!(
                    "   {} {}",
                    severity_tag(issue.severity),
                    issue.description
                );
                if self.verbose && !issue.terms.is_empty() {
                    let shown: Vec<&str> = issue.terms.iter().take(10).map(String::as_str).collect();
                    println!("      {}", shown.join(", ").dimmed());
                }
            }
        }

        if !analysis.recommendations.is_empty() {
            println!(
                "\n{}",
                format!("💡 Recommendations ({})", analysis.recommendations.len()).bold()
            );
            for rec in &analysis.recommendations {
                println!("   {} {}", priority_tag(rec.priority), rec.action);
                println!("      {}", rec.reason.dimmed());
            }
        }
        println!();
    }

    /// Print term lists, at most `count` per category
    pub fn print_terms(&self, terms: &TestTerms, categories: &[TermCategory], count: usize) {
        for category in categories {
            let list = terms.get(*category);
            println!(
                "\n{} {}",
                category.label().bold(),
                format!("({} total)", list.len()).dimmed()
            );
            for term in list.iter().take(count) {
                println!("   {:?}", term);
            }
            if list.len() > count {
                println!("   {}", format!("... and {} more", list.len() - count).dimmed());
            }
        }
        println!();
    }
}

fn severity_tag(severity: Severity) -> ColoredString {
    let tag = format!("[{}]", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical | Severity::High => tag.red().bold(),
        Severity::Medium => tag.yellow().bold(),
        Severity::Low => tag.blue(),
    }
}

fn priority_tag(priority: Priority) -> ColoredString {
    let tag = format!("[{}]", priority.as_str().to_uppercase());
    match priority {
        Priority::Critical => tag.red().bold(),
        Priority::High => tag.yellow().bold(),
        Priority::Medium | Priority::Low => tag.blue(),
    }
}

/// Field text with matched ranges emphasised
fn highlight(m: &FieldMatch) -> String {
    let chars: Vec<char> = m.value.chars().collect();
    let mut out = String::new();
    let mut pos = 0;

    for &(start, end) in &m.indices {
        if start < pos || end >= chars.len() {
            continue;
        }
        out.extend(&chars[pos..start]);
        let matched: String = chars[start..=end].iter().collect();
        out.push_str(&matched.yellow().bold().to_string());
        pos = end + 1;
    }
    out.extend(&chars[pos..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_keeps_text() {
        colored::control::set_override(false);
        let m = FieldMatch {
            field: "title".to_string(),
            value: "Home Page".to_string(),
            indices: vec![(0, 3), (5, 8)],
        };
        assert_eq!(highlight(&m), "Home Page");
    }

    #[test]
    fn test_highlight_skips_bad_ranges() {
        colored::control::set_override(false);
        let m = FieldMatch {
            field: "title".to_string(),
            value: "abc".to_string(),
            indices: vec![(1, 9)],
        };
        assert_eq!(highlight(&m), "abc");
    }
}
