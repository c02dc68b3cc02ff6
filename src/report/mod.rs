//! Persisted artifacts of a harness run
//!
//! The JSON report carries the condensed per-term records, the analysis,
//! the effective configuration and a timestamp. The HTML report renders the
//! same data for humans.

mod html;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::QualityAnalysis;
use crate::config::TesterConfig;
use crate::document::{display_title, str_field};
use crate::harness::{TermCategory, TermRecord, TestRun};
use crate::index::RankedResult;
use crate::matcher::slice_chars;

pub use html::{escape_html, render_html};

/// Matched text of one field, ranges joined with ", "
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedMatch {
    pub field: String,
    pub matched_text: String,
}

/// A ranked result reduced to what a reader of the report needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedResult {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    /// Relevance percent
    pub score: u32,
    pub matches: Vec<ReportedMatch>,
}

impl From<&RankedResult> for ReportedResult {
    fn from(result: &RankedResult) -> Self {
        let owned = |name: &str| str_field(&result.item, name).map(str::to_string);
        Self {
            title: display_title(&result.item).to_string(),
            url: owned("url"),
            kind: owned("type"),
            section_type: owned("sectionType"),
            score: result.relevance_percent,
            matches: result
                .matches
                .iter()
                .map(|m| ReportedMatch {
                    field: m.field.clone(),
                    matched_text: m
                        .indices
                        .iter()
                        .map(|&range| slice_chars(&m.value, range))
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedTerm {
    pub term: String,
    pub category: TermCategory,
    pub results: Vec<ReportedResult>,
    pub total_results: usize,
    pub relevant_results: usize,
    pub execution_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&TermRecord> for ReportedTerm {
    fn from(record: &TermRecord) -> Self {
        Self {
            term: record.term.clone(),
            category: record.category,
            results: record.results.iter().map(ReportedResult::from).collect(),
            total_results: record.total_results,
            relevant_results: record.relevant_results,
            execution_time_ms: record.execution_time_ms,
            error: record.error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub total_terms: usize,
    pub categories: Vec<TermCategory>,
    pub index_size: usize,
}

/// The JSON results artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    pub results: Vec<ReportedTerm>,
    pub analysis: QualityAnalysis,
    pub config: TesterConfig,
    pub timestamp: DateTime<Utc>,
    pub metadata: ReportMetadata,
}

impl TestReport {
    pub fn new(run: &TestRun, config: &TesterConfig) -> Self {
        Self {
            results: run.records.iter().map(ReportedTerm::from).collect(),
            analysis: run.analysis.clone(),
            config: config.clone(),
            timestamp: Utc::now(),
            metadata: ReportMetadata {
                total_terms: run.records.len(),
                categories: run.categories.clone(),
                index_size: run.index_size,
            },
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report {}", path.display()))
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        write_file(path, &content)
    }

    pub fn write_html(&self, path: &Path) -> Result<()> {
        write_file(path, &render_html(self))
    }

    /// Write whichever artifacts the config names; returns the paths written
    pub fn write_artifacts(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        if let Some(path) = &self.config.output_file {
            self.write_json(path)?;
            written.push(path.clone());
        }
        if let Some(path) = &self.config.html_report {
            self.write_html(path)?;
            written.push(path.clone());
        }
        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}
