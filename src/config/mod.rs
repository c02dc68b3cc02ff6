//! Search and harness configuration
//!
//! Two layers of options:
//! - `MatchOptions` tune the fuzzy matcher (what counts as a plausible match)
//! - `SearchOptions` add the query-level policy on top (minimum query length,
//!   relevance cutoff, result cap)
//!
//! `TesterConfig` is the JSON shape accepted by the test harness.

mod profiles;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SearchError;

pub use profiles::SearchProfile;

/// A named, weighted document attribute participating in search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub weight: f64,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Options for the approximate string matcher, fixed for an index's lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchOptions {
    /// Admissibility cutoff in 0..=1 (lower = stricter)
    pub threshold: f64,
    /// Minimum query length and minimum reported match range, in characters
    pub min_match_char_length: usize,
    /// Extra characters past the query length the fuzzy fallback may look at
    pub distance: usize,
    /// Compare against the whole text instead of the leading window
    pub ignore_location: bool,
    pub is_case_sensitive: bool,
    /// Keep only documents with a literal occurrence of the query
    pub require_substring: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            min_match_char_length: 4,
            distance: 50,
            ignore_location: false,
            is_case_sensitive: false,
            require_substring: false,
        }
    }
}

impl MatchOptions {
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SearchError::InvalidConfig(format!(
                "threshold must be within 0..=1, got {}",
                self.threshold
            )));
        }
        if self.min_match_char_length == 0 {
            return Err(SearchError::InvalidConfig(
                "minMatchCharLength must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Validate a field spec list: non-empty, unique names, positive finite weights
pub fn validate_fields(fields: &[FieldSpec]) -> Result<(), SearchError> {
    if fields.is_empty() {
        return Err(SearchError::InvalidConfig(
            "at least one searchable field is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for field in fields {
        if field.name.trim().is_empty() {
            return Err(SearchError::InvalidConfig(
                "field names must not be empty".to_string(),
            ));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(SearchError::InvalidConfig(format!(
                "duplicate field '{}'",
                field.name
            )));
        }
        if !field.weight.is_finite() || field.weight <= 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "field '{}' has non-positive weight {}",
                field.name, field.weight
            )));
        }
    }
    Ok(())
}

/// Query-level policy layered over the matcher
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub matching: MatchOptions,
    /// Trimmed queries shorter than this return no results
    pub min_characters: usize,
    /// Percent cutoff applied to `(1 - score) * 100`
    pub relevance_threshold: f64,
    pub max_results: usize,
    pub max_query_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            matching: MatchOptions::default(),
            min_characters: 2,
            relevance_threshold: 70.0,
            max_results: 20,
            max_query_length: 256,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<(), SearchError> {
        self.matching.validate()?;
        if !(0.0..=100.0).contains(&self.relevance_threshold) {
            return Err(SearchError::InvalidConfig(format!(
                "relevanceThreshold must be within 0..=100, got {}",
                self.relevance_threshold
            )));
        }
        if self.max_query_length == 0 {
            return Err(SearchError::InvalidConfig(
                "maxQueryLength must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `fuseOptions` block of the harness config: keys plus matcher options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuseOptions {
    #[serde(default = "default_keys")]
    pub keys: Vec<FieldSpec>,
    #[serde(flatten)]
    pub matching: MatchOptions,
}

impl Default for FuseOptions {
    fn default() -> Self {
        Self {
            keys: default_keys(),
            matching: MatchOptions::default(),
        }
    }
}

fn default_keys() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("pageName", 10.0),
        FieldSpec::new("title", 8.0),
        FieldSpec::new("leadIn", 5.0),
        FieldSpec::new("prose", 3.0),
        FieldSpec::new("content", 1.0),
        FieldSpec::new("tags", 6.0),
    ]
}

/// Configuration accepted by the test harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TesterConfig {
    pub relevance_threshold: f64,
    pub max_results: usize,
    pub min_characters: usize,
    pub max_query_length: usize,
    pub output_file: Option<PathBuf>,
    pub html_report: Option<PathBuf>,
    pub fuse_options: FuseOptions,
}

impl Default for TesterConfig {
    fn default() -> Self {
        let search = SearchOptions::default();
        Self {
            relevance_threshold: search.relevance_threshold,
            max_results: search.max_results,
            min_characters: search.min_characters,
            max_query_length: search.max_query_length,
            output_file: Some(PathBuf::from("./search-test-results.json")),
            html_report: Some(PathBuf::from("./search-test-report.html")),
            fuse_options: FuseOptions::default(),
        }
    }
}

impl TesterConfig {
    /// Load a config file on its own, defaults filling any gaps
    pub fn load(path: &Path) -> Result<Self> {
        Self::default().merged_with_file(path)
    }

    /// Overlay a JSON config file on top of `self`
    ///
    /// Top-level keys in the file replace the corresponding keys of `self`
    /// wholesale; a `fuseOptions` object in the file replaces the entire block.
    pub fn merged_with_file(self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let overlay: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        self.merged_with(overlay)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn merged_with(self, overlay: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(overlay) = overlay else {
            anyhow::bail!("config must be a JSON object");
        };

        let mut base = serde_json::to_value(&self)?;
        if let serde_json::Value::Object(map) = &mut base {
            for (key, value) in overlay {
                map.insert(key, value);
            }
        }
        Ok(serde_json::from_value(base)?)
    }

    /// Query policy derived from this config
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            matching: self.fuse_options.matching.clone(),
            min_characters: self.min_characters,
            relevance_threshold: self.relevance_threshold,
            max_results: self.max_results,
            max_query_length: self.max_query_length,
        }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fuse_options.keys
    }

    /// Starter config written by `config init`
    pub fn template() -> Self {
        Self {
            fuse_options: FuseOptions {
                keys: vec![
                    FieldSpec::new("title", 10.0),
                    FieldSpec::new("content", 5.0),
                    FieldSpec::new("tags", 8.0),
                ],
                matching: MatchOptions::default(),
            },
            ..Self::default()
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_harness_contract() {
        let config = TesterConfig::default();
        assert_eq!(config.relevance_threshold, 70.0);
        assert_eq!(config.max_results, 20);
        assert_eq!(config.min_characters, 2);
        assert_eq!(config.fuse_options.matching.threshold, 0.2);
        assert_eq!(config.fuse_options.matching.min_match_char_length, 4);
        assert_eq!(config.fields().len(), 6);
    }

    #[test]
    fn test_parse_camel_case_config() {
        let raw = json!({
            "relevanceThreshold": 60,
            "maxResults": 5,
            "minCharacters": 3,
            "fuseOptions": {
                "keys": [{ "name": "title", "weight": 10 }],
                "threshold": 0.4,
                "minMatchCharLength": 2,
                "distance": 100,
                "ignoreLocation": true,
                "includeScore": true
            }
        });

        let config: TesterConfig = serde_json::from_value(raw).unwrap();
        assert_eq!(config.relevance_threshold, 60.0);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.fields(), &[FieldSpec::new("title", 10.0)]);
        assert!(config.fuse_options.matching.ignore_location);
        assert!(!config.fuse_options.matching.is_case_sensitive);
        assert_eq!(config.search_options().matching.threshold, 0.4);
    }

    #[test]
    fn test_overlay_keeps_unspecified_base_values() {
        let base = TesterConfig {
            relevance_threshold: 55.0,
            max_results: 7,
            ..TesterConfig::default()
        };

        let merged = base.merged_with(json!({ "maxResults": 3 })).unwrap();
        assert_eq!(merged.relevance_threshold, 55.0);
        assert_eq!(merged.max_results, 3);
    }

    #[test]
    fn test_overlay_rejects_non_object() {
        assert!(TesterConfig::default().merged_with(json!([1, 2])).is_err());
    }

    #[test]
    fn test_validate_fields() {
        assert!(validate_fields(&[FieldSpec::new("title", 1.0)]).is_ok());
        assert!(validate_fields(&[]).is_err());
        assert!(validate_fields(&[FieldSpec::new("title", 0.0)]).is_err());
        assert!(validate_fields(&[FieldSpec::new("title", f64::NAN)]).is_err());
        assert!(validate_fields(&[
            FieldSpec::new("title", 1.0),
            FieldSpec::new("title", 2.0)
        ])
        .is_err());
    }

    #[test]
    fn test_validate_options() {
        let mut options = SearchOptions::default();
        assert!(options.validate().is_ok());

        options.matching.threshold = 1.5;
        assert!(options.validate().is_err());

        options.matching.threshold = 0.3;
        options.matching.min_match_char_length = 0;
        assert!(options.validate().is_err());

        options.matching.min_match_char_length = 1;
        options.relevance_threshold = 120.0;
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_template_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search-test.config.json");

        TesterConfig::template().save(&path).unwrap();
        let loaded = TesterConfig::load(&path).unwrap();
        assert_eq!(loaded, TesterConfig::template());
    }
}
