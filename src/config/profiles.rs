//! Field weightings for the site's search surfaces
//!
//! Every consumer shares one engine and differs only in which fields it
//! weighs and how strict its cutoffs are.

use super::{FieldSpec, MatchOptions, SearchOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProfile {
    /// Site-wide page and section search
    Site,
    /// Component library search
    Library,
    /// Defaults used by the quality harness
    Tester,
}

impl SearchProfile {
    pub fn fields(&self) -> Vec<FieldSpec> {
        match self {
            SearchProfile::Site => vec![
                FieldSpec::new("title", 10.0),
                FieldSpec::new("pageName", 8.0),
                FieldSpec::new("tags", 7.0),
                FieldSpec::new("leadIn", 5.0),
                FieldSpec::new("prose", 3.0),
                FieldSpec::new("content", 1.0),
            ],
            SearchProfile::Library => vec![
                FieldSpec::new("title", 10.0),
                FieldSpec::new("tags", 8.0),
                FieldSpec::new("description", 6.0),
                FieldSpec::new("category", 4.0),
            ],
            SearchProfile::Tester => super::default_keys(),
        }
    }

    pub fn options(&self) -> SearchOptions {
        let interactive = MatchOptions {
            threshold: 0.3,
            min_match_char_length: 2,
            distance: 100,
            ignore_location: true,
            ..MatchOptions::default()
        };

        match self {
            SearchProfile::Site => SearchOptions {
                matching: interactive,
                relevance_threshold: 30.0,
                max_results: 10,
                ..SearchOptions::default()
            },
            SearchProfile::Library => SearchOptions {
                matching: interactive,
                relevance_threshold: 50.0,
                max_results: 10,
                ..SearchOptions::default()
            },
            SearchProfile::Tester => SearchOptions::default(),
        }
    }
}
