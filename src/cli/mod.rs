//! CLI definitions using clap derive macros
//!
//! Subcommands:
//! - test: Run the quality harness against a search index file
//! - search: Query a search index file directly
//! - config init: Write a starter harness config
//! - terms: Show the built-in test terms

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::SearchProfile;

/// Searchprobe - fuzzy search over static-site indexes, with quality testing
#[derive(Parser, Debug)]
#[command(name = "searchprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run search quality tests against a search index file
    Test {
        /// Path to the search index JSON
        #[arg(value_name = "INDEX")]
        index: PathBuf,

        /// Config file; its keys override the flags below
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// JSON results file
        #[arg(short, long, default_value = "./search-test-results.json")]
        output: PathBuf,

        /// HTML report file
        #[arg(short, long, default_value = "./search-test-report.html")]
        report: PathBuf,

        /// Relevance threshold (0-100)
        #[arg(short, long, default_value = "70")]
        threshold: f64,

        /// Maximum results per search
        #[arg(short, long, default_value = "20")]
        max_results: usize,

        /// Print per-issue terms and debug logging
        #[arg(short, long, default_value = "false")]
        verbose: bool,

        /// Skip the HTML report
        #[arg(long, default_value = "false")]
        no_html: bool,

        /// Comma-separated categories to run
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "validTerms,invalidTerms,edgeCases"
        )]
        categories: Vec<String>,

        /// Custom terms file ({ "validTerms": [...], ... }) instead of the built-in set
        #[arg(long, value_name = "FILE")]
        terms: Option<PathBuf>,
    },

    /// Search an index file and print ranked results
    Search {
        /// Path to the search index JSON
        #[arg(value_name = "INDEX")]
        index: PathBuf,

        /// Search query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Field weighting and cutoffs to use
        #[arg(short, long, value_enum, default_value = "site")]
        profile: ProfileArg,

        /// Override the relevance threshold (0-100)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Only results whose `type` equals this
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,

        /// Only results whose `sectionType` equals this
        #[arg(long, value_name = "SECTION_TYPE")]
        section_type: Option<String>,

        /// Show every matched field and raw scores
        #[arg(short, long, default_value = "false")]
        verbose: bool,

        /// Output results as JSON (for tool integration)
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Manage harness configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the built-in test terms
    Terms {
        /// Only this category (validTerms, invalidTerms, edgeCases)
        #[arg(short, long)]
        category: Option<String>,

        /// Terms to show per category
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a starter config file
    Init {
        /// Where to write it
        #[arg(short, long, default_value = "./search-test.config.json")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileArg {
    Site,
    Library,
    Tester,
}

impl From<ProfileArg> for SearchProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Site => SearchProfile::Site,
            ProfileArg::Library => SearchProfile::Library,
            ProfileArg::Tester => SearchProfile::Tester,
        }
    }
}
