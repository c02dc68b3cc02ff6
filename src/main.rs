//! Searchprobe - fuzzy search over static-site indexes, with quality testing
//!
//! `test` grades an index with curated terms and writes JSON/HTML reports,
//! `search` queries an index directly.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use searchprobe::cli::{Cli, Commands, ConfigAction};
use searchprobe::index::filter_by_field;
use searchprobe::output::ResultPrinter;
use searchprobe::{
    Corpus, SearchIndex, SearchProfile, SearchTester, TermCategory, TestReport, TestTerms,
    TesterConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(
        cli.command,
        Commands::Test { verbose: true, .. } | Commands::Search { verbose: true, .. }
    );
    let default_filter = if verbose { "debug" } else { "info" };

    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Test {
            index,
            config,
            output,
            report,
            threshold,
            max_results,
            verbose,
            no_html,
            categories,
            terms,
        } => {
            let categories = parse_categories(&categories)?;

            // flags first, config file keys win
            let mut tester_config = TesterConfig {
                relevance_threshold: threshold,
                max_results,
                output_file: Some(output),
                html_report: (!no_html).then_some(report),
                ..TesterConfig::default()
            };
            if let Some(path) = &config {
                tester_config = tester_config.merged_with_file(path)?;
            }

            let terms = match &terms {
                Some(path) => TestTerms::load(path)?,
                None => TestTerms::builtin(),
            };

            let blocking = run_tests(&index, tester_config, &terms, &categories, verbose).await?;
            if blocking {
                std::process::exit(1);
            }
        }
        Commands::Search {
            index,
            query,
            profile,
            threshold,
            limit,
            kind,
            section_type,
            verbose,
            json,
        } => {
            tracing::info!("Searching {:?} for: {}", index, query);

            let profile = SearchProfile::from(profile);
            let mut options = profile.options();
            if let Some(threshold) = threshold {
                options.relevance_threshold = threshold;
            }
            let limit = limit.unwrap_or(options.max_results);
            let filtered = kind.is_some() || section_type.is_some();
            if filtered {
                // filter the full ranking, then cut
                options.max_results = usize::MAX;
            } else {
                options.max_results = limit;
            }

            let corpus = Corpus::load(&index).await?;
            let search_index = SearchIndex::from_corpus(corpus, profile.fields(), options)?;
            if search_index.is_empty() {
                tracing::warn!("Nothing to search in {:?}", index);
            }
            let mut results = search_index.search(&query)?;
            if let Some(kind) = &kind {
                results = filter_by_field(results, "type", kind);
            }
            if let Some(section_type) = &section_type {
                results = filter_by_field(results, "sectionType", section_type);
            }
            results.truncate(limit);

            let printer = ResultPrinter::new(verbose);
            if json {
                printer.print_json(&results)?;
            } else {
                printer.print_results(&results);
            }
        }
        Commands::Config {
            action: ConfigAction::Init { output },
        } => {
            TesterConfig::template().save(&output)?;
            println!("\n✨ Config written to {}", output.display());
            println!("   Run: searchprobe test <index> --config {}", output.display());
        }
        Commands::Terms { category, count } => {
            let categories = match &category {
                Some(name) => vec![name.parse::<TermCategory>().map_err(anyhow::Error::msg)?],
                None => TermCategory::ALL.to_vec(),
            };
            ResultPrinter::new(false).print_terms(&TestTerms::builtin(), &categories, count);
        }
    }

    Ok(())
}

/// Run the harness and write reports; true when high or critical issues were found
async fn run_tests(
    index: &Path,
    config: TesterConfig,
    terms: &TestTerms,
    categories: &[TermCategory],
    verbose: bool,
) -> Result<bool> {
    let mut tester = SearchTester::new(config);
    let size = tester
        .load_corpus(index)
        .await
        .with_context(|| format!("Cannot test {}", index.display()))?;
    println!("\n🔍 Testing search index {} ({} entries)", index.display(), size);

    let run = tester.run_with_progress(terms, categories, |done, total| {
        if !verbose && (done % 25 == 0 || done == total) {
            eprint!("\r   Progress: {}/{}", done, total);
            let _ = std::io::stderr().flush();
            if done == total {
                eprintln!();
            }
        }
    })?;

    let report = TestReport::new(&run, tester.config());
    let written: Vec<PathBuf> = report.write_artifacts()?;

    let printer = ResultPrinter::new(verbose);
    printer.print_analysis(&run.analysis);
    for path in &written {
        println!("   📄 {}", path.display());
    }

    Ok(run.analysis.has_blocking_issues())
}

fn parse_categories(names: &[String]) -> Result<Vec<TermCategory>> {
    let mut categories = Vec::new();
    for name in names.iter().filter(|n| !n.trim().is_empty()) {
        let category: TermCategory = name.parse().map_err(anyhow::Error::msg)?;
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    if categories.is_empty() {
        anyhow::bail!("no test categories selected");
    }
    Ok(categories)
}
