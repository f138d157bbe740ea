use crate::aggregate::PeriodAggregator;
use crate::best::BestPerformerSelector;
use crate::config::Config;
use crate::metrics::build_metrics;
use crate::model::{DateRange, RepositoryReport, SCHEMA_VERSION};
use crate::parser::{HeaderLayout, LogStreamParser};
use crate::period::{Granularity, PeriodKeyer};
use crate::rank::rank_windows;
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisOptions {
    pub range: DateRange,
    pub granularity: Granularity,
    pub layout: HeaderLayout,
    pub selector: BestPerformerSelector,
}

impl AnalysisOptions {
    pub fn from_config(config: &Config, range: DateRange) -> Self {
        Self {
            range,
            granularity: config.granularity,
            layout: config.header_layout,
            selector: BestPerformerSelector::new(config.top_n, config.selection_policy)
                .with_top_periods(config.top_periods),
        }
    }
}

/// Runs parse, aggregate, metrics, ranking and selection over one
/// repository's log text.
pub fn analyze_log(repository: &str, text: &str, options: &AnalysisOptions) -> RepositoryReport {
    run(repository, text, &options.granularity, options.granularity.as_str(), options)
}

/// Same as [`analyze_log`] with a caller-supplied period bucketing.
/// `options.granularity` is ignored.
pub fn analyze_log_with_keyer<K: PeriodKeyer + ?Sized>(
    repository: &str,
    text: &str,
    keyer: &K,
    options: &AnalysisOptions,
) -> RepositoryReport {
    run(repository, text, keyer, "custom", options)
}

fn run<K: PeriodKeyer + ?Sized>(
    repository: &str,
    text: &str,
    keyer: &K,
    granularity: &str,
    options: &AnalysisOptions,
) -> RepositoryReport {
    let mut parser = LogStreamParser::new(text, keyer, options.layout);
    let aggregator: PeriodAggregator = parser.by_ref().collect();
    let parse_stats = parser.into_stats();
    debug!(repository, ?parse_stats, "log parsed");

    let periods = aggregator.periods();
    let authors = build_metrics(&aggregator);
    let rankings = rank_windows(&authors, &periods);
    let best_performers = options.selector.select(&authors);

    info!(
        repository,
        commits = parse_stats.commits,
        authors = authors.len(),
        periods = periods.len(),
        "analysis complete"
    );

    RepositoryReport {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repository.to_string(),
        range: options.range,
        granularity: granularity.to_string(),
        periods,
        parse_stats,
        authors,
        rankings,
        best_performers,
    }
}
