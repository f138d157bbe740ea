pub mod batch;
pub mod best;
pub mod rank;
pub mod report;

use crate::analysis::{analyze_log, AnalysisOptions};
use crate::cli::CommonArgs;
use crate::config::Config;
use crate::git::{resolve_range, GitRepo, LogSource, RangeRequest};
use crate::model::RepositoryReport;
use crate::parser::HeaderLayout;
use anyhow::Context;
use chrono::Local;

/// Config file values with command-line overrides applied.
pub struct Settings {
    pub config: Config,
    pub options: AnalysisOptions,
}

pub fn resolve_settings(common: &CommonArgs) -> anyhow::Result<Settings> {
    let mut config =
        Config::load_or_default(common.config.as_deref()).context("Failed to load config")?;
    if let Some(granularity) = common.granularity {
        config.granularity = granularity;
    }
    if common.with_parents {
        config.header_layout = HeaderLayout::WithParents;
    }

    let request = RangeRequest {
        since: common.since.clone(),
        until: common.until.clone(),
        months_back: common.months_back,
        current_month: common.current_month,
    };
    let range = resolve_range(&request, config.months_back, Local::now().date_naive())
        .context("Failed to resolve date range")?;

    let options = AnalysisOptions::from_config(&config, range);
    Ok(Settings { config, options })
}

pub fn analyze_single(common: &CommonArgs, options: &AnalysisOptions) -> anyhow::Result<RepositoryReport> {
    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let text = repo
        .read_log(&options.range, options.layout)
        .context("Failed to read git log")?;
    Ok(analyze_log(&repo.name(), &text, options))
}
