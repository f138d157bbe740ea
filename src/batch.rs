use crate::analysis::{analyze_log, AnalysisOptions};
use crate::git::{GitRepo, LogSource};
use crate::model::{BatchReport, RepoFailure, RepositoryReport, SCHEMA_VERSION};
use chrono::Utc;
use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const NO_COMMITS: &str = "no commits in range";

/// Immediate, non-hidden sub-directories of `base`, sorted by name. An
/// unreadable or missing `base` yields no repositories.
pub fn discover_repositories(base: &Path) -> Vec<PathBuf> {
    let mut repos = Vec::new();
    let walker = WalkBuilder::new(base)
        .standard_filters(false)
        .hidden(true)
        .max_depth(Some(1))
        .build();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.depth() == 1 && entry.file_type().is_some_and(|t| t.is_dir()) {
                    repos.push(entry.into_path());
                }
            }
            Err(e) => {
                warn!(base = %base.display(), "cannot enumerate repositories: {e}");
            }
        }
    }

    repos.sort();
    info!(base = %base.display(), count = repos.len(), "repositories discovered");
    repos
}

/// Opens each path as a repository root; anything else becomes a failure.
pub fn open_all(paths: &[PathBuf]) -> (Vec<GitRepo>, Vec<RepoFailure>) {
    let mut repos = Vec::new();
    let mut failures = Vec::new();
    for path in paths {
        match GitRepo::open_root(path) {
            Ok(repo) => repos.push(repo),
            Err(e) => failures.push(RepoFailure {
                repository: path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| path.display().to_string()),
                reason: e.to_string(),
            }),
        }
    }
    (repos, failures)
}

/// Analyses one repository. A failed log command or an empty history is
/// reported as a failure rather than an empty result.
pub fn analyze_repository<S: LogSource + ?Sized>(
    source: &S,
    options: &AnalysisOptions,
) -> Result<RepositoryReport, RepoFailure> {
    let name = source.name();
    let text = source.read_log(&options.range, options.layout).map_err(|e| RepoFailure {
        repository: name.clone(),
        reason: e.to_string(),
    })?;

    let report = analyze_log(&name, &text, options);
    if report.parse_stats.commits == 0 {
        return Err(RepoFailure {
            repository: name,
            reason: NO_COMMITS.to_string(),
        });
    }
    Ok(report)
}

/// Runs every source independently. Authors are never merged across
/// repositories; each keeps its own result set keyed by repository name.
pub fn analyze_batch<S: LogSource>(sources: &[S], options: &AnalysisOptions, progress: bool) -> BatchReport {
    let pb = if progress {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Analysing repositories...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let outcomes: Vec<Result<RepositoryReport, RepoFailure>> = sources
        .par_iter()
        .map(|source| {
            let outcome = analyze_repository(source, options);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    let mut repositories = BTreeMap::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(report) => {
                let key = unique_key(&repositories, &report.repository);
                repositories.insert(key, report);
            }
            Err(failure) => {
                warn!(repository = %failure.repository, reason = %failure.reason, "repository skipped");
                failures.push(failure);
            }
        }
    }

    BatchReport {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        range: options.range,
        repositories,
        failures,
    }
}

fn unique_key(existing: &BTreeMap<String, RepositoryReport>, name: &str) -> String {
    if !existing.contains_key(name) {
        return name.to_string();
    }
    (2..)
        .map(|n| format!("{name}#{n}"))
        .find(|candidate| !existing.contains_key(candidate))
        .unwrap_or_else(|| name.to_string())
}
