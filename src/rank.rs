use crate::model::{AuthorMetrics, Metric, PeriodSelector, RankEntry, Ranking, RankingWindow};

/// Value of `metric` for `author`, or `None` when the author has no data in
/// the selected period. The overall selector always has a value.
pub fn metric_value(author: &AuthorMetrics, metric: Metric, period: &PeriodSelector) -> Option<f64> {
    match period {
        PeriodSelector::Overall => Some(match metric {
            Metric::Commits => author.total_commits as f64,
            Metric::Additions => author.total_additions as f64,
            Metric::Deletions => author.total_deletions as f64,
            Metric::ImpactScore => author.overall_impact_score,
            Metric::Productivity => author.overall_productivity,
        }),
        PeriodSelector::Period(key) => author.per_period.get(key).map(|p| match metric {
            Metric::Commits => p.commits as f64,
            Metric::Additions => p.additions as f64,
            Metric::Deletions => p.deletions as f64,
            Metric::ImpactScore => p.impact_score,
            Metric::Productivity => p.productivity,
        }),
    }
}

/// Leaderboard for one metric over one period, highest first.
///
/// `authors` must be in first-seen order; the sort is stable, so equal
/// values keep that order.
pub fn rank(authors: &[AuthorMetrics], metric: Metric, period: &PeriodSelector) -> Ranking {
    let mut entries: Vec<RankEntry> = authors
        .iter()
        .filter(|a| match period {
            PeriodSelector::Overall => true,
            PeriodSelector::Period(key) => a.per_period.contains_key(key),
        })
        .map(|a| RankEntry {
            author: a.author.clone(),
            value: metric_value(a, metric, period).unwrap_or(0.0),
        })
        .collect();

    entries.sort_by(|a, b| b.value.total_cmp(&a.value));

    Ranking {
        metric,
        period: period.clone(),
        entries,
    }
}

pub fn rank_all(authors: &[AuthorMetrics], period: &PeriodSelector) -> Vec<Ranking> {
    Metric::ALL.iter().map(|&metric| rank(authors, metric, period)).collect()
}

/// The labelled windows a report ranks: the latest period, the one before
/// it, the period three from the end, and the whole range. Windows that the
/// history is too short for are left out.
pub fn standard_windows(periods: &[String]) -> Vec<(String, PeriodSelector)> {
    let mut windows = Vec::new();
    let n = periods.len();

    if n >= 1 {
        windows.push(("latest".to_string(), PeriodSelector::Period(periods[n - 1].clone())));
    }
    if n >= 2 {
        windows.push(("previous".to_string(), PeriodSelector::Period(periods[n - 2].clone())));
    }
    if n >= 3 {
        windows.push(("quarter".to_string(), PeriodSelector::Period(periods[n - 3].clone())));
    }
    windows.push(("overall".to_string(), PeriodSelector::Overall));
    windows
}

pub fn rank_windows(authors: &[AuthorMetrics], periods: &[String]) -> Vec<RankingWindow> {
    standard_windows(periods)
        .into_iter()
        .map(|(label, period)| RankingWindow {
            rankings: rank_all(authors, &period),
            label,
            period,
        })
        .collect()
}
