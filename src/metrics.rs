//! Derived scores for aggregated buckets.
//!
//! All functions here are pure: the same buckets always produce the same
//! metrics, so they can be recomputed freely.

use crate::aggregate::{AuthorHistory, CommitActivity, PeriodAggregator};
use crate::model::{AuthorMetrics, AuthorPeriodStats, Cadence, PeriodMetrics};

pub const NEUTRAL_IMPACT: f64 = 50.0;

/// Net-to-total change ratio mapped onto `[0, 100]`; 50 when nothing changed.
pub fn impact_score(additions: u64, deletions: u64) -> f64 {
    let total = additions.saturating_add(deletions);
    if total == 0 {
        return NEUTRAL_IMPACT;
    }
    let ratio = (additions as f64 - deletions as f64) / total as f64;
    ((ratio + 1.0) * 50.0).clamp(0.0, 100.0)
}

/// Average lines changed per commit.
pub fn productivity(additions: u64, deletions: u64, commits: u64) -> f64 {
    if commits == 0 {
        return 0.0;
    }
    additions.saturating_add(deletions) as f64 / commits as f64
}

pub fn period_metrics(bucket: &AuthorPeriodStats) -> PeriodMetrics {
    PeriodMetrics {
        commits: bucket.commit_count,
        additions: bucket.total_additions,
        deletions: bucket.total_deletions,
        impact_score: impact_score(bucket.total_additions, bucket.total_deletions),
        productivity: productivity(bucket.total_additions, bucket.total_deletions, bucket.commit_count),
        most_impactful_commit: bucket.most_impactful_commit.clone(),
    }
}

pub fn author_metrics(history: &AuthorHistory) -> AuthorMetrics {
    let mut total_commits = 0u64;
    let mut total_additions = 0u64;
    let mut total_deletions = 0u64;

    let per_period = history
        .periods
        .iter()
        .map(|(key, bucket)| {
            total_commits += bucket.commit_count;
            total_additions = total_additions.saturating_add(bucket.total_additions);
            total_deletions = total_deletions.saturating_add(bucket.total_deletions);
            (key.clone(), period_metrics(bucket))
        })
        .collect();

    AuthorMetrics {
        author: history.author.clone(),
        total_commits,
        total_additions,
        total_deletions,
        merge_commits: history.activity.iter().filter(|a| a.is_merge).count() as u64,
        per_period,
        overall_impact_score: impact_score(total_additions, total_deletions),
        overall_productivity: productivity(total_additions, total_deletions, total_commits),
        cadence: cadence(&history.activity),
    }
}

/// Metrics for every author, in first-seen order.
pub fn build_metrics(aggregator: &PeriodAggregator) -> Vec<AuthorMetrics> {
    aggregator.histories().iter().map(author_metrics).collect()
}

/// Day gaps between consecutive non-merge commits. Merges still count in
/// every total but never act as the baseline for the next gap.
pub fn cadence(activity: &[CommitActivity]) -> Option<Cadence> {
    let mut dates: Vec<_> = activity.iter().filter(|a| !a.is_merge).map(|a| a.date).collect();
    if dates.len() < 2 {
        return None;
    }
    dates.sort();

    let gaps: Vec<i64> = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
    let longest_gap_days = gaps.iter().copied().max().unwrap_or(0);
    let mean_gap_days = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;

    Some(Cadence {
        intervals: gaps.len(),
        mean_gap_days,
        longest_gap_days,
    })
}
