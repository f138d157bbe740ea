use crate::model::{AuthorMetrics, BestPerformer, ImpactfulCommit, PeriodHighlight};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_TOP_PERIODS: usize = 3;

/// Ordering used to pick best performers. Every policy is a stable sort over
/// first-seen author order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Combined score, then commit count.
    #[default]
    CombinedScore,
    /// Commit count, then combined score.
    CommitsFirst,
    /// Additions plus deletions, then combined score.
    ChurnFirst,
}

impl SelectionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::CombinedScore => "combined-score",
            SelectionPolicy::CommitsFirst => "commits-first",
            SelectionPolicy::ChurnFirst => "churn-first",
        }
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        let by_score = b.score.total_cmp(&a.score);
        match self {
            SelectionPolicy::CombinedScore => {
                by_score.then_with(|| b.metrics.total_commits.cmp(&a.metrics.total_commits))
            }
            SelectionPolicy::CommitsFirst => b
                .metrics
                .total_commits
                .cmp(&a.metrics.total_commits)
                .then(by_score),
            SelectionPolicy::ChurnFirst => b
                .metrics
                .total_churn()
                .cmp(&a.metrics.total_churn())
                .then(by_score),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "combined-score" | "combined" => Ok(SelectionPolicy::CombinedScore),
            "commits-first" | "commits" => Ok(SelectionPolicy::CommitsFirst),
            "churn-first" | "churn" => Ok(SelectionPolicy::ChurnFirst),
            other => Err(format!(
                "unknown selection policy '{other}' (expected combined-score, commits-first or churn-first)"
            )),
        }
    }
}

struct Candidate<'m> {
    metrics: &'m AuthorMetrics,
    score: f64,
}

pub fn combined_score(metrics: &AuthorMetrics) -> f64 {
    (metrics.overall_impact_score + metrics.overall_productivity) / 2.0
}

/// The author's largest commit across all periods. Commits that changed no
/// lines never qualify, so an author with only empty commits gets `None`.
pub fn most_impactful_commit(metrics: &AuthorMetrics) -> Option<ImpactfulCommit> {
    metrics
        .per_period
        .values()
        .filter_map(|p| p.most_impactful_commit.as_ref())
        .filter(|c| c.churn() > 0)
        .fold(None::<&ImpactfulCommit>, |best, c| match best {
            Some(b) if b.churn() >= c.churn() => Some(b),
            _ => Some(c),
        })
        .cloned()
}

/// Periods with the highest impact score; ties keep chronological order.
pub fn top_periods(metrics: &AuthorMetrics, limit: usize) -> Vec<PeriodHighlight> {
    let mut periods: Vec<PeriodHighlight> = metrics
        .per_period
        .iter()
        .map(|(period, p)| PeriodHighlight {
            period: period.clone(),
            commits: p.commits,
            additions: p.additions,
            deletions: p.deletions,
            impact_score: p.impact_score,
        })
        .collect();
    periods.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    periods.truncate(limit);
    periods
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestPerformerSelector {
    pub top_n: usize,
    pub policy: SelectionPolicy,
    pub top_periods: usize,
}

impl Default for BestPerformerSelector {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            policy: SelectionPolicy::default(),
            top_periods: DEFAULT_TOP_PERIODS,
        }
    }
}

impl BestPerformerSelector {
    pub fn new(top_n: usize, policy: SelectionPolicy) -> Self {
        Self {
            top_n,
            policy,
            ..Self::default()
        }
    }

    pub fn with_top_periods(mut self, top_periods: usize) -> Self {
        self.top_periods = top_periods;
        self
    }

    /// `authors` must be in first-seen order.
    pub fn select(&self, authors: &[AuthorMetrics]) -> Vec<BestPerformer> {
        let mut candidates: Vec<Candidate<'_>> = authors
            .iter()
            .map(|metrics| Candidate {
                metrics,
                score: combined_score(metrics),
            })
            .collect();
        candidates.sort_by(|a, b| self.policy.compare(a, b));

        candidates
            .into_iter()
            .take(self.top_n)
            .map(|c| BestPerformer {
                author: c.metrics.author.clone(),
                combined_score: c.score,
                total_commits: c.metrics.total_commits,
                total_additions: c.metrics.total_additions,
                total_deletions: c.metrics.total_deletions,
                overall_impact_score: c.metrics.overall_impact_score,
                overall_productivity: c.metrics.overall_productivity,
                most_impactful_commit: most_impactful_commit(c.metrics),
                top_periods: top_periods(c.metrics, self.top_periods),
            })
            .collect()
    }
}
