use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

/// One fully parsed commit header plus its accumulated numstat counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub author: String,
    pub date: NaiveDate,
    pub message: String,
    pub additions: u64,
    pub deletions: u64,
    pub is_merge: bool,
    pub period_key: String,
}

impl Commit {
    pub fn churn(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactfulCommit {
    pub hash: String,
    pub message: String,
    pub date: NaiveDate,
    pub additions: u64,
    pub deletions: u64,
}

impl ImpactfulCommit {
    pub fn churn(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

impl From<&Commit> for ImpactfulCommit {
    fn from(commit: &Commit) -> Self {
        Self {
            hash: commit.hash.clone(),
            message: commit.message.clone(),
            date: commit.date,
            additions: commit.additions,
            deletions: commit.deletions,
        }
    }
}

/// Running totals for one `(author, period)` bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorPeriodStats {
    pub author: String,
    pub period_key: String,
    pub commit_count: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub messages: Vec<String>,
    pub most_impactful_commit: Option<ImpactfulCommit>,
}

impl AuthorPeriodStats {
    pub fn new(author: String, period_key: String) -> Self {
        Self {
            author,
            period_key,
            commit_count: 0,
            total_additions: 0,
            total_deletions: 0,
            messages: Vec::new(),
            most_impactful_commit: None,
        }
    }

    /// Folds one commit into the bucket. Ties on churn keep the earlier commit.
    pub fn record(&mut self, commit: &Commit) {
        self.commit_count += 1;
        self.total_additions = self.total_additions.saturating_add(commit.additions);
        self.total_deletions = self.total_deletions.saturating_add(commit.deletions);
        self.messages.push(commit.message.clone());

        let replace = match &self.most_impactful_commit {
            Some(best) => commit.churn() > best.churn(),
            None => true,
        };
        if replace {
            self.most_impactful_commit = Some(ImpactfulCommit::from(commit));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub impact_score: f64,
    pub productivity: f64,
    pub most_impactful_commit: Option<ImpactfulCommit>,
}

/// Spacing between consecutive non-merge commits of one author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cadence {
    pub intervals: usize,
    pub mean_gap_days: f64,
    pub longest_gap_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorMetrics {
    pub author: String,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub merge_commits: u64,
    pub per_period: BTreeMap<String, PeriodMetrics>,
    pub overall_impact_score: f64,
    pub overall_productivity: f64,
    pub cadence: Option<Cadence>,
}

impl AuthorMetrics {
    pub fn total_churn(&self) -> u64 {
        self.total_additions.saturating_add(self.total_deletions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Commits,
    Additions,
    Deletions,
    ImpactScore,
    Productivity,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Commits,
        Metric::Additions,
        Metric::Deletions,
        Metric::ImpactScore,
        Metric::Productivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Commits => "commits",
            Metric::Additions => "additions",
            Metric::Deletions => "deletions",
            Metric::ImpactScore => "impact_score",
            Metric::Productivity => "productivity",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "commits" => Ok(Metric::Commits),
            "additions" => Ok(Metric::Additions),
            "deletions" => Ok(Metric::Deletions),
            "impact_score" | "impactscore" | "impact" => Ok(Metric::ImpactScore),
            "productivity" => Ok(Metric::Productivity),
            other => Err(format!(
                "unknown metric '{other}' (expected commits, additions, deletions, impact-score or productivity)"
            )),
        }
    }
}

/// Which slice of the history a ranking covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PeriodSelector {
    Overall,
    Period(String),
}

impl PeriodSelector {
    pub fn as_str(&self) -> &str {
        match self {
            PeriodSelector::Overall => "overall",
            PeriodSelector::Period(key) => key,
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty period".to_string());
        }
        if s.eq_ignore_ascii_case("overall") {
            Ok(PeriodSelector::Overall)
        } else {
            Ok(PeriodSelector::Period(s.to_string()))
        }
    }
}

impl Serialize for PeriodSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankEntry {
    pub author: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub metric: Metric,
    pub period: PeriodSelector,
    pub entries: Vec<RankEntry>,
}

/// A labelled period ("latest", "previous", ...) ranked over every metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingWindow {
    pub label: String,
    pub period: PeriodSelector,
    pub rankings: Vec<Ranking>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodHighlight {
    pub period: String,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub impact_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPerformer {
    pub author: String,
    pub combined_score: f64,
    pub total_commits: u64,
    pub total_additions: u64,
    pub total_deletions: u64,
    pub overall_impact_score: f64,
    pub overall_productivity: f64,
    pub most_impactful_commit: Option<ImpactfulCommit>,
    pub top_periods: Vec<PeriodHighlight>,
}

/// JSON document printed by `rank --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub range: DateRange,
    #[serde(flatten)]
    pub ranking: Ranking,
}

/// JSON document printed by `best --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub range: DateRange,
    pub policy: String,
    pub performers: Vec<BestPerformer>,
}

/// Line-level bookkeeping from one parse of a log stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines: usize,
    pub headers: usize,
    pub commits: usize,
    pub duplicates: usize,
    pub malformed_headers: usize,
    pub numstat_lines: usize,
    pub binary_lines: usize,
    pub orphan_lines: usize,
}

/// Inclusive calendar-date window handed to `git log --since/--until`. Both
/// ends cover the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        if let Some(since) = self.since {
            if date < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if date > &until {
                return false;
            }
        }
        true
    }

    pub fn git_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(since) = self.since {
            args.push(format!("--since={} 00:00:00", since.format("%Y-%m-%d")));
        }
        if let Some(until) = self.until {
            args.push(format!("--until={} 23:59:59", until.format("%Y-%m-%d")));
        }
        args
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.since, self.until) {
            (Some(s), Some(u)) => write!(f, "{s} to {u}"),
            (Some(s), None) => write!(f, "since {s}"),
            (None, Some(u)) => write!(f, "until {u}"),
            (None, None) => f.write_str("all history"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryReport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub range: DateRange,
    pub granularity: String,
    pub periods: Vec<String>,
    pub parse_stats: ParseStats,
    pub authors: Vec<AuthorMetrics>,
    pub rankings: Vec<RankingWindow>,
    pub best_performers: Vec<BestPerformer>,
}

impl RepositoryReport {
    pub fn author(&self, name: &str) -> Option<&AuthorMetrics> {
        self.authors.iter().find(|a| a.author == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoFailure {
    pub repository: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub range: DateRange,
    pub repositories: BTreeMap<String, RepositoryReport>,
    pub failures: Vec<RepoFailure>,
}
