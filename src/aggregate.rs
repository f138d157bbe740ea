use crate::model::{AuthorPeriodStats, Commit};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitActivity {
    pub date: NaiveDate,
    pub is_merge: bool,
}

/// Everything recorded for one author, buckets keyed by period.
#[derive(Debug, Clone)]
pub struct AuthorHistory {
    pub author: String,
    pub periods: BTreeMap<String, AuthorPeriodStats>,
    pub activity: Vec<CommitActivity>,
}

impl AuthorHistory {
    fn new(author: String) -> Self {
        Self {
            author,
            periods: BTreeMap::new(),
            activity: Vec::new(),
        }
    }
}

/// Buckets commits by `(author, period)` in arrival order.
///
/// Authors keep the order in which they first appeared in the stream; that
/// order is the tie-break for every ranking built on top.
#[derive(Debug, Default)]
pub struct PeriodAggregator {
    authors: Vec<AuthorHistory>,
    index: HashMap<String, usize>,
}

impl PeriodAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, commit: &Commit) {
        let slot = match self.index.get(&commit.author) {
            Some(&slot) => slot,
            None => {
                self.authors.push(AuthorHistory::new(commit.author.clone()));
                self.index.insert(commit.author.clone(), self.authors.len() - 1);
                self.authors.len() - 1
            }
        };

        let history = &mut self.authors[slot];
        history
            .periods
            .entry(commit.period_key.clone())
            .or_insert_with(|| AuthorPeriodStats::new(commit.author.clone(), commit.period_key.clone()))
            .record(commit);
        history.activity.push(CommitActivity {
            date: commit.date,
            is_merge: commit.is_merge,
        });
    }

    pub fn histories(&self) -> &[AuthorHistory] {
        &self.authors
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn bucket(&self, author: &str, period: &str) -> Option<&AuthorPeriodStats> {
        let slot = *self.index.get(author)?;
        self.authors[slot].periods.get(period)
    }

    pub fn buckets(&self) -> impl Iterator<Item = &AuthorPeriodStats> {
        self.authors.iter().flat_map(|h| h.periods.values())
    }

    /// Every period key seen, in chronological order.
    pub fn periods(&self) -> Vec<String> {
        self.buckets()
            .map(|b| b.period_key.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn total_additions(&self) -> u64 {
        self.buckets().fold(0u64, |acc, b| acc.saturating_add(b.total_additions))
    }

    pub fn total_deletions(&self) -> u64 {
        self.buckets().fold(0u64, |acc, b| acc.saturating_add(b.total_deletions))
    }
}

impl Extend<Commit> for PeriodAggregator {
    fn extend<I: IntoIterator<Item = Commit>>(&mut self, commits: I) {
        for commit in commits {
            self.record(&commit);
        }
    }
}

impl FromIterator<Commit> for PeriodAggregator {
    fn from_iter<I: IntoIterator<Item = Commit>>(commits: I) -> Self {
        let mut aggregator = Self::new();
        aggregator.extend(commits);
        aggregator
    }
}
