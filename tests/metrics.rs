use chrono::NaiveDate;
use commitrank::aggregate::{CommitActivity, PeriodAggregator};
use commitrank::metrics::{build_metrics, cadence, impact_score, productivity};
use commitrank::model::Commit;
use pretty_assertions::assert_eq;

fn commit(hash: &str, author: &str, day: &str, additions: u64, deletions: u64) -> Commit {
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap();
    Commit {
        hash: hash.to_string(),
        author: author.to_string(),
        date,
        message: format!("commit {hash}"),
        additions,
        deletions,
        is_merge: false,
        period_key: day[..7].to_string(),
    }
}

#[test]
fn impact_score_is_neutral_without_changes() {
    assert_eq!(impact_score(0, 0), 50.0);
}

#[test]
fn impact_score_extremes() {
    assert_eq!(impact_score(10, 0), 100.0);
    assert_eq!(impact_score(0, 10), 0.0);
    assert_eq!(impact_score(7, 7), 50.0);
}

#[test]
fn impact_score_is_bounded_and_monotonic_in_net_change() {
    for total in [1u64, 2, 7, 40, 1000] {
        let mut previous = f64::MIN;
        for additions in 0..=total {
            let score = impact_score(additions, total - additions);
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
            assert!(score >= previous, "score decreased at +{additions}/-{}", total - additions);
            previous = score;
        }
    }
}

#[test]
fn productivity_is_average_churn_per_commit() {
    assert_eq!(productivity(10, 5, 0), 0.0);
    assert_eq!(productivity(0, 0, 3), 0.0);
    assert_eq!(productivity(10, 5, 3), 5.0);
    assert_eq!(productivity(1, 0, 4), 0.25);
}

#[test]
fn two_commits_in_one_period_roll_up() {
    let aggregator: PeriodAggregator = vec![
        commit("a1", "Alice", "2024-03-04", 10, 2),
        commit("a2", "Alice", "2024-03-20", 5, 20),
    ]
    .into_iter()
    .collect();

    let metrics = build_metrics(&aggregator);
    assert_eq!(metrics.len(), 1);
    let alice = &metrics[0];

    assert_eq!(alice.total_additions, 15);
    assert_eq!(alice.total_deletions, 22);
    let period = &alice.per_period["2024-03"];
    assert_eq!(period.commits, 2);
    // ratio (15 - 22) / 37, score (ratio + 1) * 50
    assert!((period.impact_score - 1500.0 / 37.0).abs() < 1e-9);
    assert!((period.impact_score - 40.54).abs() < 0.01);
    assert_eq!(period.productivity, 37.0 / 2.0);
    assert_eq!(alice.overall_impact_score, period.impact_score);

    let best = period.most_impactful_commit.as_ref().unwrap();
    assert_eq!(best.hash, "a2");
}

#[test]
fn commit_without_numstat_counts_with_neutral_scores() {
    let aggregator: PeriodAggregator = vec![commit("b1", "Bob", "2024-03-04", 0, 0)].into_iter().collect();
    let bob = &build_metrics(&aggregator)[0];

    assert_eq!(bob.total_commits, 1);
    assert_eq!((bob.total_additions, bob.total_deletions), (0, 0));
    assert_eq!(bob.overall_impact_score, 50.0);
    assert_eq!(bob.overall_productivity, 0.0);
    assert_eq!(bob.per_period["2024-03"].impact_score, 50.0);
}

#[test]
fn most_impactful_tie_keeps_earlier_commit() {
    let aggregator: PeriodAggregator = vec![
        commit("first", "Cy", "2024-01-02", 3, 3),
        commit("second", "Cy", "2024-01-03", 6, 0),
    ]
    .into_iter()
    .collect();

    let bucket = aggregator.bucket("Cy", "2024-01").unwrap();
    assert_eq!(bucket.most_impactful_commit.as_ref().unwrap().hash, "first");
    assert_eq!(bucket.messages, vec!["commit first", "commit second"]);
}

#[test]
fn overall_metrics_span_periods() {
    let aggregator: PeriodAggregator = vec![
        commit("d1", "Dee", "2024-01-10", 30, 0),
        commit("d2", "Dee", "2024-02-10", 0, 10),
    ]
    .into_iter()
    .collect();
    let dee = &build_metrics(&aggregator)[0];

    assert_eq!(dee.per_period.len(), 2);
    assert_eq!(dee.per_period["2024-01"].impact_score, 100.0);
    assert_eq!(dee.per_period["2024-02"].impact_score, 0.0);
    assert_eq!(dee.overall_impact_score, 75.0);
    assert_eq!(dee.overall_productivity, 20.0);
    assert_eq!(dee.total_commits, 2);
}

#[test]
fn metrics_are_deterministic() {
    let aggregator: PeriodAggregator = vec![
        commit("e1", "Eli", "2024-01-10", 4, 1),
        commit("f1", "Fay", "2024-01-11", 2, 9),
    ]
    .into_iter()
    .collect();
    assert_eq!(build_metrics(&aggregator), build_metrics(&aggregator));
}

#[test]
fn cadence_skips_merges_as_baseline() {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    let activity = vec![
        CommitActivity { date: d("2024-01-10"), is_merge: false },
        CommitActivity { date: d("2024-01-05"), is_merge: true },
        CommitActivity { date: d("2024-01-01"), is_merge: false },
        CommitActivity { date: d("2024-01-04"), is_merge: false },
    ];

    let cadence = cadence(&activity).unwrap();
    assert_eq!(cadence.intervals, 2);
    assert_eq!(cadence.longest_gap_days, 6);
    assert_eq!(cadence.mean_gap_days, 4.5);
}

#[test]
fn cadence_needs_two_non_merge_commits() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let activity = vec![
        CommitActivity { date: d, is_merge: false },
        CommitActivity { date: d, is_merge: true },
    ];
    assert_eq!(cadence(&activity), None);
}

#[test]
fn merge_commits_still_count_toward_totals() {
    let mut merge = commit("m1", "Gus", "2024-04-01", 0, 0);
    merge.is_merge = true;
    let aggregator: PeriodAggregator = vec![merge, commit("g1", "Gus", "2024-04-02", 1, 1)].into_iter().collect();
    let gus = &build_metrics(&aggregator)[0];

    assert_eq!(gus.total_commits, 2);
    assert_eq!(gus.merge_commits, 1);
}

#[test]
fn oversized_totals_do_not_overflow() {
    let aggregator: PeriodAggregator = vec![
        commit("h1", "Hal", "2024-05-01", u64::MAX, 0),
        commit("h2", "Hal", "2024-06-01", 10, u64::MAX),
    ]
    .into_iter()
    .collect();
    let hal = &build_metrics(&aggregator)[0];

    assert_eq!(hal.total_additions, u64::MAX);
    assert_eq!(hal.total_churn(), u64::MAX);
    assert_eq!(aggregator.total_additions(), u64::MAX);
    assert!((0.0..=100.0).contains(&hal.overall_impact_score));
}
