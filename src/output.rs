use crate::best::SelectionPolicy;
use crate::model::{
    BatchReport, BestOutput, BestPerformer, Metric, RankOutput, Ranking, RepositoryReport, SCHEMA_VERSION,
};
use anyhow::Result;
use chrono::Utc;
use console::style;
use serde::Serialize;

pub fn output_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_ndjson<'a, T, I>(items: I) -> Result<()>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    for item in items {
        println!("{}", serde_json::to_string(item)?);
    }
    Ok(())
}

pub fn output_ranking_json(report: &RepositoryReport, ranking: &Ranking) -> Result<()> {
    let output = RankOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: report.repository.clone(),
        range: report.range,
        ranking: ranking.clone(),
    };
    output_json(&output)
}

pub fn output_best_json(report: &RepositoryReport, policy: SelectionPolicy) -> Result<()> {
    let output = BestOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: report.repository.clone(),
        range: report.range,
        policy: policy.to_string(),
        performers: report.best_performers.clone(),
    };
    output_json(&output)
}

fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Commits | Metric::Additions | Metric::Deletions => format!("{value:.0}"),
        Metric::ImpactScore | Metric::Productivity => format!("{value:.2}"),
    }
}

pub fn output_ranking(ranking: &Ranking) -> Result<()> {
    println!(
        "{}",
        style(format!("{} ranking ({})", ranking.metric, ranking.period)).bold()
    );
    println!("{}", "─".repeat(50));

    if ranking.entries.is_empty() {
        println!("No authors with data for this period");
        return Ok(());
    }

    for (i, entry) in ranking.entries.iter().enumerate() {
        println!(
            "{:>3}. {:<36} {:>10}",
            i + 1,
            entry.author,
            style(format_value(ranking.metric, entry.value)).cyan()
        );
    }
    Ok(())
}

pub fn output_best(performers: &[BestPerformer]) -> Result<()> {
    println!("{}", style("Best Performers").bold());
    println!("{}", "─".repeat(98));

    if performers.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!(
        "{:<28} {:>9} {:>8} {:>8} {:>8} {:>8} {:>12}",
        style("Author").bold(),
        style("Combined").bold(),
        style("Impact").bold(),
        style("Prod.").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Deleted").bold()
    );

    for p in performers {
        println!(
            "{:<28} {:>9.2} {:>8.2} {:>8.2} {:>8} {:>8} {:>12}",
            p.author,
            p.combined_score,
            p.overall_impact_score,
            p.overall_productivity,
            p.total_commits,
            style(p.total_additions).green(),
            style(p.total_deletions).red()
        );
        match &p.most_impactful_commit {
            Some(c) => println!(
                "    {} {} {} (+{} -{}, {})",
                style("top commit").dim(),
                c.hash,
                c.message,
                c.additions,
                c.deletions,
                c.date
            ),
            None => println!("    {} none available", style("top commit").dim()),
        }
        if !p.top_periods.is_empty() {
            let periods: Vec<String> = p
                .top_periods
                .iter()
                .map(|h| format!("{}: {} commits, impact {:.2}", h.period, h.commits, h.impact_score))
                .collect();
            println!("    {} {}", style("top periods").dim(), periods.join("; "));
        }
    }
    Ok(())
}

pub fn output_report(report: &RepositoryReport) -> Result<()> {
    println!(
        "{} {}",
        style("Contribution Report").bold(),
        style(&report.repository).cyan()
    );
    println!("Range: {} ({} periods by {})", report.range, report.periods.len(), report.granularity);
    println!(
        "Commits: {}  Authors: {}  Duplicates skipped: {}",
        style(report.parse_stats.commits).cyan(),
        style(report.authors.len()).yellow(),
        report.parse_stats.duplicates
    );
    println!();

    println!(
        "{:<28} {:>8} {:>8} {:>8} {:>8} {:>8} {:>10}",
        style("Author").bold(),
        style("Commits").bold(),
        style("Added").bold(),
        style("Deleted").bold(),
        style("Impact").bold(),
        style("Prod.").bold(),
        style("Gap(days)").bold()
    );
    println!("{}", "─".repeat(86));
    for a in &report.authors {
        let gap = a
            .cadence
            .as_ref()
            .map(|c| format!("{:.1}", c.mean_gap_days))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<28} {:>8} {:>8} {:>8} {:>8.2} {:>8.2} {:>10}",
            a.author,
            a.total_commits,
            style(a.total_additions).green(),
            style(a.total_deletions).red(),
            a.overall_impact_score,
            a.overall_productivity,
            gap
        );
    }
    println!();

    for window in &report.rankings {
        if let Some(by_commits) = window.rankings.iter().find(|r| r.metric == Metric::Commits) {
            let leaders: Vec<String> = by_commits
                .entries
                .iter()
                .take(3)
                .map(|e| format!("{} ({:.0})", e.author, e.value))
                .collect();
            println!(
                "{:<10} {:<10} {}",
                style(&window.label).bold(),
                window.period,
                leaders.join(", ")
            );
        }
    }
    println!();

    output_best(&report.best_performers)
}

pub fn output_batch(batch: &BatchReport) -> Result<()> {
    println!("{} ({})", style("Multi-repository Report").bold(), batch.range);
    println!("{}", "─".repeat(50));

    for (name, report) in &batch.repositories {
        println!(
            "{} {} commits, {} authors",
            style(name).cyan().bold(),
            report.parse_stats.commits,
            report.authors.len()
        );
        for p in &report.best_performers {
            println!(
                "    {:<28} combined {:>8.2}  commits {:>5}",
                p.author, p.combined_score, p.total_commits
            );
        }
    }

    if !batch.failures.is_empty() {
        println!("\n{}", style("Skipped").yellow().bold());
        for f in &batch.failures {
            println!("    {}: {}", f.repository, f.reason);
        }
    }
    Ok(())
}
