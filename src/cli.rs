use crate::best::SelectionPolicy;
use crate::model::{Metric, PeriodSelector};
use crate::period::Granularity;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commitrank")]
#[command(about = "Per-author contribution metrics, rankings and best performers from git history")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to a JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Start date (YYYY-MM-DD, RFC3339, '2 weeks ago' or a duration like 30days)")]
    pub since: Option<String>,

    #[arg(long, global = true, help = "End date (same forms as --since)")]
    pub until: Option<String>,

    #[arg(long, global = true, help = "Analyse the last N months when no --since/--until is given")]
    pub months_back: Option<u32>,

    #[arg(long, global = true, help = "Analyse the current calendar month")]
    pub current_month: bool,

    #[arg(long, global = true, help = "Period bucketing: day, week, month or quarter")]
    pub granularity: Option<Granularity>,

    #[arg(long, global = true, help = "Request parent hashes so merge commits are detected")]
    pub with_parents: bool,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full analysis of one repository
    Report {
        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON, one author per line")]
        ndjson: bool,
    },
    /// Leaderboard for one metric and period
    Rank {
        #[arg(long, default_value = "commits", help = "commits, additions, deletions, impact-score or productivity")]
        metric: Metric,

        #[arg(long, default_value = "overall", help = "Period key (e.g. 2024-05) or 'overall'")]
        period: PeriodSelector,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON, one entry per line")]
        ndjson: bool,
    },
    /// Top performers by combined score
    Best {
        #[arg(long, help = "Number of performers to list")]
        top: Option<usize>,

        #[arg(long, help = "combined-score, commits-first or churn-first")]
        policy: Option<SelectionPolicy>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,
    },
    /// Analyse every repository below a directory, each on its own
    Batch {
        #[arg(help = "Directory whose sub-directories are repositories (defaults to the config list)")]
        base: Option<PathBuf>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON, one repository per line")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let common = self.common;
        match self.command {
            Commands::Report { json, ndjson } => crate::commands::report::exec(&common, json, ndjson),
            Commands::Rank { metric, period, json, ndjson } => {
                crate::commands::rank::exec(&common, metric, period, json, ndjson)
            }
            Commands::Best { top, policy, json, ndjson } => {
                crate::commands::best::exec(&common, top, policy, json, ndjson)
            }
            Commands::Batch { base, json, ndjson } => {
                crate::commands::batch::exec(&common, base, json, ndjson)
            }
        }
    }
}
