use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maps a commit date to the bucket it is aggregated under.
///
/// Keys must sort chronologically as plain strings; every built-in
/// granularity zero-pads its fields for that reason.
pub trait PeriodKeyer {
    fn period_key(&self, date: NaiveDate) -> String;
}

impl<F> PeriodKeyer for F
where
    F: Fn(NaiveDate) -> String,
{
    fn period_key(&self, date: NaiveDate) -> String {
        self(date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
        }
    }
}

impl PeriodKeyer for Granularity {
    fn period_key(&self, date: NaiveDate) -> String {
        match self {
            Granularity::Day => day_key(date),
            Granularity::Week => week_key(date),
            Granularity::Month => month_key(date),
            Granularity::Quarter => quarter_key(date),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "quarter" | "quarterly" => Ok(Granularity::Quarter),
            other => Err(format!(
                "unknown granularity '{other}' (expected day, week, month or quarter)"
            )),
        }
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO week key. Uses the ISO week-year so late-December dates that belong
/// to week 1 sort after the preceding week 52/53.
pub fn week_key(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

pub fn quarter_key(date: NaiveDate) -> String {
    format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1)
}
