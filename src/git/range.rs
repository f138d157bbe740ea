use crate::error::{CommitRankError, Result};
use crate::model::DateRange;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate};
use std::time::Duration;

/// How the caller asked for the analysis window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeRequest {
    pub since: Option<String>,
    pub until: Option<String>,
    pub months_back: Option<u32>,
    pub current_month: bool,
}

/// Explicit dates win, then the current month, then `months_back`, then
/// `default_months_back`.
pub fn resolve_range(request: &RangeRequest, default_months_back: u32, today: NaiveDate) -> Result<DateRange> {
    if request.since.is_some() || request.until.is_some() {
        let since = request.since.as_deref().map(|s| parse_date(s, today)).transpose()?;
        let until = request.until.as_deref().map(|u| parse_date(u, today)).transpose()?;

        if let (Some(s), Some(u)) = (since, until) {
            if s > u {
                return Err(CommitRankError::InvalidDate(format!(
                    "Invalid range: since ({s}) is after until ({u})"
                )));
            }
        }

        let mut range = DateRange::new();
        if let Some(s) = since {
            range = range.with_since(s);
        }
        if let Some(u) = until {
            range = range.with_until(u);
        }
        return Ok(range);
    }

    if request.current_month {
        return current_month(today);
    }

    months_back(request.months_back.unwrap_or(default_months_back), today)
}

pub fn months_back(months: u32, today: NaiveDate) -> Result<DateRange> {
    let since = today
        .checked_sub_months(Months::new(months))
        .ok_or_else(|| CommitRankError::InvalidDate(format!("{months} months back from {today} is out of range")))?;
    Ok(DateRange::new().with_since(since).with_until(today))
}

pub fn current_month(today: NaiveDate) -> Result<DateRange> {
    let first = today
        .with_day(1)
        .ok_or_else(|| CommitRankError::InvalidDate(format!("no first day for {today}")))?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or_else(|| CommitRankError::InvalidDate(format!("no last day for {today}")))?;
    Ok(DateRange::new().with_since(first).with_until(last))
}

/// Accepts `YYYY-MM-DD`, RFC 3339, "N days/weeks/months ago" or a
/// humantime duration such as `2weeks`, read as that long before `today`.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    if let Some(months) = parse_months_ago(input) {
        return today
            .checked_sub_months(Months::new(months))
            .ok_or_else(|| CommitRankError::InvalidDate(format!("Date out of range for '{input}'")));
    }

    let duration = parse_natural_duration(input)
        .or_else(|| humantime::parse_duration(input).ok())
        .ok_or_else(|| CommitRankError::InvalidDate(format!("Unrecognised date '{input}'")))?;

    today
        .checked_sub_days(Days::new(duration.as_secs() / 86400))
        .ok_or_else(|| CommitRankError::InvalidDate(format!("Duration overflow for '{input}'")))
}

fn parse_months_ago(input: &str) -> Option<u32> {
    let input = input.to_lowercase();
    let n = input
        .strip_suffix(" months ago")
        .or_else(|| input.strip_suffix(" month ago"))?;
    n.trim().parse().ok()
}

fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.to_lowercase();

    if let Some(days) = input.strip_suffix(" days ago").or_else(|| input.strip_suffix(" day ago")) {
        if let Ok(n) = days.trim().parse::<u64>() {
            return n.checked_mul(86400).map(Duration::from_secs);
        }
    }

    if let Some(weeks) = input.strip_suffix(" weeks ago").or_else(|| input.strip_suffix(" week ago")) {
        if let Ok(n) = weeks.trim().parse::<u64>() {
            return n.checked_mul(7 * 86400).map(Duration::from_secs);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn explicit_dates_win() {
        let request = RangeRequest {
            since: Some("2024-08-01".into()),
            until: Some("2024-11-18".into()),
            months_back: Some(6),
            current_month: true,
        };
        let range = resolve_range(&request, 3, d(2025, 1, 1)).unwrap();
        assert_eq!(range, DateRange::new().with_since(d(2024, 8, 1)).with_until(d(2024, 11, 18)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let request = RangeRequest {
            since: Some("2024-12-01".into()),
            until: Some("2024-01-01".into()),
            ..RangeRequest::default()
        };
        assert!(matches!(
            resolve_range(&request, 3, d(2025, 1, 1)),
            Err(CommitRankError::InvalidDate(_))
        ));
    }

    #[test]
    fn default_is_months_back() {
        let range = resolve_range(&RangeRequest::default(), 3, d(2024, 5, 31)).unwrap();
        assert_eq!(range.since, Some(d(2024, 2, 29)));
        assert_eq!(range.until, Some(d(2024, 5, 31)));
    }

    #[test]
    fn current_month_spans_whole_month() {
        let range = current_month(d(2024, 2, 10)).unwrap();
        assert_eq!(range.since, Some(d(2024, 2, 1)));
        assert_eq!(range.until, Some(d(2024, 2, 29)));
    }

    #[test]
    fn relative_dates() {
        let today = d(2024, 3, 15);
        assert_eq!(parse_date("10 days ago", today).unwrap(), d(2024, 3, 5));
        assert_eq!(parse_date("2 weeks ago", today).unwrap(), d(2024, 3, 1));
        assert_eq!(parse_date("1 month ago", today).unwrap(), d(2024, 2, 15));
        assert_eq!(parse_date("3days", today).unwrap(), d(2024, 3, 12));
        assert!(parse_date("yesterday-ish", today).is_err());
    }

    #[test]
    fn oversized_relative_dates_are_invalid() {
        let today = d(2024, 3, 15);
        for input in ["99999999999999999 days ago", "9999999999999999 weeks ago", "4000000000 months ago"] {
            assert!(
                matches!(parse_date(input, today), Err(CommitRankError::InvalidDate(_))),
                "{input} accepted"
            );
        }
    }
}
