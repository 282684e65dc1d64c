// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report kinds and the time windows they cover

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use worklog_git::LogQuery;

/// The kind of report to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// One calendar day
    #[default]
    Daily,
    /// One ISO week, Monday through Sunday
    Weekly,
}

impl ReportKind {
    /// The lowercase name used on the command line and over HTTP
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown report kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid report type '{0}'. Use 'daily' or 'weekly'")]
pub struct ParseReportKindError(pub String);

impl FromStr for ReportKind {
    type Err = ParseReportKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(ParseReportKindError(s.to_string())),
        }
    }
}

/// A resolved reporting window
///
/// `start` is inclusive and `end` exclusive. Both carry the offset of the
/// timezone the reference date was interpreted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    /// Kind of report this window was resolved for
    pub kind: ReportKind,
    /// The date the window was resolved from
    pub date: NaiveDate,
    /// First instant of the window
    pub start: DateTime<FixedOffset>,
    /// First instant after the window
    pub end: DateTime<FixedOffset>,
}

impl ReportPeriod {
    /// Resolve the window of the given kind containing `date` in `tz`
    #[must_use]
    pub fn resolve<Tz: TimeZone>(kind: ReportKind, date: NaiveDate, tz: &Tz) -> Self {
        match kind {
            ReportKind::Daily => Self::daily(date, tz),
            ReportKind::Weekly => Self::weekly(date, tz),
        }
    }

    /// Local midnight of `date` through 24 hours later
    #[must_use]
    pub fn daily<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let start = local_midnight(date, tz);
        Self {
            kind: ReportKind::Daily,
            date,
            start,
            end: start + TimeDelta::days(1),
        }
    }

    /// Monday 00:00 of the week containing `date` through the next Monday 00:00
    #[must_use]
    pub fn weekly<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let monday = week_start(date);
        Self {
            kind: ReportKind::Weekly,
            date,
            start: local_midnight(monday, tz),
            end: local_midnight(monday + TimeDelta::days(7), tz),
        }
    }

    /// Last second inside the window, the inclusive bound git expects
    #[must_use]
    pub fn until(&self) -> DateTime<FixedOffset> {
        self.end - TimeDelta::seconds(1)
    }

    /// Whether an instant falls inside the window
    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let instant = instant.fixed_offset();
        self.start <= instant && instant < self.end
    }

    /// Human-readable description, e.g. `2024-01-15` or `2024-01-15 to 2024-01-21`
    #[must_use]
    pub fn description(&self) -> String {
        match self.kind {
            ReportKind::Daily => self.date.format("%Y-%m-%d").to_string(),
            ReportKind::Weekly => {
                let monday = week_start(self.date);
                let sunday = monday + TimeDelta::days(6);
                format!("{} to {}", monday.format("%Y-%m-%d"), sunday.format("%Y-%m-%d"))
            }
        }
    }

    /// A history query covering this window
    #[must_use]
    pub fn to_query(&self) -> LogQuery {
        LogQuery::new(self.start, self.until())
    }
}

/// Monday of the ISO week containing `date` (Sunday counts as day 7)
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_since_monday = i64::from(date.weekday().number_from_monday()) - 1;
    date - TimeDelta::days(days_since_monday)
}

/// First existing instant of `date` in `tz`
///
/// Zones that skip midnight for daylight saving start the day at the first
/// valid hour.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<FixedOffset> {
    let midnight = date.and_time(NaiveTime::default());
    (0..24)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(hour)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
        .fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc, Weekday};
    use similar_asserts::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn east8() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).expect("valid offset")
    }

    #[test]
    fn test_report_kind_parse_and_display() {
        assert_eq!("daily".parse::<ReportKind>(), Ok(ReportKind::Daily));
        assert_eq!("Weekly".parse::<ReportKind>(), Ok(ReportKind::Weekly));
        assert_eq!(ReportKind::Weekly.to_string(), "weekly");
        assert_eq!(ReportKind::default(), ReportKind::Daily);
        let err = "monthly".parse::<ReportKind>().expect_err("should fail");
        assert!(err.to_string().contains("monthly"));
    }

    #[test]
    fn test_daily_period_bounds() {
        let period = ReportPeriod::daily(date(2024, 1, 15), &east8());
        assert_eq!(period.start.to_rfc3339(), "2024-01-15T00:00:00+08:00");
        assert_eq!(period.end.to_rfc3339(), "2024-01-16T00:00:00+08:00");
        assert_eq!(period.until() - period.start, TimeDelta::hours(24) - TimeDelta::seconds(1));
        assert_eq!(period.description(), "2024-01-15");
    }

    #[test]
    fn test_weekly_period_from_wednesday() {
        let period = ReportPeriod::weekly(date(2024, 1, 17), &Utc);
        assert_eq!(period.start.date_naive(), date(2024, 1, 15));
        assert_eq!(period.start.weekday(), Weekday::Mon);
        assert_eq!(period.end.date_naive(), date(2024, 1, 22));
        assert_eq!(period.end.weekday(), Weekday::Mon);
        assert_eq!(period.end - period.start, TimeDelta::days(7));
        assert_eq!(period.until().to_rfc3339(), "2024-01-21T23:59:59+00:00");
        assert_eq!(period.description(), "2024-01-15 to 2024-01-21");
    }

    #[test]
    fn test_weekly_period_from_sunday_goes_back_to_monday() {
        let period = ReportPeriod::weekly(date(2024, 1, 21), &Utc);
        assert_eq!(period.start.date_naive(), date(2024, 1, 15));
    }

    #[test]
    fn test_weekly_period_from_monday_starts_same_day() {
        let period = ReportPeriod::weekly(date(2024, 1, 15), &east8());
        assert_eq!(period.start.to_rfc3339(), "2024-01-15T00:00:00+08:00");
    }

    #[test]
    fn test_weekly_period_across_year_boundary() {
        let period = ReportPeriod::weekly(date(2025, 1, 1), &Utc);
        assert_eq!(period.start.date_naive(), date(2024, 12, 30));
        assert_eq!(period.description(), "2024-12-30 to 2025-01-05");
    }

    #[test]
    fn test_contains_is_half_open() {
        let period = ReportPeriod::daily(date(2024, 1, 15), &Utc);
        assert!(period.contains(&period.start));
        assert!(period.contains(&period.until()));
        assert!(!period.contains(&period.end));
    }

    #[test]
    fn test_to_query_uses_inclusive_bounds() {
        let period = ReportPeriod::daily(date(2024, 1, 15), &east8());
        let query = period.to_query();
        assert_eq!(query.since, period.start);
        assert_eq!(query.until.to_rfc3339(), "2024-01-15T23:59:59+08:00");
        assert!(query.author.is_none());
    }

    #[test]
    fn test_resolve_dispatches_on_kind() {
        let d = date(2024, 1, 17);
        assert_eq!(
            ReportPeriod::resolve(ReportKind::Daily, d, &Utc),
            ReportPeriod::daily(d, &Utc)
        );
        assert_eq!(
            ReportPeriod::resolve(ReportKind::Weekly, d, &Utc),
            ReportPeriod::weekly(d, &Utc)
        );
    }
}
