//! Resolution of the reporting window from the interval and endtime inputs.
//!
//! A yearly window is expressed as a pair of calendar years, a monthly one
//! as a pair of calendar dates. Both coerce to half-open date bounds
//! `[start, end)` for filtering.

use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta, TimeZone, Utc};

use crate::config::is_epoch;
use crate::error::{Result, SummaryError};
use crate::types::Updated;

/// Days subtracted from the end instant for a monthly window.
const MONTH_DAYS: i64 = 30;

/// Days subtracted from the end instant for a yearly window.
const YEAR_DAYS: i64 = 365;

/// Size of the reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interval {
    #[default]
    Year,
    Month,
}

impl Interval {
    /// Parse an interval keyword. Anything other than `MONTH`
    /// (case-insensitive) means a yearly window.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.trim().eq_ignore_ascii_case("MONTH") {
            Self::Month
        } else {
            Self::Year
        }
    }
}

/// End of the reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndTime {
    /// The `TODAY` keyword.
    Today,
    /// Seconds since the Unix epoch.
    Epoch(i64),
    /// Any other input.
    Now,
}

impl EndTime {
    /// Parse an endtime keyword: `TODAY`, an epoch timestamp, or anything
    /// else meaning now.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.eq_ignore_ascii_case("TODAY") {
            return Self::Today;
        }
        if is_epoch(keyword) {
            if let Ok(secs) = keyword.parse() {
                return Self::Epoch(secs);
            }
        }
        tracing::debug!(endtime = keyword, "unrecognized endtime, using now");
        Self::Now
    }

    /// Resolve to an instant, given the current local time.
    pub fn resolve(self, now: DateTime<Local>) -> Result<DateTime<Local>> {
        match self {
            Self::Today | Self::Now => Ok(now),
            Self::Epoch(secs) => Local
                .timestamp_opt(secs, 0)
                .single()
                .ok_or_else(|| SummaryError::InvalidTimestamp(secs.to_string())),
        }
    }
}

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// Calendar years, each bound meaning 1 January of that year.
    Years { start: i32, end: i32 },
    /// Calendar dates.
    Dates { start: NaiveDate, end: NaiveDate },
}

impl TimeRange {
    /// Resolve the window from the interval and endtime inputs.
    ///
    /// Years are shifted by one past the naive subtraction, so a yearly
    /// window ending in 2025 reads `2025 - 2026`.
    pub fn resolve(interval: Interval, endtime: EndTime, now: DateTime<Local>) -> Result<Self> {
        let end = endtime.resolve(now)?;
        let range = match interval {
            Interval::Month => Self::Dates {
                start: (end - TimeDelta::days(MONTH_DAYS)).date_naive(),
                end: end.date_naive(),
            },
            Interval::Year => Self::Years {
                start: (end - TimeDelta::days(YEAR_DAYS)).year() + 1,
                end: end.year() + 1,
            },
        };
        tracing::debug!(?interval, ?endtime, range = %range, "resolved time range");
        Ok(range)
    }

    /// Half-open date bounds `[start, end)`.
    #[must_use]
    pub fn date_bounds(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            Self::Years { start, end } => (first_of_year(start), first_of_year(end)),
            Self::Dates { start, end } => (start, end),
        }
    }

    /// Whether an instant falls inside the window, compared by UTC date.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let (start, end) = self.date_bounds();
        let date = at.date_naive();
        start <= date && date < end
    }

    /// Year span of the timeline chart.
    #[must_use]
    pub fn timeline_years(&self) -> (i32, i32) {
        match *self {
            Self::Years { start, end } => (start, end),
            Self::Dates { start, end } => (start.year() - 1, end.year()),
        }
    }

    /// Label of the start bound.
    #[must_use]
    pub fn start_label(&self) -> String {
        match self {
            Self::Years { start, .. } => start.to_string(),
            Self::Dates { start, .. } => start.to_string(),
        }
    }

    /// Label of the end bound.
    #[must_use]
    pub fn end_label(&self) -> String {
        match self {
            Self::Years { end, .. } => end.to_string(),
            Self::Dates { end, .. } => end.to_string(),
        }
    }

    /// Select the records updated inside the window, preserving order.
    pub fn filter<T: Updated + Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .filter(|item| self.contains(item.updated()))
            .cloned()
            .collect()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_label(), self.end_label())
    }
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}
