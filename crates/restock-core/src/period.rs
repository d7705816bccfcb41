//! # Report Periods
//!
//! Resolution of period selectors into concrete date ranges, and derivation
//! of the previous comparable range for period-over-period metrics.
//!
//! ## Period Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ?period=month      → [first day of month, last day of month]       │
//! │  ?period=year       → [Jan 1, Dec 31] of the current year           │
//! │  ?period=all        → unbounded (queries skip the date filter)      │
//! │  ?period=custom     → [start?, end?], either side may be open       │
//! │       &start=YYYY-MM-DD&end=YYYY-MM-DD                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Previous-Range Derivation
//! Year mode shifts the range back one *calendar* year, so year-over-year
//! comparisons align identical calendar dates (Feb 29 clamps to Feb 28).
//! Month and custom modes shift back by the range's *length in days*, ending
//! the day before the current start, so month-over-month comparisons stay
//! robust to months of unequal length. The asymmetry is deliberate.
//!
//! "Today" is always an explicit argument. This module never reads a clock.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PeriodError, PeriodResult};

// =============================================================================
// Period Mode
// =============================================================================

/// The closed set of period selectors accepted by the report endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    /// Current calendar month (the default).
    Month,
    /// Current calendar year.
    Year,
    /// No date restriction at all.
    All,
    /// Caller-supplied bounds, each side optional.
    Custom,
}

impl PeriodMode {
    /// Parses a selector string; `None` selects the default mode.
    pub fn parse(selector: Option<&str>) -> PeriodResult<Self> {
        match selector {
            None => Ok(PeriodMode::Month),
            Some("month") => Ok(PeriodMode::Month),
            Some("year") => Ok(PeriodMode::Year),
            Some("all") => Ok(PeriodMode::All),
            Some("custom") => Ok(PeriodMode::Custom),
            Some(other) => Err(PeriodError::UnknownMode(other.to_string())),
        }
    }

    /// The wire name of the mode, as echoed in report payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodMode::Month => "month",
            PeriodMode::Year => "year",
            PeriodMode::All => "all",
            PeriodMode::Custom => "custom",
        }
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// A closed interval of calendar dates, both ends inclusive.
///
/// An absent bound means "unbounded on that side". Both bounds absent is the
/// `all` range: downstream queries must skip date filtering entirely rather
/// than apply ±infinity sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive lower bound, if any.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound, if any.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A range with both ends open.
    pub const fn unbounded() -> Self {
        DateRange { start: None, end: None }
    }

    /// A range with both ends fixed.
    pub const fn bounded(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start: Some(start),
            end: Some(end),
        }
    }

    /// True when neither bound is set.
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Start of the range as a UTC timestamp (start of day), for filtering
    /// timestamp columns.
    pub fn start_bound_utc(&self) -> Option<DateTime<Utc>> {
        self.start.map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// *Exclusive* end of the range as a UTC timestamp: start of the day
    /// after `end`. Timestamp filters use `< end_bound` so the whole final
    /// day is included regardless of time-of-day precision.
    pub fn end_bound_utc(&self) -> Option<DateTime<Utc>> {
        self.end
            .map(|d| (d + Days::new(1)).and_time(NaiveTime::MIN).and_utc())
    }

    /// The same range shifted back one calendar year on each present bound.
    /// Used for year-over-year comparatives. Feb 29 clamps to Feb 28.
    pub fn previous_year(&self) -> DateRange {
        DateRange {
            start: self.start.map(|d| d - Months::new(12)),
            end: self.end.map(|d| d - Months::new(12)),
        }
    }

    /// Number of days covered by the range, counting both endpoints.
    /// `None` when either bound is open.
    pub fn len_days(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}

// =============================================================================
// Period
// =============================================================================

/// A resolved report period: the mode that was requested plus the concrete
/// date range it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub mode: PeriodMode,
    pub range: DateRange,
}

impl Period {
    /// Resolves a period selector into a concrete range, relative to `today`.
    ///
    /// ## Arguments
    /// * `selector` - raw `period` query value (`None` defaults to month)
    /// * `start`/`end` - raw custom bounds, only consulted in custom mode
    /// * `today` - the server's current date, injected by the caller
    ///
    /// ## Errors
    /// `PeriodError::UnknownMode` for an unrecognized selector,
    /// `PeriodError::InvalidDate` for unparseable custom bounds.
    pub fn resolve(
        selector: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> PeriodResult<Period> {
        let mode = PeriodMode::parse(selector)?;

        let range = match mode {
            PeriodMode::All => DateRange::unbounded(),
            PeriodMode::Custom => DateRange {
                start: parse_bound("start", start)?,
                end: parse_bound("end", end)?,
            },
            PeriodMode::Year => DateRange::bounded(start_of_year(today), end_of_year(today)),
            PeriodMode::Month => DateRange::bounded(start_of_month(today), end_of_month(today)),
        };

        Ok(Period { mode, range })
    }

    /// The immediately preceding comparable range, if one exists.
    ///
    /// Returns `None` whenever either bound of the current range is open:
    /// there is no meaningful "previous" to an unbounded interval.
    pub fn previous_range(&self) -> Option<DateRange> {
        let (start, end) = (self.range.start?, self.range.end?);

        match self.mode {
            // Calendar shift: same dates, one year earlier.
            PeriodMode::Year => Some(DateRange::bounded(
                start - Months::new(12),
                end - Months::new(12),
            )),
            // Fixed day-count shift ending the day before `start`.
            _ => {
                let len = (end - start).num_days() + 1;
                let prev_end = start - Days::new(1);
                let prev_start = prev_end - Days::new((len - 1) as u64);
                Some(DateRange::bounded(prev_start, prev_end))
            }
        }
    }
}

// =============================================================================
// Date Helpers
// =============================================================================

fn parse_bound(field: &'static str, raw: Option<&str>) -> PeriodResult<Option<NaiveDate>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(|_| PeriodError::InvalidDate {
                field,
                value: value.to_string(),
            }),
    }
}

fn start_of_month(today: NaiveDate) -> NaiveDate {
    today - Days::new(u64::from(today.day0()))
}

fn end_of_month(today: NaiveDate) -> NaiveDate {
    start_of_month(today) + Months::new(1) - Days::new(1)
}

fn start_of_year(today: NaiveDate) -> NaiveDate {
    today - Days::new(u64::from(today.ordinal0()))
}

fn end_of_year(today: NaiveDate) -> NaiveDate {
    start_of_year(today) + Months::new(12) - Days::new(1)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_mode_is_month() {
        let period = Period::resolve(None, None, None, date(2026, 8, 6)).unwrap();
        assert_eq!(period.mode, PeriodMode::Month);
        assert_eq!(period.range, DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31)));
    }

    #[test]
    fn test_month_mode_february_leap_year() {
        let period = Period::resolve(Some("month"), None, None, date(2024, 2, 15)).unwrap();
        assert_eq!(period.range, DateRange::bounded(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn test_year_mode() {
        let period = Period::resolve(Some("year"), None, None, date(2026, 8, 6)).unwrap();
        assert_eq!(period.mode, PeriodMode::Year);
        assert_eq!(period.range, DateRange::bounded(date(2026, 1, 1), date(2026, 12, 31)));
    }

    #[test]
    fn test_all_mode_is_unbounded() {
        let period = Period::resolve(Some("all"), None, None, date(2026, 8, 6)).unwrap();
        assert!(period.range.is_unbounded());
        assert!(period.previous_range().is_none());
        assert!(period.range.start_bound_utc().is_none());
        assert!(period.range.end_bound_utc().is_none());
    }

    #[test]
    fn test_custom_mode_both_bounds() {
        let period = Period::resolve(
            Some("custom"),
            Some("2026-01-10"),
            Some("2026-01-19"),
            date(2026, 8, 6),
        )
        .unwrap();
        assert_eq!(period.range, DateRange::bounded(date(2026, 1, 10), date(2026, 1, 19)));
    }

    #[test]
    fn test_custom_mode_half_open() {
        // Only an end bound: open on the start side but NOT fully unbounded.
        let period =
            Period::resolve(Some("custom"), None, Some("2026-01-19"), date(2026, 8, 6)).unwrap();
        assert_eq!(period.range.start, None);
        assert_eq!(period.range.end, Some(date(2026, 1, 19)));
        assert!(!period.range.is_unbounded());
        // Half-open ranges have no previous comparable range.
        assert!(period.previous_range().is_none());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = Period::resolve(Some("weekly"), None, None, date(2026, 8, 6)).unwrap_err();
        assert_eq!(err, PeriodError::UnknownMode("weekly".to_string()));
    }

    #[test]
    fn test_malformed_custom_date_rejected() {
        let err = Period::resolve(Some("custom"), Some("01/10/2026"), None, date(2026, 8, 6))
            .unwrap_err();
        assert!(matches!(err, PeriodError::InvalidDate { field: "start", .. }));
    }

    #[test]
    fn test_previous_range_same_length_ending_day_before_start() {
        // March 2024: 31 days. Previous range must be the 31 days ending Feb 29.
        let period = Period {
            mode: PeriodMode::Month,
            range: DateRange::bounded(date(2024, 3, 1), date(2024, 3, 31)),
        };
        let prev = period.previous_range().unwrap();
        assert_eq!(prev, DateRange::bounded(date(2024, 1, 30), date(2024, 2, 29)));
        assert_eq!(prev.len_days(), Some(31));
    }

    #[test]
    fn test_previous_range_custom_arbitrary_span() {
        let period = Period {
            mode: PeriodMode::Custom,
            range: DateRange::bounded(date(2026, 1, 10), date(2026, 1, 19)),
        };
        let prev = period.previous_range().unwrap();
        // 10 days ending the day before Jan 10.
        assert_eq!(prev, DateRange::bounded(date(2025, 12, 31), date(2026, 1, 9)));
        assert_eq!(prev.len_days(), period.range.len_days());
    }

    #[test]
    fn test_previous_range_year_is_calendar_shift() {
        let period = Period {
            mode: PeriodMode::Year,
            range: DateRange::bounded(date(2024, 1, 1), date(2024, 12, 31)),
        };
        let prev = period.previous_range().unwrap();
        // 2023 has 365 days vs 2024's 366: calendar shift, not day-count shift.
        assert_eq!(prev, DateRange::bounded(date(2023, 1, 1), date(2023, 12, 31)));
        assert_eq!(prev.len_days(), Some(365));
    }

    #[test]
    fn test_year_shift_clamps_leap_day() {
        let range = DateRange::bounded(date(2024, 2, 29), date(2024, 2, 29));
        let prev = range.previous_year();
        assert_eq!(prev, DateRange::bounded(date(2023, 2, 28), date(2023, 2, 28)));
    }

    #[test]
    fn test_previous_year_shifts_each_present_bound() {
        let range = DateRange {
            start: None,
            end: Some(date(2026, 6, 30)),
        };
        let prev = range.previous_year();
        assert_eq!(prev.start, None);
        assert_eq!(prev.end, Some(date(2025, 6, 30)));
    }

    #[test]
    fn test_timestamp_bounds_cover_whole_final_day() {
        let range = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 7));
        let start = range.start_bound_utc().unwrap();
        let end = range.end_bound_utc().unwrap();
        assert_eq!(start.to_rfc3339(), "2026-08-01T00:00:00+00:00");
        // Exclusive bound: first instant of the day after `end`.
        assert_eq!(end.to_rfc3339(), "2026-08-08T00:00:00+00:00");
    }
}
