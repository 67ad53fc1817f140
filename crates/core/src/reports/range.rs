//! Report window resolution.
//!
//! Turns the raw `start_date` / `end_date` strings of a report request into an
//! [`Interval`] of UTC instants aligned to whole calendar days in the
//! reporting time zone.

use std::ops::RangeInclusive;

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Utc,
};
use chrono_tz::Tz;

use super::error::ReportError;

/// Calendar years a report bound may name.
///
/// Postgres `timestamptz` spans 4713 BC to 294276 AD; one year of margin on
/// each side keeps every zone offset of a boundary day inside that span.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = -4711..=294_275;

/// Inclusive creation-time window. A missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl Interval {
    /// Window with the given inclusive bounds.
    #[must_use]
    pub const fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Window matching every timestamp.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// True when at least one side is bounded, i.e. a filter applies.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// True if `ts` falls inside the window.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| ts >= start) && self.end.is_none_or(|end| ts <= end)
    }
}

/// Resolves raw report dates into day-aligned intervals.
#[derive(Debug, Clone, Copy)]
pub struct RangeResolver {
    tz: Tz,
}

impl Default for RangeResolver {
    fn default() -> Self {
        Self::new(Tz::UTC)
    }
}

impl RangeResolver {
    /// Creates a resolver aligning days to `tz`.
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Resolves optional raw dates into an interval.
    ///
    /// Empty strings count as absent. The start maps to the first instant of
    /// its day and the end to the last millisecond of its day.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDate` if a supplied value is not a date,
    /// falls outside [`SUPPORTED_YEARS`], or has no instant in the reporting
    /// time zone.
    pub fn resolve(
        &self,
        start_raw: Option<&str>,
        end_raw: Option<&str>,
    ) -> Result<Interval, ReportError> {
        let start = self.bound("start_date", start_raw, Self::start_of_day)?;
        let end = self.bound("end_date", end_raw, Self::end_of_day)?;

        Ok(Interval::new(start, end))
    }

    fn bound(
        &self,
        field: &'static str,
        raw: Option<&str>,
        day_edge: fn(&Self, NaiveDate) -> Option<DateTime<Utc>>,
    ) -> Result<Option<DateTime<Utc>>, ReportError> {
        let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };

        self.parse_date(value)
            .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
            .and_then(|date| day_edge(self, date))
            .map(Some)
            .ok_or_else(|| ReportError::invalid_date(field, value))
    }

    /// First instant of `date` in the reporting time zone.
    fn start_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let midnight = date.and_time(NaiveTime::MIN);

        // Midnight can fall inside a DST gap; the day then starts when the gap ends.
        (0..=180).step_by(30).find_map(|minutes| {
            let local = midnight.checked_add_signed(TimeDelta::minutes(minutes))?;
            match self.tz.from_local_datetime(&local) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    Some(dt.with_timezone(&Utc))
                }
                LocalResult::None => None,
            }
        })
    }

    /// Last millisecond of `date` (23:59:59.999 local) in the reporting time zone.
    fn end_of_day(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        self.start_of_day(date.succ_opt()?)?
            .checked_sub_signed(TimeDelta::milliseconds(1))
    }

    fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(dt.with_timezone(&self.tz).date_naive());
        }
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
            .into_iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(|dt| dt.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_both_bounds_are_day_aligned() {
        let interval = RangeResolver::default()
            .resolve(Some("2024-01-01"), Some("2024-01-05"))
            .unwrap();

        assert_eq!(interval.start(), Some(utc("2024-01-01T00:00:00Z")));
        assert_eq!(interval.end(), Some(utc("2024-01-05T23:59:59.999Z")));
        assert!(interval.is_bounded());
    }

    #[test]
    fn test_only_start_is_open_ended() {
        let interval = RangeResolver::default()
            .resolve(Some("2024-03-10"), None)
            .unwrap();

        assert_eq!(interval.start(), Some(utc("2024-03-10T00:00:00Z")));
        assert_eq!(interval.end(), None);
        assert!(interval.contains(utc("2099-01-01T00:00:00Z")));
        assert!(!interval.contains(utc("2024-03-09T23:59:59.999Z")));
    }

    #[test]
    fn test_only_end_is_open_ended() {
        let interval = RangeResolver::default()
            .resolve(None, Some("2024-03-10"))
            .unwrap();

        assert_eq!(interval.start(), None);
        assert_eq!(interval.end(), Some(utc("2024-03-10T23:59:59.999Z")));
        assert!(interval.contains(utc("1970-01-01T00:00:00Z")));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(None, Some("   "))]
    #[case(Some(""), Some(""))]
    fn test_absent_or_empty_is_unbounded(
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
    ) {
        let interval = RangeResolver::default().resolve(start, end).unwrap();
        assert_eq!(interval, Interval::unbounded());
        assert!(!interval.is_bounded());
    }

    #[rstest]
    #[case("2024-01-05T23:59:59Z", true)]
    #[case("2024-01-05T23:59:59.999Z", true)]
    #[case("2024-01-06T00:00:00Z", false)]
    #[case("2024-01-05T00:00:00Z", true)]
    fn test_end_day_is_inclusive(#[case] created_at: &str, #[case] included: bool) {
        let interval = RangeResolver::default()
            .resolve(None, Some("2024-01-05"))
            .unwrap();
        assert_eq!(interval.contains(utc(created_at)), included);
    }

    #[rstest]
    #[case("2024-01-05")]
    #[case("2024-01-05T15:30:00Z")]
    #[case("2024-01-05 15:30:00")]
    #[case("2024-01-05T15:30:00")]
    fn test_accepted_formats_resolve_to_the_same_day(#[case] raw: &str) {
        let interval = RangeResolver::default().resolve(Some(raw), None).unwrap();
        assert_eq!(interval.start(), Some(utc("2024-01-05T00:00:00Z")));
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2024-02-30")]
    #[case("05/01/2024")]
    #[case("2024-13-01")]
    fn test_unparseable_start_is_rejected(#[case] raw: &str) {
        let err = RangeResolver::default().resolve(Some(raw), None).unwrap_err();
        match err {
            ReportError::InvalidDate { field, value } => {
                assert_eq!(field, "start_date");
                assert_eq!(value, raw);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparseable_end_names_the_field() {
        let err = RangeResolver::default()
            .resolve(Some("2024-01-01"), Some("soon"))
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidDate {
                field: "end_date",
                ..
            }
        ));
    }

    #[test]
    fn test_day_boundaries_follow_configured_zone() {
        // Asia/Colombo is UTC+05:30 with no DST.
        let resolver = RangeResolver::new(chrono_tz::Asia::Colombo);
        let interval = resolver
            .resolve(Some("2024-01-05"), Some("2024-01-05"))
            .unwrap();

        assert_eq!(interval.start(), Some(utc("2024-01-04T18:30:00Z")));
        assert_eq!(interval.end(), Some(utc("2024-01-05T18:29:59.999Z")));
    }

    #[test]
    fn test_start_of_day_inside_dst_gap() {
        // Chile skipped 2023-09-03 00:00-01:00 local.
        let resolver = RangeResolver::new(chrono_tz::America::Santiago);
        let date = NaiveDate::from_ymd_opt(2023, 9, 3).unwrap();

        assert_eq!(resolver.start_of_day(date), Some(utc("2023-09-03T04:00:00Z")));
    }

    #[rstest]
    #[case(chrono_tz::Asia::Colombo, "-262143-01-01")]
    #[case(chrono_tz::Asia::Colombo, "-5000-06-30")]
    #[case(Tz::UTC, "-262143-01-01")]
    #[case(Tz::UTC, "-4712-12-31")]
    fn test_start_before_storable_range_is_rejected(#[case] tz: Tz, #[case] raw: &str) {
        let err = RangeResolver::new(tz).resolve(Some(raw), None).unwrap_err();
        match err {
            ReportError::InvalidDate { field, value } => {
                assert_eq!(field, "start_date");
                assert_eq!(value, raw);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_end_before_storable_range_names_the_field() {
        let err = RangeResolver::new(chrono_tz::Asia::Colombo)
            .resolve(None, Some("-4800-06-30"))
            .unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidDate {
                field: "end_date",
                ..
            }
        ));
    }

    #[test]
    fn test_oldest_supported_day_resolves_in_its_zone() {
        let interval = RangeResolver::new(chrono_tz::Asia::Colombo)
            .resolve(Some("-4711-01-01"), Some("9999-12-31"))
            .unwrap();

        let start = interval.start().unwrap();
        assert_eq!(start.year(), -4712);
        assert_eq!(start.month(), 12);
        assert_eq!(interval.end(), Some(utc("9999-12-31T18:29:59.999Z")));
    }

    #[test]
    fn test_start_after_end_yields_empty_window() {
        let interval = RangeResolver::default()
            .resolve(Some("2024-02-01"), Some("2024-01-01"))
            .unwrap();

        assert!(!interval.contains(utc("2024-01-15T12:00:00Z")));
        assert!(!interval.contains(utc("2024-02-01T00:00:00Z")));
    }
}
