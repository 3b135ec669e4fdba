//! Reporting window resolution.
//!
//! The admin report defaults to the current calendar month in the server's
//! local calendar; explicit bounds from the query string are used verbatim.

use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc,
};

use crate::error::{LeadformError, LeadformResult};
use leadform_models::ReportPeriod;

/// A resolved reporting window: timestamp bounds for querying plus their
/// ISO-8601 UTC renderings for the report body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub start_iso: String,
    pub end_iso: String,
}

impl ResolvedPeriod {
    pub fn to_report_period(&self) -> ReportPeriod {
        ReportPeriod {
            start: self.start_iso.clone(),
            end: self.end_iso.clone(),
        }
    }
}

/// Resolve the reporting window against the current local time.
pub fn resolve_period(start: Option<&str>, end: Option<&str>) -> LeadformResult<ResolvedPeriod> {
    resolve_period_from(Local::now(), start, end)
}

/// Resolve the reporting window against an explicit "now".
///
/// Each bound is handled independently: an explicit value is parsed and used
/// verbatim, a missing one defaults to the edge of now's calendar month
/// (day 1 00:00:00 through last day 23:59:59.999 in now's timezone).
pub fn resolve_period_from<Tz: TimeZone>(
    now: DateTime<Tz>,
    start: Option<&str>,
    end: Option<&str>,
) -> LeadformResult<ResolvedPeriod> {
    let start = match start.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_bound(raw)?,
        None => month_start(&now)?,
    };
    let end = match end.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_bound(raw)?,
        None => month_end(&now)?,
    };

    Ok(ResolvedPeriod {
        start,
        end,
        start_iso: start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end_iso: end.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Parse an explicit bound: RFC 3339, or a bare `YYYY-MM-DD` date taken as
/// UTC midnight.
fn parse_bound(raw: &str) -> LeadformResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(LeadformError::validation(
        "period",
        format!("Not a parseable period bound: '{raw}'"),
    ))
}

fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> LeadformResult<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LeadformError::internal("Month start out of calendar range"))?;
    Ok(localize(&now.timezone(), naive))
}

fn month_end<Tz: TimeZone>(now: &DateTime<Tz>) -> LeadformResult<DateTime<Utc>> {
    let (next_year, next_month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let naive = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .ok_or_else(|| LeadformError::internal("Month end out of calendar range"))?;
    Ok(localize(&now.timezone(), naive))
}

fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        // DST fold: take the earlier instant. DST gap: the wall-clock time
        // never existed, fall back to reading it as UTC.
        LocalResult::Ambiguous(first, _) => first.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn defaults_to_current_calendar_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 30, 0).unwrap();
        let period = resolve_period_from(now, None, None).unwrap();

        assert_eq!(period.start_iso, "2024-03-01T00:00:00.000Z");
        assert_eq!(period.end_iso, "2024-03-31T23:59:59.999Z");
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        let now = Utc.with_ymd_and_hms(2024, 12, 5, 0, 0, 0).unwrap();
        let period = resolve_period_from(now, None, None).unwrap();

        assert_eq!(period.start_iso, "2024-12-01T00:00:00.000Z");
        assert_eq!(period.end_iso, "2024-12-31T23:59:59.999Z");
    }

    #[test]
    fn february_leap_year_end() {
        let now = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
        let period = resolve_period_from(now, None, None).unwrap();
        assert_eq!(period.end_iso, "2024-02-29T23:59:59.999Z");
    }

    #[test]
    fn default_window_respects_the_local_calendar() {
        // 2024-03-15 in Seoul: the month starts at Mar 1 00:00 KST,
        // which is Feb 29 15:00 UTC.
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = seoul.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let period = resolve_period_from(now, None, None).unwrap();

        assert_eq!(period.start_iso, "2024-02-29T15:00:00.000Z");
        assert_eq!(period.end_iso, "2024-03-31T14:59:59.999Z");
    }

    #[test]
    fn explicit_bounds_are_used_verbatim() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let period = resolve_period_from(
            now,
            Some("2024-01-01T00:00:00Z"),
            Some("2024-01-31T23:59:59.999Z"),
        )
        .unwrap();

        assert_eq!(period.start_iso, "2024-01-01T00:00:00.000Z");
        assert_eq!(period.end_iso, "2024-01-31T23:59:59.999Z");
    }

    #[test]
    fn date_only_bounds_parse_as_utc_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let period =
            resolve_period_from(now, Some("2024-01-01"), Some("2024-02-01")).unwrap();

        assert_eq!(period.start_iso, "2024-01-01T00:00:00.000Z");
        assert_eq!(period.end_iso, "2024-02-01T00:00:00.000Z");
    }

    #[test]
    fn bounds_resolve_independently() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let period = resolve_period_from(now, Some("2024-01-01"), None).unwrap();

        assert_eq!(period.start_iso, "2024-01-01T00:00:00.000Z");
        assert_eq!(period.end_iso, "2024-03-31T23:59:59.999Z");
    }

    #[test]
    fn garbage_bounds_are_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let result = resolve_period_from(now, Some("last tuesday"), None);
        assert!(matches!(result, Err(LeadformError::Validation { .. })));
    }
}
