//! Date/time resolution for DTSTART/DTEND.
//!
//! The same logical start/end fields appear in three mutually exclusive
//! encodings, tried in priority order:
//!
//! 1. timezone-qualified: `DTSTART;TZID=<name>:<date>[T<time>]`
//! 2. date-only: `DTSTART;VALUE=DATE:<date>`
//! 3. unqualified: `DTSTART:<date>[T<time>]`
//!
//! Timezone-qualified times are converted to instants when the timezone
//! capability can resolve the name; every failure along the way falls back
//! to the raw wall-clock strings instead of erroring.

use chrono::{Datelike, Local, LocalResult, NaiveDateTime, TimeZone};

use crate::event::EventTime;
use crate::tz::TzResolver;

/// The resolved schedule portion of an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<EventTime>,
    pub end_time: Option<EventTime>,
    pub weekday: Option<String>,
    pub week_number: Option<String>,
}

/// Date and time tokens from one DTSTART/DTEND value.
#[derive(Debug, Clone, Default)]
struct DtTokens {
    date: Option<String>,
    time: Option<String>,
}

/// Resolves start/end dates and times from the unfolded blob.
pub fn resolve(text: &str, tz: &TzResolver) -> Schedule {
    let mut schedule = if let Some(value) = tzid_line(text, "DTSTART;TZID=") {
        tracing::trace!("DTSTART in timezone-qualified form");
        resolve_zoned(text, &value.0, &value.1, tz)
    } else if let Some(value) = line_value(text, "DTSTART;VALUE=DATE:") {
        tracing::trace!("DTSTART in date-only form");
        resolve_all_day(text, value)
    } else {
        tracing::trace!("DTSTART in unqualified form");
        resolve_unqualified(text)
    };

    derive_calendar_fields(&mut schedule);
    schedule
}

/// Timezone-qualified shape. End mirrors start when DTEND is missing.
fn resolve_zoned(text: &str, start_tzid: &str, start_value: &str, tz: &TzResolver) -> Schedule {
    let start = split_tokens(start_value);
    let (end_tzid, end) = match tzid_line(text, "DTEND;TZID=") {
        Some((tzid, value)) => (tzid, split_tokens(&value)),
        None => (start_tzid.to_string(), start.clone()),
    };

    let mut schedule = Schedule {
        start_date: start.date.clone(),
        end_date: end.date.clone(),
        ..Schedule::default()
    };

    let (Some(stime), Some(etime)) = (start.time, end.time) else {
        return schedule;
    };

    let converted = tz.is_available().then(|| {
        let sinst = to_instant(start.date.as_deref(), &stime, start_tzid, tz)?;
        let einst = to_instant(end.date.as_deref(), &etime, &end_tzid, tz)?;
        Some((sinst, einst))
    });

    if let Some(Some((sinst, einst))) = converted {
        schedule.start_time = Some(EventTime::Instant(sinst));
        schedule.end_time = Some(EventTime::Instant(einst));
    } else {
        if tz.is_available() {
            tracing::debug!(
                tzid = start_tzid,
                "Timezone conversion failed, keeping wall-clock times"
            );
        }
        schedule.start_time = Some(EventTime::Raw(stime));
        schedule.end_time = Some(EventTime::Raw(etime));
    }

    schedule
}

/// Date-only shape: both times carry the all-day sentinel and the end date
/// defaults to the start date.
fn resolve_all_day(text: &str, start_value: &str) -> Schedule {
    let start_date = Some(normalize_date(start_value));
    let end_date = line_value(text, "DTEND;VALUE=DATE:")
        .map(normalize_date)
        .or_else(|| start_date.clone());

    Schedule {
        start_date,
        end_date,
        start_time: Some(EventTime::AllDay),
        end_time: Some(EventTime::AllDay),
        ..Schedule::default()
    }
}

/// Unqualified UTC-ish shape.
///
/// Without an explicit TZOFFSET field anywhere in the blob, the extracted
/// hour is shifted by the process's local UTC offset in whole hours. This
/// is a best-effort approximation: the addition has no day rollover or
/// 0-23 clamping, and hours outside that range are passed through as-is.
fn resolve_unqualified(text: &str) -> Schedule {
    let Some(start_value) = line_value(text, "DTSTART:") else {
        return Schedule::default();
    };

    let start = split_tokens(start_value);
    let end = line_value(text, "DTEND:").map_or_else(|| start.clone(), split_tokens);

    let mut stime = start.time;
    let mut etime = end.time;

    let has_offset_field = text
        .lines()
        .any(|line| line.trim_end_matches('\r').starts_with("TZOFFSET"));
    if !has_offset_field {
        let offset = local_offset_hours();
        stime = stime.map(|t| shift_hour(&t, offset));
        etime = etime.map(|t| shift_hour(&t, offset));
    }

    Schedule {
        start_date: start.date,
        end_date: end.date,
        start_time: stime.map(EventTime::Raw),
        end_time: etime.map(EventTime::Raw),
        ..Schedule::default()
    }
}

/// Fills in weekday and ISO week number when the start date parses.
fn derive_calendar_fields(schedule: &mut Schedule) {
    let Some(date) = schedule.start_date.as_deref() else {
        return;
    };
    let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        tracing::debug!(date, "Unparseable start date, skipping weekday/week");
        return;
    };

    schedule.weekday = Some(parsed.format("%A").to_string());
    schedule.week_number = Some(parsed.iso_week().week().to_string());
}

/// Converts a local wall-clock date and time in the named timezone to an
/// instant in the viewer's local clock. `None` on any failure.
fn to_instant(
    date: Option<&str>,
    time: &str,
    tzid: &str,
    tz: &TzResolver,
) -> Option<chrono::DateTime<Local>> {
    let zone = tz.resolve(tzid)?;
    let naive = NaiveDateTime::parse_from_str(&format!("{} {time}", date?), "%Y-%m-%d %H:%M").ok()?;

    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Local)),
        // DST fold: take the first occurrence.
        LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Local)),
        LocalResult::None => None,
    }
}

/// Splits a `DTSTART;TZID=<name>:<value>` line into name and value.
fn tzid_line(text: &str, prefix: &str) -> Option<(String, String)> {
    let rest = line_value(text, prefix)?;
    let (tzid, value) = rest.split_once(':')?;
    Some((tzid.to_string(), value.to_string()))
}

/// Returns the value of the first line starting with `prefix`.
fn line_value<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .find_map(|line| line.strip_prefix(prefix))
}

/// Splits a DTSTART/DTEND value into normalized date and time tokens.
fn split_tokens(value: &str) -> DtTokens {
    let (date_tok, time_tok) = match value.split_once('T') {
        Some((d, t)) => (d, Some(t)),
        None => (value, None),
    };

    DtTokens {
        date: (!date_tok.is_empty()).then(|| normalize_date(date_tok)),
        time: time_tok.and_then(normalize_time),
    }
}

/// Rewrites a compact `YYYYMMDD` date to `YYYY-MM-DD`.
///
/// Already-hyphenated tokens pass through unchanged, and so does anything
/// that is not an 8-digit prefix: the caller keeps the raw token and the
/// derived weekday/week fields simply stay absent.
fn normalize_date(token: &str) -> String {
    if token.contains('-') {
        return token.to_string();
    }

    let digits = token.as_bytes();
    if digits.len() >= 8 && digits[..8].iter().all(u8::is_ascii_digit) {
        format!("{}-{}-{}", &token[0..4], &token[4..6], &token[6..8])
    } else {
        token.to_string()
    }
}

/// Rewrites a compact `HHMM[SS]` time to `HH:MM`, ignoring seconds.
///
/// A trailing `Z` designator is tolerated. Malformed tokens yield `None`.
fn normalize_time(token: &str) -> Option<String> {
    let token = token.trim_end_matches('\r');
    let token = token.strip_suffix('Z').unwrap_or(token);

    let digits = token.as_bytes();
    if digits.len() >= 4 && digits[..4].iter().all(u8::is_ascii_digit) {
        Some(format!("{}:{}", &token[0..2], &token[2..4]))
    } else {
        None
    }
}

/// Adds a whole-hour offset to an `HH:MM` string.
///
/// Deliberately naive: no day rollover and no clamping, so the result may
/// fall outside 0-23 and is rendered with an unpadded hour.
fn shift_hour(time: &str, offset: i32) -> String {
    let Some((hour, minute)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = hour.parse::<i32>() else {
        return time.to_string();
    };

    format!("{}:{minute}", hour + offset)
}

/// The process-local UTC offset in whole hours.
fn local_offset_hours() -> i32 {
    Local::now().offset().local_minus_utc() / 3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_date_compact() {
        assert_eq!(normalize_date("20240301"), "2024-03-01");
    }

    #[test]
    fn normalize_date_hyphenated_is_identity() {
        assert_eq!(normalize_date("2024-03-01"), "2024-03-01");
    }

    #[test]
    fn normalize_date_keeps_malformed_token() {
        assert_eq!(normalize_date("202403"), "202403");
        assert_eq!(normalize_date("banana"), "banana");
    }

    #[test]
    fn normalize_time_variants() {
        assert_eq!(normalize_time("0900").as_deref(), Some("09:00"));
        assert_eq!(normalize_time("090000").as_deref(), Some("09:00"));
        assert_eq!(normalize_time("090000Z").as_deref(), Some("09:00"));
        assert!(normalize_time("9h").is_none());
    }

    #[test]
    fn shift_hour_is_naive_by_design() {
        assert_eq!(shift_hour("23:30", 2), "25:30");
        assert_eq!(shift_hour("00:15", -1), "-1:15");
        assert_eq!(shift_hour("09:00", 0), "9:00");
    }

    #[test]
    fn all_day_shape() {
        let text = "BEGIN:VEVENT\nDTSTART;VALUE=DATE:20240510\nEND:VEVENT\n";
        let schedule = resolve(text, &TzResolver::disabled());
        assert_eq!(schedule.start_date.as_deref(), Some("2024-05-10"));
        assert_eq!(schedule.end_date.as_deref(), Some("2024-05-10"));
        assert_eq!(schedule.start_time, Some(EventTime::AllDay));
        assert_eq!(schedule.end_time, Some(EventTime::AllDay));
    }

    #[test]
    fn all_day_with_explicit_end() {
        let text = "DTSTART;VALUE=DATE:20240510\nDTEND;VALUE=DATE:20240512\n";
        let schedule = resolve(text, &TzResolver::disabled());
        assert_eq!(schedule.end_date.as_deref(), Some("2024-05-12"));
        assert_eq!(schedule.start_time, Some(EventTime::AllDay));
    }

    #[test]
    fn zoned_shape_without_database_keeps_raw_times() {
        let text = "DTSTART;TZID=Europe/Oslo:20240115T140000\n\
                    DTEND;TZID=Europe/Oslo:20240115T150000\n";
        let schedule = resolve(text, &TzResolver::disabled());
        assert_eq!(schedule.start_date.as_deref(), Some("2024-01-15"));
        assert_eq!(schedule.start_time, Some(EventTime::Raw("14:00".to_string())));
        assert_eq!(schedule.end_time, Some(EventTime::Raw("15:00".to_string())));
    }

    #[test]
    fn zoned_shape_converts_with_database() {
        let text = "DTSTART;TZID=Europe/Oslo:20240115T140000\n\
                    DTEND;TZID=Europe/Oslo:20240115T150000\n";
        let schedule = resolve(text, &TzResolver::new());
        assert!(matches!(schedule.start_time, Some(EventTime::Instant(_))));
        assert!(matches!(schedule.end_time, Some(EventTime::Instant(_))));
    }

    #[test]
    fn zoned_shape_resolves_vendor_name() {
        let text = "DTSTART;TZID=Eastern Standard Time:20240115T140000\n";
        let schedule = resolve(text, &TzResolver::new());
        assert_eq!(schedule.start_date.as_deref(), Some("2024-01-15"));
        assert!(matches!(schedule.start_time, Some(EventTime::Instant(_))));
    }

    #[test]
    fn zoned_shape_unknown_zone_falls_back() {
        let text = "DTSTART;TZID=Middle Earth Time:20240115T140000\n";
        let schedule = resolve(text, &TzResolver::new());
        assert_eq!(schedule.start_time, Some(EventTime::Raw("14:00".to_string())));
        assert_eq!(schedule.end_time, Some(EventTime::Raw("14:00".to_string())));
    }

    #[test]
    fn zoned_end_mirrors_start() {
        let text = "DTSTART;TZID=Europe/Oslo:20240115T140000\n";
        let schedule = resolve(text, &TzResolver::disabled());
        assert_eq!(schedule.end_date.as_deref(), Some("2024-01-15"));
        assert_eq!(schedule.end_time, Some(EventTime::Raw("14:00".to_string())));
    }

    #[test]
    fn unqualified_shape_extracts_dates() {
        let text = "DTSTART:20240301T090000Z\nDTEND:20240301T100000Z\n";
        let schedule = resolve(text, &TzResolver::disabled());
        assert_eq!(schedule.start_date.as_deref(), Some("2024-03-01"));
        assert_eq!(schedule.end_date.as_deref(), Some("2024-03-01"));
        assert!(schedule.start_time.is_some());
    }

    #[test]
    fn unqualified_shape_skips_adjustment_with_tzoffset() {
        let text = "DTSTART:20240301T090000Z\nTZOFFSETFROM:+0100\n";
        let schedule = resolve(text, &TzResolver::disabled());
        assert_eq!(schedule.start_time, Some(EventTime::Raw("09:00".to_string())));
    }

    #[test]
    fn weekday_and_week_derivation() {
        let text = "DTSTART:20240301T090000Z\nTZOFFSETFROM:+0100\n";
        let schedule = resolve(text, &TzResolver::disabled());
        // 2024-03-01 was a Friday in ISO week 9.
        assert_eq!(schedule.weekday.as_deref(), Some("Friday"));
        assert_eq!(schedule.week_number.as_deref(), Some("9"));
    }

    #[test]
    fn no_dtstart_at_all() {
        let schedule = resolve("SUMMARY:x\n", &TzResolver::disabled());
        assert_eq!(schedule, Schedule::default());
    }
}
