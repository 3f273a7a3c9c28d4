//! Local wall-clock → UTC conversion for schedule inputs.
//!
//! The schedule pickers collect local wall-clock strings; the backend wants
//! UTC ISO-8601. The produced string uses millisecond precision and a `Z`
//! suffix so it matches what the rest of the platform emits.
//!
//! Conversions are generic over [`chrono::TimeZone`] so tests can pin a
//! `FixedOffset`; production callers use [`chrono::Local`].

use chrono::{
    DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

/// Format a UTC instant the way the backend expects it
/// (`2026-01-15T09:00:00.000Z`).
pub fn utc_iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Resolve a naive local wall-clock value to a UTC instant.
///
/// Ambiguous local times (DST fold) resolve to the earliest valid instant;
/// skipped local times return `None`.
fn resolve<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Convert a `datetime-local` style string (`YYYY-MM-DDTHH:MM`, seconds
/// optional) interpreted in `tz` to a UTC instant.
pub fn datetime_local_to_utc_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    resolve(naive, tz)
}

/// Convert a `datetime-local` string in the system timezone.
pub fn datetime_local_to_utc(input: &str) -> Option<DateTime<Utc>> {
    datetime_local_to_utc_in(input, &Local)
}

/// Convert a time-of-day string (`HH:MM`, seconds optional) on `date`
/// interpreted in `tz` to a UTC instant.
pub fn time_on_date_to_utc_in<Tz: TimeZone>(
    time: &str,
    date: NaiveDate,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let t = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok()?;
    resolve(date.and_time(t), tz)
}

/// Convert a time-of-day string on today's local date to a UTC instant.
///
/// This is the bulk-schedule `startTime`: "09:00" means today 09:00 local.
pub fn time_today_to_utc(time: &str) -> Option<DateTime<Utc>> {
    time_on_date_to_utc_in(time, Local::now().date_naive(), &Local)
}

/// Convert a date string (`YYYY-MM-DD`) to local midnight in `tz` as a UTC
/// instant. This is the bulk-schedule `manualDate`.
pub fn date_to_utc_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let d = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    resolve(d.and_time(NaiveTime::MIN), tz)
}

/// Convert a date string to local midnight in the system timezone.
pub fn date_to_utc(input: &str) -> Option<DateTime<Utc>> {
    date_to_utc_in(input, &Local)
}
