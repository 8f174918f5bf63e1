//! Composition of the derived epoch timestamp from separate date and time inputs.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use super::validation::{ValidationError, validate_date, validate_time};

/// Combines a `YYYY/MM/DD` date and an `HH:MM` time into epoch seconds.
///
/// The pair is read as wall-clock time in `offset`. Either half failing its own
/// validator fails the whole composition; no past/future check is applied.
pub fn compose_timestamp(
    date: &str,
    time: &str,
    offset: FixedOffset,
) -> Result<i64, ValidationError> {
    let date = validate_date(date)?;
    let time = validate_time(time)?;
    let local = NaiveDateTime::new(date, time);
    offset
        .from_local_datetime(&local)
        .single()
        .map(|instant| instant.timestamp())
        .ok_or_else(|| ValidationError::InvalidDate(local.format("%Y/%m/%d %H:%M").to_string()))
}

/// Renders epoch seconds as the `(YYYY/MM/DD, HH:MM)` input pair in `offset`.
///
/// Returns `None` for timestamps outside chrono's representable range.
pub fn split_timestamp(timestamp: i64, offset: FixedOffset) -> Option<(String, String)> {
    let instant = DateTime::from_timestamp(timestamp, 0)?.with_timezone(&offset);
    Some((
        instant.format("%Y/%m/%d").to_string(),
        instant.format("%H:%M").to_string(),
    ))
}
