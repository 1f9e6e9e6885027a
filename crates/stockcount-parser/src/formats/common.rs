use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::errors::ParserError;

const DATE_LEN: usize = "YYYY-MM-DD".len();

/// Splits `YYYY-MM-DD<sep>rest` where `<sep>` is `T`, `t` or a single space.
pub(crate) fn split_date_time(value: &str) -> Option<(&str, &str)> {
    let date = value.get(..DATE_LEN)?;
    let separator = value.get(DATE_LEN..DATE_LEN + 1)?;
    if !matches!(separator, "T" | "t" | " ") {
        return None;
    }
    let time = value.get(DATE_LEN + 1..)?;
    Some((date, time))
}

/// Returns the body of a string that ends with a `Z` UTC designator.
pub(crate) fn strip_utc_designator(value: &str) -> Option<&str> {
    value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
}

/// Parses a date part and a time part with optional fractional seconds.
pub(crate) fn parse_date_time(
    parser: &'static str,
    date: &str,
    time: &str,
) -> Result<NaiveDateTime, ParserError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|err| ParserError::mismatch(parser, format!("invalid date {date:?}: {err}")))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S%.f")
        .map_err(|err| ParserError::mismatch(parser, format!("invalid time {time:?}: {err}")))?;
    Ok(date.and_time(time))
}

pub(crate) fn utc_to_local(utc: NaiveDateTime, tz: Tz) -> NaiveDateTime {
    tz.from_utc_datetime(&utc).naive_local()
}
