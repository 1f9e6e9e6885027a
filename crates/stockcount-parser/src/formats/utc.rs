use chrono::NaiveDateTime;
use chrono_tz::Tz;

use crate::errors::ParserError;
use crate::registry::TimestampParser;

use super::{parse_date_time, split_date_time, strip_utc_designator, utc_to_local};

/// `2025-11-28T20:09:33.987Z`
pub struct IsoUtcMillisParser;

/// `2025-11-28T15:00:00Z`
pub struct IsoUtcParser;

impl TimestampParser for IsoUtcMillisParser {
    fn name(&self) -> &'static str {
        "iso_utc_millis"
    }

    fn parse(&self, raw: &str, tz: Tz) -> Result<NaiveDateTime, ParserError> {
        let (date, time) = split_utc(self.name(), raw)?;
        if !time.contains('.') {
            return Err(ParserError::mismatch(self.name(), "no fractional seconds"));
        }
        let utc = parse_date_time(self.name(), date, time)?;
        Ok(utc_to_local(utc, tz))
    }
}

impl TimestampParser for IsoUtcParser {
    fn name(&self) -> &'static str {
        "iso_utc"
    }

    fn parse(&self, raw: &str, tz: Tz) -> Result<NaiveDateTime, ParserError> {
        let (date, time) = split_utc(self.name(), raw)?;
        if time.contains('.') {
            return Err(ParserError::mismatch(
                self.name(),
                "unexpected fractional seconds",
            ));
        }
        let utc = parse_date_time(self.name(), date, time)?;
        Ok(utc_to_local(utc, tz))
    }
}

fn split_utc<'a>(parser: &'static str, raw: &'a str) -> Result<(&'a str, &'a str), ParserError> {
    let body = strip_utc_designator(raw)
        .ok_or_else(|| ParserError::mismatch(parser, "missing 'Z' designator"))?;
    split_date_time(body)
        .ok_or_else(|| ParserError::mismatch(parser, "expected YYYY-MM-DDTHH:MM:SS layout"))
}
