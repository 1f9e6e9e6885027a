use chrono::{FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::errors::ParserError;
use crate::registry::TimestampParser;

use super::{parse_date_time, split_date_time};

/// ISO-8601 with a numeric offset, e.g. `2025-11-28T15:09:33.120-05:00`.
pub struct IsoOffsetParser;

impl TimestampParser for IsoOffsetParser {
    fn name(&self) -> &'static str {
        "iso_offset"
    }

    fn parse(&self, raw: &str, tz: Tz) -> Result<NaiveDateTime, ParserError> {
        let (date, rest) = split_date_time(raw).ok_or_else(|| {
            ParserError::mismatch(self.name(), "expected YYYY-MM-DDTHH:MM:SS layout")
        })?;

        let sign_idx = rest
            .rfind(['+', '-'])
            .ok_or_else(|| ParserError::mismatch(self.name(), "missing numeric offset"))?;
        let (time, offset) = rest.split_at(sign_idx);

        let offset = parse_offset(offset)
            .ok_or_else(|| ParserError::mismatch(self.name(), format!("invalid offset {offset:?}")))?;
        let local = parse_date_time(self.name(), date, time)?;

        let instant = offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| ParserError::mismatch(self.name(), "offset produced no instant"))?;
        Ok(instant.with_timezone(&tz).naive_local())
    }
}

/// Accepts `+HH:MM`, `+HHMM` and `+HH`.
fn parse_offset(value: &str) -> Option<FixedOffset> {
    let (sign, digits) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let digits: String = match digits.len() {
        2 | 4 => digits.to_string(),
        5 if digits.as_bytes()[2] == b':' => digits.replace(':', ""),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().ok()?
    } else {
        0
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::parse_offset;

    #[test]
    fn offset_forms() {
        assert_eq!(parse_offset("-05:00").map(|o| o.local_minus_utc()), Some(-18_000));
        assert_eq!(parse_offset("+0530").map(|o| o.local_minus_utc()), Some(19_800));
        assert_eq!(parse_offset("+02").map(|o| o.local_minus_utc()), Some(7_200));
        assert!(parse_offset("+5").is_none());
        assert!(parse_offset("+25:00").is_none());
        assert!(parse_offset("05:00").is_none());
    }
}
