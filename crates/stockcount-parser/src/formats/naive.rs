use chrono::NaiveDateTime;
use chrono_tz::Tz;

use crate::errors::ParserError;
use crate::registry::TimestampParser;

use super::{parse_date_time, split_date_time};

/// Strings without any zone marker. These already carry the target's wall-clock time, so the
/// value is reformatted without an offset shift.
pub struct NaiveLocalParser;

impl TimestampParser for NaiveLocalParser {
    fn name(&self) -> &'static str {
        "naive_local"
    }

    fn parse(&self, raw: &str, _tz: Tz) -> Result<NaiveDateTime, ParserError> {
        let (date, time) = split_date_time(raw).ok_or_else(|| {
            ParserError::mismatch(self.name(), "expected YYYY-MM-DD HH:MM:SS layout")
        })?;
        if time.contains(['Z', 'z', '+', '-']) {
            return Err(ParserError::mismatch(self.name(), "carries a zone designator"));
        }
        parse_date_time(self.name(), date, time)
    }
}
