use chrono::NaiveDateTime;
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use crate::errors::{ParserAttempt, ParserError};
use crate::formats::{IsoOffsetParser, IsoUtcMillisParser, IsoUtcParser, NaiveLocalParser};

/// One recognized timestamp shape. Implementations return the wall-clock time in `tz`.
pub trait TimestampParser: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, raw: &str, tz: Tz) -> Result<NaiveDateTime, ParserError>;
}

static DEFAULT_PARSERS: Lazy<Vec<&'static dyn TimestampParser>> = Lazy::new(|| {
    vec![
        &IsoUtcMillisParser as &dyn TimestampParser,
        &IsoUtcParser as &dyn TimestampParser,
        &IsoOffsetParser as &dyn TimestampParser,
        &NaiveLocalParser as &dyn TimestampParser,
    ]
});

/// Strategies ordered from most to least specific.
pub fn default_parsers() -> &'static [&'static dyn TimestampParser] {
    DEFAULT_PARSERS.as_slice()
}

/// A successful parse: the wall-clock time in the target timezone and the strategy that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub local: NaiveDateTime,
    pub parser: &'static str,
}

pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<ParsedTimestamp, ParserError> {
    parse_with_parsers(raw, tz, default_parsers())
}

pub fn parse_with_parsers(
    raw: &str,
    tz: Tz,
    parsers: &[&dyn TimestampParser],
) -> Result<ParsedTimestamp, ParserError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParserError::Empty);
    }

    let mut attempts = Vec::new();

    for parser in parsers {
        match parser.parse(trimmed, tz) {
            Ok(local) => {
                return Ok(ParsedTimestamp {
                    local,
                    parser: parser.name(),
                })
            }
            Err(ParserError::FormatMismatch { reason, .. }) => {
                attempts.push(ParserAttempt::new(parser.name(), reason));
            }
            Err(err) => return Err(err),
        }
    }

    Err(ParserError::NoMatchingParser {
        raw: raw.to_string(),
        attempts,
    })
}
