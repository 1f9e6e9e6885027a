use chrono_tz::Tz;

use crate::errors::ParserError;
use crate::registry::parse_timestamp;

/// Canonical export layout: seconds precision, no fraction, no zone suffix.
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of normalizing one raw timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedTimestamp {
    Converted {
        value: String,
        parser: &'static str,
    },
    /// The raw value could not be parsed and must be carried through verbatim.
    Unchanged { raw: String, reason: ParserError },
}

impl NormalizedTimestamp {
    pub fn is_converted(&self) -> bool {
        matches!(self, NormalizedTimestamp::Converted { .. })
    }

    pub fn value(&self) -> &str {
        match self {
            NormalizedTimestamp::Converted { value, .. } => value,
            NormalizedTimestamp::Unchanged { raw, .. } => raw,
        }
    }

    pub fn into_value(self) -> String {
        match self {
            NormalizedTimestamp::Converted { value, .. } => value,
            NormalizedTimestamp::Unchanged { raw, .. } => raw,
        }
    }
}

/// Converts `raw` into `tz` wall-clock time formatted with [`OUTPUT_FORMAT`].
///
/// UTC-designated and offset-carrying strings are shifted into `tz`; naive strings are taken as
/// already local to `tz`. Anything else, including the empty string, comes back as
/// [`NormalizedTimestamp::Unchanged`] holding the original input.
pub fn normalize_timestamp(raw: &str, tz: Tz) -> NormalizedTimestamp {
    match parse_timestamp(raw, tz) {
        Ok(parsed) => NormalizedTimestamp::Converted {
            value: parsed.local.format(OUTPUT_FORMAT).to_string(),
            parser: parsed.parser,
        },
        Err(reason) => NormalizedTimestamp::Unchanged {
            raw: raw.to_string(),
            reason,
        },
    }
}

pub fn normalize_or_original(raw: &str, tz: Tz) -> String {
    normalize_timestamp(raw, tz).into_value()
}

pub fn parse_timezone(name: &str) -> Result<Tz, ParserError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ParserError::UnknownTimezone(name.to_string()))
}
