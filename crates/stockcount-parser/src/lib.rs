pub mod errors;
pub mod formats;
mod normalize;
mod registry;

pub use errors::{ParserAttempt, ParserError};
pub use normalize::{
    normalize_or_original, normalize_timestamp, parse_timezone, NormalizedTimestamp,
    OUTPUT_FORMAT,
};
pub use registry::{
    default_parsers, parse_timestamp, parse_with_parsers, ParsedTimestamp, TimestampParser,
};
