mod common;
mod naive;
mod offset;
mod utc;

pub use naive::NaiveLocalParser;
pub use offset::IsoOffsetParser;
pub use utc::{IsoUtcMillisParser, IsoUtcParser};

pub(crate) use common::{parse_date_time, split_date_time, strip_utc_designator, utc_to_local};
