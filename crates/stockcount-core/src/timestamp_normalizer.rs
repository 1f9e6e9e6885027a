use chrono_tz::Tz;
use stockcount_parser::{normalize_timestamp, NormalizedTimestamp};
use tracing::debug;

use crate::types::{ExportRow, RowIssue};

/// Replaces the row's timestamp with its normalized form, or keeps the raw value verbatim when
/// no parser recognizes it.
pub fn normalize_row_timestamp(row: ExportRow, tz: Tz) -> (ExportRow, Option<RowIssue>) {
    match normalize_timestamp(&row.timestamp, tz) {
        NormalizedTimestamp::Converted { value, .. } => (
            ExportRow {
                timestamp: value,
                ..row
            },
            None,
        ),
        NormalizedTimestamp::Unchanged { raw, reason } => {
            debug!(record_id = row.id, raw = %raw, %reason, "timestamp kept verbatim");
            let issue = RowIssue::MalformedTimestamp {
                record_id: row.id,
                raw: raw.clone(),
            };
            (ExportRow { timestamp: raw, ..row }, Some(issue))
        }
    }
}
