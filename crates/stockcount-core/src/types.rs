use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// One stored stock-count entry. `timestamp` is whatever the operator or device sent and is
/// never rewritten; exports work on a derived [`ExportRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockCountRecord {
    pub id: i64,
    pub session_id: i64,
    pub timestamp: String,
    pub item_code: String,
    pub item_description: Option<String>,
    pub counted_qty: RawQuantity,
    pub counted_location: String,
    pub bin_location_system: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSession {
    pub id: i64,
    pub owner_username: String,
    pub inventory_stage: i64,
}

/// Expected system quantity per item code.
pub type MasterQuantities = HashMap<String, SystemQuantity>;

/// Master quantity as stored. Reals keep their fraction; text that is not a number is kept
/// verbatim so the report shows what the master table holds.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemQuantity {
    Number(f64),
    Text(String),
}

impl SystemQuantity {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<i64> for SystemQuantity {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl fmt::Display for SystemQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(raw) => f.write_str(raw),
        }
    }
}

/// Counted quantity exactly as stored. SQLite does not enforce column types, so the value may
/// be text, a real number, or missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuantity(pub Option<String>);

impl RawQuantity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Some(value.into()))
    }

    /// Non-negative whole count; anything unreadable or negative means "no count entered" (0).
    pub fn coerce_count(&self) -> i64 {
        self.0
            .as_deref()
            .and_then(parse_quantity)
            .filter(|value| *value >= 0)
            .unwrap_or(0)
    }
}

impl From<i64> for RawQuantity {
    fn from(value: i64) -> Self {
        Self(Some(value.to_string()))
    }
}

/// Reads an integer, or a finite real truncated toward zero.
pub fn parse_quantity(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .filter(|value| value.abs() < i64::MAX as f64)
        .map(|value| value.trunc() as i64)
}

/// Enriched, normalized projection of a [`StockCountRecord`]. Lives for one export only.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub id: i64,
    pub session_id: i64,
    pub inventory_stage: i64,
    pub username: Option<String>,
    pub timestamp: String,
    pub item_code: String,
    pub item_description: Option<String>,
    pub counted_location: String,
    pub counted_qty: i64,
    pub system_qty: Option<SystemQuantity>,
    pub difference: Option<f64>,
    pub bin_location_system: Option<String>,
}

impl ExportRow {
    pub fn from_joined(record: &StockCountRecord, session: &CountSession) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            inventory_stage: session.inventory_stage,
            username: record.username.clone(),
            timestamp: record.timestamp.clone(),
            item_code: record.item_code.clone(),
            item_description: record.item_description.clone(),
            counted_location: record.counted_location.clone(),
            counted_qty: record.counted_qty.coerce_count(),
            system_qty: None,
            difference: None,
            bin_location_system: record.bin_location_system.clone(),
        }
    }
}

/// A per-row condition that was absorbed instead of failing the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    MalformedTimestamp { record_id: i64, raw: String },
    MissingSessionJoin { record_id: i64, session_id: i64 },
    MissingMasterQuantity { record_id: i64, item_code: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub total_records: usize,
    pub exported_rows: usize,
    pub excluded_missing_session: usize,
    pub passthrough_timestamps: usize,
    pub missing_master_quantity: usize,
}

impl ExportSummary {
    pub fn record_issue(&mut self, issue: &RowIssue) {
        match issue {
            RowIssue::MalformedTimestamp { .. } => self.passthrough_timestamps += 1,
            RowIssue::MissingSessionJoin { .. } => self.excluded_missing_session += 1,
            RowIssue::MissingMasterQuantity { .. } => self.missing_master_quantity += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counted_quantity_coercion() {
        assert_eq!(RawQuantity::from(10).coerce_count(), 10);
        assert_eq!(RawQuantity::new(" 7 ").coerce_count(), 7);
        assert_eq!(RawQuantity::new("3.9").coerce_count(), 3);
        assert_eq!(RawQuantity::new("-4").coerce_count(), 0);
        assert_eq!(RawQuantity::new("abc").coerce_count(), 0);
        assert_eq!(RawQuantity::new("NaN").coerce_count(), 0);
        assert_eq!(RawQuantity::default().coerce_count(), 0);
    }

    #[test]
    fn quantity_parsing_keeps_sign() {
        assert_eq!(parse_quantity("-2"), Some(-2));
        assert_eq!(parse_quantity("5.0"), Some(5));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("inf"), None);
    }

    #[test]
    fn system_quantity_keeps_fraction_and_text() {
        assert_eq!(SystemQuantity::parse("5.5"), SystemQuantity::Number(5.5));
        assert_eq!(SystemQuantity::parse(" 12 "), SystemQuantity::Number(12.0));
        assert_eq!(
            SystemQuantity::parse("pending"),
            SystemQuantity::Text("pending".to_string())
        );
        assert_eq!(SystemQuantity::parse("inf").as_number(), None);

        assert_eq!(SystemQuantity::Number(5.5).to_string(), "5.5");
        assert_eq!(SystemQuantity::from(5).to_string(), "5");
        assert_eq!(SystemQuantity::Text("pending".to_string()).to_string(), "pending");
    }
}
