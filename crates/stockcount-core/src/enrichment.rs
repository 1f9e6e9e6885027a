use crate::types::{ExportRow, MasterQuantities, RowIssue};

/// Falls back to the session owner when the record carries no username.
pub fn enrich_username(row: ExportRow, owner_username: &str) -> ExportRow {
    if row.username.is_some() {
        return row;
    }
    ExportRow {
        username: Some(owner_username.to_string()),
        ..row
    }
}

/// Attaches the master quantity and the counted-minus-system difference.
///
/// A missing master entry leaves both fields empty; an empty cell is not the same signal as a
/// real system count of zero. A master value that is present but not numeric is kept as is
/// and only `difference` stays empty.
pub fn enrich_quantities(
    row: ExportRow,
    masters: &MasterQuantities,
) -> (ExportRow, Option<RowIssue>) {
    match masters.get(&row.item_code) {
        Some(system_qty) => {
            let difference = system_qty
                .as_number()
                .map(|system| row.counted_qty as f64 - system);
            (
                ExportRow {
                    system_qty: Some(system_qty.clone()),
                    difference,
                    ..row
                },
                None,
            )
        }
        None => {
            let issue = RowIssue::MissingMasterQuantity {
                record_id: row.id,
                item_code: row.item_code.clone(),
            };
            (
                ExportRow {
                    system_qty: None,
                    difference: None,
                    ..row
                },
                Some(issue),
            )
        }
    }
}
