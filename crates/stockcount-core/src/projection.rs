use polars::lazy::dsl::col;
use polars::prelude::*;

use crate::types::ExportRow;

/// Report column order. Every export carries exactly these columns.
pub const EXPORT_COLUMNS: [&str; 12] = [
    "id",
    "session_id",
    "inventory_stage",
    "username",
    "timestamp",
    "item_code",
    "item_description",
    "counted_location",
    "counted_qty",
    "system_qty",
    "difference",
    "bin_location_system",
];

/// Builds the tabular form of the enriched rows, keeping their order. `system_qty` is carried
/// as the stored text since the master table may hold non-numeric values.
pub fn rows_to_frame(rows: &[ExportRow]) -> PolarsResult<DataFrame> {
    df![
        "id" => rows.iter().map(|r| r.id).collect::<Vec<i64>>(),
        "session_id" => rows.iter().map(|r| r.session_id).collect::<Vec<i64>>(),
        "inventory_stage" => rows.iter().map(|r| r.inventory_stage).collect::<Vec<i64>>(),
        "username" => rows.iter().map(|r| r.username.clone()).collect::<Vec<Option<String>>>(),
        "timestamp" => rows.iter().map(|r| r.timestamp.clone()).collect::<Vec<String>>(),
        "item_code" => rows.iter().map(|r| r.item_code.clone()).collect::<Vec<String>>(),
        "item_description" => rows
            .iter()
            .map(|r| r.item_description.clone())
            .collect::<Vec<Option<String>>>(),
        "counted_location" => rows
            .iter()
            .map(|r| r.counted_location.clone())
            .collect::<Vec<String>>(),
        "counted_qty" => rows.iter().map(|r| r.counted_qty).collect::<Vec<i64>>(),
        "system_qty" => rows
            .iter()
            .map(|r| r.system_qty.as_ref().map(ToString::to_string))
            .collect::<Vec<Option<String>>>(),
        "difference" => rows.iter().map(|r| r.difference).collect::<Vec<Option<f64>>>(),
        "bin_location_system" => rows
            .iter()
            .map(|r| r.bin_location_system.clone())
            .collect::<Vec<Option<String>>>(),
    ]
}

/// Reorders `df` into [`EXPORT_COLUMNS`], synthesizing any absent column as all-null text and
/// dropping columns the report does not carry.
pub fn project_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let height = df.height();
    let mut frame = df.clone();

    for name in EXPORT_COLUMNS {
        if frame.column(name).is_err() {
            frame.with_column(Series::full_null(name.into(), height, &DataType::String))?;
        }
    }

    frame
        .lazy()
        .select(EXPORT_COLUMNS.iter().map(|name| col(*name)).collect::<Vec<_>>())
        .collect()
}
