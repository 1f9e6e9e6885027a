use polars::prelude::*;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::error::{ExportError, Result};
use crate::types::{ExportSummary, SystemQuantity};

pub const DEFAULT_SHEET_NAME: &str = "Conteos";

// Text columns whose numeric values are written as number cells.
const NUMERIC_TEXT_COLUMNS: [&str; 1] = ["system_qty"];

/// Serialized report plus the counters gathered while building it.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub summary: ExportSummary,
}

/// Writes `df` as a single-sheet workbook: header row first, integers and reals as numbers,
/// nulls and empty strings as empty cells. An empty string and a null cannot be told apart
/// once serialized. Nothing is returned unless the whole workbook serialized.
pub fn write_xlsx(df: &DataFrame, sheet_name: &str) -> Result<Vec<u8>> {
    let last_row = df.height();
    if u32::try_from(last_row).is_err() {
        return Err(ExportError::TooManyRows(last_row));
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col_num =
            u16::try_from(col_idx).map_err(|_| ExportError::TooManyColumns(df.width()))?;
        worksheet.write_string(0, col_num, column.name().as_str())?;
        let numeric_text = NUMERIC_TEXT_COLUMNS.contains(&column.name().as_str());
        write_column(worksheet, col_num, column, numeric_text)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_column(
    worksheet: &mut Worksheet,
    col_num: u16,
    column: &Column,
    numeric_text: bool,
) -> Result<()> {
    match column.dtype() {
        DataType::Int64 => {
            let values = column.as_materialized_series().i64()?;
            for (idx, value) in values.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(data_row(idx), col_num, value as f64)?;
                }
            }
        }
        DataType::Float64 => {
            let values = column.as_materialized_series().f64()?;
            for (idx, value) in values.into_iter().enumerate() {
                if let Some(value) = value {
                    worksheet.write_number(data_row(idx), col_num, value)?;
                }
            }
        }
        DataType::String => {
            let values = column.as_materialized_series().str()?;
            for (idx, value) in values.into_iter().enumerate() {
                match value {
                    Some(value) if value.is_empty() => {}
                    Some(value) if numeric_text => match SystemQuantity::parse(value) {
                        SystemQuantity::Number(number) => {
                            worksheet.write_number(data_row(idx), col_num, number)?;
                        }
                        SystemQuantity::Text(_) => {
                            worksheet.write_string(data_row(idx), col_num, value)?;
                        }
                    },
                    Some(value) => {
                        worksheet.write_string(data_row(idx), col_num, value)?;
                    }
                    None => {}
                }
            }
        }
        DataType::Null => {}
        _ => {
            let as_text = column.cast(&DataType::String)?;
            write_column(worksheet, col_num, &as_text, numeric_text)?;
        }
    }
    Ok(())
}

// Row 0 holds the header; height was checked against u32 in `write_xlsx`.
fn data_row(idx: usize) -> u32 {
    idx as u32 + 1
}
