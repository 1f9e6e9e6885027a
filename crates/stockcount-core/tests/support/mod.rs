#![allow(dead_code)]

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use stockcount_core::types::{CountSession, RawQuantity, StockCountRecord};

pub fn record(id: i64, session_id: i64, timestamp: &str, item_code: &str, qty: i64) -> StockCountRecord {
    StockCountRecord {
        id,
        session_id,
        timestamp: timestamp.to_string(),
        item_code: item_code.to_string(),
        item_description: Some(format!("{item_code} description")),
        counted_qty: RawQuantity::from(qty),
        counted_location: format!("LOC{id}"),
        bin_location_system: Some(format!("BIN{id}")),
        username: Some("user1".to_string()),
    }
}

pub fn session(id: i64, owner: &str, stage: i64) -> CountSession {
    CountSession {
        id,
        owner_username: owner.to_string(),
        inventory_stage: stage,
    }
}

/// Reads the named sheet back into rows of cells.
pub fn read_sheet(bytes: &[u8], sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec())).expect("open workbook");
    let range = workbook.worksheet_range(sheet).expect("worksheet");
    range.rows().map(|row| row.to_vec()).collect()
}

pub fn sheet_names(bytes: &[u8]) -> Vec<String> {
    let workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec())).expect("open workbook");
    workbook.sheet_names()
}

pub fn text(value: &str) -> Data {
    Data::String(value.to_string())
}

pub fn number(value: i64) -> Data {
    Data::Float(value as f64)
}
