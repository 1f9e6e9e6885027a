mod support;

use calamine::Data;
use chrono_tz::America::Bogota;
use stockcount_core::outputs::DEFAULT_SHEET_NAME;
use stockcount_core::pipelines::{build_export, render_export};
use stockcount_core::projection::EXPORT_COLUMNS;
use stockcount_core::types::{MasterQuantities, RowIssue, SystemQuantity};
use stockcount_core::ExportError;
use support::{number, read_sheet, record, session, sheet_names, text};

fn mixed_format_records() -> Vec<stockcount_core::types::StockCountRecord> {
    vec![
        record(1, 1, "2025-11-28 15:09:54", "ITEM001", 10),
        record(2, 1, "2025-11-28T20:09:33.987Z", "ITEM002", 5),
        record(3, 1, "2025-11-28T15:00:00Z", "ITEM003", 2),
        record(4, 1, "", "ITEM004", 1),
        record(5, 1, "INVALID-DATE-STRING", "ITEM005", 1),
    ]
}

#[test]
fn mixed_batch_converts_three_and_passes_two_through() {
    let records = mixed_format_records();
    let sessions = [session(1, "user1", 1)];
    let batch = build_export(&records, &sessions, &MasterQuantities::new(), Bogota);

    assert_eq!(batch.rows.len(), 5);
    let timestamps: Vec<(i64, &str)> = batch
        .rows
        .iter()
        .map(|row| (row.id, row.timestamp.as_str()))
        .collect();
    assert_eq!(
        timestamps,
        [
            (5, "INVALID-DATE-STRING"),
            (4, ""),
            (3, "2025-11-28 10:00:00"),
            (2, "2025-11-28 15:09:33"),
            (1, "2025-11-28 15:09:54"),
        ]
    );
    assert_eq!(batch.summary.passthrough_timestamps, 2);
    assert_eq!(batch.summary.exported_rows, 5);

    // The stored records keep their raw timestamps.
    assert_eq!(records, mixed_format_records());
}

#[test]
fn rows_are_ordered_newest_first_regardless_of_input_order() {
    let records = vec![
        record(2, 1, "", "A", 1),
        record(9, 1, "", "B", 1),
        record(4, 1, "", "C", 1),
    ];
    let batch = build_export(&records, &[session(1, "u", 1)], &MasterQuantities::new(), Bogota);
    let ids: Vec<i64> = batch.rows.iter().map(|row| row.id).collect();
    assert_eq!(ids, [9, 4, 2]);
}

#[test]
fn records_without_session_are_excluded_and_counted() {
    let records = vec![record(1, 1, "", "A", 1), record(2, 42, "", "B", 1)];
    let batch = build_export(&records, &[session(1, "u", 3)], &MasterQuantities::new(), Bogota);

    assert_eq!(batch.rows.len(), 1);
    assert_eq!(batch.rows[0].id, 1);
    assert_eq!(batch.rows[0].inventory_stage, 3);
    assert_eq!(batch.summary.total_records, 2);
    assert_eq!(batch.summary.excluded_missing_session, 1);
    assert!(batch.issues.contains(&RowIssue::MissingSessionJoin {
        record_id: 2,
        session_id: 42,
    }));
}

#[test]
fn username_and_quantities_are_enriched() {
    let mut without_user = record(1, 7, "", "ITEM001", 10);
    without_user.username = None;
    let records = vec![without_user, record(2, 7, "", "ITEM404", 3)];
    let masters = MasterQuantities::from([("ITEM001".to_string(), SystemQuantity::from(5))]);

    let batch = build_export(&records, &[session(7, "owner7", 2)], &masters, Bogota);

    let item404 = &batch.rows[0];
    assert_eq!(item404.username.as_deref(), Some("user1"));
    assert_eq!(item404.system_qty, None);
    assert_eq!(item404.difference, None);

    let item001 = &batch.rows[1];
    assert_eq!(item001.username.as_deref(), Some("owner7"));
    assert_eq!(item001.system_qty, Some(SystemQuantity::Number(5.0)));
    assert_eq!(item001.difference, Some(5.0));

    assert_eq!(batch.summary.missing_master_quantity, 1);
}

#[test]
fn rendered_workbook_has_header_and_typed_cells() {
    let records = vec![record(1, 1, "2025-11-28T20:09:33.987Z", "ITEM001", 10)];
    let masters = MasterQuantities::from([("ITEM001".to_string(), SystemQuantity::from(5))]);
    let batch = build_export(&records, &[session(1, "user1", 1)], &masters, Bogota);

    let artifact = render_export(&batch, DEFAULT_SHEET_NAME).expect("render");
    assert_eq!(sheet_names(&artifact.bytes), ["Conteos"]);

    let rows = read_sheet(&artifact.bytes, "Conteos");
    assert_eq!(rows.len(), 2);
    let header: Vec<Data> = EXPORT_COLUMNS.iter().map(|name| text(name)).collect();
    assert_eq!(rows[0], header);
    assert_eq!(
        rows[1],
        [
            number(1),
            number(1),
            number(1),
            text("user1"),
            text("2025-11-28 15:09:33"),
            text("ITEM001"),
            text("ITEM001 description"),
            text("LOC1"),
            number(10),
            number(5),
            number(5),
            text("BIN1"),
        ]
    );
}

#[test]
fn missing_master_quantity_leaves_cells_empty() {
    let batch = build_export(
        &[record(1, 1, "", "ITEM404", 10)],
        &[session(1, "user1", 1)],
        &MasterQuantities::new(),
        Bogota,
    );
    let artifact = render_export(&batch, "Conteos").expect("render");
    let rows = read_sheet(&artifact.bytes, "Conteos");

    assert_eq!(rows[1][4], Data::Empty);
    assert_eq!(rows[1][8], number(10));
    assert_eq!(rows[1][9], Data::Empty);
    assert_eq!(rows[1][10], Data::Empty);
}

#[test]
fn control_characters_are_replaced_in_the_workbook() {
    let mut dirty = record(1, 1, "", "ITEM\u{1}001", 1);
    dirty.item_description = Some("tab\tkept\u{0B}vt".to_string());
    let batch = build_export(&[dirty], &[session(1, "user1", 1)], &MasterQuantities::new(), Bogota);

    let artifact = render_export(&batch, "Conteos").expect("render");
    let rows = read_sheet(&artifact.bytes, "Conteos");
    assert_eq!(rows[1][5], text("ITEM 001"));
    assert_eq!(rows[1][6], text("tab\tkept vt"));
}

#[test]
fn empty_export_is_a_header_only_sheet() {
    let batch = build_export(&[], &[], &MasterQuantities::new(), Bogota);
    assert!(batch.rows.is_empty());

    let artifact = render_export(&batch, "Conteos").expect("render");
    let rows = read_sheet(&artifact.bytes, "Conteos");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), EXPORT_COLUMNS.len());
    assert_eq!(rows[0][0], text("id"));
    assert_eq!(rows[0][11], text("bin_location_system"));
}

#[test]
fn invalid_sheet_name_fails_the_whole_export() {
    let batch = build_export(
        &[record(1, 1, "", "A", 1)],
        &[session(1, "user1", 1)],
        &MasterQuantities::new(),
        Bogota,
    );
    let err = render_export(&batch, "bad/name").unwrap_err();
    assert!(matches!(err, ExportError::Serialization(_)));
}
