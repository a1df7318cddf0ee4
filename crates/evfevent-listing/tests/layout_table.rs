/*
 * layout_table.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Pins the fixed-column record layout.
//!
//! The offsets belong to the compiler's listing format, so any change here
//! is a wire-format change and should show up as a snapshot diff.

use evfevent_listing::layout::fields;
use evfevent_listing::{FieldKind, RecordType};

fn render(record: RecordType) -> String {
    let fields = fields(record)
        .iter()
        .map(|field| match field.kind {
            FieldKind::Column { offset, width } => format!("{}@{}+{}", field.name, offset, width),
            FieldKind::Rest { offset } => format!("{}@{}..", field.name, offset),
            FieldKind::Token(index) => format!("{}#{}", field.name, index),
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{record}: {fields}")
}

#[test]
fn test_record_layouts() {
    let table = [
        RecordType::FileId,
        RecordType::FileIdCont,
        RecordType::FileEnd,
        RecordType::Expansion,
        RecordType::Error,
    ]
    .into_iter()
    .map(render)
    .collect::<Vec<_>>()
    .join("\n");

    insta::assert_snapshot!(table, @r"
    FILEID: file_id@13+3 include_marker@17+6 line#3 name_length#4 name#5 file_name@28..
    FILEIDCONT: file_id@13+3 file_name@28..
    FILEEND: file_id@13+3 length#3
    EXPANSION: file_id@13+3 defined_start#3 defined_end#4 on#5 range_start#6 range_end#7
    ERROR: file_id@13+3 column_start@33+3 line@37+6 column_end@44+3 code@48+7 severity@58+2 text@65..
    ");
}
