/*
 * layout.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The record layout table.
//!
//! The listing is the wire format of an external compiler, so every column
//! offset and positional index is collected here as a named [`FieldSpec`]
//! constant. Record decoding only ever reads fields through these constants.
//!
//! Offsets are 0-based character columns. Positional tokens are 0-based
//! indexes into the space-separated pieces of the line, where index 0 is the
//! record tag itself.

use crate::record::RecordType;
use crate::tokenizer::ListingLine;

/// Where a field lives within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A fixed run of `width` characters starting at `offset`.
    Column { offset: usize, width: usize },
    /// Everything from `offset` to the end of the line.
    Rest { offset: usize },
    /// The n-th space-separated token.
    Token(usize),
}

/// A named field in a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn column(name: &'static str, offset: usize, width: usize) -> Self {
        FieldSpec {
            name,
            kind: FieldKind::Column { offset, width },
        }
    }

    pub const fn rest(name: &'static str, offset: usize) -> Self {
        FieldSpec {
            name,
            kind: FieldKind::Rest { offset },
        }
    }

    pub const fn token(name: &'static str, index: usize) -> Self {
        FieldSpec {
            name,
            kind: FieldKind::Token(index),
        }
    }

    /// Extract the raw (untrimmed) text of this field.
    ///
    /// Column fields always succeed because lines are padded. Token fields
    /// return `None` when the line has too few tokens.
    pub fn extract<'a>(&self, line: &'a ListingLine) -> Option<&'a str> {
        match self.kind {
            FieldKind::Column { offset, width } => Some(line.column(offset, width)),
            FieldKind::Rest { offset } => Some(line.rest_from(offset)),
            FieldKind::Token(index) => line.token(index),
        }
    }
}

/// Record type tag, columns 0-9.
pub const RECORD_TAG: FieldSpec = FieldSpec::column("record_type", 0, 10);

/// Source File ID, present at the same columns on every record.
pub const FILE_ID: FieldSpec = FieldSpec::column("file_id", 13, 3);

pub mod file_id {
    use super::FieldSpec;

    pub const FILE_ID: FieldSpec = super::FILE_ID;
    /// `000000` for a root unit; any other value marks an included member.
    pub const INCLUDE_MARKER: FieldSpec = FieldSpec::column("include_marker", 17, 6);
    /// 1-based line in the including file where this file's content begins.
    pub const LINE: FieldSpec = FieldSpec::token("line", 3);
    pub const NAME_LENGTH: FieldSpec = FieldSpec::token("name_length", 4);
    pub const NAME_TOKEN: FieldSpec = FieldSpec::token("name", 5);
    /// Start of the (possibly space-containing) file name.
    pub const NAME: FieldSpec = FieldSpec::rest("file_name", 28);

    /// Longest file name a single `FILEID` or `FILEIDCONT` record carries.
    pub const MAX_NAME_LENGTH: usize = 255;

    pub const FIELDS: &[FieldSpec] = &[FILE_ID, INCLUDE_MARKER, LINE, NAME_LENGTH, NAME_TOKEN, NAME];
}

pub mod file_id_cont {
    use super::FieldSpec;

    pub const FILE_ID: FieldSpec = super::FILE_ID;
    pub const NAME: FieldSpec = FieldSpec::rest("file_name", 28);

    pub const FIELDS: &[FieldSpec] = &[FILE_ID, NAME];
}

pub mod file_end {
    use super::FieldSpec;

    pub const FILE_ID: FieldSpec = super::FILE_ID;
    /// Number of lines the file contributed.
    pub const LENGTH: FieldSpec = FieldSpec::token("length", 3);

    pub const FIELDS: &[FieldSpec] = &[FILE_ID, LENGTH];
}

pub mod expansion {
    use super::FieldSpec;

    pub const FILE_ID: FieldSpec = super::FILE_ID;
    pub const DEFINED_START: FieldSpec = FieldSpec::token("defined_start", 3);
    pub const DEFINED_END: FieldSpec = FieldSpec::token("defined_end", 4);
    /// File ID of the unit the generated lines are spliced into.
    pub const ON: FieldSpec = FieldSpec::token("on", 5);
    pub const RANGE_START: FieldSpec = FieldSpec::token("range_start", 6);
    pub const RANGE_END: FieldSpec = FieldSpec::token("range_end", 7);

    pub const FIELDS: &[FieldSpec] = &[
        FILE_ID,
        DEFINED_START,
        DEFINED_END,
        ON,
        RANGE_START,
        RANGE_END,
    ];
}

pub mod error {
    use super::FieldSpec;

    pub const FILE_ID: FieldSpec = super::FILE_ID;
    pub const COLUMN_START: FieldSpec = FieldSpec::column("column_start", 33, 3);
    /// 1-based line as reported by the compiler.
    pub const LINE: FieldSpec = FieldSpec::column("line", 37, 6);
    pub const COLUMN_END: FieldSpec = FieldSpec::column("column_end", 44, 3);
    pub const CODE: FieldSpec = FieldSpec::column("code", 48, 7);
    pub const SEVERITY: FieldSpec = FieldSpec::column("severity", 58, 2);
    pub const TEXT: FieldSpec = FieldSpec::rest("text", 65);

    pub const FIELDS: &[FieldSpec] = &[
        FILE_ID,
        COLUMN_START,
        LINE,
        COLUMN_END,
        CODE,
        SEVERITY,
        TEXT,
    ];
}

/// The decoded fields of each record type.
///
/// Record types that carry no semantics for diagnostic mapping have an
/// empty layout.
pub fn fields(record: RecordType) -> &'static [FieldSpec] {
    match record {
        RecordType::FileId => file_id::FIELDS,
        RecordType::FileIdCont => file_id_cont::FIELDS,
        RecordType::FileEnd => file_end::FIELDS,
        RecordType::Expansion => expansion::FIELDS,
        RecordType::Error => error::FIELDS,
        RecordType::Processor => &[FILE_ID],
        _ => &[],
    }
}
