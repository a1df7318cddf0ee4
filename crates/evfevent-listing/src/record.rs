/*
 * record.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Record classification and typed record views.

use std::fmt;
use std::str::FromStr;

use crate::error::{RecordError, Result};
use crate::layout::{self, FieldSpec};
use crate::tokenizer::ListingLine;

/// Numeric source file identifier, unique within one processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    /// The conventional root member of a compile.
    pub const ROOT: FileId = FileId(1);
    /// The synthetic translation unit an SQL precompiler emits.
    pub const BASE_UNIT: FileId = FileId(999);
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Every record tag the listing format defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Timestamp,
    Processor,
    FileId,
    FileIdCont,
    FileEnd,
    Error,
    Expansion,
    Program,
    MapDefine,
    MapStart,
    MapEnd,
    Feedback,
}

impl RecordType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let record = match tag {
            "TIMESTAMP" => RecordType::Timestamp,
            "PROCESSOR" => RecordType::Processor,
            "FILEID" => RecordType::FileId,
            "FILEIDCONT" => RecordType::FileIdCont,
            "FILEEND" => RecordType::FileEnd,
            "ERROR" => RecordType::Error,
            "EXPANSION" => RecordType::Expansion,
            "PROGRAM" => RecordType::Program,
            "MAPDEFINE" => RecordType::MapDefine,
            "MAPSTART" => RecordType::MapStart,
            "MAPEND" => RecordType::MapEnd,
            "FEEDBACK" => RecordType::Feedback,
            _ => return None,
        };
        Some(record)
    }

    pub fn tag(self) -> &'static str {
        match self {
            RecordType::Timestamp => "TIMESTAMP",
            RecordType::Processor => "PROCESSOR",
            RecordType::FileId => "FILEID",
            RecordType::FileIdCont => "FILEIDCONT",
            RecordType::FileEnd => "FILEEND",
            RecordType::Error => "ERROR",
            RecordType::Expansion => "EXPANSION",
            RecordType::Program => "PROGRAM",
            RecordType::MapDefine => "MAPDEFINE",
            RecordType::MapStart => "MAPSTART",
            RecordType::MapEnd => "MAPEND",
            RecordType::Feedback => "FEEDBACK",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A `FILEID` record: a source unit starts contributing lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdRecord {
    pub file_id: FileId,
    /// Raw columns 17-22. `000000` means the unit is not an include.
    pub include_marker: String,
    /// 1-based line in the including unit where this unit starts.
    pub line: Option<i64>,
    /// Declared length of the full file name, which may exceed one record.
    pub name_length: Option<i64>,
    /// The file name as a single positional token.
    pub name: String,
    /// The part of the file name carried by this record (at most 255 characters).
    pub inline_name: String,
}

impl FileIdRecord {
    pub fn is_include(&self) -> bool {
        self.include_marker != "000000"
    }

    /// 0-based offset within the parent at which this unit's content begins.
    pub fn starts_at(&self) -> Option<i64> {
        self.line.map(|line| line.saturating_sub(1))
    }
}

/// A `FILEIDCONT` record: continuation of a long `FILEID` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdContRecord {
    pub file_id: FileId,
    /// Untrimmed text from the name column to the end of the line.
    pub fragment: String,
}

/// A `FILEEND` record: the matching `FILEID` unit is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEndRecord {
    pub file_id: FileId,
    pub length: Option<i64>,
}

/// An `EXPANSION` record. All bounds are raw 1-based values; `0` marks an
/// unused interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionRecord {
    pub file_id: FileId,
    pub defined_start: Option<i64>,
    pub defined_end: Option<i64>,
    pub on: Option<FileId>,
    pub range_start: Option<i64>,
    pub range_end: Option<i64>,
}

/// An `ERROR` record as reported by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub file_id: FileId,
    pub severity: Option<u32>,
    /// 1-based line number.
    pub line: Option<i64>,
    pub column_start: Option<i64>,
    pub column_end: Option<i64>,
    pub code: String,
    pub text: String,
}

/// A decoded listing line.
///
/// Numeric fields other than File IDs are `None` when the listing leaves
/// them out or they do not parse. The record itself is still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Processor,
    FileId(FileIdRecord),
    FileIdCont(FileIdContRecord),
    FileEnd(FileEndRecord),
    Expansion(ExpansionRecord),
    Error(ErrorRecord),
    /// A known tag with no bearing on diagnostic mapping.
    Ignored(RecordType),
    /// A tag outside the format.
    Unrecognized,
}

impl Record {
    /// Decode one padded listing line through the layout table.
    pub fn decode(line: &ListingLine) -> Result<Record> {
        let Some(record) = line.record_type() else {
            return Ok(Record::Unrecognized);
        };

        let decoded = match record {
            RecordType::Processor => Record::Processor,
            RecordType::FileId => {
                use layout::file_id as f;
                let name_length: Option<i64> = number(line, record, f::NAME_LENGTH);
                let inline_length = name_length
                    .and_then(|length| usize::try_from(length).ok())
                    .unwrap_or(0)
                    .min(f::MAX_NAME_LENGTH);
                Record::FileId(FileIdRecord {
                    file_id: file_id(line, record, f::FILE_ID)?,
                    include_marker: text(line, record, f::INCLUDE_MARKER)?.to_string(),
                    line: number(line, record, f::LINE),
                    name_length,
                    name: text(line, record, f::NAME_TOKEN)?.to_string(),
                    inline_name: text(line, record, f::NAME)?
                        .chars()
                        .take(inline_length)
                        .collect(),
                })
            }
            RecordType::FileIdCont => {
                use layout::file_id_cont as f;
                Record::FileIdCont(FileIdContRecord {
                    file_id: file_id(line, record, f::FILE_ID)?,
                    fragment: text(line, record, f::NAME)?.to_string(),
                })
            }
            RecordType::FileEnd => {
                use layout::file_end as f;
                Record::FileEnd(FileEndRecord {
                    file_id: file_id(line, record, f::FILE_ID)?,
                    length: number(line, record, f::LENGTH),
                })
            }
            RecordType::Expansion => {
                use layout::expansion as f;
                Record::Expansion(ExpansionRecord {
                    file_id: file_id(line, record, f::FILE_ID)?,
                    defined_start: number(line, record, f::DEFINED_START),
                    defined_end: number(line, record, f::DEFINED_END),
                    on: number(line, record, f::ON).map(FileId),
                    range_start: number(line, record, f::RANGE_START),
                    range_end: number(line, record, f::RANGE_END),
                })
            }
            RecordType::Error => {
                use layout::error as f;
                Record::Error(ErrorRecord {
                    file_id: file_id(line, record, f::FILE_ID)?,
                    severity: number(line, record, f::SEVERITY),
                    line: number(line, record, f::LINE),
                    column_start: number(line, record, f::COLUMN_START),
                    column_end: number(line, record, f::COLUMN_END),
                    code: text(line, record, f::CODE)?.trim().to_string(),
                    text: text(line, record, f::TEXT)?.trim().to_string(),
                })
            }
            other => Record::Ignored(other),
        };

        Ok(decoded)
    }
}

fn text<'a>(line: &'a ListingLine, record: RecordType, spec: FieldSpec) -> Result<&'a str> {
    spec.extract(line).ok_or(RecordError::MissingField {
        record,
        field: spec.name,
    })
}

/// Numeric fields follow the listing convention: blank reads as zero. A
/// missing or unparsable field is `None`.
fn number<T>(line: &ListingLine, record: RecordType, spec: FieldSpec) -> Option<T>
where
    T: FromStr + Default,
{
    let Some(raw) = spec.extract(line).map(str::trim) else {
        tracing::trace!(%record, field = spec.name, "Numeric field missing");
        return None;
    };
    if raw.is_empty() {
        return Some(T::default());
    }
    let value = raw.parse().ok();
    if value.is_none() {
        tracing::trace!(%record, field = spec.name, raw, "Numeric field unreadable");
    }
    value
}

/// The File ID keys the record, so an unreadable one rejects it.
fn file_id(line: &ListingLine, record: RecordType, spec: FieldSpec) -> Result<FileId> {
    let raw = text(line, record, spec)?.trim();
    if raw.is_empty() {
        return Ok(FileId(0));
    }
    raw.parse().map(FileId).map_err(|_| RecordError::MalformedNumber {
        record,
        field: spec.name,
        value: raw.to_string(),
    })
}
