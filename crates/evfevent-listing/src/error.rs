/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for record decoding.

use thiserror::Error;

use crate::record::RecordType;

/// Errors that can occur while decoding a listing record.
///
/// None of these are fatal to a listing: callers skip the offending record
/// and carry on with the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A positional field the record type requires is not present.
    #[error("{record} record is missing field '{field}'")]
    MissingField {
        record: RecordType,
        field: &'static str,
    },

    /// The File ID holds something other than an integer.
    #[error("{record} record has non-numeric '{field}': {value:?}")]
    MalformedNumber {
        record: RecordType,
        field: &'static str,
        value: String,
    },
}

/// Result type for record decoding.
pub type Result<T> = std::result::Result<T, RecordError>;
