/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! # evfevent-listing
//!
//! Line-level decoding of the event listing a remote compiler writes next to
//! each compile (the `EVFEVENT` file).
//!
//! ## Overview
//!
//! The listing is a sequence of fixed-width text records. Each record starts
//! with a type tag in columns 0-9 and carries its payload either at fixed
//! columns or as space-separated positional tokens.
//!
//! 1. **Tokenizer** ([`tokenize`], [`tokenize_text`]): drops blank lines, strips
//!    trailing carriage returns and pads every line to [`LISTING_WIDTH`] so that
//!    fixed-column extraction never runs past the end of a line.
//! 2. **Layout table** ([`layout`]): one named [`FieldSpec`] per field per record
//!    type. This is the only place the column offsets live.
//! 3. **Records** ([`Record::decode`]): typed views over a classified line.
//! 4. **Formatting** ([`format_name`], [`format_ifs`]): turn the file names found in
//!    `FILEID` records into logical paths.
//!
//! ## Usage
//!
//! ```rust
//! use evfevent_listing::{tokenize_text, Record, RecordType};
//!
//! let listing = "PROCESSOR  0 000 1\r\n\r\nFILEEND    0 001 000010\r\n";
//! let lines = tokenize_text(listing);
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0].record_type(), Some(RecordType::Processor));
//!
//! match Record::decode(&lines[1]) {
//!     Ok(Record::FileEnd(end)) => assert_eq!(end.length, Some(10)),
//!     other => panic!("unexpected record: {:?}", other),
//! }
//! ```

pub mod error;
pub mod format;
pub mod layout;
pub mod record;
pub mod source_path;
pub mod tokenizer;

pub use error::{RecordError, Result};
pub use format::{format_ifs, format_name, logical_path};
pub use layout::{FieldKind, FieldSpec};
pub use record::{
    ErrorRecord, ExpansionRecord, FileEndRecord, FileId, FileIdContRecord, FileIdRecord, Record,
    RecordType,
};
pub use source_path::resolve_source_path;
pub use tokenizer::{LISTING_WIDTH, ListingLine, tokenize, tokenize_text};
