/*
 * line_range.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Inclusive line intervals

use evfevent_listing::FileId;

/// An inclusive line interval `[low, high]`.
///
/// Records where a copy member's lines land inside its including file, or
/// which lines an SQL expansion defined or generated. Bounds may be negative
/// when the listing leaves an interval unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub low: i64,
    pub high: i64,
    /// The file whose lines this range covers, when it came from a `FILEEND`.
    pub file_id: Option<FileId>,
}

impl LineRange {
    pub const fn new(low: i64, high: i64) -> Self {
        LineRange {
            low,
            high,
            file_id: None,
        }
    }

    pub fn with_high(self, high: i64) -> Self {
        LineRange { high, ..self }
    }

    pub fn tagged(self, file_id: FileId) -> Self {
        LineRange {
            file_id: Some(file_id),
            ..self
        }
    }

    /// Number of lines covered. Zero or negative for inverted ranges.
    pub fn len(&self) -> i64 {
        self.high.saturating_sub(self.low).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    pub fn contains(&self, line: i64) -> bool {
        line >= self.low && line <= self.high
    }

    /// True when `line` is at or after the low bound.
    pub fn is_after(&self, line: i64) -> bool {
        line >= self.low
    }

    /// Both bounds are set, i.e. not the listing's "unused" marker.
    pub fn is_placed(&self) -> bool {
        self.low >= 0 && self.high >= 0
    }
}
