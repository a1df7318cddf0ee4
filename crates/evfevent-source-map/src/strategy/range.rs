/*
 * range.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The range-based corrector
//!
//! A single pass over the listing. Each file keeps a list of [`LineRange`]s:
//! extents of nested copy members (from `FILEEND`) and precompiler inserts
//! (from `EXPANSION`). An error's line is corrected by subtracting the extent
//! of every range at or before it, in the order the ranges were recorded.
//!
//! Only the first range that encloses a line can change the file an error
//! is reported against, and overlapping ranges are not reconciled. The tree
//! strategy handles those listings; this one is kept for compatibility.

use std::collections::HashMap;

use evfevent_listing::{
    ErrorRecord, ExpansionRecord, FileEndRecord, FileId, FileIdRecord, ListingLine, Record,
    format_ifs, format_name, resolve_source_path,
};
use indexmap::IndexMap;

use crate::diagnostic::{DiagnosticMap, ResolvedDiagnostic};
use crate::line_range::LineRange;
use crate::strategy::Resolve;

/// Error texts and codes the SQL precompiler emits about its own output.
const NOISE_TEXT: &str = "name or indicator SQ";
const NOISE_CODE_PREFIX: &str = "SQL";

#[derive(Debug, Clone, Copy, Default)]
pub struct RangeCorrector;

impl Resolve for RangeCorrector {
    fn resolve(&self, lines: &[ListingLine]) -> DiagnosticMap {
        let mut state = Corrector::new(lines);
        for line in lines {
            match Record::decode(line) {
                Ok(record) => state.apply(record),
                Err(err) => tracing::debug!(%err, line = %line, "Skipping listing record"),
            }
        }
        state.finish()
    }
}

struct Corrector<'a> {
    lines: &'a [ListingLine],
    paths: IndexMap<FileId, String>,
    errors: HashMap<FileId, Vec<ResolvedDiagnostic>>,
    expansions: HashMap<FileId, Vec<LineRange>>,
    trackable: HashMap<FileId, bool>,
    file_parents: Vec<FileId>,
    // `None` for a `FILEID` whose line is unreadable.
    open_ranges: Vec<Option<LineRange>>,
}

impl<'a> Corrector<'a> {
    fn new(lines: &'a [ListingLine]) -> Self {
        Corrector {
            lines,
            paths: IndexMap::new(),
            errors: HashMap::new(),
            expansions: HashMap::new(),
            trackable: HashMap::new(),
            file_parents: Vec::new(),
            open_ranges: Vec::new(),
        }
    }

    fn apply(&mut self, record: Record) {
        match record {
            Record::FileId(record) => self.open_file(&record),
            Record::FileEnd(record) => self.close_file(&record),
            Record::Expansion(record) => self.add_expansion(&record),
            Record::Error(record) => self.add_error(&record),
            Record::Processor
            | Record::FileIdCont(_)
            | Record::Ignored(_)
            | Record::Unrecognized => {}
        }
    }

    fn open_file(&mut self, record: &FileIdRecord) {
        let id = record.file_id;
        if !self.paths.contains_key(&id) {
            let path = if record.name.ends_with(')') {
                format_name(&record.name)
            } else {
                let name = resolve_source_path(self.lines, id)
                    .unwrap_or_else(|| record.inline_name.clone());
                format_ifs(&name)
            };
            tracing::trace!(file = %id, %path, include = record.is_include(), "Registered file");

            self.paths.insert(id, path);
            self.errors.insert(id, Vec::new());
            self.expansions.insert(id, Vec::new());
            self.trackable.insert(id, record.is_include());
        }

        self.open_ranges.push(record.line.map(|line| LineRange::new(line, 0)));
        self.file_parents.push(id);
    }

    fn close_file(&mut self, record: &FileEndRecord) {
        let id = record.file_id;
        self.file_parents.pop();

        if self.trackable.get(&id) != Some(&true) {
            return;
        }
        let Some(open) = self.open_ranges.pop() else {
            return;
        };
        let (Some(open), Some(length)) = (open, record.length) else {
            tracing::debug!(file = %id, "Copy range with unreadable bounds");
            return;
        };

        let high = open.low.saturating_add(length).saturating_sub(1);
        let copy = open.with_high(high).tagged(id);
        // Copy extents only matter once a precompiler base unit exists.
        if !self.expansions.contains_key(&FileId::BASE_UNIT) || self.file_parents.len() < 2 {
            return;
        }
        let Some(&including) = self.file_parents.last() else {
            return;
        };
        if let Some(ranges) = self.expansions.get_mut(&including) {
            tracing::trace!(file = %id, into = %including, ?copy, "Recorded copy range");
            ranges.push(copy);
        }
    }

    fn add_expansion(&mut self, record: &ExpansionRecord) {
        let (Some(low), Some(high)) = (record.range_start, record.range_end) else {
            tracing::debug!(file = %record.file_id, "Expansion with unreadable range");
            return;
        };
        if let Some(ranges) = self.expansions.get_mut(&record.file_id) {
            ranges.push(LineRange::new(low, high));
        }
    }

    fn add_error(&mut self, record: &ErrorRecord) {
        if record.text.contains(NOISE_TEXT) || record.code.starts_with(NOISE_CODE_PREFIX) {
            tracing::trace!(code = %record.code, "Skipping precompiler noise");
            return;
        }

        let Some(line) = record.line else {
            tracing::debug!(file = %record.file_id, code = %record.code, "Error without a readable line");
            return;
        };
        let mut sqldiff: i64 = 0;
        let mut owner = None;
        for range in self.expansions.get(&record.file_id).into_iter().flatten() {
            if range.is_after(line) {
                if range.contains(line) {
                    sqldiff = sqldiff.saturating_add(range.high.saturating_sub(line));
                } else {
                    sqldiff = sqldiff.saturating_add(range.len());
                }
            } else if range.contains(line) {
                // Unreachable while `is_after` and `contains` share a low bound.
                sqldiff = sqldiff.saturating_add(range.low);
                owner = range.file_id;
                break;
            }
        }

        let corrected = if sqldiff > 0 { line.saturating_sub(sqldiff) } else { line };
        let owner = owner.unwrap_or(record.file_id);
        match self.errors.get_mut(&owner) {
            // Unreadable severity and columns read as 0.
            Some(errors) => errors.push(ResolvedDiagnostic {
                severity: record.severity.unwrap_or(0),
                line: corrected,
                column_start: record.column_start.unwrap_or(0),
                column_end: record.column_end.unwrap_or(0),
                text: record.text.clone(),
                code: record.code.clone(),
            }),
            None => tracing::debug!(file = %owner, "Error for unregistered file"),
        }
    }

    fn finish(mut self) -> DiagnosticMap {
        let mut map = DiagnosticMap::new();
        for (id, path) in self.paths {
            let Some(mut errors) = self.errors.remove(&id) else {
                continue;
            };
            if errors.is_empty() {
                continue;
            }
            errors.sort_by_key(|error| error.line);

            // Two File IDs can share a path; keep both lists.
            match map.get_mut(&path) {
                Some(existing) => {
                    existing.extend(errors);
                    existing.sort_by_key(|error| error.line);
                }
                None => {
                    map.insert(path, errors);
                }
            }
        }
        map
    }
}
