/*
 * generated.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The generated-line array
//!
//! A [`SourceMap`] mirrors the fully expanded compile unit line for line.
//! Entry `i` says which original file and 1-based line generated line `i`
//! (0-based) came from, or that it is SQL-generated text with no origin.
//!
//! Splice positions follow array-splice rules: a start past the end appends,
//! a negative start counts back from the end (stopping at the front), and a
//! removal running past the end removes what is there.

use serde::Serialize;

/// One line of the expanded compile unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedLine {
    pub path: String,
    /// 1-based line within `path`.
    pub line: i64,
    /// Inserted by the SQL precompiler; maps to nothing in `path`.
    pub is_sql: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceMap {
    lines: Vec<GeneratedLine>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[GeneratedLine] {
        &self.lines
    }

    /// The entry for 0-based generated line `index`.
    pub fn get(&self, index: i64) -> Option<&GeneratedLine> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.lines.get(index))
    }

    /// The original position of generated line `index`, unless it is absent
    /// or SQL-only.
    pub fn resolve(&self, index: i64) -> Option<&GeneratedLine> {
        self.get(index).filter(|line| !line.is_sql)
    }

    /// Inline `length` lines of `path` at `at`, numbered from 1.
    pub fn insert_file(&mut self, at: i64, path: &str, length: usize) {
        self.splice_in(at, path, length, false);
    }

    /// Insert `count` SQL-only lines attributed to `path` at `at`.
    pub fn insert_sql(&mut self, at: i64, path: &str, count: usize) {
        self.splice_in(at, path, count, true);
    }

    /// Delete `count` entries starting at `at`.
    pub fn remove(&mut self, at: i64, count: usize) {
        let start = self.clamp(at);
        let end = start.saturating_add(count).min(self.lines.len());
        tracing::trace!(at = start, count = end - start, "Removing generated lines");
        self.lines.drain(start..end);
    }

    fn splice_in(&mut self, at: i64, path: &str, count: usize, is_sql: bool) {
        let start = self.clamp(at);
        tracing::trace!(at = start, count, path, is_sql, "Inserting generated lines");
        let entries = (1..).take(count).map(|line| GeneratedLine {
            path: path.to_string(),
            line,
            is_sql,
        });
        self.lines.splice(start..start, entries);
    }

    fn clamp(&self, at: i64) -> usize {
        let len = self.lines.len();
        match usize::try_from(at) {
            Ok(at) => at.min(len),
            Err(_) => len.saturating_sub(usize::try_from(at.unsigned_abs()).unwrap_or(usize::MAX)),
        }
    }
}
