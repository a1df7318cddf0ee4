/*
 * tree.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The tree-based source mapper
//!
//! Builds a [`Forest`] and replays it into a [`SourceMap`]:
//!
//! 1. Copy members of the first processor are inlined at their absolute
//!    offsets, and errors recorded before any expansion are looked up.
//! 2. Each file's expansions are spliced into the map in listing order:
//!    inserted SQL lines, or removed original lines.
//! 3. Errors recorded after an expansion are looked up in the edited map.
//!    Those that land on SQL lines or past the end are dropped.
//!
//! The map is shared by every processor in the listing. Copy structure is
//! only materialized from the first one.

use evfevent_listing::{FileId, ListingLine};

use crate::diagnostic::{self, DiagnosticMap};
use crate::forest::{FileNode, Forest, Processor, RawError, build_forest};
use crate::generated::SourceMap;
use crate::strategy::Resolve;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeMapper;

impl Resolve for TreeMapper {
    fn resolve(&self, lines: &[ListingLine]) -> DiagnosticMap {
        let forest = build_forest(lines);
        let (diagnostics, source_map) = map_forest(&forest);
        tracing::debug!(
            processors = forest.processors.len(),
            generated_lines = source_map.len(),
            files = diagnostics.len(),
            "Resolved listing through source map"
        );
        diagnostics
    }
}

/// Resolve every error in `forest`, returning the diagnostics and the final
/// generated-line map.
pub fn map_forest(forest: &Forest) -> (DiagnosticMap, SourceMap) {
    let mut diagnostics = DiagnosticMap::new();
    let mut source_map = SourceMap::new();
    let mut done_parent = false;

    for processor in &forest.processors {
        for file in &processor.files {
            if !done_parent && file.id != FileId::BASE_UNIT {
                match processor.absolute_start(file) {
                    Some(at) => {
                        source_map.insert_file(at, &file.path, count(file.length.unwrap_or(0)))
                    }
                    None => tracing::debug!(file = %file.id, "Start unreadable, not inlined"),
                }
            }

            for error in file.errors.iter().filter(|error| !error.post_expansion) {
                if processor.files.len() == 1 || file.id == FileId::ROOT {
                    lookup(&source_map, error, &mut diagnostics);
                } else if let Some(path) = forest.true_paths.get(&file.id) {
                    let line = error.line.saturating_add(1);
                    diagnostic::push(&mut diagnostics, path, error.resolved_at(line));
                }
            }
        }

        for file in &processor.files {
            apply_expansions(processor, file, &mut source_map);

            for error in file.errors.iter().filter(|error| error.post_expansion) {
                lookup(&source_map, error, &mut diagnostics);
            }
        }

        done_parent = true;
    }

    (diagnostics, source_map)
}

fn apply_expansions(processor: &Processor, file: &FileNode, source_map: &mut SourceMap) {
    for expansion in &file.expansions {
        if expansion.range.is_placed() {
            let target = expansion.on.and_then(|on| processor.find(on));
            let Some((target, starts_at)) =
                target.and_then(|target| target.starts_at.map(|at| (target, at)))
            else {
                tracing::debug!(on = ?expansion.on, "Expansion targets unknown file");
                continue;
            };
            source_map.insert_sql(
                offset(starts_at, expansion.range.low),
                &target.path,
                count(expansion.range.len()),
            );
        } else if expansion.defined.is_placed() {
            let Some(starts_at) = file.starts_at else {
                tracing::debug!(file = %file.id, "Removal in file with unreadable start");
                continue;
            };
            source_map.remove(
                offset(starts_at, expansion.defined.low),
                count(expansion.defined.len()),
            );
        }
    }
}

/// Generated index of 0-based line `low` in a file starting at `starts_at`.
fn offset(starts_at: i64, low: i64) -> i64 {
    starts_at.saturating_add(low).saturating_add(1)
}

fn lookup(source_map: &SourceMap, error: &RawError, diagnostics: &mut DiagnosticMap) {
    match source_map.resolve(error.line) {
        Some(origin) => {
            diagnostic::push(diagnostics, &origin.path, error.resolved_at(origin.line));
        }
        None => tracing::debug!(line = error.line, code = %error.code, "Dropping unmapped error"),
    }
}

fn count(lines: i64) -> usize {
    usize::try_from(lines).unwrap_or(0)
}
