/*
 * forest.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The processor / file-node forest built from a listing
//!
//! Each `PROCESSOR` record opens a new [`Processor`]. Within it, every
//! `FILEID` opens a [`FileNode`] whose parent is whatever file is on top of
//! the inclusion stack at that moment, and the matching `FILEEND` closes it.
//! Expansions and errors are attached to the node for their File ID without
//! any correction; that happens later in [`crate::strategy::tree`].

use std::collections::HashMap;

use evfevent_listing::{
    ErrorRecord, ExpansionRecord, FileEndRecord, FileId, FileIdRecord, ListingLine, Record,
    logical_path,
};

use crate::diagnostic::ResolvedDiagnostic;
use crate::line_range::LineRange;

/// An SQL precompiler edit. Both intervals are 0-based; `-1` marks an
/// interval the listing left unused or unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// The file whose generated lines the edit applies to.
    pub on: Option<FileId>,
    /// Original lines the edit represents or removes.
    pub defined: LineRange,
    /// Generated lines the edit inserted.
    pub range: LineRange,
}

impl From<&ExpansionRecord> for Expansion {
    fn from(record: &ExpansionRecord) -> Self {
        Expansion {
            on: record.on,
            defined: interval(record.defined_start, record.defined_end),
            range: interval(record.range_start, record.range_end),
        }
    }
}

fn interval(start: Option<i64>, end: Option<i64>) -> LineRange {
    match (start, end) {
        (Some(start), Some(end)) => LineRange::new(start.saturating_sub(1), end.saturating_sub(1)),
        _ => LineRange::new(-1, -1),
    }
}

/// An error as the listing reported it, before source mapping.
///
/// An unreadable severity or column reads as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawError {
    pub severity: u32,
    /// 0-based line in the unit the compiler saw.
    pub line: i64,
    pub column_start: i64,
    pub column_end: i64,
    pub code: String,
    pub text: String,
    /// Recorded after an `EXPANSION` in the same processor.
    pub post_expansion: bool,
}

impl RawError {
    /// `None` when the record's line is unreadable.
    fn from_record(record: &ErrorRecord, post_expansion: bool) -> Option<Self> {
        Some(RawError {
            severity: record.severity.unwrap_or(0),
            line: record.line?.saturating_sub(1),
            column_start: record.column_start.unwrap_or(0),
            column_end: record.column_end.unwrap_or(0),
            code: record.code.clone(),
            text: record.text.clone(),
            post_expansion,
        })
    }

    /// This error positioned at 1-based `line` of its resolved file.
    pub fn resolved_at(&self, line: i64) -> ResolvedDiagnostic {
        ResolvedDiagnostic {
            severity: self.severity,
            line,
            column_start: self.column_start,
            column_end: self.column_end,
            text: self.text.clone(),
            code: self.code.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub id: FileId,
    /// Top of the inclusion stack when this file opened.
    pub parent: Option<FileId>,
    /// 0-based offset within the parent where this file's content begins.
    /// `None` when the `FILEID` line is unreadable.
    pub starts_at: Option<i64>,
    /// Line count, known once the matching `FILEEND` is seen.
    pub length: Option<i64>,
    pub path: String,
    pub errors: Vec<RawError>,
    pub expansions: Vec<Expansion>,
}

impl FileNode {
    fn open(record: &FileIdRecord, parent: Option<FileId>) -> Self {
        FileNode {
            id: record.file_id,
            parent,
            starts_at: record.starts_at(),
            length: None,
            path: logical_path(&record.name),
            errors: Vec::new(),
            expansions: Vec::new(),
        }
    }
}

/// One compile step's file nodes, in `FILEID` order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Processor {
    pub files: Vec<FileNode>,
}

impl Processor {
    /// The first node with `id`.
    pub fn find(&self, id: FileId) -> Option<&FileNode> {
        self.files.iter().find(|file| file.id == id)
    }

    fn find_mut(&mut self, id: FileId) -> Option<&mut FileNode> {
        self.files.iter_mut().find(|file| file.id == id)
    }

    /// Offset of `file` in the fully inlined unit, or `None` when its own
    /// start is unreadable.
    ///
    /// Adds `starts_at + 1` for the file and for each ancestor, stopping at
    /// the first ancestor that does not start inside a parent.
    pub fn absolute_start(&self, file: &FileNode) -> Option<i64> {
        let mut start = file.starts_at?.saturating_add(1);
        let mut current = file.parent.and_then(|id| self.find(id));
        // A malformed listing can make a file its own ancestor.
        let mut hops = 0;
        while let Some(parent) = current {
            let Some(parent_start) = parent.starts_at.filter(|at| *at >= 0) else {
                break;
            };
            if hops >= self.files.len() {
                break;
            }
            start = start.saturating_add(parent_start.saturating_add(1));
            current = parent.parent.and_then(|id| self.find(id));
            hops += 1;
        }
        Some(start)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    pub processors: Vec<Processor>,
    /// Logical path of each File ID, first `FILEID` wins.
    pub true_paths: HashMap<FileId, String>,
}

/// Build the forest in one pass over the listing.
///
/// Records outside any processor only register their file path. Records
/// that fail to decode are skipped.
pub fn build_forest(lines: &[ListingLine]) -> Forest {
    let mut builder = ForestBuilder::default();
    for line in lines {
        match Record::decode(line) {
            Ok(record) => builder.apply(record),
            Err(err) => tracing::debug!(%err, line = %line, "Skipping listing record"),
        }
    }
    builder.finish()
}

#[derive(Default)]
struct ForestBuilder {
    forest: Forest,
    current: Option<Processor>,
    // Survives PROCESSOR records.
    parent_ids: Vec<FileId>,
    expanded: bool,
}

impl ForestBuilder {
    fn apply(&mut self, record: Record) {
        match record {
            Record::Processor => {
                self.expanded = false;
                if let Some(done) = self.current.take() {
                    self.forest.processors.push(done);
                }
                self.current = Some(Processor::default());
            }
            Record::FileId(record) => self.open_file(&record),
            Record::FileEnd(record) => self.close_file(&record),
            Record::Expansion(record) => self.add_expansion(&record),
            Record::Error(record) => self.add_error(&record),
            Record::FileIdCont(_) | Record::Ignored(_) | Record::Unrecognized => {}
        }
    }

    fn open_file(&mut self, record: &FileIdRecord) {
        let node = FileNode::open(record, self.parent_ids.last().copied());
        self.forest
            .true_paths
            .entry(record.file_id)
            .or_insert_with(|| node.path.clone());

        if let Some(processor) = self.current.as_mut() {
            tracing::trace!(
                file = %node.id,
                parent = ?node.parent,
                starts_at = ?node.starts_at,
                path = %node.path,
                "Opened file node"
            );
            processor.files.push(node);
            self.parent_ids.push(record.file_id);
        }
    }

    fn close_file(&mut self, record: &FileEndRecord) {
        if let Some(processor) = self.current.as_mut() {
            if let Some(file) = processor.find_mut(record.file_id) {
                file.length = record.length;
            }
            self.parent_ids.pop();
        }
    }

    fn add_expansion(&mut self, record: &ExpansionRecord) {
        self.expanded = true;
        let Some(processor) = self.current.as_mut() else {
            return;
        };

        let index = processor
            .files
            .iter()
            .position(|file| file.id == record.file_id)
            .or_else(|| {
                // Unknown ids fall back to the node at the index named by
                // the open parent's id.
                let parent = self.parent_ids.last()?;
                let index = usize::try_from(parent.0).ok()?;
                (index < processor.files.len()).then_some(index)
            });

        match index {
            Some(index) => {
                let expansion = Expansion::from(record);
                tracing::trace!(file = %processor.files[index].id, ?expansion, "Recorded expansion");
                processor.files[index].expansions.push(expansion);
            }
            None => tracing::debug!(file = %record.file_id, "Expansion for unknown file"),
        }
    }

    fn add_error(&mut self, record: &ErrorRecord) {
        let post_expansion = self.expanded;
        let Some(file) = self
            .current
            .as_mut()
            .and_then(|processor| processor.find_mut(record.file_id))
        else {
            return;
        };
        match RawError::from_record(record, post_expansion) {
            Some(error) => file.errors.push(error),
            None => tracing::debug!(file = %record.file_id, code = %record.code, "Error without a readable line"),
        }
    }

    fn finish(mut self) -> Forest {
        if let Some(done) = self.current.take() {
            self.forest.processors.push(done);
        }
        self.forest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evfevent_listing::tokenize;

    fn forest(lines: &[&str]) -> Forest {
        build_forest(&tokenize(lines))
    }

    #[test]
    fn test_nested_file_nodes() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "FILEID     0 002 000003 015 MYLIB/QCPY(CPY) 20230101120000 0",
            "FILEEND    0 002 000004",
            "FILEEND    0 001 000010",
        ]);

        assert_eq!(forest.processors.len(), 1);
        let processor = &forest.processors[0];
        assert_eq!(processor.files.len(), 2);

        let root = processor.find(FileId(1)).unwrap();
        assert_eq!(root.parent, None);
        assert_eq!(root.starts_at, Some(-1));
        assert_eq!(root.length, Some(10));
        assert_eq!(root.path, "MYLIB/MYFILE/MYMBR");

        let copy = processor.find(FileId(2)).unwrap();
        assert_eq!(copy.parent, Some(FileId(1)));
        assert_eq!(copy.starts_at, Some(2));
        assert_eq!(copy.length, Some(4));
        assert_eq!(processor.absolute_start(copy), Some(3));
    }

    #[test]
    fn test_absolute_start_walks_ancestors() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "FILEID     0 002 000005 015 MYLIB/QCPY(CPA) 20230101120000 0",
            "FILEID     0 003 000002 015 MYLIB/QCPY(CPB) 20230101120000 0",
            "FILEEND    0 003 000001",
            "FILEEND    0 002 000003",
            "FILEEND    0 001 000010",
        ]);
        let processor = &forest.processors[0];
        let inner = processor.find(FileId(3)).unwrap();
        assert_eq!(inner.parent, Some(FileId(2)));
        // 2 (own) + 5 (CPA) and the root stops the walk.
        assert_eq!(processor.absolute_start(inner), Some(7));
    }

    #[test]
    fn test_errors_flag_post_expansion() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 999 000000 010 /tmp/out.c 20230101120000 0",
            "ERROR      0 999 1 000002 000002 001 000002 010 RNF1234 S 30 006 before",
            "EXPANSION  0 999 000000 000000 999 000001 000002",
            "ERROR      0 999 1 000004 000004 001 000004 010 RNF1234 S 30 005 after",
            "FILEEND    0 999 000010",
            "PROCESSOR  0 000 2",
            "FILEID     0 001 000000 010 /tmp/out.c 20230101120000 0",
            "ERROR      0 001 1 000003 000003 001 000003 010 RNF1234 S 30 005 fresh",
            "FILEEND    0 001 000010",
        ]);

        let first = &forest.processors[0].files[0];
        assert_eq!(first.errors.len(), 2);
        assert!(!first.errors[0].post_expansion);
        assert_eq!(first.errors[0].line, 1);
        assert!(first.errors[1].post_expansion);
        assert_eq!(first.expansions.len(), 1);
        assert_eq!(first.expansions[0].range, LineRange::new(0, 1));
        assert!(!first.expansions[0].defined.is_placed());

        // A new processor resets the flag.
        let second = &forest.processors[1].files[0];
        assert!(!second.errors[0].post_expansion);
    }

    #[test]
    fn test_records_outside_a_processor_only_register_paths() {
        let forest = forest(&[
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "ERROR      0 001 1 000005 000005 001 000005 010 RNF1234 S 30 004 lost",
            "FILEEND    0 001 000010",
        ]);
        assert!(forest.processors.is_empty());
        assert_eq!(
            forest.true_paths.get(&FileId(1)).map(String::as_str),
            Some("MYLIB/MYFILE/MYMBR")
        );
    }

    #[test]
    fn test_first_path_wins() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 010 /a/./one.c 20230101120000 0",
            "FILEEND    0 001 000001",
            "PROCESSOR  0 000 2",
            "FILEID     0 001 000000 006 /two.c 20230101120000 0",
            "FILEEND    0 001 000001",
        ]);
        assert_eq!(forest.true_paths[&FileId(1)], "/a/one.c");
        assert_eq!(forest.processors[1].files[0].path, "/two.c");
    }

    #[test]
    fn test_unreadable_file_end_length_still_closes_the_file() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "FILEID     0 002 000003 015 MYLIB/QCPY(CPY) 20230101120000 0",
            "FILEEND    0 002 0x0004",
            "FILEID     0 003 000006 015 MYLIB/QCPY(TWO) 20230101120000 0",
            "FILEEND    0 003 000002",
            "FILEEND    0 001 000010",
        ]);
        let processor = &forest.processors[0];
        assert_eq!(processor.find(FileId(2)).unwrap().length, None);
        // CPY was popped, so TWO opens inside the root.
        assert_eq!(processor.find(FileId(3)).unwrap().parent, Some(FileId(1)));
    }

    #[test]
    fn test_unreadable_error_fields() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "ERROR      0 001 1 000005 000005 0x2 000005 018 RNF1234 S 3x 016 Undefined symbol",
            "ERROR      0 001 1 000005 00000x 001 00000x 018 RNF1234 S 30 007 No line",
            "FILEEND    0 001 000010",
        ]);
        let errors = &forest.processors[0].files[0].errors;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 4);
        assert_eq!(errors[0].column_start, 0);
        assert_eq!(errors[0].column_end, 18);
        assert_eq!(errors[0].severity, 0);
    }

    #[test]
    fn test_absolute_start_saturates() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "FILEID     0 002 9223372036854775807 015 MYLIB/QCPY(CPA) 20230101120000 0",
            "FILEID     0 003 9223372036854775807 015 MYLIB/QCPY(CPB) 20230101120000 0",
            "FILEEND    0 003 000001",
            "FILEEND    0 002 000001",
            "FILEEND    0 001 000010",
        ]);
        let processor = &forest.processors[0];
        let inner = processor.find(FileId(3)).unwrap();
        assert_eq!(processor.absolute_start(inner), Some(i64::MAX));
    }

    #[test]
    fn test_unreadable_file_start() {
        let forest = forest(&[
            "PROCESSOR  0 000 1",
            "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
            "FILEID     0 002 00000x 015 MYLIB/QCPY(CPY) 20230101120000 0",
            "FILEEND    0 002 000004",
            "FILEEND    0 001 000010",
        ]);
        let processor = &forest.processors[0];
        let copy = processor.find(FileId(2)).unwrap();
        assert_eq!(copy.starts_at, None);
        assert_eq!(processor.absolute_start(copy), None);
    }
}
