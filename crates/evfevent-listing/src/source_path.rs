/*
 * source_path.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Reassembly of file names longer than one `FILEID` record.
//!
//! A `FILEID` record carries at most 255 characters of file name. When the
//! declared name length is larger, the rest follows in `FILEIDCONT` records
//! with the same File ID, 255 characters at a time.

use crate::layout::file_id::MAX_NAME_LENGTH;
use crate::record::{FileId, Record};
use crate::tokenizer::ListingLine;

/// The full file name of `file_id`, taken from the first `FILEID` record
/// for it anywhere in the listing and any `FILEIDCONT` records that follow.
pub fn resolve_source_path(lines: &[ListingLine], file_id: FileId) -> Option<String> {
    let records = || {
        lines
            .iter()
            .filter_map(|line| Record::decode(line).ok())
    };

    let file = records().find_map(|record| match record {
        Record::FileId(file) if file.file_id == file_id => Some(file),
        _ => None,
    })?;

    let mut name = file.inline_name;
    let declared = file
        .name_length
        .and_then(|length| usize::try_from(length).ok())
        .unwrap_or(0);
    if declared <= MAX_NAME_LENGTH {
        return Some(name);
    }

    let mut remaining = declared;
    for record in records() {
        let Record::FileIdCont(cont) = record else {
            continue;
        };
        if cont.file_id != file_id {
            continue;
        }
        remaining = remaining.saturating_sub(MAX_NAME_LENGTH);
        let take = remaining.min(MAX_NAME_LENGTH);
        name.extend(cont.fragment.chars().take(take));
    }

    tracing::trace!(%file_id, length = declared, "Reassembled long file name");
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn file_id_line(id: u32, length: usize, name: &str) -> String {
        format!("FILEID     0 {:03} 000000 {:03} {} 20230101120000 0", id, length, name)
    }

    fn cont_line(id: u32, fragment: &str) -> String {
        format!("FILEIDCONT 0 {:03} {:<11}{} 20230101120000 0", id, "", fragment)
    }

    #[test]
    fn test_short_name_is_cut_at_declared_length() {
        let lines = tokenize([file_id_line(1, 21, "/home/me/src/pgm.rpgle")]);
        assert_eq!(
            resolve_source_path(&lines, FileId(1)).as_deref(),
            Some("/home/me/src/pgm.rpgl")
        );
    }

    #[test]
    fn test_name_with_spaces_uses_declared_length() {
        let name = "/home/me/my src/pgm.rpgle";
        let lines = tokenize([file_id_line(1, name.len(), name)]);
        assert_eq!(resolve_source_path(&lines, FileId(1)).as_deref(), Some(name));
    }

    #[test]
    fn test_long_name_spans_continuation_records() {
        let first = format!("/{}", "a".repeat(254));
        let second = format!("/{}", "b".repeat(254));
        let third = "/tail.rpgle";
        let full = format!("{first}{second}{third}");

        let lines = tokenize([
            file_id_line(1, 5, "/other.rpgle"),
            file_id_line(2, full.len(), &first),
            cont_line(1, "/ignored"),
            cont_line(2, &second),
            cont_line(2, third),
        ]);

        assert_eq!(resolve_source_path(&lines, FileId(2)), Some(full));
    }

    #[test]
    fn test_unknown_file_id() {
        let lines = tokenize([file_id_line(1, 4, "/a/b")]);
        assert_eq!(resolve_source_path(&lines, FileId(7)), None);
    }
}
