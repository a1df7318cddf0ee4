/*
 * format.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Logical path formatting for `FILEID` file names.

/// Convert a qualified object name `LIB/FILE(MEMBER)` into `LIB/FILE/MEMBER`.
///
/// The listing always writes member names in that shape. Other input is out
/// of contract: the result is garbled but the call never panics.
pub fn format_name(input: &str) -> String {
    let mut pieces = input.split('/');
    let library = pieces.next().unwrap_or_default();
    let object = pieces.next().unwrap_or_default();

    // Drop the closing parenthesis, then split file from member.
    let mut chars = object.chars();
    chars.next_back();
    let mut object = chars.as_str().split('(');
    let file = object.next().unwrap_or_default();
    let member = object.next().unwrap_or_default();

    [library, file, member].join("/")
}

/// Remove `.` segments from a `/`-delimited stream file path.
pub fn format_ifs(path: &str) -> String {
    path.split('/')
        .filter(|segment| *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// The logical path of a `FILEID` name: qualified names end with `)`.
pub fn logical_path(name: &str) -> String {
    if name.ends_with(')') {
        format_name(name)
    } else {
        format_ifs(name)
    }
}
