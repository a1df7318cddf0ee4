/*
 * diagnostic.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Editor diagnostic types and conversion from resolved diagnostics.

use std::fmt;

use evfevent_source_map::ResolvedDiagnostic;
use serde::{Deserialize, Serialize};

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// An error that prevents compilation
    Error,
    /// A warning that doesn't prevent compilation
    Warning,
    /// Informational message
    Info,
}

impl DiagnosticKind {
    /// Map a listing severity to a kind.
    pub fn from_severity(severity: u32) -> Self {
        match severity {
            20 => DiagnosticKind::Warning,
            30 | 40 | 50 => DiagnosticKind::Error,
            _ => DiagnosticKind::Info,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::Error => "error",
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
        };
        f.write_str(name)
    }
}

/// A 0-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: i64,
    pub character: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A diagnostic positioned for an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorDiagnostic {
    pub range: Range,
    pub kind: DiagnosticKind,
    pub code: String,
    pub message: String,
}

/// The one-line message shown for a diagnostic: `CODE: text (severity)`.
pub fn message(diagnostic: &ResolvedDiagnostic) -> String {
    format!(
        "{}: {} ({})",
        diagnostic.code, diagnostic.text, diagnostic.severity
    )
}

impl From<&ResolvedDiagnostic> for EditorDiagnostic {
    fn from(diagnostic: &ResolvedDiagnostic) -> Self {
        let line = (diagnostic.line - 1).max(0);
        let mut start = (diagnostic.column_start - 1).max(0);
        let mut end = diagnostic.column_end;

        // No column information: underline the start of the line.
        if start == 0 && end == 0 {
            start = 0;
            end = 100;
        }

        EditorDiagnostic {
            range: Range {
                start: Position {
                    line,
                    character: start,
                },
                end: Position {
                    line,
                    character: end,
                },
            },
            kind: DiagnosticKind::from_severity(diagnostic.severity),
            code: diagnostic.code.clone(),
            message: message(diagnostic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(severity: u32, line: i64, columns: (i64, i64)) -> ResolvedDiagnostic {
        ResolvedDiagnostic {
            severity,
            line,
            column_start: columns.0,
            column_end: columns.1,
            text: "Undefined symbol".to_string(),
            code: "RNF1234".to_string(),
        }
    }

    #[test]
    fn test_kind_from_severity() {
        assert_eq!(DiagnosticKind::from_severity(20), DiagnosticKind::Warning);
        for severity in [30, 40, 50] {
            assert_eq!(DiagnosticKind::from_severity(severity), DiagnosticKind::Error);
        }
        for severity in [0, 10, 25, 99] {
            assert_eq!(DiagnosticKind::from_severity(severity), DiagnosticKind::Info);
        }
    }

    #[test]
    fn test_positions_become_zero_based() {
        let diagnostic = EditorDiagnostic::from(&resolved(30, 5, (12, 18)));
        assert_eq!(diagnostic.range.start, Position { line: 4, character: 11 });
        assert_eq!(diagnostic.range.end, Position { line: 4, character: 18 });
        assert_eq!(diagnostic.kind, DiagnosticKind::Error);
        assert_eq!(diagnostic.message, "RNF1234: Undefined symbol (30)");
    }

    #[test]
    fn test_negative_positions_clamp_to_zero() {
        let diagnostic = EditorDiagnostic::from(&resolved(20, -3, (0, 7)));
        assert_eq!(diagnostic.range.start, Position { line: 0, character: 0 });
        assert_eq!(diagnostic.range.end.character, 7);
    }

    #[test]
    fn test_missing_columns_span_first_hundred() {
        let diagnostic = EditorDiagnostic::from(&resolved(0, 1, (0, 0)));
        assert_eq!(diagnostic.range.start.character, 0);
        assert_eq!(diagnostic.range.end.character, 100);
        assert_eq!(diagnostic.kind, DiagnosticKind::Info);

        // Column 1 also clamps to a zero start.
        let diagnostic = EditorDiagnostic::from(&resolved(0, 1, (1, 0)));
        assert_eq!(diagnostic.range.end.character, 100);
    }
}
