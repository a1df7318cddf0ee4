/*
 * output.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering the mapped diagnostics for stdout.

use anyhow::Result;
use evfevent_error_reporting::{DiagnosticKind, FileReport, message};
use evfevent_source_map::DiagnosticMap;

/// Append `next` to `combined`, extending lists for paths seen before.
pub fn merge(combined: &mut DiagnosticMap, next: DiagnosticMap) {
    for (path, diagnostics) in next {
        combined.entry(path).or_default().extend(diagnostics);
    }
}

pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One `path:line:column: kind: message` line per resolved diagnostic.
pub fn resolved_text(map: &DiagnosticMap) -> String {
    let mut out = String::new();
    for (path, diagnostics) in map {
        for diagnostic in diagnostics {
            let kind = DiagnosticKind::from_severity(diagnostic.severity);
            out.push_str(&format!(
                "{}:{}:{}: {}: {}\n",
                path,
                diagnostic.line,
                diagnostic.column_start,
                kind,
                message(diagnostic)
            ));
        }
    }
    out
}

/// Editor reports as text, with 0-based positions shown 1-based.
pub fn report_text(reports: &[FileReport]) -> String {
    let mut out = String::new();
    for report in reports {
        for diagnostic in &report.diagnostics {
            out.push_str(&format!(
                "{}:{}:{}: {}: {}\n",
                report.location,
                diagnostic.range.start.line + 1,
                diagnostic.range.start.character + 1,
                diagnostic.kind,
                diagnostic.message
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use evfevent_error_reporting::{ReportingConfig, report};
    use evfevent_source_map::ResolvedDiagnostic;

    fn diagnostic(line: i64, code: &str, severity: u32) -> ResolvedDiagnostic {
        ResolvedDiagnostic {
            severity,
            line,
            column_start: 4,
            column_end: 9,
            text: "Something happened".to_string(),
            code: code.to_string(),
        }
    }

    fn map(entries: &[(&str, ResolvedDiagnostic)]) -> DiagnosticMap {
        let mut map = DiagnosticMap::new();
        for (path, diagnostic) in entries {
            map.entry(path.to_string())
                .or_default()
                .push(diagnostic.clone());
        }
        map
    }

    #[test]
    fn test_merge_keeps_input_order() {
        let mut combined = map(&[
            ("A/B/C", diagnostic(1, "RNF0001", 30)),
            ("/x.c", diagnostic(2, "CZM0001", 30)),
        ]);
        merge(
            &mut combined,
            map(&[
                ("/y.c", diagnostic(3, "CZM0002", 20)),
                ("A/B/C", diagnostic(9, "RNF0002", 30)),
            ]),
        );

        assert_eq!(
            combined.keys().map(String::as_str).collect::<Vec<_>>(),
            ["A/B/C", "/x.c", "/y.c"]
        );
        let lines: Vec<i64> = combined["A/B/C"].iter().map(|d| d.line).collect();
        assert_eq!(lines, [1, 9]);
    }

    #[test]
    fn test_resolved_text() {
        let text = resolved_text(&map(&[
            ("MYLIB/QRPGLESRC/PGM", diagnostic(5, "RNF1234", 30)),
            ("/home/me/a.c", diagnostic(2, "CZM0045", 20)),
        ]));
        insta::assert_snapshot!(text, @r"
        MYLIB/QRPGLESRC/PGM:5:4: error: RNF1234: Something happened (30)
        /home/me/a.c:2:4: warning: CZM0045: Something happened (20)
        ");
    }

    #[test]
    fn test_report_text() {
        let reports = report(
            &map(&[("MYLIB/QRPGLESRC/PGM", diagnostic(5, "RNF1234", 10))]),
            &ReportingConfig::default(),
        );
        insta::assert_snapshot!(report_text(&reports), @"member:/MYLIB/QRPGLESRC/PGM:5:4: info: RNF1234: Something happened (10)");
    }
}
