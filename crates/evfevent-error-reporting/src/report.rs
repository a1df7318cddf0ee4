/*
 * report.rs
 * Copyright (c) 2025 Posit, PBC
 */

use evfevent_source_map::DiagnosticMap;
use serde::{Deserialize, Serialize};

use crate::config::ReportingConfig;
use crate::diagnostic::EditorDiagnostic;
use crate::location::ResourceLocation;

/// Everything an editor shows for one resource.
///
/// A report may have no diagnostics when all of them were hidden; it still
/// replaces whatever the editor showed for that resource before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub location: ResourceLocation,
    pub diagnostics: Vec<EditorDiagnostic>,
}

/// Convert resolved diagnostics into per-resource editor reports, in map order.
pub fn report(map: &DiagnosticMap, config: &ReportingConfig) -> Vec<FileReport> {
    map.iter()
        .map(|(path, resolved)| {
            let diagnostics: Vec<EditorDiagnostic> = resolved
                .iter()
                .filter(|diagnostic| !config.is_hidden(&diagnostic.code))
                .map(EditorDiagnostic::from)
                .collect();
            let hidden = resolved.len() - diagnostics.len();
            if hidden > 0 {
                tracing::debug!(%path, hidden, "Hid configured compile errors");
            }
            FileReport {
                location: ResourceLocation::for_path(path, config),
                diagnostics,
            }
        })
        .collect()
}
