/*
 * diagnostic.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Resolved diagnostics, keyed by logical file path

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A compiler diagnostic positioned in its original source member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDiagnostic {
    pub severity: u32,
    /// 1-based line in the original member.
    pub line: i64,
    pub column_start: i64,
    pub column_end: i64,
    pub text: String,
    pub code: String,
}

/// Diagnostics per logical file path, in first-reported order.
pub type DiagnosticMap = IndexMap<String, Vec<ResolvedDiagnostic>>;

pub(crate) fn push(map: &mut DiagnosticMap, path: &str, diagnostic: ResolvedDiagnostic) {
    match map.get_mut(path) {
        Some(diagnostics) => diagnostics.push(diagnostic),
        None => {
            map.insert(path.to_string(), vec![diagnostic]);
        }
    }
}
