/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};

/// Settings that shape editor-facing output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Message codes that are never shown.
    pub hide_compile_errors: Vec<String>,
    /// Auxiliary storage pool prefixed to member paths.
    pub asp: Option<String>,
    /// Source type appended to member paths, without the dot.
    pub extension: Option<String>,
    /// Remote directory a local workspace is deployed to.
    pub workspace_deploy_path: Option<String>,
}

impl ReportingConfig {
    pub fn is_hidden(&self, code: &str) -> bool {
        self.hide_compile_errors.iter().any(|hidden| hidden == code)
    }
}
