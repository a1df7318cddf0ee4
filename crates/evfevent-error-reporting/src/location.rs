/*
 * location.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Where a logical file path lives from the editor's point of view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ReportingConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum ResourceLocation {
    /// An absolute stream file path.
    StreamFile { path: String },
    /// A source member, `/[ASP/]LIB/FILE/MEMBER[.ext]`.
    Member { path: String },
    /// A file in the local workspace, relative to its root.
    Workspace { path: String },
}

impl ResourceLocation {
    pub fn for_path(path: &str, config: &ReportingConfig) -> Self {
        if let Some(deploy) = &config.workspace_deploy_path {
            let relative = path.to_lowercase().replacen(deploy.as_str(), "", 1);
            return ResourceLocation::Workspace {
                path: relative.trim_start_matches('/').to_string(),
            };
        }

        if path.starts_with('/') {
            return ResourceLocation::StreamFile {
                path: path.to_string(),
            };
        }

        let asp = config
            .asp
            .as_deref()
            .map(|asp| format!("{asp}/"))
            .unwrap_or_default();
        let extension = config
            .extension
            .as_deref()
            .map(|extension| format!(".{extension}"))
            .unwrap_or_default();
        ResourceLocation::Member {
            path: format!("/{asp}{path}{extension}"),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            ResourceLocation::StreamFile { path }
            | ResourceLocation::Member { path }
            | ResourceLocation::Workspace { path } => path,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            ResourceLocation::StreamFile { .. } => "streamfile",
            ResourceLocation::Member { .. } => "member",
            ResourceLocation::Workspace { .. } => "workspace",
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme(), self.path())
    }
}
