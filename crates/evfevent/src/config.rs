/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `evfevent.toml` loading.
//!
//! ```toml
//! [resolver]
//! try_new_error_parser = true
//!
//! [reporting]
//! hide_compile_errors = ["RNF7031"]
//! asp = "IASP1"
//! extension = "rpgle"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use evfevent_error_reporting::ReportingConfig;
use evfevent_source_map::ResolverConfig;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "evfevent.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverConfig,
    pub reporting: ReportingConfig,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Load `explicit`, or the default file if it exists, or defaults.
    ///
    /// An explicit path that cannot be read is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("No configuration file, using defaults");
                    return Ok(Config::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}
