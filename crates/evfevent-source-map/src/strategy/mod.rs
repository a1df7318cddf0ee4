/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Resolution strategies and their selection

pub mod range;
pub mod tree;

use std::fmt;

use evfevent_listing::{ListingLine, tokenize};
use serde::{Deserialize, Serialize};

use crate::diagnostic::DiagnosticMap;
use range::RangeCorrector;
use tree::TreeMapper;

/// Maps a tokenized listing to diagnostics per original file.
///
/// Implementations are pure: all state lives for one call.
pub trait Resolve {
    fn resolve(&self, lines: &[ListingLine]) -> DiagnosticMap;
}

/// The available resolution algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Single-pass line-offset correction.
    #[default]
    Range,
    /// Forest construction plus a generated-line source map.
    Tree,
}

impl Strategy {
    pub fn resolver(self) -> &'static dyn Resolve {
        match self {
            Strategy::Range => &RangeCorrector,
            Strategy::Tree => &TreeMapper,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Range => "range",
            Strategy::Tree => "tree",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Opt in to the tree strategy for listings with precompiler expansions.
    pub try_new_error_parser: bool,
}

impl ResolverConfig {
    /// Tree only when opted in and some line mentions `EXPANSION`.
    pub fn select(&self, lines: &[ListingLine]) -> Strategy {
        let expanded = lines.iter().any(|line| line.contains("EXPANSION"));
        let strategy = if self.try_new_error_parser && expanded {
            Strategy::Tree
        } else {
            Strategy::Range
        };
        tracing::debug!(
            %strategy,
            expanded,
            try_new_error_parser = self.try_new_error_parser,
            "Selected resolution strategy"
        );
        strategy
    }
}

/// Tokenize `lines` and resolve them with the configured strategy.
pub fn parse_errors<I, S>(lines: I, config: &ResolverConfig) -> DiagnosticMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines = tokenize(lines);
    config.select(&lines).resolver().resolve(&lines)
}

/// Tokenize `lines` and resolve them with a fixed strategy.
pub fn resolve_with<I, S>(strategy: Strategy, lines: I) -> DiagnosticMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    strategy.resolver().resolve(&tokenize(lines))
}
