/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Source mapping for compiler event listings
//!
//! A compile may not analyze the member the user edited. Copy members are
//! inlined into it, and an SQL precompiler rewrites embedded statements into
//! generated host-language calls, inserting and deleting lines on the way.
//! The listing reports errors against that expanded text. This crate maps
//! every reported error back to the original member and line it came from.
//!
//! # Overview
//!
//! Two strategies implement the same [`Resolve`] interface:
//!
//! - [`RangeCorrector`]: the legacy single-pass corrector. It accumulates
//!   [`LineRange`]s for nested copy members and expansions and subtracts
//!   their extent from each reported line.
//! - [`TreeMapper`]: builds a [`Forest`] of processors and file nodes, then
//!   replays inclusions and expansions into a [`SourceMap`] (one entry per
//!   generated line) and looks each error up in it.
//!
//! [`ResolverConfig::select`] chooses between them the same way the editor
//! integration does, and [`parse_errors`] runs the whole pipeline.
//!
//! # Example
//!
//! ```rust
//! use evfevent_source_map::{parse_errors, ResolverConfig};
//!
//! let listing = [
//!     "PROCESSOR  0 000 1",
//!     "FILEID     0 001 000000 019 MYLIB/MYFILE(MYMBR) 20230101120000 0",
//!     "ERROR      0 001 1 000005 000005 001 000005 010 RNF1234 S 30 016 Undefined symbol",
//!     "FILEEND    0 001 000010",
//! ];
//!
//! let diagnostics = parse_errors(listing, &ResolverConfig::default());
//! let errors = &diagnostics["MYLIB/MYFILE/MYMBR"];
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].line, 5);
//! assert_eq!(errors[0].code, "RNF1234");
//! ```

pub mod diagnostic;
pub mod forest;
pub mod generated;
pub mod line_range;
pub mod strategy;

// Re-export main types
pub use diagnostic::{DiagnosticMap, ResolvedDiagnostic};
pub use forest::{Expansion, FileNode, Forest, Processor, RawError, build_forest};
pub use generated::{GeneratedLine, SourceMap};
pub use line_range::LineRange;
pub use strategy::range::RangeCorrector;
pub use strategy::tree::{TreeMapper, map_forest};
pub use strategy::{Resolve, ResolverConfig, Strategy, parse_errors, resolve_with};
