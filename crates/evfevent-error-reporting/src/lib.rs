/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Editor-facing diagnostics for compiler listings.
//!
//! [`evfevent_source_map`] produces diagnostics keyed by logical file path
//! with 1-based lines. Editors want something else: 0-based ranges, a
//! severity kind, a one-line message, and a resource to attach them to.
//!
//! - [`DiagnosticKind`]: Error, Warning or Info, from the listing severity
//! - [`EditorDiagnostic`]: range, kind and message for one diagnostic
//! - [`ResourceLocation`]: stream file, source member or workspace file
//! - [`ReportingConfig`]: hidden codes and location options
//!
//! # Example
//!
//! ```
//! use evfevent_error_reporting::{report, DiagnosticKind, ReportingConfig};
//! use evfevent_source_map::{DiagnosticMap, ResolvedDiagnostic};
//!
//! let mut map = DiagnosticMap::new();
//! map.insert(
//!     "MYLIB/QRPGLESRC/PGM".to_string(),
//!     vec![ResolvedDiagnostic {
//!         severity: 20,
//!         line: 3,
//!         column_start: 0,
//!         column_end: 0,
//!         text: "Unused variable".to_string(),
//!         code: "RNF7031".to_string(),
//!     }],
//! );
//!
//! let reports = report(&map, &ReportingConfig::default());
//! assert_eq!(reports[0].location.to_string(), "member:/MYLIB/QRPGLESRC/PGM");
//! assert_eq!(reports[0].diagnostics[0].kind, DiagnosticKind::Warning);
//! assert_eq!(reports[0].diagnostics[0].range.end.character, 100);
//! ```

pub mod config;
pub mod diagnostic;
pub mod location;
pub mod report;

// Re-export main types for convenience
pub use config::ReportingConfig;
pub use diagnostic::{DiagnosticKind, EditorDiagnostic, Position, Range, message};
pub use location::ResourceLocation;
pub use report::{FileReport, report};
