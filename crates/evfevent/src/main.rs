/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! evfevent - map compiler event listings to source diagnostics

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evfevent_error_reporting::report;
use evfevent_source_map::{DiagnosticMap, Strategy, parse_errors, resolve_with};

mod config;
mod output;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "evfevent")]
#[command(version, about = "Map compiler event listings to diagnostics in the original source")]
struct Args {
    /// Listing files to read
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// TOML configuration (defaults to ./evfevent.toml if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Resolution strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Emit editor-facing diagnostics instead of resolved ones
    #[arg(long)]
    editor: bool,

    /// Message code to hide (can be specified multiple times)
    #[arg(long = "hide", value_name = "CODE")]
    hide: Vec<String>,

    /// Auxiliary storage pool for member locations
    #[arg(long)]
    asp: Option<String>,

    /// Source extension for member locations
    #[arg(long)]
    extension: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Tree when enabled in config and the listing has expansions
    Auto,
    Range,
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evfevent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    config.reporting.hide_compile_errors.extend(args.hide);
    if args.asp.is_some() {
        config.reporting.asp = args.asp;
    }
    if args.extension.is_some() {
        config.reporting.extension = args.extension;
    }

    let mut combined = DiagnosticMap::new();
    for input in &args.inputs {
        let text = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read listing: {}", input.display()))?;
        let lines = text.split('\n');

        let diagnostics = match args.strategy {
            StrategyArg::Auto => parse_errors(lines, &config.resolver),
            StrategyArg::Range => resolve_with(Strategy::Range, lines),
            StrategyArg::Tree => resolve_with(Strategy::Tree, lines),
        };
        info!(
            input = %input.display(),
            files = diagnostics.len(),
            diagnostics = diagnostics.values().map(Vec::len).sum::<usize>(),
            "Mapped listing"
        );
        output::merge(&mut combined, diagnostics);
    }

    let rendered = if args.editor {
        let reports = report(&combined, &config.reporting);
        match args.format {
            Format::Json => output::json(&reports)?,
            Format::Text => output::report_text(&reports),
        }
    } else {
        match args.format {
            Format::Json => output::json(&combined)?,
            Format::Text => output::resolved_text(&combined),
        }
    };

    print!("{rendered}");
    if args.format == Format::Json {
        println!();
    }

    Ok(())
}
