//! # snapshot-collector
//!
//! Machine-state snapshot collector for Windows test equipment.
//!
//! ## Overview
//!
//! A field technician runs the collector on a machine to package its state
//! for a support handoff. One run:
//!
//! - copies configured files and directories and exports registry keys into
//!   `{destination}/artifacts`
//! - records OS, RAM and display adapters in `system_info.txt`
//! - merges default, user-supplied and collected metadata into one map
//! - writes `checklist_snapshot.csv` and, when a template is given, a filled
//!   copy of the checklist workbook
//! - flushes the run log to `logs/collector.log`
//!
//! A missing source or a failing export never aborts the run; it is recorded
//! as the task's outcome and shows up in the reports.
//!
//! ## Usage
//!
//! ```no_run
//! use snapshot_collector::collectors::host::host_inspector;
//! use snapshot_collector::config::load_catalog;
//! use snapshot_collector::context::RunContext;
//! use snapshot_collector::diagnostics::RunLog;
//! use snapshot_collector::pipeline::execute;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let log = RunLog::new();
//! let catalog = load_catalog(Path::new("collector.config.json"), &log);
//! let context = RunContext::new(Path::new("C:\\snapshots\\run1"), catalog, &log)?;
//!
//! let report = execute(&context, host_inspector().as_ref())?;
//! println!("{} artifacts processed", report.outcomes.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`cli`]: Command-line interface definitions and argument parsing
//! - [`models`]: Outcomes, host facts and the case-insensitive metadata map
//! - [`config`]: Task catalog, loading and the built-in fallback catalog
//! - [`collectors`]: Collection engine and host inspection
//! - [`report`]: Metadata merging and the text, CSV and checklist writers
//! - [`pipeline`]: One complete collection run
//! - [`utils`]: Archive packaging
//! - [`constants`]: Application-wide constants

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Core data models
pub mod models;

/// Run diagnostics sink and buffered run log
pub mod diagnostics;

/// Resolved paths and inputs of a run
pub mod context;

/// Task catalog configuration
pub mod config;

/// Artifact collection and host inspection
pub mod collectors;

/// Metadata merging and report writers
pub mod report;

/// A complete collection run
pub mod pipeline;

/// Archive packaging
pub mod utils;

/// Application-wide constants
pub mod constants;

#[cfg(test)]
pub mod test_utils;
