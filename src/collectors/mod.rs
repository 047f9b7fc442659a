//! Artifact collection and host inspection.
//!
//! The collection engine runs the catalog's tasks in order and turns every
//! result, including failures, into a [`CollectionOutcome`](crate::models::CollectionOutcome):
//!
//! - **File copy** / **directory copy**: [`copy`]
//! - **Registry export** through `reg.exe`: [`registry`]
//!
//! Host facts (OS, RAM, display adapters) come from the [`host`] inspectors.
//!
//! ## Example
//!
//! ```no_run
//! use snapshot_collector::collectors::collector::collect_all;
//! use snapshot_collector::config::default_catalog;
//! use snapshot_collector::context::RunContext;
//! use snapshot_collector::diagnostics::RunLog;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let log = RunLog::new();
//! let context = RunContext::new(Path::new("C:\\snapshots\\run1"), default_catalog(), &log)?;
//! let outcomes = collect_all(&context);
//! println!("{} tasks run", outcomes.len());
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod copy;
pub mod host;
pub mod registry;
