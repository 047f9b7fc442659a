//! Report generation.
//!
//! [`metadata`] merges everything known about a run into one key/value map;
//! the remaining modules render that map and the collection outcomes:
//! `system_info.txt`, `checklist_snapshot.csv` and the optional filled
//! checklist workbook.

pub mod checklist;
pub mod csv;
pub mod metadata;
pub mod system_info;
