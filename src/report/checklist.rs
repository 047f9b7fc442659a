use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use umya_spreadsheet::{reader, writer, Spreadsheet};

use crate::constants::FOLDER_TIMESTAMP_FORMAT;
use crate::context::RunContext;
use crate::diagnostics::Diagnostics;
use crate::models::MetadataMap;

lazy_static! {
    static ref CELL_ADDRESS: Regex = Regex::new(r"^\$?[A-Za-z]{1,3}\$?[0-9]+$").unwrap();
}

pub fn is_valid_cell_address(address: &str) -> bool {
    CELL_ADDRESS.is_match(address.trim())
}

/// Copy the checklist template into the destination root and fill its bound cells.
///
/// Returns `Ok(None)` when no template was requested or the template does
/// not exist, otherwise the path of the filled copy.
pub fn fill_checklist(context: &RunContext, metadata: &MetadataMap) -> Result<Option<PathBuf>> {
    let diagnostics = context.diagnostics;
    let template = match &context.checklist_template_path {
        Some(template) => template,
        None => return Ok(None),
    };

    if !template.is_file() {
        diagnostics.warn(&format!("Checklist template not found: {}", template.display()));
        return Ok(None);
    }

    let timestamp = chrono::Local::now().format(FOLDER_TIMESTAMP_FORMAT);
    let output = context.destination_root.join(format!("Checklist_{}.xlsx", timestamp));
    fs::copy(template, &output)
        .context(format!("Failed to copy checklist template to {}", output.display()))?;

    let mut book = read_workbook(&output)?;
    let written = apply_bindings(&mut book, &context.catalog.checklist_bindings, metadata, diagnostics);
    writer::xlsx::write(&book, &output)
        .map_err(|e| anyhow!("Failed to save checklist {}: {}", output.display(), e))?;

    diagnostics.info(&format!("Checklist populated with {} values: {}", written, output.display()));
    Ok(Some(output))
}

fn read_workbook(path: &Path) -> Result<Spreadsheet> {
    reader::xlsx::read(path)
        .map_err(|e| anyhow!("Failed to open checklist {}: {}", path.display(), e))
}

/// Write every bound key present in `metadata`; returns the number of cells set.
pub fn apply_bindings(
    book: &mut Spreadsheet,
    bindings: &BTreeMap<String, BTreeMap<String, String>>,
    metadata: &MetadataMap,
    diagnostics: &dyn Diagnostics,
) -> usize {
    let sheet_names: Vec<String> = book.get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect();
    let mut written = 0;

    for (sheet_name, cells) in bindings {
        let actual = match sheet_names.iter().find(|name| name.eq_ignore_ascii_case(sheet_name.trim())) {
            Some(name) => name,
            None => {
                diagnostics.warn(&format!("Checklist sheet '{}' not found in template", sheet_name));
                continue;
            }
        };

        let sheet = match book.get_sheet_by_name_mut(actual) {
            Some(sheet) => sheet,
            None => continue,
        };

        for (key, address) in cells {
            let value = match metadata.get(key) {
                Some(value) => value,
                None => {
                    diagnostics.debug(&format!("No value for checklist key '{}'", key));
                    continue;
                }
            };

            if !is_valid_cell_address(address) {
                diagnostics.warn(&format!("Invalid cell address '{}' for key '{}' on sheet '{}'", address, key, actual));
                continue;
            }

            let address = address.trim().replace('$', "").to_uppercase();
            sheet.get_cell_mut(address.as_str()).set_value_string(value);
            written += 1;
        }
    }

    written
}
