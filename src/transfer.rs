//! JSON import/export boundary.
//!
//! The interchange format is the persisted layout itself: a JSON array of
//! project records, pretty-printed. Import is strict about shape (the root
//! must be an array of project-shaped records) and never partially applies;
//! decode failures leave the caller's collection untouched.

use chrono::NaiveDate;

use crate::error::{EngiproError, Result};
use crate::model::Project;

/// Backup file name prefix; the full name embeds the export date.
pub const EXPORT_FILE_PREFIX: &str = "engipro_backup_";

/// Serialize the full collection for export.
///
/// # Errors
///
/// Returns [`EngiproError::Validation`] for an empty collection; there is
/// nothing to back up.
pub fn export_json(projects: &[Project]) -> Result<String> {
    if projects.is_empty() {
        return Err(EngiproError::validation("export", "no project data to export"));
    }
    Ok(serde_json::to_string_pretty(projects)?)
}

/// Backup file name for the given date, e.g. `engipro_backup_2024-05-15.json`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Decode an exported (or persisted) collection.
///
/// # Errors
///
/// Returns [`EngiproError::Decode`] when the text is not valid JSON, the
/// root is not an array, or an element is not project-shaped.
pub fn import_json(text: &str) -> Result<Vec<Project>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| EngiproError::decode(format!("not valid JSON: {e}")))?;

    if !value.is_array() {
        return Err(EngiproError::decode("root value is not an array"));
    }

    serde_json::from_value(value)
        .map_err(|e| EngiproError::decode(format!("malformed project record: {e}")))
}
