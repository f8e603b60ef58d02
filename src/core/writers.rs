//! Session workbook writer.
//!
//! Persists the consolidated datasets as one `.xlsx` workbook with a
//! worksheet per dataset. The workbook is assembled in memory and saved to
//! a scratch path next to the destination, then renamed into place, so a
//! failed save never leaves a truncated workbook at the final location.

use std::fs;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use super::loaders::NamedDataset;

/// Errors that can occur while writing the session workbook.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Workbook assembly or save failed.
    #[error("failed to write workbook '{path}': {source}")]
    Workbook {
        path: String,
        #[source]
        source: XlsxError,
    },

    /// Failed to move the finished workbook into place.
    #[error("failed to finalize workbook '{path}': {source}")]
    Finalize {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Scratch location the workbook is saved to before the final rename.
fn scratch_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the consolidated session datasets to an `.xlsx` workbook.
///
/// One worksheet per dataset, in slice order. The header row comes first,
/// data rows follow in source order with the column order of the table.
/// Every cell is written as a string — the pipeline never re-types field
/// content — and padded (absent) cells are left blank.
///
/// # Arguments
///
/// * `path` - Final workbook path (parent directories are created)
/// * `datasets` - Consolidated datasets, one per worksheet
///
/// # Errors
///
/// Returns an error if directories cannot be created, a sheet name is
/// rejected, the workbook cannot be saved, or the finished file cannot be
/// renamed into place.
pub fn write_session_workbook(path: &Path, datasets: &[NamedDataset]) -> Result<()> {
    ensure_parent_dirs(path)?;

    let path_str = path.display().to_string();
    let mut workbook = Workbook::new();

    for dataset in datasets {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(dataset.sheet.as_str())
            .map_err(|e| WriteError::Workbook {
                path: path_str.clone(),
                source: e,
            })?;

        for (col, name) in dataset.table.headers.iter().enumerate() {
            sheet
                .write_string(0, col as u16, name.as_str())
                .map_err(|e| WriteError::Workbook {
                    path: path_str.clone(),
                    source: e,
                })?;
        }

        for (row_idx, row) in dataset.table.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                if let Some(value) = cell {
                    sheet
                        .write_string(row_idx as u32 + 1, col as u16, value.as_str())
                        .map_err(|e| WriteError::Workbook {
                            path: path_str.clone(),
                            source: e,
                        })?;
                }
            }
        }
    }

    let scratch = scratch_path(path);
    workbook.save(&scratch).map_err(|e| WriteError::Workbook {
        path: scratch.display().to_string(),
        source: e,
    })?;

    fs::rename(&scratch, path).map_err(|e| WriteError::Finalize {
        path: path_str,
        source: e,
    })?;

    Ok(())
}
