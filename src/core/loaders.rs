//! Ragged CSV loading for subsystem telemetry logs.
//!
//! Subsystem log files are `;`-delimited with a header row, but their rows
//! are not guaranteed to be rectangular: some producers emit extra trailing
//! fields under failure conditions, and some rows come up short. The loader
//! reconciles all of that into a single rectangular table without dropping
//! a single field.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::normalize::{normalize_decimal, DecimalSep};

/// Errors that can occur while loading a telemetry CSV.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// A rectangular view over a ragged `;`-delimited telemetry file.
///
/// Every row holds exactly `headers.len()` cells. Cells that exist only
/// because a short row was padded are `None`; a field that was present but
/// empty in the source stays `Some("")` — absence is never conflated with
/// an empty string.
#[derive(Debug, Clone)]
pub struct RaggedTable {
    /// Column names from the source header, extended with synthesized
    /// `ExtraCol_<index>` names when data rows are wider than the header.
    pub headers: Vec<String>,
    /// Data rows, padded on the right with `None` to the header width.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RaggedTable {
    /// Number of columns, including synthesized overflow columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (the header is not a row).
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A loaded table bound to the worksheet it will be written to.
#[derive(Debug, Clone)]
pub struct NamedDataset {
    /// Destination sheet name.
    pub sheet: String,
    /// The normalized table.
    pub table: RaggedTable,
}

/// Load a `;`-delimited telemetry CSV into a [`RaggedTable`].
///
/// The file is read whole and decoded as UTF-8 with undecodable byte
/// sequences dropped rather than failing the read. Blank lines are
/// discarded entirely. The first surviving line is the header; every data
/// row is split on `;` and padded (never truncated) to the widest row
/// observed, with `ExtraCol_<index>` names synthesized for overflow
/// columns. Every data cell is passed through the decimal normalizer
/// under `sep`.
///
/// # Arguments
///
/// * `path` - Path to the CSV file
/// * `sep` - Decimal separator convention declared for this source
///
/// # Errors
///
/// Returns [`LoaderError::EmptyFile`] when the file has no non-blank
/// lines (a headerless table would mask a data-collection bug), and
/// [`LoaderError::Io`] when the file cannot be read.
pub fn load_ragged_csv<P: AsRef<Path>>(path: P, sep: DecimalSep) -> Result<RaggedTable> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let text = decode_lossy(&bytes);

    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let mut headers: Vec<String> = match lines.next() {
        Some(first) => first.split(';').map(str::to_string).collect(),
        None => return Err(LoaderError::EmptyFile(path.to_path_buf())),
    };
    let base_cols = headers.len();

    let parsed: Vec<Vec<String>> = lines
        .map(|line| line.split(';').map(str::to_string).collect())
        .collect();

    // Effective width: the widest split seen anywhere, header included.
    let max_cols = parsed.iter().map(Vec::len).fold(base_cols, usize::max);

    for i in base_cols..max_cols {
        headers.push(format!("ExtraCol_{i}"));
    }

    let rows = parsed
        .into_iter()
        .map(|fields| {
            let mut row: Vec<Option<String>> = fields
                .into_iter()
                .map(|field| {
                    Some(match normalize_decimal(&field, sep) {
                        Cow::Borrowed(_) => field,
                        Cow::Owned(rewritten) => rewritten,
                    })
                })
                .collect();
            row.resize(max_cols, None);
            row
        })
        .collect();

    Ok(RaggedTable { headers, rows })
}

/// Decode bytes as UTF-8, dropping undecodable sequences instead of
/// failing the whole read.
fn decode_lossy(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => text.replace('\u{FFFD}', ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_ragged_rows_padded_and_extended() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Time;X;Y").unwrap();
        writeln!(file, "0.1;1;2;stray").unwrap();
        writeln!(file, "0.2;3").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Dot).unwrap();

        assert_eq!(table.headers, ["Time", "X", "Y", "ExtraCol_3"]);
        assert_eq!(table.row_count(), 2);
        for row in &table.rows {
            assert_eq!(row.len(), table.column_count());
        }
        // The overflow field is preserved, the short row is padded.
        assert_eq!(table.rows[0][3].as_deref(), Some("stray"));
        assert_eq!(table.rows[1][2], None);
        assert_eq!(table.rows[1][3], None);
    }

    #[test]
    fn test_empty_source_field_is_not_absent() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A;B;C").unwrap();
        writeln!(file, "1;;3").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Dot).unwrap();
        assert_eq!(table.rows[0][1].as_deref(), Some(""));
    }

    #[test]
    fn test_blank_lines_discarded() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Time;X\n\n0.5;1\n   \n0.6;2\n").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Dot).unwrap();
        assert_eq!(table.headers, ["Time", "X"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_header_only_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "A;B").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Dot).unwrap();
        assert_eq!(table.headers, ["A", "B"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_file_without_content_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "\n   \n").unwrap();
        file.flush().unwrap();

        let result = load_ragged_csv(file.path(), DecimalSep::Dot);
        assert!(matches!(result, Err(LoaderError::EmptyFile(_))));
    }

    #[test]
    fn test_comma_decimals_normalized_in_cells() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Time;Speed;Tag").unwrap();
        writeln!(file, "0,5;12,75;run_a").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Comma).unwrap();
        assert_eq!(table.rows[0][0].as_deref(), Some("0.5"));
        assert_eq!(table.rows[0][1].as_deref(), Some("12.75"));
        assert_eq!(table.rows[0][2].as_deref(), Some("run_a"));
    }

    #[test]
    fn test_headers_are_not_normalized() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0,5;Speed").unwrap();
        writeln!(file, "1,0;2,0").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Comma).unwrap();
        assert_eq!(table.headers, ["0,5", "Speed"]);
        assert_eq!(table.rows[0][0].as_deref(), Some("1.0"));
    }

    #[test]
    fn test_undecodable_bytes_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"Val;Tag\n1,5;\xff\xfeok\n").unwrap();
        file.flush().unwrap();

        let table = load_ragged_csv(file.path(), DecimalSep::Comma).unwrap();
        assert_eq!(table.rows[0][0].as_deref(), Some("1.5"));
        assert_eq!(table.rows[0][1].as_deref(), Some("ok"));
    }
}
