use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::MeasurementTable;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Can't find:\n{}", .0.display())]
    NotFound(PathBuf),
    #[error("opening {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reading CSV row {row}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a comma-separated measurement table.
///
/// Every physical line becomes one row, header lines included; the caller
/// decides how many leading rows to skip. A missing file is reported as
/// [`LoadError::NotFound`] before any parsing starts.
pub fn load_table(path: &Path) -> Result<MeasurementTable, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let table = read_table(file)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.width(),
        path.display()
    );
    Ok(table)
}

/// Parse a table from any reader. Rows may have differing lengths.
pub fn read_table<R: io::Read>(reader: R) -> Result<MeasurementTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            row: row_no + 1,
            source,
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(MeasurementTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CSV Data File.csv");

        match load_table(&path) {
            Err(LoadError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn not_found_message_names_the_path() {
        let err = LoadError::NotFound(PathBuf::from("CSV Data File.csv"));
        assert_eq!(err.to_string(), "Can't find:\nCSV Data File.csv");
    }

    #[test]
    fn keeps_header_row_and_ragged_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "V1,I1,V2,I2").unwrap();
        writeln!(file, "0.1, 0.002,0.1,0.001").unwrap();
        writeln!(file, "0.2,0.001").unwrap();
        file.flush().unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.width(), 4);
        assert_eq!(table.cell(0, 0), Some("V1"));
        assert_eq!(table.cell(1, 1), Some("0.002"));
        assert_eq!(table.cell(2, 2), None);
    }

    #[test]
    fn reads_from_memory() {
        let table = read_table("a,b\n1,2\n".as_bytes()).unwrap();
        assert_eq!(table.rows, vec![vec!["a", "b"], vec!["1", "2"]]);
    }
}
