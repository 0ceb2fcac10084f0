// ============================================================
// ROW READER
// ============================================================
// Source of raw delimited rows consumed by the loader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder, Trim};

use crate::domain::error::{AppError, Result};

/// A stream of raw rows, header first.
///
/// `Ok(None)` marks end-of-stream. Delimiter and quoting are the
/// implementor's concern; the loader only sees ordered text cells.
pub trait RowReader {
    fn read_row(&mut self) -> Result<Option<Vec<String>>>;
}

/// Cells that are not valid UTF-8 are decoded lossily instead of failing the row.
impl<R: Read> RowReader for csv::Reader<R> {
    fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        let mut record = ByteRecord::new();
        let more = self
            .read_byte_record(&mut record)
            .map_err(|e| AppError::IoError(format!("Failed to read CSV row: {}", e)))?;
        if !more {
            return Ok(None);
        }

        Ok(Some(
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect(),
        ))
    }
}

/// Rows already held in memory
#[derive(Debug)]
pub struct VecRowReader {
    rows: std::vec::IntoIter<Vec<String>>,
}

impl VecRowReader {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: rows.into_iter(),
        }
    }
}

impl From<Vec<Vec<String>>> for VecRowReader {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::new(rows)
    }
}

impl RowReader for VecRowReader {
    fn read_row(&mut self) -> Result<Option<Vec<String>>> {
        Ok(self.rows.next())
    }
}

/// Builds `csv::Reader`s that hand the header row through as data,
/// which is what the loader expects.
pub struct CsvRowSource {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvRowSource {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

impl CsvRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn from_reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        ReaderBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .from_reader(reader)
    }

    pub fn from_path(&self, path: &Path) -> Result<csv::Reader<File>> {
        let file = File::open(path)
            .map_err(|e| AppError::IoError(format!("Failed to open {}: {}", path.display(), e)))?;
        Ok(self.from_reader(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_reader_yields_header_as_first_row() {
        let mut reader = CsvRowSource::new().from_reader("a,b\n1,x\n".as_bytes());
        assert_eq!(reader.read_row().unwrap(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(reader.read_row().unwrap(), Some(vec!["1".to_string(), "x".to_string()]));
        assert_eq!(reader.read_row().unwrap(), None);
    }

    #[test]
    fn test_custom_delimiter_and_trim() {
        let mut reader = CsvRowSource::new()
            .with_delimiter(b';')
            .with_trim(true)
            .from_reader("a ; b\n 1;2 \n".as_bytes());
        reader.read_row().unwrap();
        assert_eq!(reader.read_row().unwrap(), Some(vec!["1".to_string(), "2".to_string()]));
    }

    #[test]
    fn test_uneven_row_is_io_error() {
        let mut reader = CsvRowSource::new().from_reader("a,b\n1,2,3\n".as_bytes());
        reader.read_row().unwrap();
        assert!(matches!(reader.read_row(), Err(AppError::IoError(_))));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let bytes: &[u8] = b"name\ncaf\xe9\n";
        let mut reader = CsvRowSource::new().from_reader(bytes);
        reader.read_row().unwrap();
        let row = reader.read_row().unwrap().unwrap();
        assert_eq!(row, vec!["caf\u{FFFD}".to_string()]);
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a|b\n1|2\n").unwrap();

        let mut reader = CsvRowSource::new()
            .with_delimiter(b'|')
            .from_path(file.path())
            .unwrap();
        assert_eq!(reader.read_row().unwrap(), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(reader.read_row().unwrap(), Some(vec!["1".to_string(), "2".to_string()]));
        assert_eq!(reader.read_row().unwrap(), None);
    }

    #[test]
    fn test_from_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvRowSource::new()
            .from_path(&dir.path().join("absent.csv"))
            .err()
            .unwrap();
        assert!(matches!(err, AppError::IoError(_)));
    }

    #[test]
    fn test_vec_reader_drains_in_order() {
        let mut reader = VecRowReader::from(vec![vec!["h".to_string()], vec!["v".to_string()]]);
        assert_eq!(reader.read_row().unwrap(), Some(vec!["h".to_string()]));
        assert_eq!(reader.read_row().unwrap(), Some(vec!["v".to_string()]));
        assert_eq!(reader.read_row().unwrap(), None);
    }
}
