//! Raw CSV table reading.
//!
//! Tables are column-name-addressed, never fixed-offset: datasets resolve
//! fields through `columns::choose_column` against the captured header row.

use std::path::Path;

use crate::error::NormalizeError;

/// A raw CSV table held fully in memory: the header row plus every data row
/// as unparsed strings. Field typing happens in the dataset normalizers.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Path the table was read from, kept for error reporting.
    pub path: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a required input table.
    ///
    /// # Errors
    ///
    /// `MissingRequiredInput` when the file is absent, has no header row, or
    /// has zero data rows; `Csv`/`Io` on read failures.
    pub fn read(path: &Path) -> Result<Self, NormalizeError> {
        if !path.exists() {
            return Err(NormalizeError::MissingRequiredInput {
                path: path.display().to_string(),
            });
        }
        let table = Self::read_rows(path)?;
        if table.headers.is_empty() || table.rows.is_empty() {
            return Err(NormalizeError::MissingRequiredInput {
                path: path.display().to_string(),
            });
        }
        Ok(table)
    }

    /// Read an optional input table; absence yields an empty table rather
    /// than an error. Used for enrichment sources the pipeline can run
    /// without (SAM, assessments, 311).
    ///
    /// # Errors
    ///
    /// `Csv`/`Io` on read failures of a file that does exist.
    pub fn read_or_empty(path: &Path) -> Result<Self, NormalizeError> {
        if !path.exists() {
            return Ok(Self {
                path: path.display().to_string(),
                headers: Vec::new(),
                rows: Vec::new(),
            });
        }
        Self::read_rows(path)
    }

    /// True when the table holds no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell accessor: empty string for short rows or absent columns, so
    /// ragged exports don't panic.
    #[must_use]
    pub fn cell<'a>(&'a self, row: &'a [String], column: Option<usize>) -> &'a str {
        column
            .and_then(|index| row.get(index))
            .map_or("", String::as_str)
    }

    fn read_rows(path: &Path) -> Result<Self, NormalizeError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self {
            path: path.display().to_string(),
            headers,
            rows,
        })
    }
}
