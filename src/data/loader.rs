//! Dataset Loader Module
//! Reads every CSV in the results directory into one immutable table using Polars.

use super::{
    Dataset, CATEGORY, DATE, DATE_FORMAT, DATE_PARSED, FIS_POINTS, NAME, QUALIFICATION,
    REQUIRED_COLUMNS,
};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Data directory not found: {0}")]
    MissingDirectory(PathBuf),
    #[error("No CSV files found in {0}")]
    NoCsvFiles(PathBuf),
    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: PathBuf, column: String },
    #[error("Result {row} ({name}) has no Date")]
    MissingDate { row: usize, name: String },
    #[error("Failed to read directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the shared results table from a directory of CSV exports.
pub struct DatasetLoader {
    data_dir: PathBuf,
}

impl DatasetLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// List `.csv` files in the data directory, sorted by file name.
    pub fn csv_files(&self) -> Result<Vec<PathBuf>, LoaderError> {
        if !self.data_dir.is_dir() {
            return Err(LoaderError::MissingDirectory(self.data_dir.clone()));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if is_csv && path.is_file() {
                files.push(path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(LoaderError::NoCsvFiles(self.data_dir.clone()));
        }
        Ok(files)
    }

    /// Load, concatenate and clean all CSV files.
    ///
    /// Qualification rows are dropped, FIS Points are coerced to floats (bad
    /// values and NaN become null), `Date Parsed` is added with a strict
    /// day-month-year parse and exact duplicates are removed keeping the first
    /// occurrence. A result without a Date fails the load.
    pub fn load(&self) -> Result<Dataset, LoaderError> {
        let files = self.csv_files()?;

        let frames = files
            .iter()
            .map(|path| Self::read_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        let df = concat(frames, UnionArgs::default())?
            .filter(col(CATEGORY).neq_missing(lit(QUALIFICATION)))
            .with_columns([
                col(FIS_POINTS).cast(DataType::Float64).fill_nan(lit(NULL)),
                col(DATE)
                    .str()
                    .to_date(StrptimeOptions {
                        format: Some(DATE_FORMAT.into()),
                        strict: true,
                        exact: true,
                        ..Default::default()
                    })
                    .alias(DATE_PARSED),
            ])
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;

        // Strict parsing only rejects malformed text; empty cells arrive as null.
        if let Some(row) = df
            .column(DATE_PARSED)?
            .is_null()
            .into_iter()
            .position(|missing| missing == Some(true))
        {
            let name = df.column(NAME)?.str()?.get(row).unwrap_or_default().to_string();
            return Err(LoaderError::MissingDate { row, name });
        }

        log::info!(
            "Loaded {} results from {} CSV file(s) in {}",
            df.height(),
            files.len(),
            self.data_dir.display()
        );

        Ok(Dataset::new(df))
    }

    /// Read one file with every column as text, projected onto the fixed schema.
    fn read_file(path: &Path) -> Result<LazyFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !present.iter().any(|c| c.as_str() == **required))
        {
            return Err(LoaderError::MissingColumn {
                file: path.to_path_buf(),
                column: missing.to_string(),
            });
        }

        log::debug!("Read {} rows from {}", df.height(), path.display());

        Ok(df
            .lazy()
            .select(REQUIRED_COLUMNS.iter().map(|c| col(*c)).collect::<Vec<_>>()))
    }
}
