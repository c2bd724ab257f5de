//! CSV dataset loading.
//!
//! Datasets are tabular CSV files with a header row, read into a polars
//! `DataFrame`. Input must be UTF-8 compatible so non-ASCII column labels and
//! values survive intact. Loading failures surface as
//! [`ValidaError::DatasetLoad`]; the validation engine is never invoked with
//! a dataset that failed to load.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use valida_model::{Result, ValidaError};

/// Read a CSV file into a `DataFrame`.
pub fn read_dataset(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(ValidaError::DatasetLoad {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|error| ValidaError::DatasetLoad {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?
        .finish()
        .map_err(|error| ValidaError::DatasetLoad {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;
    debug!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "dataset loaded"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_csv_with_header() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("datos.csv");
        std::fs::write(&path, "id,nombre,edad\n1,Ana,34\n2,Luis,29\n").expect("write csv");

        let df = read_dataset(&path).expect("dataset");
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["id", "nombre", "edad"]);
    }

    #[test]
    fn preserves_non_ascii_labels() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("datos.csv");
        std::fs::write(&path, "año,país\n2020,España\n").expect("write csv");

        let df = read_dataset(&path).expect("dataset");
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["año", "país"]);
    }

    #[test]
    fn missing_file_is_a_dataset_load_error() {
        let error = read_dataset(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(error, ValidaError::DatasetLoad { .. }));
    }
}
