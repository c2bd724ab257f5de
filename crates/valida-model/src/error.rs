use std::path::PathBuf;

use thiserror::Error;

use crate::rules::RuleSection;

#[derive(Debug, Error)]
pub enum ValidaError {
    #[error("failed to load dataset {path}: {reason}")]
    DatasetLoad { path: PathBuf, reason: String },
    #[error("failed to load rule document {path}: {reason}")]
    RuleLoad { path: PathBuf, reason: String },
    #[error("malformed rule in `{section}` for column `{column}`: {reason}")]
    RuleFormat {
        section: RuleSection,
        column: String,
        reason: String,
    },
    #[error("column `{column}` does not support a {expected} comparison")]
    ColumnTypeMismatch { column: String, expected: String },
    #[error("malformed results entry `{key}`: {reason}")]
    ResultsFormat { key: String, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ValidaError>;
