//! Error types for the data pipeline.
//!
//! `thiserror` types are used inside `data`; the loader and the application
//! layer wrap them with `anyhow` context.

use thiserror::Error;

/// Errors raised while validating the source table.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: invalid {column} '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: Import_Export must be 'Import' or 'Export', got '{value}'")]
    InvalidFlow { row: usize, value: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType { column: String, data_type: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// Errors raised by the sampler.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SampleError {
    #[error("cannot sample {requested} rows from a table of {available}")]
    NotEnoughRows { requested: usize, available: usize },
}

/// Errors that fail a single view without affecting the others.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("row {row}: Date '{value}' is not in day-month-year form")]
    InvalidDate { row: usize, value: String },
}
