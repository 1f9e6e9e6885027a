// crates/stockcount-core/src/error.rs

use polars::error::PolarsError;
use rust_xlsxwriter::XlsxError;
use stockcount_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Database query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("Spreadsheet serialization failed: {0}")]
    Serialization(#[from] XlsxError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Timezone error: {0}")]
    Timezone(#[from] ParserError),

    #[error("Report has {0} rows, more than one worksheet can hold")]
    TooManyRows(usize),

    #[error("Report has {0} columns, more than one worksheet can hold")]
    TooManyColumns(usize),
}

pub type Result<T> = std::result::Result<T, ExportError>;
