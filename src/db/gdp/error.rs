use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GdpError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: can't parse '{value}' as a number")]
    InvalidValue { line: u64, value: String },

    #[error("table {0} does not exist")]
    MissingTable(String),

    #[error("table {table} has no column {column}")]
    MissingColumn { table: String, column: String },

    #[error("invalid setting {name}='{value}'")]
    InvalidSetting { name: String, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Duckdb(#[from] duckdb::Error),
}
