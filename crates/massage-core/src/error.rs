//! Error types for county normalization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while normalizing a CSV file.
#[derive(Debug, Error)]
pub enum MassageError {
    // === Input Errors ===
    /// Input file does not exist.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Input file exists but could not be opened.
    #[error("failed to open input {path}: {source}")]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input could not be read.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    // === CSV Errors ===
    /// Record could not be read or parsed.
    #[error("{}", parse_message(*line, source))]
    Parse {
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },

    /// Record has no field at the county column.
    #[error("row at line {line} has {width} fields, county column {column} is out of range")]
    RowTooShort {
        line: u64,
        width: usize,
        column: usize,
    },

    /// Record could not be written to the output.
    #[error("failed to write record: {source}")]
    Write {
        #[source]
        source: csv::Error,
    },

    // === Output File Errors ===
    /// Output file I/O failed.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file could not be moved over the destination.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    Persist {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn parse_message(line: Option<u64>, source: &csv::Error) -> String {
    match line {
        Some(line) => format!("malformed CSV at line {line}: {source}"),
        None => format!("malformed CSV: {source}"),
    }
}

impl MassageError {
    pub(crate) fn from_read(source: csv::Error) -> Self {
        let line = source.position().map(csv::Position::line);
        Self::Parse { line, source }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, MassageError>;
