//! County-name normalization for CSV data files.
//!
//! This crate rewrites one column of a CSV file, stripping a trailing
//! ` County` from each value and uppercasing the rest, while copying every
//! other field and the row order unchanged.
//!
//! # Features
//!
//! - **Normalization**: [`normalize_county`] for single values
//! - **Streaming**: [`normalize_stream`] over any reader/writer pair
//! - **File Jobs**: [`run_job`] with all-or-nothing output replacement
//!
//! # Example
//!
//! ```ignore
//! use massage_core::{MassageConfig, run_job};
//!
//! let config = MassageConfig::default().with_output("out/gun_data.csv");
//! let report = run_job(&config)?;
//! println!("{} rows", report.stats.rows);
//! ```

mod error;
mod normalize;
mod options;
mod pipeline;
mod source;

// === Error Types ===
pub use error::{MassageError, Result};

// === Normalization ===
pub use normalize::{NormalizedRecord, normalize_county, normalize_record, strip_county_suffix};

// === Configuration ===
pub use options::{
    DEFAULT_COUNTY_COLUMN, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, MassageConfig,
    NormalizeOptions, QuoteStyle,
};

// === Pipeline ===
pub use pipeline::{JobReport, NormalizeStats, normalize_stream, run_job, temp_path_for};
