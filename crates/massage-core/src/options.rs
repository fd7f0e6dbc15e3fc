//! Job configuration.

use std::path::PathBuf;

/// Raw gun-death export read when no input is given.
pub const DEFAULT_INPUT_PATH: &str = "raw_data/gun_deaths_us_1999_2019.csv";

/// Normalized file written when no output is given.
pub const DEFAULT_OUTPUT_PATH: &str = "gun_data.csv";

/// Zero-based index of the county field in the gun-death export.
pub const DEFAULT_COUNTY_COLUMN: usize = 2;

/// Output quoting policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    /// Quote a field only when it contains a delimiter, quote or newline.
    #[default]
    Necessary,
    /// Quote every field, matching Python's `unix` CSV dialect.
    Always,
}

impl QuoteStyle {
    pub(crate) fn to_csv(self) -> csv::QuoteStyle {
        match self {
            Self::Necessary => csv::QuoteStyle::Necessary,
            Self::Always => csv::QuoteStyle::Always,
        }
    }
}

/// Options for a single normalization pass over a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Zero-based index of the field to normalize.
    pub column: usize,
    /// Quoting applied when writing records.
    pub quote_style: QuoteStyle,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            column: DEFAULT_COUNTY_COLUMN,
            quote_style: QuoteStyle::default(),
        }
    }
}

/// Configuration for a file-to-file normalization job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MassageConfig {
    /// CSV file to read.
    pub input_path: PathBuf,
    /// CSV file to create or overwrite.
    pub output_path: PathBuf,
    /// Stream-level options (column, quoting).
    pub options: NormalizeOptions,
    /// Transform and count rows without writing the output.
    pub dry_run: bool,
}

impl Default for MassageConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            options: NormalizeOptions::default(),
            dry_run: false,
        }
    }
}

impl MassageConfig {
    /// Set the input path.
    #[must_use]
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the output path.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the county column index.
    #[must_use]
    pub fn with_column(mut self, column: usize) -> Self {
        self.options.column = column;
        self
    }

    /// Set the output quoting policy.
    #[must_use]
    pub fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.options.quote_style = quote_style;
        self
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub fn with_dry_run(mut self, enable: bool) -> Self {
        self.dry_run = enable;
        self
    }
}
