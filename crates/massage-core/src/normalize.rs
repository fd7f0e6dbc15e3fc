//! County-name normalization.
//!
//! County values in the raw export look like `Cook County` or
//! `St. Louis  County`. Normalized values drop the trailing ` County` and are
//! uppercased, so `Cook County` becomes `COOK`.

use std::borrow::Cow;
use std::sync::LazyLock;

use csv::StringRecord;
use regex::Regex;

use crate::error::{MassageError, Result};

/// Trailing `County` preceded by whitespace, case-exact.
///
/// Whitespace is Unicode `\s` plus the information separators U+001C..U+001F.
static COUNTY_SUFFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s\x1c-\x1f]+County[\s\x1c-\x1f]*$").expect("Invalid county suffix regex")
});

/// Remove a trailing ` County` suffix.
///
/// Only a suffix anchored at the end of the value is removed; the whitespace
/// before `County` and any whitespace after it go with it. Lowercase `county`
/// does not match. Returns the input borrowed when nothing was removed.
pub fn strip_county_suffix(value: &str) -> Cow<'_, str> {
    COUNTY_SUFFIX_REGEX.replace(value, "")
}

/// Normalize a county name: strip the ` County` suffix, then uppercase.
pub fn normalize_county(value: &str) -> String {
    strip_county_suffix(value).to_uppercase()
}

/// Outcome of normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub record: StringRecord,
    /// The county value ended in ` County`.
    pub suffix_stripped: bool,
    /// The county value differs from its input.
    pub changed: bool,
}

/// Build a copy of `record` with the field at `column` normalized.
///
/// `line` is only used to report a record that is too short.
pub fn normalize_record(
    record: &StringRecord,
    column: usize,
    line: u64,
) -> Result<NormalizedRecord> {
    let Some(original) = record.get(column) else {
        return Err(MassageError::RowTooShort {
            line,
            width: record.len(),
            column,
        });
    };

    let stripped = strip_county_suffix(original);
    let suffix_stripped = matches!(stripped, Cow::Owned(_));
    let normalized = stripped.to_uppercase();
    let changed = normalized != original;

    let mut output = StringRecord::with_capacity(record.as_slice().len(), record.len());
    for (idx, field) in record.iter().enumerate() {
        if idx == column {
            output.push_field(&normalized);
        } else {
            output.push_field(field);
        }
    }

    Ok(NormalizedRecord {
        record: output,
        suffix_stripped,
        changed,
    })
}
