//! Streaming CSV pass and file jobs.
//!
//! Records are read, normalized and written one at a time, in input order.
//! File jobs write to a sibling temp file and rename it over the destination
//! only after the whole input has been processed.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tracing::{debug, info, info_span, trace, warn};

use crate::error::{MassageError, Result};
use crate::normalize::normalize_record;
use crate::options::{MassageConfig, NormalizeOptions};
use crate::source::{RawTap, bom_only_record, prepend_bom, split_bom};

/// Counters gathered during a normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Records written.
    pub rows: u64,
    /// Records whose county field ended in ` County`.
    pub suffixes_stripped: u64,
    /// Records whose county field was rewritten.
    pub changed: u64,
}

/// Result of a completed file job.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub input: PathBuf,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
    pub stats: NormalizeStats,
    pub elapsed: Duration,
}

/// Normalize every record from `input` into `output`.
///
/// No header row is assumed. Records may differ in width, but each must have
/// a field at `options.column`; a blank line is a record with no fields. A
/// leading byte order mark stays part of the first field. The output uses
/// `\n` line endings and is flushed before returning.
pub fn normalize_stream<R, W>(
    input: R,
    output: W,
    options: &NormalizeOptions,
) -> Result<NormalizeStats>
where
    R: Read,
    W: Write,
{
    let (mut bom_pending, input) =
        split_bom(input).map_err(|source| MassageError::Read { source })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(RawTap::new(input));
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(options.quote_style.to_csv())
        .from_writer(output);

    let mut stats = NormalizeStats::default();
    let mut record = StringRecord::new();
    loop {
        let start = reader.position().clone();
        let more = reader
            .read_record(&mut record)
            .map_err(MassageError::from_read)?;
        let end = reader.position().byte();
        let leading = reader.get_mut().leading_lines(&start, end);

        for line in leading.blank_lines {
            if bom_pending {
                bom_pending = false;
                write_normalized(&mut writer, &bom_only_record(), line, options, &mut stats)?;
            } else {
                return Err(MassageError::RowTooShort {
                    line,
                    width: 0,
                    column: options.column,
                });
            }
        }
        if !more {
            break;
        }

        if bom_pending {
            bom_pending = false;
            record = prepend_bom(&record);
        }
        write_normalized(&mut writer, &record, leading.record_line, options, &mut stats)?;
    }

    if bom_pending {
        write_normalized(&mut writer, &bom_only_record(), 1, options, &mut stats)?;
    }

    writer
        .flush()
        .map_err(|source| MassageError::Write { source: source.into() })?;
    Ok(stats)
}

fn write_normalized<W: Write>(
    writer: &mut csv::Writer<W>,
    record: &StringRecord,
    line: u64,
    options: &NormalizeOptions,
    stats: &mut NormalizeStats,
) -> Result<()> {
    let normalized = normalize_record(record, options.column, line)?;
    if normalized.changed {
        trace!(
            line,
            from = record.get(options.column).unwrap_or_default(),
            to = normalized.record.get(options.column).unwrap_or_default(),
            "normalized county"
        );
        stats.changed += 1;
    }
    if normalized.suffix_stripped {
        stats.suffixes_stripped += 1;
    }
    writer
        .write_record(&normalized.record)
        .map_err(|source| MassageError::Write { source })?;
    stats.rows += 1;
    Ok(())
}

/// Run a file-to-file normalization job.
///
/// The destination is replaced only when every record was processed; on any
/// error it is left as it was and the temp file is removed.
pub fn run_job(config: &MassageConfig) -> Result<JobReport> {
    let span = info_span!(
        "normalize",
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        column = config.options.column
    );
    let _guard = span.enter();
    let start = Instant::now();

    let input = open_input(&config.input_path)?;

    let (stats, output) = if config.dry_run {
        warn!("dry run, output file will not be written");
        let stats = normalize_stream(input, io::sink(), &config.options)?;
        (stats, None)
    } else {
        let stats = write_atomically(&config.output_path, |writer| {
            normalize_stream(input, writer, &config.options)
        })?;
        (stats, Some(config.output_path.clone()))
    };

    let elapsed = start.elapsed();
    info!(
        rows = stats.rows,
        suffixes_stripped = stats.suffixes_stripped,
        changed = stats.changed,
        elapsed_ms = millis(elapsed),
        "normalization complete"
    );

    Ok(JobReport {
        input: config.input_path.clone(),
        output,
        stats,
        elapsed,
    })
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MassageError::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MassageError::InputOpen {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    Ok(BufReader::new(file))
}

/// Temp file written next to `path` before the final rename.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomically<T, F>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<T>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MassageError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);
    debug!(temp = %temp_path.display(), "writing temp file");
    let file = File::create(&temp_path).map_err(|e| MassageError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    let result = write(&mut writer).and_then(|value| {
        let file = writer.into_inner().map_err(|e| MassageError::Io {
            operation: "flush",
            path: temp_path.clone(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|e| MassageError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        Ok(value)
    });

    let value = match result {
        Ok(value) => value,
        Err(err) => {
            discard_temp(&temp_path);
            return Err(err);
        }
    };

    if let Err(source) = fs::rename(&temp_path, path) {
        discard_temp(&temp_path);
        return Err(MassageError::Persist {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }
    debug!(path = %path.display(), "output persisted");
    Ok(value)
}

fn discard_temp(temp_path: &Path) {
    match fs::remove_file(temp_path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(temp = %temp_path.display(), error = %e, "failed to remove temp file"),
    }
}
