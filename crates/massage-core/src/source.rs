//! Raw input framing that the CSV parser hides.
//!
//! The `csv` reader drops a leading UTF-8 byte order mark and discards blank
//! lines between records. Both are rows in the source data: the BOM belongs to
//! the first field of the first row, and a blank line is a row with no fields.

use std::collections::VecDeque;
use std::io::{self, Chain, Cursor, Read};

use csv::{Position, StringRecord};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";
const BOM_CHAR: char = '\u{feff}';

/// Remove a leading UTF-8 BOM from `input`, reporting whether it was there.
///
/// Bytes read while looking for the BOM are replayed when it is absent.
pub(crate) fn split_bom<R: Read>(mut input: R) -> io::Result<(bool, Chain<Cursor<Vec<u8>>, R>)> {
    let mut prefix = Vec::with_capacity(UTF8_BOM.len());
    (&mut input).take(UTF8_BOM.len() as u64).read_to_end(&mut prefix)?;
    let has_bom = prefix == UTF8_BOM;
    if has_bom {
        prefix.clear();
    }
    Ok((has_bom, Cursor::new(prefix).chain(input)))
}

/// Copy of `record` with the BOM put back in front of its first field.
pub(crate) fn prepend_bom(record: &StringRecord) -> StringRecord {
    let mut prefixed = StringRecord::with_capacity(
        record.as_slice().len() + BOM_CHAR.len_utf8(),
        record.len(),
    );
    for (idx, field) in record.iter().enumerate() {
        if idx == 0 {
            prefixed.push_field(&format!("{BOM_CHAR}{field}"));
        } else {
            prefixed.push_field(field);
        }
    }
    prefixed
}

/// The row formed by a BOM followed directly by a line end or end of input.
pub(crate) fn bom_only_record() -> StringRecord {
    let mut record = StringRecord::new();
    record.push_field(&BOM_CHAR.to_string());
    record
}

/// Line terminators found at the start of a span the parser consumed.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LeadingLines {
    /// Line numbers of blank lines, in input order.
    pub blank_lines: Vec<u64>,
    /// Line on which the next record starts.
    pub record_line: u64,
}

/// Reader adapter that keeps every byte it hands out until the parser's
/// position shows it was consumed.
pub(crate) struct RawTap<R> {
    inner: R,
    window: VecDeque<u8>,
    /// Stream offset of `window[0]`.
    window_start: u64,
    /// The last consumed byte was `\r`, so a leading `\n` finishes that line.
    after_cr: bool,
}

impl<R> RawTap<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            window: VecDeque::new(),
            window_start: 0,
            after_cr: false,
        }
    }

    /// Inspect the bytes consumed between `start` and byte offset `end`, then
    /// release them.
    ///
    /// `start` must be the parser position where the previous span ended.
    pub(crate) fn leading_lines(&mut self, start: &Position, end: u64) -> LeadingLines {
        let consumed = end.saturating_sub(self.window_start);
        let len = usize::try_from(consumed).map_or(self.window.len(), |n| n.min(self.window.len()));

        let mut leading = LeadingLines {
            blank_lines: Vec::new(),
            record_line: start.line(),
        };
        let mut after_cr = self.after_cr;
        for &byte in self.window.iter().take(len) {
            match byte {
                b'\n' if after_cr => leading.record_line += 1,
                b'\r' => leading.blank_lines.push(leading.record_line),
                b'\n' => {
                    leading.blank_lines.push(leading.record_line);
                    leading.record_line += 1;
                }
                _ => break,
            }
            after_cr = byte == b'\r';
        }

        if len > 0 {
            self.after_cr = self.window.get(len - 1) == Some(&b'\r');
        }
        self.window.drain(..len);
        self.window_start = end;
        leading
    }
}

impl<R: Read> Read for RawTap<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.window.extend(&buf[..n]);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all<R: Read>(mut input: R) -> Vec<u8> {
        let mut out = Vec::new();
        input.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_split_bom_present() {
        let (has_bom, rest) = split_bom("\u{feff}Id,Year".as_bytes()).unwrap();
        assert!(has_bom);
        assert_eq!(read_all(rest), b"Id,Year");
    }

    #[test]
    fn test_split_bom_absent_replays_prefix() {
        let (has_bom, rest) = split_bom("Id,Year".as_bytes()).unwrap();
        assert!(!has_bom);
        assert_eq!(read_all(rest), b"Id,Year");

        let (has_bom, rest) = split_bom("a".as_bytes()).unwrap();
        assert!(!has_bom);
        assert_eq!(read_all(rest), b"a");
    }

    #[test]
    fn test_prepend_bom_touches_first_field_only() {
        let record = StringRecord::from(vec!["Id", "Year", "County"]);
        let prefixed = prepend_bom(&record);
        assert_eq!(
            prefixed,
            StringRecord::from(vec!["\u{feff}Id", "Year", "County"])
        );
    }

    #[test]
    fn test_leading_lines_counts_lf_and_crlf_blanks() {
        let mut tap = RawTap::new("\n\r\nabc".as_bytes());
        read_all(&mut tap);
        let start = Position::new();
        let leading = tap.leading_lines(&start, 6);
        assert_eq!(leading.blank_lines, vec![1, 2]);
        assert_eq!(leading.record_line, 3);
    }

    #[test]
    fn test_leading_lf_after_cr_is_not_blank() {
        let mut tap = RawTap::new("a\r\nb".as_bytes());
        read_all(&mut tap);
        let mut start = Position::new();
        start.set_line(1);
        assert!(tap.leading_lines(&start, 2).blank_lines.is_empty());

        start.set_byte(2);
        let leading = tap.leading_lines(&start, 4);
        assert!(leading.blank_lines.is_empty());
        assert_eq!(leading.record_line, 2);
    }
}
