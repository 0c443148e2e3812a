//! CSV reader

use crate::error::CsvResult;
use crate::options::CsvEvalOptions;

/// Where a record sits in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordLine {
    /// 1-based line on which the record starts
    pub line: u64,
    /// Blank lines between the previous record and this one
    pub blank_lines_before: u64,
}

/// Counts line breaks, treating `\r\n` as a single break
#[derive(Debug, Clone, Copy)]
struct LineCounter {
    line: u64,
    after_cr: bool,
    at_line_start: bool,
}

impl LineCounter {
    fn new() -> Self {
        Self {
            line: 1,
            after_cr: false,
            at_line_start: true,
        }
    }

    fn advance(&mut self, bytes: &[u8]) {
        for &b in bytes {
            match b {
                b'\r' => self.line += 1,
                b'\n' if !self.after_cr => self.line += 1,
                _ => {}
            }
            self.after_cr = b == b'\r';
        }
        if let Some(&last) = bytes.last() {
            self.at_line_start = is_break(last);
        }
    }

    /// Blank lines passed since `before`, not counting the break that ends the line
    /// that was open at `before`
    fn blank_lines_since(&self, before: u64, open_line: bool) -> u64 {
        (self.line - before).saturating_sub(u64::from(open_line))
    }
}

fn is_break(b: u8) -> bool {
    b == b'\r' || b == b'\n'
}

/// Reads records from an in-memory document and tracks the line each one starts on
///
/// The `csv` parser skips blank lines; this reader reports them so callers can keep
/// row numbers aligned with the source lines. There is no header row and records may
/// differ in length.
pub(crate) struct RecordReader<'a> {
    input: &'a [u8],
    inner: csv::Reader<&'a [u8]>,
    lines: LineCounter,
    consumed: usize,
}

impl<'a> RecordReader<'a> {
    pub(crate) fn new(input: &'a [u8], options: &CsvEvalOptions) -> Self {
        let inner = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .escape(options.escape)
            .double_quote(options.escape.is_none())
            .has_headers(false)
            .flexible(true)
            .from_reader(input);

        Self {
            input,
            inner,
            lines: LineCounter::new(),
            consumed: 0,
        }
    }

    /// Read the next record into `record`, or return `None` at the end of input
    pub(crate) fn read(&mut self, record: &mut csv::StringRecord) -> CsvResult<Option<RecordLine>> {
        if !self.inner.read_record(record)? {
            return Ok(None);
        }

        let end = usize::try_from(self.inner.position().byte())
            .unwrap_or(self.input.len())
            .min(self.input.len());
        let slice = self.input.get(self.consumed..end).unwrap_or_default();
        self.consumed = end;

        let before = self.lines.line;
        let open_line = !self.lines.at_line_start;
        let leading = slice.iter().take_while(|&&b| is_break(b)).count();
        self.lines.advance(&slice[..leading]);

        let position = RecordLine {
            line: self.lines.line,
            blank_lines_before: self.lines.blank_lines_since(before, open_line),
        };
        self.lines.advance(&slice[leading..]);
        Ok(Some(position))
    }

    /// Blank lines after the last record
    pub(crate) fn trailing_blank_lines(&mut self) -> u64 {
        let rest = self.input.get(self.consumed..).unwrap_or_default();
        self.consumed = self.input.len();

        let before = self.lines.line;
        let open_line = !self.lines.at_line_start;
        self.lines.advance(rest);
        self.lines.blank_lines_since(before, open_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(input: &str, options: &CsvEvalOptions) -> Vec<(u64, u64, Vec<String>)> {
        let mut reader = RecordReader::new(input.as_bytes(), options);
        let mut record = csv::StringRecord::new();
        let mut rows = Vec::new();
        while let Some(pos) = reader.read(&mut record).unwrap() {
            rows.push((
                pos.line,
                pos.blank_lines_before,
                record.iter().map(String::from).collect(),
            ));
        }
        rows
    }

    fn lines(input: &str) -> (Vec<(u64, u64)>, u64) {
        let mut reader = RecordReader::new(input.as_bytes(), &CsvEvalOptions::default());
        let mut record = csv::StringRecord::new();
        let mut positions = Vec::new();
        while let Some(pos) = reader.read(&mut record).unwrap() {
            positions.push((pos.line, pos.blank_lines_before));
        }
        (positions, reader.trailing_blank_lines())
    }

    #[test]
    fn test_ragged_records() {
        let rows = records("a,b,c\nd\ne,f\n", &CsvEvalOptions::default());
        assert_eq!(
            rows,
            vec![
                (1, 0, vec!["a".into(), "b".into(), "c".into()]),
                (2, 0, vec!["d".into()]),
                (3, 0, vec!["e".into(), "f".into()]),
            ]
        );
    }

    #[test]
    fn test_blank_lines_keep_line_numbers() {
        assert_eq!(lines("1\n\n5\n"), (vec![(1, 0), (3, 1)], 0));
        assert_eq!(lines("\n\n1\n"), (vec![(3, 2)], 0));
        assert_eq!(lines("1\n\n\n"), (vec![(1, 0)], 2));
        assert_eq!(lines("1\n2"), (vec![(1, 0), (2, 0)], 0));
    }

    #[test]
    fn test_crlf_and_cr_line_breaks() {
        assert_eq!(lines("1\r\n\r\n5\r\n"), (vec![(1, 0), (3, 1)], 0));
        assert_eq!(lines("1\r\r5\r"), (vec![(1, 0), (3, 1)], 0));
        assert_eq!(lines("1\r\n\r\n"), (vec![(1, 0)], 1));
    }

    #[test]
    fn test_quoted_line_break_spans_lines() {
        assert_eq!(lines("\"a\nb\",1\n2\n"), (vec![(1, 0), (3, 0)], 0));
    }

    #[test]
    fn test_backslash_escape() {
        let rows = records("\"say \\\"hi\\\"\",x\n", &CsvEvalOptions::default());
        assert_eq!(rows[0].2, vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn test_doubled_quote_without_escape() {
        let options = CsvEvalOptions::default().with_escape(None);
        let rows = records("\"say \"\"hi\"\"\",x\n", &options);
        assert_eq!(rows[0].2, vec!["say \"hi\"", "x"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = CsvEvalOptions::default().with_delimiter(b';');
        let rows = records("a;=1 2 +\n", &options);
        assert_eq!(rows[0].2, vec!["a", "=1 2 +"]);
    }
}
