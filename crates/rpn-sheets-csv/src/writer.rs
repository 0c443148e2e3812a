//! CSV writer

use std::borrow::Cow;
use std::io::Write;

use crate::error::CsvResult;
use crate::options::CsvEvalOptions;

/// Writes evaluated records in the output dialect described by the options
///
/// With an escape character, fields are never quoted: the delimiter and the escape
/// character are prefixed with it, and line breaks are written as `\r` and `\n`.
/// Without one, fields are quoted only when necessary and quotes are doubled.
pub(crate) struct RecordWriter<W: Write> {
    out: W,
    builder: csv::WriterBuilder,
    delimiter: u8,
    escape: Option<u8>,
    terminator: &'static [u8],
}

impl<W: Write> RecordWriter<W> {
    pub(crate) fn new(writer: W, options: &CsvEvalOptions) -> Self {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(options.line_terminator.to_csv())
            .flexible(true);

        match options.escape {
            Some(_) => builder.quote_style(csv::QuoteStyle::Never),
            None => builder
                .quote_style(csv::QuoteStyle::Necessary)
                .double_quote(true),
        };

        Self {
            out: writer,
            builder,
            delimiter: options.delimiter,
            escape: options.escape,
            terminator: options.line_terminator.as_bytes(),
        }
    }

    /// Write one record
    pub(crate) fn write_record(&mut self, fields: &[String]) -> CsvResult<()> {
        let mut wtr = self.builder.from_writer(Vec::new());
        let delimiter = self.delimiter;
        match self.escape {
            Some(escape) => wtr.write_record(
                fields
                    .iter()
                    .map(|field| escape_field(field, delimiter, escape)),
            )?,
            None => wtr.write_record(fields)?,
        }
        let encoded = wtr.into_inner().map_err(|e| e.into_error())?;
        self.out.write_all(&encoded)?;
        Ok(())
    }

    /// Write an empty line
    ///
    /// Bypasses `csv`, which writes a record without fields as `""`.
    pub(crate) fn write_blank(&mut self) -> CsvResult<()> {
        self.out.write_all(self.terminator)?;
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> CsvResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn escape_field(field: &str, delimiter: u8, escape: u8) -> Cow<'_, [u8]> {
    let needs_escape = |b: u8| b == delimiter || b == escape || b == b'\r' || b == b'\n';
    if !field.bytes().any(needs_escape) {
        return Cow::Borrowed(field.as_bytes());
    }

    let mut escaped = Vec::with_capacity(field.len() + 4);
    for b in field.bytes() {
        if needs_escape(b) {
            escaped.push(escape);
            escaped.push(match b {
                b'\r' => b'r',
                b'\n' => b'n',
                other => other,
            });
        } else {
            escaped.push(b);
        }
    }
    Cow::Owned(escaped)
}
