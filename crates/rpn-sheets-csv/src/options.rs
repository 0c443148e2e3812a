//! CSV options

/// Options for evaluating a CSV document
#[derive(Debug, Clone)]
pub struct CsvEvalOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Escape character (default: backslash)
    ///
    /// On input it escapes quotes inside quoted fields. On output, fields are never
    /// quoted: the delimiter and the escape character are prefixed with it, and line
    /// breaks inside a field are written as `\r` and `\n` (so `a,b` is written
    /// `a\,b`). The output is not always readable back by this reader, since escapes
    /// are only honored inside quotes.
    ///
    /// With `None`, quotes are doubled on input and output, and output fields are
    /// quoted only when they contain the delimiter, a quote, or a line break.
    pub escape: Option<u8>,
    /// Leading character that marks a formula cell (default: `=`)
    pub formula_prefix: char,
    /// Text written in place of a formula that fails to parse or evaluate
    pub error_text: String,
    /// Line terminator for output records
    pub line_terminator: LineTerminator,
}

impl Default for CsvEvalOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: Some(b'\\'),
            formula_prefix: '=',
            error_text: "#N/A".to_string(),
            line_terminator: LineTerminator::LF,
        }
    }
}

impl CsvEvalOptions {
    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the escape character, or `None` to double quotes instead
    pub fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }

    /// Set the text written for failed formulas
    pub fn with_error_text(mut self, error_text: impl Into<String>) -> Self {
        self.error_text = error_text.into();
        self
    }

    /// Set the output line terminator
    pub fn with_line_terminator(mut self, line_terminator: LineTerminator) -> Self {
        self.line_terminator = line_terminator;
        self
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineTerminator {
    /// Unix-style (LF)
    #[default]
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}

impl LineTerminator {
    pub(crate) fn to_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        }
    }

    pub(crate) fn as_bytes(self) -> &'static [u8] {
        match self {
            LineTerminator::LF => &b"\n"[..],
            LineTerminator::CRLF => &b"\r\n"[..],
            LineTerminator::CR => &b"\r"[..],
        }
    }
}
