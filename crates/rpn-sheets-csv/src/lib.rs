//! # rpn-sheets-csv
//!
//! Evaluates RPN formulas embedded in CSV files.
//!
//! Every field that starts with `=` is parsed as an RPN formula and replaced by its
//! value. Formulas may refer to earlier numeric cells by their A1 address. Cells that
//! fail to evaluate are replaced by `#N/A`.
//!
//! ```rust
//! use rpn_sheets_csv::{CsvEvalOptions, CsvEvaluator};
//!
//! let evaluator = CsvEvaluator::new(CsvEvalOptions::default());
//! let output = evaluator.evaluate_to_string("x,1.5\ny,=B1 4 * 1 +\n").unwrap();
//! assert_eq!(output, "x,1.5\ny,7.0\n");
//! ```

mod error;
mod evaluator;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use evaluator::{CsvEvaluator, EvaluationStats};
pub use options::{CsvEvalOptions, LineTerminator};
