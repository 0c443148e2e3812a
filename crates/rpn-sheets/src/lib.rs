//! # rpn-sheets
//!
//! Evaluates spreadsheet-style formulas written in Reverse Polish Notation.
//!
//! ## Features
//!
//! - Parse RPN formulas (`B1 4 * 1 +`) into expression trees
//! - Evaluate against named variables, with constant folding
//! - Render formulas in fully parenthesized infix or canonical postfix form
//! - Evaluate every formula cell in a CSV document
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//!
//! let expr = parse("x 2 ^ 1 +").unwrap();
//! assert_eq!(expr.infix_string(), "((x ^ 2.0) + 1.0)");
//!
//! let vars: MapVarTable = [("x", 3.0)].into_iter().collect();
//! assert_eq!(expr.eval(&vars).unwrap(), 10.0);
//!
//! let output = CsvEvaluator::default()
//!     .evaluate_to_string("2,=A1 3 *\n")
//!     .unwrap();
//! assert_eq!(output, "2,6.0\n");
//! ```

pub mod formula;
pub mod prelude;

pub use formula::{evaluate_formula, parse};

// Re-export core types
pub use rpn_sheets_core::{column_label, CellAddress, Error, Result};

// Re-export formula types
pub use rpn_sheets_formula::{
    default_registry, format_number, parse_rpn, tokenize, Expression, FormulaError,
    FormulaResult, FunctionRegistry, MapVarTable, Operator, Token, Tokenizer, UnaryFunction,
    VarTable,
};

// Re-export CSV evaluation types
pub use rpn_sheets_csv::{
    CsvError, CsvEvalOptions, CsvEvaluator, CsvResult, EvaluationStats, LineTerminator,
};
