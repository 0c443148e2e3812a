//! # rpn-sheets-formula
//!
//! Expression engine for rpn-sheets formulas.
//!
//! This crate provides:
//! - Formula parsing (RPN text → [`Expression`] tree)
//! - Evaluation against a [`VarTable`] of variable bindings
//! - Constant folding ([`Expression::optimize`])
//! - Infix and postfix rendering
//! - A registry of named unary math functions
//!
//! ## Example
//!
//! ```rust
//! use rpn_sheets_formula::{parse_rpn, FunctionRegistry, MapVarTable, VarTable};
//!
//! let functions = FunctionRegistry::new();
//! let expr = parse_rpn("B1 4 * 1 + sqrt()", &functions).unwrap();
//! assert_eq!(expr.infix_string(), "sqrt(((B1 * 4.0) + 1.0))");
//!
//! let mut vars = MapVarTable::new();
//! vars.set("B1", 2.0);
//! assert_eq!(expr.eval(&vars).unwrap(), 3.0);
//! ```

pub mod ast;
pub mod bindings;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{format_number, Expression, Operator};
pub use bindings::{MapVarTable, VarTable};
pub use error::{FormulaError, FormulaResult};
pub use functions::{default_registry, FunctionRegistry, UnaryFunction};
pub use parser::{parse_rpn, tokenize, Token, Tokenizer};
