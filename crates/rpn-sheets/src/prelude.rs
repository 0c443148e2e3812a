//! Prelude module - common imports for rpn-sheets users
//!
//! ```rust
//! use rpn_sheets::prelude::*;
//! ```

pub use crate::{
    // Shortcuts
    evaluate_formula,
    parse,

    // Formula types
    Expression,
    FormulaError,
    FormulaResult,
    FunctionRegistry,
    MapVarTable,
    Operator,
    UnaryFunction,
    VarTable,

    // CSV evaluation
    CsvEvalOptions,
    CsvEvaluator,
    EvaluationStats,

    // Cell addressing
    CellAddress,
};
