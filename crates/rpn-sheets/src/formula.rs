//! Shortcuts that use the built-in function registry

use rpn_sheets_formula::{
    default_registry, parse_rpn, Expression, FormulaResult, VarTable,
};

/// Parse an RPN formula using the built-in math functions
///
/// A single leading `=` is ignored, so cell text can be passed as is.
pub fn parse(formula: &str) -> FormulaResult<Expression> {
    let formula = formula.strip_prefix('=').unwrap_or(formula);
    parse_rpn(formula, default_registry())
}

/// Parse and evaluate an RPN formula in one step
pub fn evaluate_formula<V: VarTable + ?Sized>(formula: &str, vars: &V) -> FormulaResult<f64> {
    parse(formula)?.eval(vars)
}
