//! Formula evaluator
//!
//! Evaluates expression trees against variable bindings and folds constant subtrees.

use crate::ast::Expression;
use crate::bindings::VarTable;
use crate::error::FormulaResult;

/// Evaluate an expression against `vars`
pub fn evaluate<V: VarTable + ?Sized>(expr: &Expression, vars: &V) -> FormulaResult<f64> {
    expr.eval(vars)
}

impl Expression {
    /// Evaluate this expression, looking variables up in `vars`
    ///
    /// Operands are evaluated left before right and the first unbound variable aborts
    /// the evaluation.
    pub fn eval<V: VarTable + ?Sized>(&self, vars: &V) -> FormulaResult<f64> {
        match self {
            Expression::Constant(value) => Ok(*value),
            Expression::Variable(name) => vars.get(name),
            Expression::Operation { op, left, right } => {
                let left = left.eval(vars)?;
                let right = right.eval(vars)?;
                Ok(op.apply(left, right))
            }
            Expression::Application { function, argument } => {
                Ok(function.apply(argument.eval(vars)?))
            }
        }
    }

    /// Return a copy of this expression with every subtree that can be evaluated against
    /// `vars` replaced by its value
    pub fn optimize<V: VarTable + ?Sized>(&self, vars: &V) -> Expression {
        let partial = match self {
            Expression::Constant(_) => return self.clone(),
            Expression::Variable(name) => {
                return match vars.get(name) {
                    Ok(value) => Expression::Constant(value),
                    Err(_) => self.clone(),
                };
            }
            Expression::Operation { op, left, right } => {
                Expression::operation(*op, left.optimize(vars), right.optimize(vars))
            }
            Expression::Application { function, argument } => {
                Expression::application(*function, argument.optimize(vars))
            }
        };

        match partial.eval(vars) {
            Ok(value) => Expression::Constant(value),
            Err(_) => partial,
        }
    }
}
