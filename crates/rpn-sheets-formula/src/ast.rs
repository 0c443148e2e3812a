//! Formula Abstract Syntax Tree types

use crate::functions::UnaryFunction;
use std::collections::BTreeSet;
use std::fmt;

/// Format a number the way formulas and evaluated cells print it
///
/// This is the shortest decimal text that parses back to the same `f64`, always with a
/// fractional part or exponent (`2.0`, `1.5`, `1e16`).
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    /// All operators, in symbol order `+ - * / ^`
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
    ];

    /// The symbol used for this operator in formulas
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "^",
        }
    }

    /// Look up the operator written as `symbol`
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator to its operands, following IEEE-754 semantics
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Formula expression AST
///
/// Trees own their children; nothing is shared and nodes are never modified after
/// construction.
#[derive(Debug, Clone)]
pub enum Expression {
    /// Numeric literal
    Constant(f64),
    /// Named reference, resolved against a [`VarTable`](crate::VarTable) at evaluation time
    Variable(String),
    /// Binary operation
    Operation {
        op: Operator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Unary function call
    Application {
        function: UnaryFunction,
        argument: Box<Expression>,
    },
}

impl Expression {
    /// Create a constant node
    pub fn constant(value: f64) -> Self {
        Expression::Constant(value)
    }

    /// Create a variable node
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Create a binary operation node
    pub fn operation(op: Operator, left: Expression, right: Expression) -> Self {
        Expression::Operation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a function application node
    pub fn application(function: UnaryFunction, argument: Expression) -> Self {
        Expression::Application {
            function,
            argument: Box::new(argument),
        }
    }

    /// Number of operation and application nodes in this tree
    pub fn op_count(&self) -> usize {
        match self {
            Expression::Constant(_) | Expression::Variable(_) => 0,
            Expression::Operation { left, right, .. } => 1 + left.op_count() + right.op_count(),
            Expression::Application { argument, .. } => 1 + argument.op_count(),
        }
    }

    /// Fully parenthesized infix form, e.g. `(((2.0 * y) + 1.0) ^ 3.0)` or `sin((y / 2.0))`
    pub fn infix_string(&self) -> String {
        match self {
            Expression::Constant(value) => format_number(*value),
            Expression::Variable(name) => name.clone(),
            Expression::Operation { op, left, right } => format!(
                "({} {} {})",
                left.infix_string(),
                op.symbol(),
                right.infix_string()
            ),
            Expression::Application { function, argument } => {
                format!("{}({})", function.name(), argument.infix_string())
            }
        }
    }

    /// Postfix (RPN) form, e.g. `2.0 y * 1.0 + 3.0 ^` or `y 2.0 / sin()`
    pub fn postfix_string(&self) -> String {
        match self {
            Expression::Constant(value) => format_number(*value),
            Expression::Variable(name) => name.clone(),
            Expression::Operation { op, left, right } => format!(
                "{} {} {}",
                left.postfix_string(),
                right.postfix_string(),
                op.symbol()
            ),
            Expression::Application { function, argument } => {
                format!("{} {}()", argument.postfix_string(), function.name())
            }
        }
    }

    /// Names of all variables referenced anywhere in this tree
    pub fn dependencies(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_dependencies(&mut names);
        names
    }

    fn collect_dependencies(&self, names: &mut BTreeSet<String>) {
        match self {
            Expression::Constant(_) => {}
            Expression::Variable(name) => {
                names.insert(name.clone());
            }
            Expression::Operation { left, right, .. } => {
                left.collect_dependencies(names);
                right.collect_dependencies(names);
            }
            Expression::Application { argument, .. } => argument.collect_dependencies(names),
        }
    }

    /// Whether this node is a [`Expression::Constant`]
    pub fn is_constant(&self) -> bool {
        matches!(self, Expression::Constant(_))
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Exact comparison: NaN equals NaN, 0.0 and -0.0 differ
            (Expression::Constant(a), Expression::Constant(b)) => a.to_bits() == b.to_bits(),
            (Expression::Variable(a), Expression::Variable(b)) => a == b,
            (
                Expression::Operation {
                    op: op_a,
                    left: left_a,
                    right: right_a,
                },
                Expression::Operation {
                    op: op_b,
                    left: left_b,
                    right: right_b,
                },
            ) => op_a == op_b && left_a == left_b && right_a == right_b,
            (
                Expression::Application {
                    function: function_a,
                    argument: argument_a,
                },
                Expression::Application {
                    function: function_b,
                    argument: argument_b,
                },
            ) => function_a == function_b && argument_a == argument_b,
            _ => false,
        }
    }
}

impl Eq for Expression {}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.infix_string())
    }
}
