//! Formula parser
//!
//! Formulas are written in Reverse Polish Notation with whitespace-separated tokens, e.g.
//! `B1 4 * 1 +` or `3 6 - abs()`. Parsing keeps an explicit operand stack.

use crate::ast::{Expression, Operator};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use std::str::SplitWhitespace;

const FUNCTION_SUFFIX: &str = "()";

/// Token types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Anything that parses as an `f64` (`1`, `-2.5`, `1e10`, `inf`, `NaN`)
    ///
    /// The words `inf`, `infinity` and `nan` are numbers in any letter case, so they
    /// can never name a variable.
    Number(f64),
    /// One of `+ - * / ^`
    Operator(Operator),
    /// Function call such as `sqrt()`; holds the name without the suffix
    Function(&'a str),
    /// Any other token
    Variable(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a single whitespace-free token
    pub fn classify(text: &'a str) -> Self {
        if let Ok(value) = text.parse::<f64>() {
            Token::Number(value)
        } else if let Some(op) = Operator::from_symbol(text) {
            Token::Operator(op)
        } else if let Some(name) = text.strip_suffix(FUNCTION_SUFFIX) {
            Token::Function(name)
        } else {
            Token::Variable(text)
        }
    }
}

/// Lazy, single-pass iterator over the tokens of a formula
///
/// Tokenizing never fails; malformed formulas are only detected by [`parse_rpn`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    words: SplitWhitespace<'a>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            words: text.split_whitespace(),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.words.next().map(Token::classify)
    }
}

/// Split `text` into tokens
pub fn tokenize(text: &str) -> Tokenizer<'_> {
    Tokenizer::new(text)
}

/// Parse an RPN formula into an expression tree
///
/// Function tokens are resolved against `functions`. The formula must not include a
/// leading `=`.
///
/// # Errors
///
/// - [`FormulaError::IncompleteRpn`] if an operator or function lacks operands, or if
///   the formula does not reduce to exactly one expression (including empty input)
/// - [`FormulaError::UndefinedFunction`] if a function is not in `functions`
///
/// # Example
/// ```rust
/// use rpn_sheets_formula::{parse_rpn, FunctionRegistry, MapVarTable};
///
/// let functions = FunctionRegistry::new();
/// let expr = parse_rpn("3 6 - abs()", &functions).unwrap();
/// assert_eq!(expr.eval(&MapVarTable::new()).unwrap(), 3.0);
///
/// assert!(parse_rpn("1 1 1 +", &functions).is_err());
/// ```
pub fn parse_rpn(formula: &str, functions: &FunctionRegistry) -> FormulaResult<Expression> {
    let mut stack: Vec<Expression> = Vec::new();

    for token in tokenize(formula) {
        match token {
            Token::Number(value) => stack.push(Expression::Constant(value)),
            Token::Operator(op) => {
                let depth = stack.len();
                // Popped first is the right operand
                let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                    return Err(FormulaError::IncompleteRpn {
                        reason: "too few operands for operator",
                        depth,
                    });
                };
                stack.push(Expression::operation(op, left, right));
            }
            Token::Function(name) => {
                let Some(argument) = stack.pop() else {
                    return Err(FormulaError::IncompleteRpn {
                        reason: "missing argument for function",
                        depth: 0,
                    });
                };
                let function = functions
                    .get(name)
                    .ok_or_else(|| FormulaError::UndefinedFunction(name.to_string()))?;
                stack.push(Expression::application(*function, argument));
            }
            Token::Variable(name) => stack.push(Expression::variable(name)),
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(expr), true) => Ok(expr),
        (None, _) => Err(FormulaError::IncompleteRpn {
            reason: "no expression",
            depth: 0,
        }),
        (Some(_), false) => Err(FormulaError::IncompleteRpn {
            reason: "too many operands left on the stack",
            depth: stack.len() + 1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::MapVarTable;
    use pretty_assertions::assert_eq;

    fn eval(formula: &str) -> f64 {
        parse_rpn(formula, &FunctionRegistry::new())
            .unwrap()
            .eval(&MapVarTable::new())
            .unwrap()
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<_> = tokenize("  1.5 x\t+ sqrt() -2 1e3 ^ foo() ()\n").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Number(1.5),
                Token::Variable("x"),
                Token::Operator(Operator::Add),
                Token::Function("sqrt"),
                Token::Number(-2.0),
                Token::Number(1000.0),
                Token::Operator(Operator::Power),
                Token::Function("foo"),
                Token::Function(""),
            ]
        );
    }

    #[test]
    fn test_tokenize_classification_order() {
        // Numbers win over everything else
        assert_eq!(Token::classify("+1"), Token::Number(1.0));
        assert_eq!(Token::classify("-"), Token::Operator(Operator::Subtract));
        assert_eq!(Token::classify("++"), Token::Variable("++"));
        assert_eq!(Token::classify("B4"), Token::Variable("B4"));
        assert_eq!(Token::classify("sqrt"), Token::Variable("sqrt"));
        assert_eq!(Token::classify("sqrt("), Token::Variable("sqrt("));
        assert!(matches!(Token::classify("inf"), Token::Number(v) if v.is_infinite()));
    }

    #[test]
    fn test_special_float_words_are_numbers() {
        for word in ["inf", "Inf", "INF", "infinity", "Infinity", "-inf"] {
            assert!(
                matches!(Token::classify(word), Token::Number(v) if v.is_infinite()),
                "{}",
                word
            );
        }
        for word in ["nan", "NaN", "NAN"] {
            assert!(
                matches!(Token::classify(word), Token::Number(v) if v.is_nan()),
                "{}",
                word
            );
        }
        assert_eq!(Token::classify("nanx"), Token::Variable("nanx"));
        assert_eq!(Token::classify("info"), Token::Variable("info"));

        let expr = parse_rpn("nan", &FunctionRegistry::empty()).unwrap();
        assert!(expr.is_constant());
        assert!(expr.dependencies().is_empty());
    }

    #[test]
    fn test_tokenize_empty() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("   \t ").count(), 0);
    }

    #[test]
    fn test_parse_constant() {
        let functions = FunctionRegistry::empty();
        assert_eq!(parse_rpn("1.5", &functions).unwrap(), Expression::constant(1.5));
        assert_eq!(parse_rpn("-1", &functions).unwrap(), Expression::constant(-1.0));
        assert_eq!(parse_rpn("0", &functions).unwrap(), Expression::constant(0.0));
    }

    #[test]
    fn test_parse_variable() {
        let functions = FunctionRegistry::empty();
        assert_eq!(parse_rpn("x", &functions).unwrap(), Expression::variable("x"));
        assert_eq!(parse_rpn("B4", &functions).unwrap(), Expression::variable("B4"));
    }

    #[test]
    fn test_parse_operation() {
        let functions = FunctionRegistry::empty();
        let expr = parse_rpn("1 1 +", &functions).unwrap();
        assert!(matches!(expr, Expression::Operation { op: Operator::Add, .. }));

        assert_eq!(eval("1 1 +"), 2.0);
        assert_eq!(eval("1 2 -"), -1.0);
        assert_eq!(eval("2 1 -"), 1.0);
        assert_eq!(eval("1 2 /"), 0.5);
        assert_eq!(eval("2 1 /"), 2.0);
        assert_eq!(eval("2 1 2 / -"), 1.5);
        assert_eq!(eval("2 3 ^"), 8.0);
        assert!((eval("2.5 1 + 2 1.5 * /") - 1.16666667).abs() < 1e-6);
    }

    #[test]
    fn test_parse_operand_order() {
        let expr = parse_rpn("x 2 -", &FunctionRegistry::empty()).unwrap();
        assert_eq!(
            expr,
            Expression::operation(Operator::Subtract, Expression::variable("x"), Expression::constant(2.0))
        );
    }

    #[test]
    fn test_parse_application() {
        let expr = parse_rpn("4 sqrt()", &FunctionRegistry::new()).unwrap();
        assert!(matches!(expr, Expression::Application { .. }));

        assert_eq!(eval("4 sqrt()"), 2.0);
        assert_eq!(eval("0 sin()"), 0.0);
        assert_eq!(eval("3 6 - abs()"), 3.0);
        assert_eq!(eval("3 6 + sqrt()"), 3.0);
        // sin(1 - (cos^2(0) + sin^2(0)))
        assert_eq!(eval("1 0 cos() 2 ^ 0 sin() 2 ^ + - sin()"), 0.0);
    }

    #[test]
    fn test_parse_empty() {
        let err = parse_rpn("", &FunctionRegistry::empty()).unwrap_err();
        assert_eq!(
            err,
            FormulaError::IncompleteRpn {
                reason: "no expression",
                depth: 0
            }
        );
    }

    #[test]
    fn test_parse_leftover_operands() {
        let functions = FunctionRegistry::empty();
        assert!(matches!(
            parse_rpn("1 1 1 +", &functions),
            Err(FormulaError::IncompleteRpn { depth: 2, .. })
        ));
        assert!(matches!(
            parse_rpn("2 1 2.5 /", &functions),
            Err(FormulaError::IncompleteRpn { depth: 2, .. })
        ));
    }

    #[test]
    fn test_parse_underflow() {
        let functions = FunctionRegistry::empty();
        assert!(matches!(
            parse_rpn("1 1 + +", &functions),
            Err(FormulaError::IncompleteRpn { depth: 1, .. })
        ));
        assert!(matches!(
            parse_rpn("+", &functions),
            Err(FormulaError::IncompleteRpn { depth: 0, .. })
        ));
        assert!(matches!(
            parse_rpn("abs() 1 1 +", &FunctionRegistry::new()),
            Err(FormulaError::IncompleteRpn { depth: 0, .. })
        ));
    }

    #[test]
    fn test_parse_undefined_function() {
        let functions = FunctionRegistry::empty();
        assert_eq!(
            parse_rpn("1 foo()", &functions),
            Err(FormulaError::UndefinedFunction("foo".into()))
        );
        assert_eq!(
            parse_rpn("3 bar()", &FunctionRegistry::new()),
            Err(FormulaError::UndefinedFunction("bar".into()))
        );
    }

    #[test]
    fn test_parse_fails_on_first_error() {
        // The unknown function is reported before the leftover operands are noticed
        assert_eq!(
            parse_rpn("1 2 foo()", &FunctionRegistry::empty()),
            Err(FormulaError::UndefinedFunction("foo".into()))
        );
    }

    #[test]
    fn test_parse_unvalidated_identifiers() {
        // Identifiers are never validated; a misplaced one surfaces as leftover operands
        assert!(matches!(
            parse_rpn("1 2 plus", &FunctionRegistry::empty()),
            Err(FormulaError::IncompleteRpn { depth: 3, .. })
        ));
    }

    #[test]
    fn test_postfix_round_trip() {
        let functions = FunctionRegistry::new();
        for formula in ["1.0 2.0 +", "2.5 1.0 + 2.0 1.5 * /", "x 2.0 ^ y sqrt() -"] {
            let expr = parse_rpn(formula, &functions).unwrap();
            assert_eq!(expr.postfix_string(), formula);
        }
    }
}
