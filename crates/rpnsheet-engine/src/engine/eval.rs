//! Postfix (RPN) expression evaluation.

use super::token::tokenize;
use super::{Chain, EvalError, Grid, Token, resolve_operand};

const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// Evaluate a postfix expression against `grid`.
///
/// Operators pop the right operand first, then the left one, and push the
/// result. Any other token is resolved through [`resolve_operand`] using
/// `chain`. Exactly one value must remain once all tokens are consumed.
pub fn evaluate_expression(grid: &Grid, expression: &str, chain: &Chain<'_>) -> Result<f64, EvalError> {
    // Reference chains can be as long as the sheet has cells.
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
        evaluate_inner(grid, expression, chain)
    })
}

fn evaluate_inner(grid: &Grid, expression: &str, chain: &Chain<'_>) -> Result<f64, EvalError> {
    let tokens = tokenize(expression);
    let mut stack: Vec<f64> = Vec::with_capacity(tokens.len());

    for text in &tokens {
        match Token::classify(text)? {
            Token::Operator(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(EvalError::not_enough_operands());
                };
                stack.push(op.apply(lhs, rhs)?);
            }
            operand => stack.push(resolve_operand(grid, operand, chain)?),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::unbalanced()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        Grid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    fn eval(expression: &str) -> Result<f64, EvalError> {
        let g = grid(&[&[expression]]);
        evaluate_expression(&g, expression, &Chain::root("a1".parse().unwrap()))
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(eval("3 4 +"), Ok(7.0));
        assert_eq!(eval("10 2 /"), Ok(5.0));
        assert_eq!(eval("2 3 4 * +"), Ok(14.0));
        assert_eq!(eval("5 1 2 + 4 * + 3 -"), Ok(14.0));
    }

    #[test]
    fn test_left_operand_is_pushed_first() {
        assert_eq!(eval("10 4 -"), Ok(6.0));
        assert_eq!(eval("1 4 /"), Ok(0.25));
    }

    #[test]
    fn test_single_literal() {
        assert_eq!(eval("42"), Ok(42.0));
        assert_eq!(eval("-2.5"), Ok(-2.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1 0 /"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0 0 /"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_not_enough_operands() {
        assert_eq!(eval("+"), Err(EvalError::not_enough_operands()));
        assert_eq!(eval("1 +"), Err(EvalError::not_enough_operands()));
        assert_eq!(eval("+ +"), Err(EvalError::not_enough_operands()));
    }

    #[test]
    fn test_stack_must_end_with_one_value() {
        assert_eq!(eval(""), Err(EvalError::unbalanced()));
        assert_eq!(eval("1 2"), Err(EvalError::unbalanced()));
        assert_eq!(eval("1 2 3 +"), Err(EvalError::unbalanced()));
    }

    #[test]
    fn test_uppercase_references() {
        let g = grid(&[&["2", "A1 B1 *"], &["3"]]);
        let chain = Chain::root("c1".parse().unwrap());
        assert_eq!(evaluate_expression(&g, "A1 A2 *", &chain), Ok(6.0));
    }

    #[test]
    fn test_first_error_aborts() {
        let g = grid(&[&["1 0 /"]]);
        let chain = Chain::root("b1".parse().unwrap());
        assert_eq!(
            evaluate_expression(&g, "a1 zz1 +", &chain),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_deep_reference_chain() {
        let rows: Vec<Vec<String>> = (0..5000)
            .map(|row| {
                if row == 0 {
                    vec!["1".to_string()]
                } else {
                    vec![format!("a{} 1 +", row)]
                }
            })
            .collect();
        let g = Grid::from_rows(rows);
        let chain = Chain::root("b1".parse().unwrap());
        assert_eq!(evaluate_expression(&g, "a5000", &chain), Ok(5000.0));
    }
}
