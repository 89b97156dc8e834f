//! Resolving operand tokens to numbers.

use log::trace;

use super::token::parse_number;
use super::{CellAddr, Chain, EvalError, Grid, Token, evaluate_expression};

/// Resolve a non-operator token to a value.
///
/// Numbers are parsed directly. References are checked against `chain`,
/// looked up in `grid` and evaluated recursively with the chain extended by
/// the referenced address.
pub fn resolve_operand(grid: &Grid, token: Token<'_>, chain: &Chain<'_>) -> Result<f64, EvalError> {
    match token {
        Token::Number(text) => parse_number(text),
        Token::Reference(text) => {
            let addr: CellAddr = text.parse()?;
            chain.check(&addr)?;
            let Some(expression) = grid.get(&addr) else {
                return Err(EvalError::EmptyReference(addr));
            };
            trace!("resolving {} at depth {}", addr, chain.depth());
            let next = chain.extend(addr);
            evaluate_expression(grid, expression, &next)
        }
        Token::Operator(op) => Err(EvalError::InvalidOperator(op.to_string())),
    }
}
