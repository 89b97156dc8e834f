//! Tokenizing postfix expressions.
//!
//! A cell expression is lowercased and split on whitespace. Every token is
//! one of three things: a binary operator, something that looks like a
//! number, or (by elimination) a cell reference.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::EvalError;

/// Operator symbols recognised in expressions.
pub const OPERATORS: [&str; 4] = ["+", "-", "*", "/"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Apply to `lhs` (pushed first) and `rhs` (top of stack).
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Sub => Ok(lhs - rhs),
            Operator::Mul => Ok(lhs * rhs),
            Operator::Div if rhs == 0.0 => Err(EvalError::DivisionByZero),
            Operator::Div => Ok(lhs / rhs),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            other => Err(EvalError::InvalidOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A classified token, borrowing from the lowercased expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    Operator(Operator),
    /// Starts like a number; not yet parsed.
    Number(&'a str),
    /// Anything else is taken to be a cell address.
    Reference(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(text: &'a str) -> Result<Token<'a>, EvalError> {
        if OPERATORS.contains(&text) {
            return text.parse().map(Token::Operator);
        }
        // Only the leading `-?\d+` is checked; "1abc" still counts as a number.
        if number_re().is_match(text) {
            return Ok(Token::Number(text));
        }
        Ok(Token::Reference(text))
    }
}

/// Parse a token classified as [`Token::Number`].
pub fn parse_number(text: &str) -> Result<f64, EvalError> {
    text.parse::<f64>()
        .map_err(|_| EvalError::InvalidNumber(text.to_string()))
}

/// Lowercase `expression` and split it on whitespace.
pub fn tokenize(expression: &str) -> Vec<String> {
    expression
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"^-?\d+").expect("number regex must compile"))
}
