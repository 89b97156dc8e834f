//! Cell address parsing and formatting.
//!
//! Provides bidirectional conversion between single-letter cell addresses
//! (e.g., "a1", "B2", "z100") and zero-indexed row/column coordinates.
//! Only columns `a` through `z` exist; anything wider is rejected rather
//! than mapped onto some other cell.
//!
//! # Examples
//!
//! ```ignore
//! let addr: CellAddr = "b3".parse().unwrap();
//! assert_eq!(addr.col(), 1);  // 0-indexed
//! assert_eq!(addr.row(), 2);
//! assert_eq!(addr.to_string(), "b3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::EvalError;

/// Number of addressable columns (`a`..=`z`).
pub const MAX_COLUMNS: usize = 26;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct CellAddr {
    row: usize,
    col: usize,
}

impl CellAddr {
    /// Build an address from grid indices. Columns past `z` fail with
    /// [`EvalError::NotImplemented`].
    pub fn new(row: usize, col: usize) -> Result<CellAddr, EvalError> {
        if col >= MAX_COLUMNS {
            return Err(EvalError::NotImplemented);
        }
        Ok(CellAddr { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Column letter for this address (0 -> 'a', 25 -> 'z').
    pub fn col_letter(&self) -> char {
        (b'a' + self.col as u8) as char
    }

    fn parse_a1(name: &str) -> Result<CellAddr, EvalError> {
        let Some(caps) = cell_addr_re().captures(name) else {
            return Err(EvalError::InvalidReference(name.to_string()));
        };
        let letters = caps["letters"].to_ascii_lowercase();
        // The regex guarantees a row number >= 1. Rows too large for usize
        // are still well-formed; they saturate and land outside any grid.
        let row = caps["numbers"].parse::<usize>().unwrap_or(usize::MAX) - 1;

        let &[letter] = letters.as_bytes() else {
            return Err(EvalError::NotImplemented);
        };

        CellAddr::new(row, (letter - b'a') as usize)
    }
}

impl std::str::FromStr for CellAddr {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s)
    }
}

impl fmt::Display for CellAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_letter(), self.row + 1)
    }
}

fn cell_addr_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[1-9][0-9]*)$")
            .expect("cell address regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<CellAddr, EvalError> {
        s.parse()
    }

    #[test]
    fn test_parse_single_letter_columns() {
        let a1 = parse("a1").unwrap();
        assert_eq!((a1.row(), a1.col()), (0, 0));

        let b1 = parse("b1").unwrap();
        assert_eq!((b1.row(), b1.col()), (0, 1));

        let z1 = parse("z1").unwrap();
        assert_eq!((z1.row(), z1.col()), (0, 25));
    }

    #[test]
    fn test_parse_row_numbers() {
        assert_eq!(parse("a10").unwrap().row(), 9);
        assert_eq!(parse("a100").unwrap().row(), 99);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(parse("C3").unwrap(), parse("c3").unwrap());
    }

    #[test]
    fn test_parse_multi_letter_not_implemented() {
        assert_eq!(parse("aa1"), Err(EvalError::NotImplemented));
        assert_eq!(parse("AB12"), Err(EvalError::NotImplemented));
    }

    #[test]
    fn test_parse_invalid_inputs() {
        for input in ["", "123", "abc", "a0", "a01", "1a", "a 1", "a1b", "-a1", "a1.5"] {
            assert_eq!(
                parse(input),
                Err(EvalError::InvalidReference(input.to_string())),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_row_overflow_saturates() {
        let huge = format!("a{}", "9".repeat(40));
        let addr = parse(&huge).unwrap();
        assert_eq!(addr.row(), usize::MAX - 1);
        assert_eq!(addr.col(), 0);
    }

    #[test]
    fn test_new_rejects_wide_columns() {
        assert!(CellAddr::new(0, 25).is_ok());
        assert_eq!(CellAddr::new(0, 26), Err(EvalError::NotImplemented));
    }

    #[test]
    fn test_display_is_lowercase_one_based() {
        assert_eq!(CellAddr::new(0, 0).unwrap().to_string(), "a1");
        assert_eq!(CellAddr::new(41, 25).unwrap().to_string(), "z42");
    }

    #[test]
    fn test_display_parse_agree_for_every_column() {
        for col in 0..MAX_COLUMNS {
            let addr = CellAddr::new(7, col).unwrap();
            assert_eq!(parse(&addr.to_string()).unwrap(), addr);
        }
    }
}
