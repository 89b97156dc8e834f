//! Storage adapters for reading and writing sheets.

mod csv;

pub use csv::{DEFAULT_DELIMITER, parse_delimited, read_delimited, write_rows};
