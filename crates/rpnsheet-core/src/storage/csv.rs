//! Delimited text import/export.

use crate::error::{Result, SheetError};
use log::debug;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_DELIMITER: char = ',';

/// Read a delimited file into rows of raw cell expressions.
pub fn read_delimited(path: &Path, delimiter: char) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    let rows = parse_delimited(&content, delimiter)?;
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse delimited text into rows, keeping row order and ragged lengths.
///
/// Quoted fields may contain the delimiter, `""` escapes and line breaks.
/// A blank line becomes an empty row.
pub fn parse_delimited(content: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut line = 1;
    let mut quote_line = 0;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                if c == '\n' {
                    line += 1;
                }
                current.push(c);
            }
            continue;
        }

        match c {
            '"' if current.trim().is_empty() && !field_was_quoted => {
                in_quotes = true;
                field_was_quoted = true;
                quote_line = line;
                current.clear();
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                if !(row.is_empty() && current.is_empty() && !field_was_quoted) {
                    row.push(finish_field(&mut current, field_was_quoted));
                }
                field_was_quoted = false;
                rows.push(std::mem::take(&mut row));
                line += 1;
            }
            c if c == delimiter => {
                row.push(finish_field(&mut current, field_was_quoted));
                field_was_quoted = false;
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(SheetError::Parse {
            line: quote_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !row.is_empty() || !current.is_empty() || field_was_quoted {
        row.push(finish_field(&mut current, field_was_quoted));
        rows.push(row);
    }

    Ok(rows)
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let field = std::mem::take(current);
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}

/// Write rendered rows, one line per row.
pub fn write_rows<W: Write>(out: &mut W, rows: &[Vec<String>], delimiter: char) -> Result<()> {
    let separator = delimiter.to_string();
    for row in rows {
        let fields: Vec<String> = row
            .iter()
            .map(|field| escape_field(field, delimiter))
            .collect();
        writeln!(out, "{}", fields.join(separator.as_str()))?;
    }
    Ok(())
}

/// Escape a field for delimited output
fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter)
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r')
    {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
