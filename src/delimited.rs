//! Semicolon-delimited text handling.
//!
//! Reading is deliberately naive: a line is split on every delimiter with no
//! quote or escape interpretation. Writing quotes a field only when it holds
//! the delimiter, a double quote or a line break.

use crate::constants::{FIELD_DELIMITER, UTF8_BOM};

/// Split a line on every delimiter
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(FIELD_DELIMITER).map(str::to_string).collect()
}

/// Whether a field must be wrapped in quotes on output
pub fn needs_quotes(field: &str) -> bool {
    field.contains(|c: char| c == FIELD_DELIMITER || c == '"' || c == '\n' || c == '\r')
}

/// Quote a field if required, doubling internal quotes
pub fn quote_field(field: &str) -> String {
    if needs_quotes(field) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Join fields into one output line (no terminator)
pub fn join_fields<S: AsRef<str>>(fields: &[S], delimiter: char) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(delimiter);
        }
        line.push_str(&quote_field(field.as_ref()));
    }
    line
}

/// Trim spaces and tabs only
pub fn trim_blanks(value: &str) -> &str {
    value.trim_matches(|c: char| c == ' ' || c == '\t')
}

/// Drop a leading UTF-8 byte-order mark
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Drop the line feed and one trailing carriage return
pub fn trim_line_ending(mut bytes: &[u8]) -> &[u8] {
    if let Some(rest) = bytes.strip_suffix(b"\n") {
        bytes = rest;
    }
    bytes.strip_suffix(b"\r").unwrap_or(bytes)
}
