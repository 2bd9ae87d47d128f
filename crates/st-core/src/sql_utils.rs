//! SQL text utilities
//!
//! Identifier quoting for dialects that need it, plus stripping of block
//! comments that may carry embedded configuration in a query body.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex is valid"));

/// Remove `/* ... */` block comments from a query.
///
/// Configuration is often smuggled into query files inside block
/// comments; those must never reach the warehouse. Line comments are left
/// alone.
pub fn strip_block_comments(query: &str) -> String {
    BLOCK_COMMENT_RE.replace_all(query, "").into_owned()
}

/// Quote a SQL identifier, escaping embedded double quotes by doubling
/// them per the SQL standard.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quote a `.`-qualified name by splitting on `.` and quoting each
/// segment independently.
///
/// ```
/// use st_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("staging.orders"), r#""staging"."orders""#);
/// ```
pub fn quote_qualified(name: &str) -> String {
    name.split('.')
        .map(quote_ident)
        .collect::<Vec<_>>()
        .join(".")
}

/// Escape a SQL string literal value by doubling single quotes.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Trim a single trailing `;` (and surrounding whitespace) so a query can
/// be embedded into generated DDL/DML without ambiguous statement
/// boundaries.
pub fn trim_trailing_semicolon(query: &str) -> &str {
    query.trim().trim_end_matches(';').trim_end()
}
