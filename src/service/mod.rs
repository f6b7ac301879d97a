//! Page-level reads and the single-write mutations behind each form.

pub mod catalog;
pub mod offers;
pub mod suppliers;

use std::fmt;

/// What a form submission did. Store failures travel separately as `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unauthenticated,
    InvalidInput(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unauthenticated => f.write_str("no authenticated user"),
            SkipReason::InvalidInput(field) => write!(f, "invalid or missing `{field}`"),
        }
    }
}

/// Parse a record id from form or path text. Only positive integers count.
pub fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<i64>().ok())
        .filter(|id| *id > 0)
}

/// Trimmed, non-empty form text.
pub fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
