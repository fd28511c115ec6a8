#![forbid(unsafe_code)]

//! Line normalization for dispatch.
//!
//! Submitted lines are trimmed and internal whitespace runs collapse to
//! single spaces before anything looks at them; the command token is
//! the first word, compared case-insensitively.

/// Trim and collapse internal whitespace runs to single spaces.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The lowercased command token of a normalized line.
#[must_use]
pub fn command_token(line: &str) -> String {
    line.split(' ').next().unwrap_or("").to_lowercase()
}
