#![forbid(unsafe_code)]

//! Tab completion over a configured candidate list.
//!
//! Completion is deliberately simple: it fires only when exactly one
//! candidate has the whole current line as a prefix. Zero or several
//! matches do nothing.

/// The unique candidate completing `input`, if there is exactly one.
#[must_use]
pub fn complete<'a>(input: &str, candidates: &'a [String]) -> Option<&'a str> {
    let mut matches = candidates.iter().filter(|c| c.starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.as_str()),
        _ => None,
    }
}
