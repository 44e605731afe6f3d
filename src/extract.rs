//! PoP recognition and code extraction from status component names.
//!
//! The status feed mixes real points-of-presence ("Amsterdam, NL - (AMS)")
//! with rollup groups ("Sites and Services"). PoPs are recognized purely
//! by their naming convention; nothing upstream marks them otherwise.

use crate::error::{AggregateError, AggregateResult};
use regex::Regex;
use std::sync::LazyLock;

/// Recognizes the PoP naming convention: a `- (` prefix closing over a
/// non-empty code.
static POP_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"- \([^)]+\)").unwrap());

/// Captures the first parenthesized group in a component name.
static POP_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

/// Returns true when a component name follows the PoP naming convention.
pub fn is_pop_component(name: &str) -> bool {
    POP_NAME.is_match(name)
}

/// Extracts the PoP code from a component name.
///
/// The code is the content of the first parenthesized group, taken
/// verbatim: no trimming, no case folding. Names that pass
/// [`is_pop_component`] always yield a code; the error covers names
/// handed in without that guarantee.
pub fn pop_code(name: &str) -> AggregateResult<&str> {
    POP_CODE
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str())
        .ok_or_else(|| AggregateError::MalformedComponentName {
            name: name.to_string(),
        })
}
