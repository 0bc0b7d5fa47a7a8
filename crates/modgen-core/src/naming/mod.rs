//! Name normalization and module path parsing
//!
//! This module provides:
//! - Case conversion for free-form module names (kebab-case, PascalCase)
//! - The suffix-based route pluralizer
//! - Slash-delimited module path parsing (see [`ModulePath`])

pub mod path;

pub use path::{relative_import, ModulePath};

/// Convert free-form input into kebab-case.
///
/// Trims, lowercases, and collapses every run of whitespace or underscores into a
/// single hyphen. Existing hyphens are left alone, so the function is idempotent.
pub fn to_kebab(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_run = false;

    for c in lowered.chars() {
        if c.is_whitespace() || c == '_' {
            if !in_run {
                out.push('-');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out
}

/// Convert a kebab-case name or slash path into PascalCase.
///
/// Splits on `-` and `/`, uppercases the first character of each piece and
/// concatenates the result. The rest of each piece is kept as-is.
pub fn to_pascal(input: &str) -> String {
    input
        .split(['-', '/'])
        .map(|piece| {
            let mut chars = piece.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Pluralize a route segment.
///
/// Deliberately naive: a trailing `s` is left alone, a trailing `y` becomes `ies`,
/// anything else gets an `s`. Route paths derived from this are part of the public
/// URL contract, so the rule must not be "improved".
pub fn pluralize(word: &str) -> String {
    if word.ends_with('s') {
        word.to_string()
    } else if let Some(stem) = word.strip_suffix('y') {
        format!("{}ies", stem)
    } else {
        format!("{}s", word)
    }
}
