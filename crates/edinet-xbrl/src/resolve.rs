//! Fact resolution and value coercion.
//!
//! Resolution works on the facts matching one qualified name, in document
//! order. The string path takes the first raw match and never fails. The
//! numeric path filters by reporting-period context, takes the first
//! survivor, validates its text as a decimal literal and parses it;
//! anything that does not survive or validate resolves to 0.0. Filings
//! commonly repeat a fact under both an instant and a duration context,
//! so first-match selection is what keeps extraction deterministic.

use std::sync::LazyLock;

use regex::Regex;

use edinet_core::{EdinetError, Result};

use crate::document::Fact;

static NUMERIC_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?$").expect("numeric pattern")
});

/// Returns true if `text`, after trimming, is a plain decimal numeric
/// literal: optional sign, digits, optional fraction, optional exponent.
#[must_use]
pub fn is_numeric_literal(text: &str) -> bool {
    NUMERIC_LITERAL.is_match(text.trim())
}

/// Resolves a string concept: the first raw match's text, or the empty
/// string when nothing matched.
///
/// Context is never consulted on this path.
#[must_use]
pub fn resolve_text(matches: &[&Fact]) -> String {
    matches
        .first()
        .map(|fact| fact.value.clone())
        .unwrap_or_default()
}

/// Resolves a numeric concept from name-matched facts.
///
/// With `no_context`, the first raw match is used directly when its text
/// is a valid numeric literal; otherwise resolution falls through to
/// context filtering. Filtering keeps facts whose context reference,
/// split on underscores, contains one of `context_ids`; the first
/// survivor in document order wins. No survivor, or a survivor with
/// non-numeric text, resolves to 0.0.
///
/// A fact with no context reference encountered during filtering, or a
/// literal parsing to a non-finite value, is an [`EdinetError::Extraction`]
/// for the caller's error policy to route.
pub fn resolve_number(
    tag: &str,
    matches: &[&Fact],
    context_ids: &[String],
    no_context: bool,
) -> Result<f64> {
    if no_context {
        let first_numeric = matches
            .first()
            .filter(|fact| is_numeric_literal(&fact.value));
        if let Some(first) = first_numeric {
            return parse_literal(tag, &first.value);
        }
    }

    let mut survivors = Vec::new();
    for fact in matches {
        match fact.context_matches(context_ids) {
            Some(true) => survivors.push(*fact),
            Some(false) => {}
            None => {
                return Err(extraction_error(
                    tag,
                    &fact.value,
                    "missing contextRef attribute",
                ));
            }
        }
    }

    match survivors.first() {
        Some(fact) if is_numeric_literal(&fact.value) => parse_literal(tag, &fact.value),
        _ => Ok(0.0),
    }
}

fn parse_literal(tag: &str, text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|e| extraction_error(tag, text, &format!("unparseable number: {e}")))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(extraction_error(tag, text, "value is not finite"))
    }
}

fn extraction_error(tag: &str, text: &str, reason: &str) -> EdinetError {
    EdinetError::Extraction {
        concept: tag.to_string(),
        text: text.to_string(),
        reason: reason.to_string(),
    }
}
