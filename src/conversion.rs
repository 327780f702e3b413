//! # Sexagesimal angle parsing
//!
//! Coordinates typed (or pasted) by a user come in many shapes: `12h 34m 56.7s`,
//! `12 34 56.7`, `12:34:56.7`, `+45° 30' 12"`, `-10 20 30`... This module turns all of
//! them into a single number of **arcseconds**, without ever failing.
//!
//! ## Tokenizer
//!
//! The input is scanned left to right by a two-state machine:
//!
//! ```text
//!            digit or '.'
//! Skipping ───────────────▶ Consuming
//!    ▲                          │
//!    └──────────────────────────┘
//!          any other char (emit token)
//! ```
//!
//! Each emitted token is a maximal run of digits and decimal points. Tokens are then
//! weighted positionally: the first one by the leading unit (hours or degrees), the next by
//! 1/60 of it, and so on. Extra tokens keep dividing by 60, so over-specified input is
//! tolerated. Text without any token parses to `0`.
use crate::constants::{ArcSec, ARCSEC_PER_DEGREE, ARCSEC_PER_HOUR};

/// Characters that switch a right ascension to degree-based input.
const DEGREE_MARKERS: [char; 3] = ['°', 'd', 'D'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Skipping,
    Consuming { start: usize },
}

fn is_numberish(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Split a string into its maximal runs of digits and decimal points.
///
/// Arguments
/// ---------
/// * `text`: free-form angle text
///
/// Return
/// ------
/// * the numeric tokens, in reading order, borrowed from `text`
pub(crate) fn numeric_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut state = ScanState::Skipping;

    for (idx, c) in text.char_indices() {
        state = match (state, is_numberish(c)) {
            (ScanState::Skipping, true) => ScanState::Consuming { start: idx },
            (ScanState::Consuming { start }, false) => {
                tokens.push(&text[start..idx]);
                ScanState::Skipping
            }
            (unchanged, _) => unchanged,
        };
    }

    if let ScanState::Consuming { start } = state {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Numeric value of a token, reading its longest valid decimal prefix.
///
/// `"1.2.3"` reads as `1.2`, a lone `"."` as `0`.
fn token_value(token: &str) -> f64 {
    let end = token
        .char_indices()
        .filter(|&(_, c)| c == '.')
        .nth(1)
        .map_or(token.len(), |(idx, _)| idx);

    token[..end].parse::<f64>().unwrap_or(0.0)
}

/// Sum the tokens of `text`, the first weighted by `leading_unit` and each following one
/// by a further factor 1/60.
fn accumulate(text: &str, leading_unit: ArcSec) -> ArcSec {
    numeric_tokens(text)
        .into_iter()
        .fold((0.0, leading_unit), |(total, unit), token| {
            (total + token_value(token) * unit, unit / 60.0)
        })
        .0
}

/// Parse a right ascension (or any longitude-like angle expressed in hours) to arcseconds.
///
/// Hours are assumed unless the text, once leading blanks are removed, starts with `+` or
/// contains a degree marker (`°`, `d` or `D`) anywhere; in that case the first token is
/// read as degrees.
///
/// Arguments
/// ---------
/// * `text`: a string such as `"12h 34m 56.7s"`, `"12 34 56.7"` or `"+187 30 0"`
///
/// Return
/// ------
/// * the angle in arcseconds; `0.0` if the text holds no digits. The value is not
///   range-checked and may exceed a full circle.
///
/// See also
/// --------
/// * [`parse_declination`] – degree-based counterpart with sign handling
pub fn parse_right_ascension(text: &str) -> ArcSec {
    let text = text.trim_start_matches(' ');

    if let Some(rest) = text.strip_prefix('+') {
        return accumulate(rest, ARCSEC_PER_DEGREE);
    }

    let unit = if text.contains(&DEGREE_MARKERS[..]) {
        ARCSEC_PER_DEGREE
    } else {
        ARCSEC_PER_HOUR
    };
    accumulate(text, unit)
}

/// Parse a declination (or any degree-based angle) to arcseconds.
///
/// A leading `-` (after optional blanks) negates the whole value. Any other sign or
/// separator character is ignored.
///
/// Arguments
/// ---------
/// * `text`: a string such as `"-10 20 30"`, `"+45° 30' 12\""` or `"27.4"`
///
/// Return
/// ------
/// * the signed angle in arcseconds; `0.0` if the text holds no digits.
pub fn parse_declination(text: &str) -> ArcSec {
    let text = text.trim_start_matches(' ');

    match text.strip_prefix('-') {
        Some(rest) => -accumulate(rest, ARCSEC_PER_DEGREE),
        None => accumulate(text, ARCSEC_PER_DEGREE),
    }
}
