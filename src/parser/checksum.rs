//! ICAO 9303 check digit engine.
//!
//! Character values: digits are their own value, `A`..`Z` are 10..35 and the
//! filler is 0. Values are weighted by the repeating cycle `7, 3, 1` from the
//! left and summed; the check digit is the sum modulo 10.

use super::extractor::{ExtractedField, char_at, slice};
use super::grammar::{FieldKind, Span};
use crate::constants::{CHECK_DIGIT_MODULUS, CHECK_DIGIT_WEIGHTS, FILLER, LETTER_VALUE_OFFSET};
use crate::error::FieldError;
use crate::models::CheckOutcome;
use tracing::trace;

/// Checksum verdict for one field, aligned with its [`ExtractedField`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: CheckOutcome,

    /// Why the check failed, if it did
    pub error: Option<FieldError>,
}

/// ICAO value of a single MRZ character, `None` outside `A-Z 0-9 <`
pub fn char_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => c.to_digit(10),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + LETTER_VALUE_OFFSET),
        FILLER => Some(0),
        _ => None,
    }
}

/// Weighted mod-10 check digit over `chars`.
///
/// On failure returns the index and value of the first character without an
/// ICAO value.
pub fn compute_check_digit<I>(chars: I) -> Result<u8, (usize, char)>
where
    I: IntoIterator<Item = char>,
{
    let mut sum = 0u32;
    for (index, c) in chars.into_iter().enumerate() {
        let value = char_value(c).ok_or((index, c))?;
        sum += value * CHECK_DIGIT_WEIGHTS[index % CHECK_DIGIT_WEIGHTS.len()];
    }
    Ok((sum % CHECK_DIGIT_MODULUS) as u8)
}

/// Check digit of a plain string, `None` if it holds a non-MRZ character
pub fn check_digit(source: &str) -> Option<u8> {
    compute_check_digit(source.chars()).ok()
}

/// Digit an embedded check character stands for
fn embedded_digit(embedded: char, filler_means_zero: bool) -> Option<u8> {
    match embedded {
        '0'..='9' => embedded.to_digit(10).map(|d| d as u8),
        FILLER if filler_means_zero => Some(0),
        _ => None,
    }
}

/// Compare the digit computed over `positions` with the embedded character.
///
/// `positions` carries each source character with its line and column so a
/// non-MRZ character can be reported where it sits.
fn verify(
    positions: &[(usize, usize, char)],
    embedded: char,
    filler_means_zero: bool,
) -> Evaluation {
    let computed = compute_check_digit(positions.iter().map(|&(_, _, c)| c));
    let embedded_value = embedded_digit(embedded, filler_means_zero);

    match computed {
        Ok(expected) => {
            let matches = embedded_value == Some(expected);
            Evaluation {
                outcome: CheckOutcome {
                    embedded,
                    expected: Some(expected),
                    matches,
                },
                error: (!matches).then_some(FieldError::ChecksumMismatch { embedded, expected }),
            }
        }
        Err((index, character)) => {
            let (line, column, _) = positions[index];
            Evaluation {
                outcome: CheckOutcome {
                    embedded,
                    expected: None,
                    matches: false,
                },
                error: Some(FieldError::InvalidCharacter {
                    character,
                    line,
                    column,
                }),
            }
        }
    }
}

fn span_positions(lines: &[String], span: &Span) -> Option<Vec<(usize, usize, char)>> {
    let text = slice(lines, span.line, span.start, span.end)?;
    Some(
        text.chars()
            .enumerate()
            .map(|(i, c)| (span.line, span.start + i, c))
            .collect(),
    )
}

/// Evaluate the field's own check digit or, for a composite field, the
/// digit over its source spans. Returns `None` for fields without a check.
pub fn evaluate(lines: &[String], field: &ExtractedField<'_>) -> Option<Evaluation> {
    let definition = field.definition;

    if let FieldKind::CompositeCheck { sources } = definition.kind {
        let embedded = field.raw.chars().next()?;
        let mut positions = Vec::new();
        for span in sources {
            positions.extend(span_positions(lines, span)?);
        }
        let evaluation = verify(&positions, embedded, false);
        trace!(
            "composite check over {} chars: {:?}",
            positions.len(),
            evaluation.outcome
        );
        return Some(evaluation);
    }

    let rule = definition.check_digit?;
    let embedded = char_at(lines, definition.line, rule.column)?;
    let positions = span_positions(lines, &definition.span())?;
    let evaluation = verify(&positions, embedded, rule.filler_means_zero);
    trace!("{} check: {:?}", definition.name, evaluation.outcome);
    Some(evaluation)
}

/// Evaluate every field, keeping alignment with `fields`
pub fn evaluate_all(lines: &[String], fields: &[ExtractedField<'_>]) -> Vec<Option<Evaluation>> {
    fields.iter().map(|field| evaluate(lines, field)).collect()
}
