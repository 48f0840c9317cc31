//! Field extraction: slices each grammar field out of the MRZ lines and
//! decodes it according to its [`FieldKind`].
//!
//! Decoding never stops the pipeline. A field that fails to decode keeps its
//! raw characters as its value and carries a [`FieldError`].

use super::grammar::{FieldDefinition, FieldKind, NamePart};
use crate::constants::{DATE_FIELD_LENGTH, FILLER, NAME_SEPARATOR, SEX_CODES};
use crate::dates::is_calendar_date;
use crate::error::FieldError;
use tracing::{debug, trace};

/// Raw slice and decoded value of one field, before checksum validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedField<'g> {
    pub definition: &'g FieldDefinition,
    pub raw: String,
    pub value: String,
    pub error: Option<FieldError>,
}

/// Characters `start..end` of line `line`, `None` when out of range
pub fn slice(lines: &[String], line: usize, start: usize, end: usize) -> Option<String> {
    let text = lines.get(line)?;
    if end < start || text.chars().count() < end {
        return None;
    }
    Some(text.chars().skip(start).take(end - start).collect())
}

/// Single character at `column` of line `line`
pub fn char_at(lines: &[String], line: usize, column: usize) -> Option<char> {
    lines.get(line)?.chars().nth(column)
}

/// Replace filler runs with single spaces and drop leading/trailing filler
pub fn decode_filler(raw: &str) -> String {
    raw.split(FILLER)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_alphabetic(c: char) -> bool {
    c.is_ascii_uppercase() || c == FILLER
}

fn is_alphanumeric(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == FILLER
}

fn first_invalid(
    raw: &str,
    definition: &FieldDefinition,
    allowed: fn(char) -> bool,
) -> Option<FieldError> {
    raw.chars()
        .enumerate()
        .find(|&(_, c)| !allowed(c))
        .map(|(i, character)| FieldError::InvalidCharacter {
            character,
            line: definition.line,
            column: definition.offset + i,
        })
}

fn decode_name(raw: &str, part: NamePart) -> String {
    let (primary, secondary) = raw.split_once(NAME_SEPARATOR).unwrap_or((raw, ""));
    match part {
        NamePart::Primary => decode_filler(primary),
        NamePart::Secondary => decode_filler(secondary),
    }
}

/// Decode `raw` per `definition.kind`, returning the value or the decode error
fn decode(raw: &str, definition: &FieldDefinition) -> Result<String, FieldError> {
    match definition.kind {
        FieldKind::Alphabetic => match first_invalid(raw, definition, is_alphabetic) {
            Some(error) => Err(error),
            None => Ok(decode_filler(raw)),
        },
        FieldKind::Alphanumeric => match first_invalid(raw, definition, is_alphanumeric) {
            Some(error) => Err(error),
            None => Ok(decode_filler(raw)),
        },
        FieldKind::Numeric => match first_invalid(raw, definition, |c| c.is_ascii_digit()) {
            Some(error) => Err(error),
            None => Ok(raw.to_string()),
        },
        FieldKind::Date => {
            if let Some(error) = first_invalid(raw, definition, |c| c.is_ascii_digit()) {
                return Err(error);
            }
            if raw.len() != DATE_FIELD_LENGTH || !is_calendar_date(raw) {
                return Err(FieldError::InvalidDate {
                    value: raw.to_string(),
                });
            }
            Ok(raw.to_string())
        }
        FieldKind::Sex => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(code), None) if SEX_CODES.contains(&code) => Ok(raw.to_string()),
                _ => Err(FieldError::InvalidSex {
                    value: raw.to_string(),
                }),
            }
        }
        FieldKind::Name { part } => match first_invalid(raw, definition, is_alphabetic) {
            Some(error) => Err(error),
            None => Ok(decode_name(raw, part)),
        },
        // Validated by the checksum engine
        FieldKind::CompositeCheck { .. } => Ok(raw.to_string()),
    }
}

/// Slice and decode one field
pub fn extract_field<'g>(lines: &[String], definition: &'g FieldDefinition) -> ExtractedField<'g> {
    let span = definition.span();
    let Some(raw) = slice(lines, span.line, span.start, span.end) else {
        debug!("{} out of range at {:?}", definition.name, span);
        return ExtractedField {
            definition,
            raw: String::new(),
            value: String::new(),
            error: Some(FieldError::Truncated {
                line: span.line,
                start: span.start,
                end: span.end,
            }),
        };
    };

    let (value, error) = match decode(&raw, definition) {
        Ok(value) => (value, None),
        Err(error) => {
            debug!("{} failed to decode: {}", definition.name, error);
            (raw.clone(), Some(error))
        }
    };
    trace!("{} = {:?} (raw {:?})", definition.name, value, raw);

    ExtractedField {
        definition,
        raw,
        value,
        error,
    }
}

/// Extract every field of a grammar, in grammar order
pub fn extract<'g>(lines: &[String], fields: &'g [FieldDefinition]) -> Vec<ExtractedField<'g>> {
    fields
        .iter()
        .map(|definition| extract_field(lines, definition))
        .collect()
}
