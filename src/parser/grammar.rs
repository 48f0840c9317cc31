//! Grammar registry: the field layout of every supported MRZ format.
//!
//! Each format is described as data, a list of [`FieldDefinition`]s in
//! left-to-right, top-to-bottom document order, interpreted by the one
//! generic routine in [`super::extractor`]. The registry order doubles as
//! the detection precedence used by [`super::detector`].
//!
//! Column ranges follow ICAO 9303 parts 4 (TD3), 5 (TD1), 6 (TD2) and 7 (MRV).

use crate::constants::VISA_DOCUMENT_CODE;
use crate::models::{FieldName, FormatType};
use serde::Serialize;
use std::sync::LazyLock;

// =============================================================================
// Field Definitions
// =============================================================================

/// Character range on one MRZ line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(line: usize, start: usize, end: usize) -> Self {
        Self { line, start, end }
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Which half of the name zone a name field decodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamePart {
    /// Text before the first double filler (surname)
    Primary,
    /// Text after the first double filler (given names)
    Secondary,
}

/// How the characters of a field are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// `A`-`Z` and filler
    Alphabetic,
    /// `0`-`9` only
    Numeric,
    /// `A`-`Z`, `0`-`9` and filler
    Alphanumeric,
    /// Six digit `YYMMDD`
    Date,
    /// One of `M`, `F`, `<`
    Sex,
    /// One half of the name zone
    Name { part: NamePart },
    /// Check digit computed over the concatenation of `sources`
    CompositeCheck { sources: &'static [Span] },
}

/// Position and tolerance of a field's own check digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDigitRule {
    /// Column of the check character, on the same line as the field
    pub column: usize,

    /// Treat a filler in the check position as digit `0`
    pub filler_means_zero: bool,
}

/// Static description of one field in a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub name: FieldName,
    pub line: usize,
    pub offset: usize,
    pub length: usize,
    pub kind: FieldKind,
    pub check_digit: Option<CheckDigitRule>,
}

impl FieldDefinition {
    pub const fn new(
        name: FieldName,
        line: usize,
        offset: usize,
        length: usize,
        kind: FieldKind,
    ) -> Self {
        Self {
            name,
            line,
            offset,
            length,
            kind,
            check_digit: None,
        }
    }

    /// Attach a strict check digit at `column`
    pub const fn checked_at(self, column: usize) -> Self {
        Self {
            check_digit: Some(CheckDigitRule {
                column,
                filler_means_zero: false,
            }),
            ..self
        }
    }

    /// Attach a check digit at `column` that accepts a filler as `0`
    pub const fn optionally_checked_at(self, column: usize) -> Self {
        Self {
            check_digit: Some(CheckDigitRule {
                column,
                filler_means_zero: true,
            }),
            ..self
        }
    }

    /// Character range the field occupies
    pub const fn span(&self) -> Span {
        Span::new(self.line, self.offset, self.offset + self.length)
    }
}

// =============================================================================
// Layout Tables
// =============================================================================

use FieldKind::{Alphabetic, Alphanumeric, Date, Sex};
use FieldName as F;

const fn name(field: FieldName, line: usize, offset: usize, length: usize, part: NamePart) -> FieldDefinition {
    FieldDefinition::new(field, line, offset, length, FieldKind::Name { part })
}

const fn composite(line: usize, offset: usize, sources: &'static [Span]) -> FieldDefinition {
    FieldDefinition::new(
        F::CompositeCheckDigit,
        line,
        offset,
        1,
        FieldKind::CompositeCheck { sources },
    )
}

const TD1_COMPOSITE: &[Span] = &[
    Span::new(0, 5, 30),
    Span::new(1, 0, 7),
    Span::new(1, 8, 15),
    Span::new(1, 18, 29),
];

/// TD1: 3 lines of 30 characters
pub const TD1_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(F::DocumentCode, 0, 0, 2, Alphabetic),
    FieldDefinition::new(F::IssuingState, 0, 2, 3, Alphabetic),
    FieldDefinition::new(F::DocumentNumber, 0, 5, 9, Alphanumeric).checked_at(14),
    FieldDefinition::new(F::OptionalData1, 0, 15, 15, Alphanumeric),
    FieldDefinition::new(F::BirthDate, 1, 0, 6, Date).checked_at(6),
    FieldDefinition::new(F::Sex, 1, 7, 1, Sex),
    FieldDefinition::new(F::ExpiryDate, 1, 8, 6, Date).checked_at(14),
    FieldDefinition::new(F::Nationality, 1, 15, 3, Alphabetic),
    FieldDefinition::new(F::OptionalData2, 1, 18, 11, Alphanumeric),
    composite(1, 29, TD1_COMPOSITE),
    name(F::Surname, 2, 0, 30, NamePart::Primary),
    name(F::GivenNames, 2, 0, 30, NamePart::Secondary),
];

const TD2_COMPOSITE: &[Span] = &[Span::new(1, 0, 10), Span::new(1, 13, 20), Span::new(1, 21, 35)];

/// TD2: 2 lines of 36 characters
pub const TD2_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(F::DocumentCode, 0, 0, 2, Alphabetic),
    FieldDefinition::new(F::IssuingState, 0, 2, 3, Alphabetic),
    name(F::Surname, 0, 5, 31, NamePart::Primary),
    name(F::GivenNames, 0, 5, 31, NamePart::Secondary),
    FieldDefinition::new(F::DocumentNumber, 1, 0, 9, Alphanumeric).checked_at(9),
    FieldDefinition::new(F::Nationality, 1, 10, 3, Alphabetic),
    FieldDefinition::new(F::BirthDate, 1, 13, 6, Date).checked_at(19),
    FieldDefinition::new(F::Sex, 1, 20, 1, Sex),
    FieldDefinition::new(F::ExpiryDate, 1, 21, 6, Date).checked_at(27),
    FieldDefinition::new(F::OptionalData1, 1, 28, 7, Alphanumeric),
    composite(1, 35, TD2_COMPOSITE),
];

const TD3_COMPOSITE: &[Span] = &[Span::new(1, 0, 10), Span::new(1, 13, 20), Span::new(1, 21, 43)];

/// TD3 (passport): 2 lines of 44 characters
pub const TD3_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(F::DocumentCode, 0, 0, 2, Alphabetic),
    FieldDefinition::new(F::IssuingState, 0, 2, 3, Alphabetic),
    name(F::Surname, 0, 5, 39, NamePart::Primary),
    name(F::GivenNames, 0, 5, 39, NamePart::Secondary),
    FieldDefinition::new(F::DocumentNumber, 1, 0, 9, Alphanumeric).checked_at(9),
    FieldDefinition::new(F::Nationality, 1, 10, 3, Alphabetic),
    FieldDefinition::new(F::BirthDate, 1, 13, 6, Date).checked_at(19),
    FieldDefinition::new(F::Sex, 1, 20, 1, Sex),
    FieldDefinition::new(F::ExpiryDate, 1, 21, 6, Date).checked_at(27),
    FieldDefinition::new(F::PersonalNumber, 1, 28, 14, Alphanumeric).optionally_checked_at(42),
    composite(1, 43, TD3_COMPOSITE),
];

/// MRV-A (visa): 2 lines of 44 characters, no composite check
pub const MRVA_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(F::DocumentCode, 0, 0, 2, Alphabetic),
    FieldDefinition::new(F::IssuingState, 0, 2, 3, Alphabetic),
    name(F::Surname, 0, 5, 39, NamePart::Primary),
    name(F::GivenNames, 0, 5, 39, NamePart::Secondary),
    FieldDefinition::new(F::DocumentNumber, 1, 0, 9, Alphanumeric).checked_at(9),
    FieldDefinition::new(F::Nationality, 1, 10, 3, Alphabetic),
    FieldDefinition::new(F::BirthDate, 1, 13, 6, Date).checked_at(19),
    FieldDefinition::new(F::Sex, 1, 20, 1, Sex),
    FieldDefinition::new(F::ExpiryDate, 1, 21, 6, Date).checked_at(27),
    FieldDefinition::new(F::OptionalData1, 1, 28, 16, Alphanumeric),
];

/// MRV-B (visa): 2 lines of 36 characters, no composite check
pub const MRVB_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(F::DocumentCode, 0, 0, 2, Alphabetic),
    FieldDefinition::new(F::IssuingState, 0, 2, 3, Alphabetic),
    name(F::Surname, 0, 5, 31, NamePart::Primary),
    name(F::GivenNames, 0, 5, 31, NamePart::Secondary),
    FieldDefinition::new(F::DocumentNumber, 1, 0, 9, Alphanumeric).checked_at(9),
    FieldDefinition::new(F::Nationality, 1, 10, 3, Alphabetic),
    FieldDefinition::new(F::BirthDate, 1, 13, 6, Date).checked_at(19),
    FieldDefinition::new(F::Sex, 1, 20, 1, Sex),
    FieldDefinition::new(F::ExpiryDate, 1, 21, 6, Date).checked_at(27),
    FieldDefinition::new(F::OptionalData1, 1, 28, 8, Alphanumeric),
];

// =============================================================================
// Registry
// =============================================================================

/// Line shape a format requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub line_count: usize,
    pub line_length: usize,

    /// Required first character of line 1, when the shape alone is ambiguous
    pub document_code: Option<char>,
}

/// Complete grammar of one format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grammar {
    pub format: FormatType,
    pub layout: Layout,
    pub fields: &'static [FieldDefinition],
}

impl Grammar {
    pub const fn new(
        format: FormatType,
        line_count: usize,
        line_length: usize,
        document_code: Option<char>,
        fields: &'static [FieldDefinition],
    ) -> Self {
        Self {
            format,
            layout: Layout {
                line_count,
                line_length,
                document_code,
            },
            fields,
        }
    }

    pub fn field(&self, name: FieldName) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The composite check definition, if the format has one
    pub fn composite(&self) -> Option<&FieldDefinition> {
        self.fields
            .iter()
            .find(|field| matches!(field.kind, FieldKind::CompositeCheck { .. }))
    }
}

/// Immutable table of grammars, ordered by detection precedence
#[derive(Debug, Clone)]
pub struct GrammarRegistry {
    grammars: Vec<Grammar>,
}

static STANDARD_REGISTRY: LazyLock<GrammarRegistry> = LazyLock::new(GrammarRegistry::icao);

impl GrammarRegistry {
    /// Build a registry from grammars listed in detection precedence order
    pub fn new(grammars: Vec<Grammar>) -> Self {
        Self { grammars }
    }

    /// Process-wide ICAO 9303 registry, built once on first use
    pub fn standard() -> &'static GrammarRegistry {
        &STANDARD_REGISTRY
    }

    /// ICAO 9303 grammars. Shorter layouts come first, and within a shared
    /// line shape the visa layout (keyed on document code `V`) precedes the
    /// generic one.
    pub fn icao() -> Self {
        Self::new(vec![
            Grammar::new(FormatType::Td1, 3, 30, None, TD1_FIELDS),
            Grammar::new(FormatType::Mrvb, 2, 36, Some(VISA_DOCUMENT_CODE), MRVB_FIELDS),
            Grammar::new(FormatType::Td2, 2, 36, None, TD2_FIELDS),
            Grammar::new(FormatType::Mrva, 2, 44, Some(VISA_DOCUMENT_CODE), MRVA_FIELDS),
            Grammar::new(FormatType::Td3, 2, 44, None, TD3_FIELDS),
        ])
    }

    pub fn get(&self, format: FormatType) -> Option<&Grammar> {
        self.grammars.iter().find(|grammar| grammar.format == format)
    }

    /// Grammars in detection precedence order
    pub fn iter(&self) -> impl Iterator<Item = &Grammar> {
        self.grammars.iter()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_covers_every_format() {
        let registry = GrammarRegistry::standard();
        assert_eq!(registry.len(), FormatType::KNOWN.len());
        for format in FormatType::KNOWN {
            assert!(registry.get(format).is_some(), "missing {format}");
        }
        assert!(registry.get(FormatType::Unrecognized).is_none());
    }

    #[test]
    fn test_fields_fit_their_layout() {
        for grammar in GrammarRegistry::standard().iter() {
            for field in grammar.fields {
                assert!(field.line < grammar.layout.line_count);
                assert!(field.offset + field.length <= grammar.layout.line_length);
                if let Some(rule) = field.check_digit {
                    assert!(rule.column < grammar.layout.line_length);
                }
                if let FieldKind::CompositeCheck { sources } = field.kind {
                    for span in sources {
                        assert!(span.line < grammar.layout.line_count);
                        assert!(span.end <= grammar.layout.line_length);
                    }
                }
            }
        }
    }

    #[test]
    fn test_fields_are_in_document_order() {
        for grammar in GrammarRegistry::standard().iter() {
            let positions: Vec<_> = grammar
                .fields
                .iter()
                .map(|field| (field.line, field.offset))
                .collect();
            let mut sorted = positions.clone();
            sorted.sort();
            assert_eq!(positions, sorted, "{} out of order", grammar.format);
        }
    }

    #[test]
    fn test_field_names_unique_per_format() {
        for grammar in GrammarRegistry::standard().iter() {
            let mut names: Vec<_> = grammar.fields.iter().map(|field| field.name).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), grammar.fields.len());
        }
    }

    #[test]
    fn test_composite_presence() {
        let registry = GrammarRegistry::standard();
        assert!(registry.get(FormatType::Td1).unwrap().composite().is_some());
        assert!(registry.get(FormatType::Td2).unwrap().composite().is_some());
        assert!(registry.get(FormatType::Td3).unwrap().composite().is_some());
        assert!(registry.get(FormatType::Mrva).unwrap().composite().is_none());
        assert!(registry.get(FormatType::Mrvb).unwrap().composite().is_none());
    }

    #[test]
    fn test_td3_personal_number_tolerates_filler() {
        let td3 = GrammarRegistry::standard().get(FormatType::Td3).unwrap();
        let personal = td3.field(FieldName::PersonalNumber).unwrap();
        assert_eq!(
            personal.check_digit,
            Some(CheckDigitRule {
                column: 42,
                filler_means_zero: true
            })
        );
        let number = td3.field(FieldName::DocumentNumber).unwrap();
        assert!(!number.check_digit.unwrap().filler_means_zero);
    }

    #[test]
    fn test_visa_layouts_precede_shared_shapes() {
        let order: Vec<_> = GrammarRegistry::standard()
            .iter()
            .map(|grammar| grammar.format)
            .collect();
        let position = |format| order.iter().position(|f| *f == format).unwrap();
        assert!(position(FormatType::Mrvb) < position(FormatType::Td2));
        assert!(position(FormatType::Mrva) < position(FormatType::Td3));
    }
}
