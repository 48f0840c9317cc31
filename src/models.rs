//! Core data structures for MRZ parsing results.
//!
//! Defines the supported document formats, the closed set of field names,
//! and the per-field and per-document outcomes returned by the parser.

use crate::error::{DocumentIssue, FieldError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Document Formats
// =============================================================================

/// MRZ layouts defined by ICAO 9303
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormatType {
    /// ID card, 3 lines of 30 characters
    #[serde(rename = "TD1")]
    Td1,
    /// ID card, 2 lines of 36 characters
    #[serde(rename = "TD2")]
    Td2,
    /// Passport, 2 lines of 44 characters
    #[serde(rename = "TD3")]
    Td3,
    /// Visa type A, 2 lines of 44 characters
    #[serde(rename = "MRVA")]
    Mrva,
    /// Visa type B, 2 lines of 36 characters
    #[serde(rename = "MRVB")]
    Mrvb,
    /// Line shape matches no known layout
    Unrecognized,
}

impl FormatType {
    /// Every recognizable format, in registry order
    pub const KNOWN: [FormatType; 5] = [
        FormatType::Td1,
        FormatType::Td2,
        FormatType::Td3,
        FormatType::Mrva,
        FormatType::Mrvb,
    ];

    /// Canonical ICAO name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatType::Td1 => "TD1",
            FormatType::Td2 => "TD2",
            FormatType::Td3 => "TD3",
            FormatType::Mrva => "MRVA",
            FormatType::Mrvb => "MRVB",
            FormatType::Unrecognized => "Unrecognized",
        }
    }

    /// Whether this is a machine readable visa layout
    pub fn is_visa(&self) -> bool {
        matches!(self, FormatType::Mrva | FormatType::Mrvb)
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, FormatType::Unrecognized)
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field Names
// =============================================================================

/// Closed set of fields any supported layout can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    DocumentCode,
    IssuingState,
    DocumentNumber,
    Nationality,
    BirthDate,
    Sex,
    ExpiryDate,
    PersonalNumber,
    OptionalData1,
    OptionalData2,
    Surname,
    GivenNames,
    CompositeCheckDigit,
}

impl FieldName {
    /// camelCase name used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::DocumentCode => "documentCode",
            FieldName::IssuingState => "issuingState",
            FieldName::DocumentNumber => "documentNumber",
            FieldName::Nationality => "nationality",
            FieldName::BirthDate => "birthDate",
            FieldName::Sex => "sex",
            FieldName::ExpiryDate => "expiryDate",
            FieldName::PersonalNumber => "personalNumber",
            FieldName::OptionalData1 => "optionalData1",
            FieldName::OptionalData2 => "optionalData2",
            FieldName::Surname => "surname",
            FieldName::GivenNames => "givenNames",
            FieldName::CompositeCheckDigit => "compositeCheckDigit",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Per-field Outcome
// =============================================================================

/// Result of comparing an embedded check character with the computed digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Character found in the check digit position
    pub embedded: char,

    /// Computed check digit, `None` when a checksummed character has no ICAO value
    pub expected: Option<u8>,

    /// Whether the embedded character matches the computed digit
    pub matches: bool,
}

/// Decoded and validated outcome for one grammar field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detail {
    pub name: FieldName,

    /// Zero-based line index of the raw slice
    pub line: usize,

    /// Start column (inclusive) of the raw slice
    pub start: usize,

    /// End column (exclusive) of the raw slice
    pub end: usize,

    /// Characters exactly as they appear in the MRZ
    pub raw: String,

    /// Decoded value (fillers resolved); equals `raw` when decoding failed
    pub value: String,

    /// Check digit comparison, present only for checksum-bearing fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckOutcome>,

    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

impl Detail {
    /// Whether this field carries a check digit requirement
    pub fn is_checksummed(&self) -> bool {
        self.check.is_some()
    }
}

// =============================================================================
// Assembled Document
// =============================================================================

/// Structured result of parsing one MRZ block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    /// Per-field outcomes in grammar order
    pub details: Vec<Detail>,

    /// Decoded value per field name
    pub fields: BTreeMap<FieldName, String>,

    pub format: FormatType,

    /// True iff the format is recognized and every checksum-bearing field validates
    pub valid: bool,

    /// Set when the input could not be used at all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<DocumentIssue>,
}

impl DocumentModel {
    /// Empty, invalid document for unusable input
    pub fn unrecognized(issue: DocumentIssue) -> Self {
        Self {
            details: Vec::new(),
            fields: BTreeMap::new(),
            format: FormatType::Unrecognized,
            valid: false,
            issue: Some(issue),
        }
    }

    /// Decoded value of a field, if the format defines it
    pub fn field(&self, name: FieldName) -> Option<&str> {
        self.fields.get(&name).map(String::as_str)
    }

    pub fn detail(&self, name: FieldName) -> Option<&Detail> {
        self.details.iter().find(|detail| detail.name == name)
    }

    /// Details that failed decoding or check digit validation
    pub fn invalid_details(&self) -> impl Iterator<Item = &Detail> {
        self.details.iter().filter(|detail| !detail.valid)
    }
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::unrecognized(DocumentIssue::EmptyInput)
    }
}
