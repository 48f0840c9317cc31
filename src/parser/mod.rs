//! MRZ parsing pipeline
//!
//! Raw text flows through the stages strictly in order, each stage pure:
//! - [`normalizer`] - split and trim lines, flag characters outside the MRZ set
//! - [`detector`] - match the line shape against the registry layouts
//! - [`grammar`] - immutable per-format field tables
//! - [`extractor`] - slice and decode every field of the matched grammar
//! - [`checksum`] - ICAO check digits for fields and the composite check
//! - [`assembler`] - merge the results into a [`DocumentModel`]
//!
//! ## Usage
//!
//! ```rust
//! use mrz_reader::{FieldName, FormatType, MrzParser};
//!
//! let parser = MrzParser::standard();
//! let document = parser.parse(
//!     "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\n\
//!      L898902C36UTO7408122F1204159ZE184226B<<<<<10",
//! );
//!
//! assert_eq!(document.format, FormatType::Td3);
//! assert!(document.valid);
//! assert_eq!(document.field(FieldName::GivenNames), Some("ANNA MARIA"));
//! ```

pub mod assembler;
pub mod checksum;
pub mod detector;
pub mod extractor;
pub mod grammar;
pub mod normalizer;

#[cfg(test)]
pub mod tests;

use self::grammar::GrammarRegistry;
use crate::error::DocumentIssue;
use crate::models::DocumentModel;
use tracing::{debug, trace};

/// MRZ parser bound to a grammar registry.
///
/// The parser holds only a shared reference to an immutable registry, so one
/// instance (or many) can be used from any number of threads at once.
#[derive(Debug, Clone, Copy)]
pub struct MrzParser<'r> {
    registry: &'r GrammarRegistry,
}

impl MrzParser<'static> {
    /// Parser over the process-wide ICAO 9303 registry
    pub fn standard() -> Self {
        Self::new(GrammarRegistry::standard())
    }
}

impl Default for MrzParser<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> MrzParser<'r> {
    pub fn new(registry: &'r GrammarRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r GrammarRegistry {
        self.registry
    }

    /// Parse one MRZ block.
    ///
    /// Never fails: unusable input yields an empty, invalid document with
    /// [`DocumentModel::issue`] set, and field problems are recorded on the
    /// individual [`crate::Detail`]s.
    pub fn parse(&self, input: &str) -> DocumentModel {
        let normalized = match normalizer::normalize(input) {
            Ok(normalized) => normalized,
            Err(issue) => return DocumentModel::unrecognized(issue),
        };
        trace!("normalized lines: {:?}", normalized.lines);

        let Some(grammar) = detector::detect(self.registry, &normalized.lines) else {
            return DocumentModel::unrecognized(DocumentIssue::FormatUnrecognized);
        };

        let fields = extractor::extract(&normalized.lines, grammar.fields);
        let evaluations = checksum::evaluate_all(&normalized.lines, &fields);
        let document = assembler::assemble(grammar.format, fields, evaluations);

        debug!(
            "Parsed {} document (valid={})",
            document.format, document.valid
        );
        document
    }
}

/// Parse one MRZ block with the standard ICAO 9303 registry
pub fn parse(input: &str) -> DocumentModel {
    MrzParser::standard().parse(input)
}
