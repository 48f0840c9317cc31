//! MRZ Reader Library
//!
//! A Rust library for parsing and validating the Machine Readable Zone (MRZ)
//! printed on passports, identity cards and visas (ICAO 9303).
//!
//! This library provides tools for:
//! - Normalizing raw scanner text into MRZ lines
//! - Detecting the layout (TD1, TD2, TD3, MRV-A, MRV-B) from the line shape
//! - Extracting and decoding every field of the detected layout
//! - Verifying field and composite check digits
//! - Assembling a serializable document model with per-field diagnostics
//! - Batch validation of MRZ files with a bounded worker pool

pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;
pub mod reader;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::MrzConfig;
pub use error::{DocumentIssue, FieldError, MrzError, Result};
pub use models::{CheckOutcome, Detail, DocumentModel, FieldName, FormatType};
pub use parser::grammar::{FieldDefinition, FieldKind, GrammarRegistry};
pub use parser::{MrzParser, parse};
