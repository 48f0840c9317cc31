//! Parse command implementation
//!
//! Reads one MRZ block, parses it, and prints the document either as a
//! colored field table or as JSON.

use super::shared::{CommandOutcome, read_input, render_document, to_json};
use crate::cli::args::{OutputFormat, ParseArgs};
use crate::config::MrzConfig;
use crate::dates::{age_on, resolve_birth_date, resolve_expiry_date};
use crate::error::Result;
use crate::models::{DocumentModel, FieldName};
use crate::parser::MrzParser;
use chrono::NaiveDate;
use colored::*;
use serde::Serialize;
use tracing::info;

/// Century-resolved dates for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
}

impl ResolvedDates {
    /// Resolve the document's dates against `today`
    pub fn resolve(document: &DocumentModel, today: NaiveDate, window_years: i32) -> Self {
        let birth_date = document
            .field(FieldName::BirthDate)
            .and_then(|value| resolve_birth_date(value, today));
        let expiry_date = document
            .field(FieldName::ExpiryDate)
            .and_then(|value| resolve_expiry_date(value, today, window_years));

        Self {
            birth_date,
            expiry_date,
            age: birth_date.and_then(|birth| age_on(birth, today)),
            expired: expiry_date.map(|expiry| expiry < today),
        }
    }
}

/// JSON shape of the parse command output
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutput<'a> {
    #[serde(flatten)]
    pub document: &'a DocumentModel,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_dates: Option<ResolvedDates>,
}

/// Run the parse command
pub fn run_parse(args: &ParseArgs, config: &MrzConfig) -> Result<CommandOutcome> {
    args.validate()?;

    let input = read_input(
        args.text.as_deref(),
        args.file.as_deref(),
        args.framed,
        config,
    )?;

    let document = MrzParser::standard().parse(&input);
    info!(
        "Parsed {} document (valid={})",
        document.format, document.valid
    );

    let resolved_dates = args.resolve_dates.then(|| {
        let today = chrono::Local::now().date_naive();
        ResolvedDates::resolve(&document, today, config.expiry_window_years)
    });

    match args.output_format {
        OutputFormat::Json => {
            let output = ParseOutput {
                document: &document,
                resolved_dates,
            };
            println!("{}", to_json(&output)?);
        }
        OutputFormat::Human => {
            println!("{}", render_document(&document));
            if let Some(dates) = &resolved_dates {
                print_resolved_dates(dates);
            }
        }
    }

    Ok(CommandOutcome::from_valid(document.valid))
}

fn print_resolved_dates(dates: &ResolvedDates) {
    println!();
    if let Some(birth) = dates.birth_date {
        let age = dates
            .age
            .map(|age| format!(" (age {})", age))
            .unwrap_or_default();
        println!(
            "  {} {}{}",
            "Date of birth:".bright_cyan(),
            birth.format("%Y-%m-%d").to_string().bright_white(),
            age
        );
    }
    if let Some(expiry) = dates.expiry_date {
        let status = if dates.expired == Some(true) {
            "expired".bright_red()
        } else {
            "current".bright_green()
        };
        println!(
            "  {} {} ({})",
            "Date of expiry:".bright_cyan(),
            expiry.format("%Y-%m-%d").to_string().bright_white(),
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const TD3: &str = "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<\nL898902C36UTO7408122F1204159ZE184226B<<<<<10";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_specimen_dates() {
        let document = parse(TD3);
        let dates = ResolvedDates::resolve(&document, date(2024, 6, 1), 50);

        assert_eq!(dates.birth_date, Some(date(1974, 8, 12)));
        assert_eq!(dates.expiry_date, Some(date(2012, 4, 15)));
        assert_eq!(dates.age, Some(49));
        assert_eq!(dates.expired, Some(true));
    }

    #[test]
    fn test_resolve_unrecognized_document() {
        let dates = ResolvedDates::resolve(&parse(""), date(2024, 6, 1), 50);
        assert_eq!(
            dates,
            ResolvedDates {
                birth_date: None,
                expiry_date: None,
                age: None,
                expired: None,
            }
        );
    }

    #[test]
    fn test_json_output_flattens_document() {
        let document = parse(TD3);
        let output = ParseOutput {
            document: &document,
            resolved_dates: Some(ResolvedDates::resolve(&document, date(2024, 6, 1), 50)),
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&output).unwrap()).unwrap();

        assert_eq!(value["format"], "TD3");
        assert_eq!(value["valid"], true);
        assert_eq!(value["fields"]["documentNumber"], "L898902C3");
        assert_eq!(value["resolvedDates"]["birthDate"], "1974-08-12");
        assert_eq!(value["details"][4]["check"]["embedded"], "6");
    }

    #[test]
    fn test_run_parse_exit_outcome() {
        let config = MrzConfig::default();
        let mut args = ParseArgs {
            file: None,
            text: Some(TD3.to_string()),
            framed: false,
            output_format: OutputFormat::Json,
            resolve_dates: false,
        };
        assert_eq!(run_parse(&args, &config).unwrap(), CommandOutcome::Valid);

        args.text = Some(TD3.replace("<<<<<10", "<<<<<11"));
        assert_eq!(run_parse(&args, &config).unwrap(), CommandOutcome::Invalid);
    }
}
