//! Formats command implementation
//!
//! Lists every grammar in the standard registry, in detection order.

use super::shared::{CommandOutcome, to_json};
use crate::cli::args::{FormatsArgs, OutputFormat};
use crate::error::Result;
use crate::parser::grammar::{FieldDefinition, FieldKind, Grammar, GrammarRegistry};
use colored::*;

/// Human-readable column description of one field
pub fn describe_field(field: &FieldDefinition) -> String {
    let span = field.span();
    let mut description = format!(
        "line {} cols {:>2}..{:<2} {:<20} {}",
        span.line + 1,
        span.start,
        span.end,
        field.name.as_str(),
        kind_label(&field.kind)
    );
    if let Some(rule) = field.check_digit {
        description.push_str(&format!(", check at {}", rule.column));
        if rule.filler_means_zero {
            description.push_str(" (filler allowed)");
        }
    }
    description
}

fn kind_label(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Alphabetic => "alphabetic".to_string(),
        FieldKind::Numeric => "numeric".to_string(),
        FieldKind::Alphanumeric => "alphanumeric".to_string(),
        FieldKind::Date => "date YYMMDD".to_string(),
        FieldKind::Sex => "sex".to_string(),
        FieldKind::Name { .. } => "name".to_string(),
        FieldKind::CompositeCheck { sources } => {
            let ranges: Vec<_> = sources
                .iter()
                .map(|span| format!("{}:{}..{}", span.line + 1, span.start, span.end))
                .collect();
            format!("composite over {}", ranges.join(" "))
        }
    }
}

fn print_grammar(grammar: &Grammar) {
    let layout = &grammar.layout;
    let code = layout
        .document_code
        .map(|code| format!(", document code {}", code))
        .unwrap_or_default();
    println!(
        "{} {} x {}{}",
        grammar.format.to_string().bright_green().bold(),
        layout.line_count,
        layout.line_length,
        code
    );
    for field in grammar.fields {
        println!("  {}", describe_field(field));
    }
    println!();
}

/// Run the formats command
pub fn run_formats(args: &FormatsArgs) -> Result<CommandOutcome> {
    let registry = GrammarRegistry::standard();
    match args.output_format {
        OutputFormat::Json => {
            let grammars: Vec<&Grammar> = registry.iter().collect();
            println!("{}", to_json(&grammars)?);
        }
        OutputFormat::Human => registry.iter().for_each(print_grammar),
    }
    Ok(CommandOutcome::Valid)
}
