//! Document assembly: merges extraction and checksum results into a
//! [`DocumentModel`].

use super::checksum::Evaluation;
use super::extractor::ExtractedField;
use crate::models::{Detail, DocumentModel, FormatType};
use std::collections::BTreeMap;
use tracing::debug;

/// Combine one extracted field with its checksum evaluation.
///
/// A checksum-bearing field is valid exactly when its check digit matches;
/// a decode error on such a field (for example a `00` month) is kept as a
/// diagnostic only. Fields without a check digit are valid when they decode.
/// A decode error takes precedence over a checksum error when both apply.
pub fn build_detail(field: ExtractedField<'_>, evaluation: Option<Evaluation>) -> Detail {
    let definition = field.definition;
    let span = definition.span();

    let (check, check_error) = match evaluation {
        Some(evaluation) => (Some(evaluation.outcome), evaluation.error),
        None => (None, None),
    };
    let error = field.error.or(check_error);
    let valid = match check {
        Some(outcome) => outcome.matches,
        None => error.is_none(),
    };

    Detail {
        name: definition.name,
        line: span.line,
        start: span.start,
        end: span.end,
        raw: field.raw,
        value: field.value,
        check,
        valid,
        error,
    }
}

/// Build the final document. `evaluations` must be aligned with `fields`.
pub fn assemble(
    format: FormatType,
    fields: Vec<ExtractedField<'_>>,
    evaluations: Vec<Option<Evaluation>>,
) -> DocumentModel {
    let details: Vec<Detail> = fields
        .into_iter()
        .zip(evaluations)
        .map(|(field, evaluation)| build_detail(field, evaluation))
        .collect();

    let values: BTreeMap<_, _> = details
        .iter()
        .map(|detail| (detail.name, detail.value.clone()))
        .collect();

    let valid = format.is_recognized()
        && details
            .iter()
            .filter(|detail| detail.is_checksummed())
            .all(|detail| detail.valid);

    debug!(
        "Assembled {} document: {} field(s), {} invalid, valid={}",
        format,
        details.len(),
        details.iter().filter(|detail| !detail.valid).count(),
        valid
    );

    DocumentModel {
        details,
        fields: values,
        format,
        valid,
        issue: None,
    }
}
