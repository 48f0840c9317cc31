//! Format detection by exact line shape.

use super::grammar::{Grammar, GrammarRegistry, Layout};
use crate::models::FormatType;
use tracing::debug;

/// Whether `lines` have exactly the shape `layout` requires
pub fn matches_layout(layout: &Layout, lines: &[String]) -> bool {
    if lines.len() != layout.line_count {
        return false;
    }
    if !lines
        .iter()
        .all(|line| line.chars().count() == layout.line_length)
    {
        return false;
    }
    match layout.document_code {
        Some(code) => lines.first().is_some_and(|line| line.starts_with(code)),
        None => true,
    }
}

/// First grammar in registry precedence order whose layout matches
pub fn detect<'r>(registry: &'r GrammarRegistry, lines: &[String]) -> Option<&'r Grammar> {
    let grammar = registry
        .iter()
        .find(|grammar| matches_layout(&grammar.layout, lines));

    match grammar {
        Some(grammar) => debug!("Detected format {}", grammar.format),
        None => debug!(
            "No format matches {} line(s) of lengths {:?}",
            lines.len(),
            lines.iter().map(|line| line.chars().count()).collect::<Vec<_>>()
        ),
    }
    grammar
}

/// Detected format, or [`FormatType::Unrecognized`]
pub fn detect_format(registry: &GrammarRegistry, lines: &[String]) -> FormatType {
    detect(registry, lines)
        .map(|grammar| grammar.format)
        .unwrap_or(FormatType::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(first: char, count: usize, length: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                let fill = if i == 0 { first } else { '<' };
                std::iter::once(fill)
                    .chain(std::iter::repeat_n('<', length - 1))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_detects_each_shape() {
        let registry = GrammarRegistry::standard();
        assert_eq!(detect_format(registry, &block('I', 3, 30)), FormatType::Td1);
        assert_eq!(detect_format(registry, &block('I', 2, 36)), FormatType::Td2);
        assert_eq!(detect_format(registry, &block('P', 2, 44)), FormatType::Td3);
        assert_eq!(detect_format(registry, &block('V', 2, 44)), FormatType::Mrva);
        assert_eq!(detect_format(registry, &block('V', 2, 36)), FormatType::Mrvb);
    }

    #[test]
    fn test_requires_exact_shape() {
        let registry = GrammarRegistry::standard();
        assert_eq!(
            detect_format(registry, &block('P', 2, 43)),
            FormatType::Unrecognized
        );
        assert_eq!(
            detect_format(registry, &block('P', 3, 44)),
            FormatType::Unrecognized
        );
        assert_eq!(
            detect_format(registry, &block('I', 2, 30)),
            FormatType::Unrecognized
        );

        let mut mixed = block('P', 2, 44);
        mixed[1].pop();
        assert_eq!(detect_format(registry, &mixed), FormatType::Unrecognized);
    }

    #[test]
    fn test_empty_registry_detects_nothing() {
        let registry = GrammarRegistry::new(Vec::new());
        assert!(detect(&registry, &block('P', 2, 44)).is_none());
    }
}
