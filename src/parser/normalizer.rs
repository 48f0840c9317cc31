//! Line normalization: raw text block to trimmed MRZ lines.

use crate::constants::DISALLOWED_CHAR_PATTERN;
use crate::error::DocumentIssue;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

static DISALLOWED_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DISALLOWED_CHAR_PATTERN).expect("disallowed character pattern is a valid regex")
});

/// A character outside `A-Z 0-9 <` found during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisallowedChar {
    pub line: usize,
    pub column: usize,
    pub character: char,
}

/// Normalized MRZ lines plus the disallowed characters they contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    pub lines: Vec<String>,
    pub disallowed: Vec<DisallowedChar>,
}

impl NormalizedInput {
    pub fn is_clean(&self) -> bool {
        self.disallowed.is_empty()
    }

    /// Character length of every line, in order
    pub fn line_lengths(&self) -> Vec<usize> {
        self.lines.iter().map(|line| line.chars().count()).collect()
    }
}

/// Split `raw` on `\r\n`, `\n` or `\r`, trim each line and drop empty lines
/// at either end of the block.
///
/// Disallowed characters are reported but kept; the fields containing them
/// are invalidated during extraction.
pub fn normalize(raw: &str) -> Result<NormalizedInput, DocumentIssue> {
    let unified = raw.replace("\r\n", "\n");
    let mut lines: Vec<String> = unified
        .split(['\n', '\r'])
        .map(|line| line.trim().to_string())
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading);

    if lines.is_empty() {
        debug!("No non-empty lines in input");
        return Err(DocumentIssue::EmptyInput);
    }

    let disallowed: Vec<DisallowedChar> = lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| {
            DISALLOWED_CHAR.find_iter(line).filter_map(move |found| {
                Some(DisallowedChar {
                    line: index,
                    // Columns count characters, match offsets are bytes
                    column: line[..found.start()].chars().count(),
                    character: found.as_str().chars().next()?,
                })
            })
        })
        .collect();

    if !disallowed.is_empty() {
        warn!(
            "Input contains {} character(s) outside the MRZ set",
            disallowed.len()
        );
    }
    debug!("Normalized {} line(s)", lines.len());

    Ok(NormalizedInput { lines, disallowed })
}
