//! `LETTER,count` answer files
//!
//! Both the reference answers and student submissions use the same format:
//! one `letter,count` pair per line, blank lines ignored. Letters are
//! upper-cased so matching is case-insensitive.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// A parse failure with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error("invalid line `{raw}` (line {line}): expected `letter,count`")]
    MalformedLine { line: usize, raw: String },

    #[error("can't parse letter count `{raw}` (line {line})")]
    InvalidCount { line: usize, raw: String },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MalformedLine { line, .. } | ParseError::InvalidCount { line, .. } => *line,
        }
    }
}

/// One parsed `letter,count` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerLine {
    pub line: usize,
    pub letter: String,
    pub count: i64,
}

/// Parsed lines in file order, duplicates included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    lines: Vec<AnswerLine>,
}

impl AnswerSheet {
    pub fn lines(&self) -> &[AnswerLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all reported counts
    pub fn total_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, l| acc.saturating_add(l.count))
    }

    /// Collapse into a letter map; a repeated letter keeps its last count
    pub fn into_set(self) -> AnswerSet {
        let mut counts = BTreeMap::new();
        for AnswerLine {
            line,
            letter,
            count,
        } in self.lines
        {
            if let Some(previous) = counts.insert(letter.clone(), count) {
                warn!(%letter, line, previous, count, "duplicate letter in answer set");
            }
        }
        AnswerSet { counts }
    }
}

/// Letter to expected count mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet {
    counts: BTreeMap<String, i64>,
}

impl AnswerSet {
    pub fn get(&self, letter: &str) -> Option<i64> {
        self.counts.get(letter).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub(crate) fn counts(&self) -> &BTreeMap<String, i64> {
        &self.counts
    }

    /// Serialize back to `LETTER,count` lines, sorted by letter
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for (letter, count) in &self.counts {
            let _ = writeln!(out, "{letter},{count}");
        }
        out
    }
}

impl FromIterator<(String, i64)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(letter, count)| (normalize_letter(&letter), count))
                .collect(),
        }
    }
}

/// Upper-case a letter token for comparison
///
/// Case mapping is done per `char`. A char whose upper-case form expands to
/// several chars (`ß` becomes `SS`) is kept as is, so distinct letters never
/// collapse into one key.
pub fn normalize_letter(letter: &str) -> String {
    letter
        .chars()
        .map(|c| {
            let mut upper = c.to_uppercase();
            match (upper.next(), upper.next()) {
                (Some(u), None) => u,
                _ => c,
            }
        })
        .collect()
}

/// Parse `letter,count` text into an ordered sheet
pub fn parse_answers(text: &str) -> Result<AnswerSheet, ParseError> {
    let mut lines = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        let Some((letter, count)) = line.split_once(',') else {
            return Err(ParseError::MalformedLine {
                line: line_no,
                raw: line.to_string(),
            });
        };
        if count.contains(',') {
            return Err(ParseError::MalformedLine {
                line: line_no,
                raw: line.to_string(),
            });
        }

        let count = count
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidCount {
                line: line_no,
                raw: count.to_string(),
            })?;

        lines.push(AnswerLine {
            line: line_no,
            letter: normalize_letter(letter),
            count,
        });
    }

    Ok(AnswerSheet { lines })
}
