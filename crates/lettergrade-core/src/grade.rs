//! Comparison of a submission against reference answers
//!
//! Submission lines are checked in file order. The first duplicate or unknown
//! letter rejects immediately. Every matched letter contributes its absolute
//! deviation to the total error, which is then checked against the budget.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerSet, AnswerSheet, ParseError};
use crate::variant::VariantIndex;

/// Budget and reward for one grading call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GradingParams {
    /// Inclusive upper bound on the summed absolute deviation
    pub max_error_budget: u64,
    /// Reported on acceptance, never used in the decision
    pub reward_points: i64,
}

/// Knobs that change how strictly a submission is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingPolicy {
    /// Reject submissions that leave reference letters unreported
    pub strict_completeness: bool,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            strict_completeness: true,
        }
    }
}

/// Who is responsible for a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fault {
    Student,
    Operator,
}

/// Why a submission was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    ReferenceUnavailable { reason: String },
    MalformedLine { line: usize, raw: String },
    InvalidCount { line: usize, raw: String },
    DuplicateLetter { letter: String, line: usize },
    UnknownLetter { letter: String, line: usize },
    IncompleteSubmission { missing: Vec<String> },
    ErrorBudgetExceeded { total_error: u64, budget: u64 },
}

impl Rejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::ReferenceUnavailable { .. } => "reference_unavailable",
            Rejection::MalformedLine { .. } => "malformed_line",
            Rejection::InvalidCount { .. } => "invalid_count",
            Rejection::DuplicateLetter { .. } => "duplicate_letter",
            Rejection::UnknownLetter { .. } => "unknown_letter",
            Rejection::IncompleteSubmission { .. } => "incomplete_submission",
            Rejection::ErrorBudgetExceeded { .. } => "error_budget_exceeded",
        }
    }

    pub fn fault(&self) -> Fault {
        match self {
            Rejection::ReferenceUnavailable { .. } => Fault::Operator,
            _ => Fault::Student,
        }
    }
}

impl From<ParseError> for Rejection {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MalformedLine { line, raw } => Rejection::MalformedLine { line, raw },
            ParseError::InvalidCount { line, raw } => Rejection::InvalidCount { line, raw },
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ReferenceUnavailable { reason } => write!(
                f,
                "reference answers unavailable: {reason}. Please report this issue to your teacher"
            ),
            Rejection::MalformedLine { line, raw } => {
                write!(f, "invalid line `{raw}` (line {line}): expected `letter,count`")
            }
            Rejection::InvalidCount { line, raw } => {
                write!(f, "can't parse letter count `{raw}` (line {line})")
            }
            Rejection::DuplicateLetter { letter, line } => {
                write!(f, "duplicate letter `{letter}` (line {line})")
            }
            Rejection::UnknownLetter { letter, line } => {
                write!(f, "invalid letter `{letter}` (line {line})")
            }
            Rejection::IncompleteSubmission { missing } => {
                write!(f, "missing letters: {}", missing.join(", "))
            }
            Rejection::ErrorBudgetExceeded {
                total_error,
                budget,
            } => write!(
                f,
                "total count error {total_error} exceeds the allowed {budget}"
            ),
        }
    }
}

/// Outcome of checking one submission against one reference set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub total_error: u64,
    pub invalid_letters: Vec<String>,
    pub missing_letters: Vec<String>,
    pub rejection: Option<Rejection>,
}

/// Compare a parsed submission against the reference answers
pub fn compare(
    reference: &AnswerSet,
    submission: &AnswerSheet,
    params: &GradingParams,
    policy: &GradingPolicy,
) -> Comparison {
    let mut remaining = reference.counts().clone();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut total_error: u64 = 0;
    let mut invalid_letters = Vec::new();

    let reject = |rejection: Rejection, total_error: u64, invalid_letters: Vec<String>| Comparison {
        total_error,
        invalid_letters,
        missing_letters: Vec::new(),
        rejection: Some(rejection),
    };

    for entry in submission.lines() {
        if !seen.insert(entry.letter.as_str()) {
            return reject(
                Rejection::DuplicateLetter {
                    letter: entry.letter.clone(),
                    line: entry.line,
                },
                total_error,
                invalid_letters,
            );
        }

        let Some(expected) = remaining.remove(&entry.letter) else {
            return reject(
                Rejection::UnknownLetter {
                    letter: entry.letter.clone(),
                    line: entry.line,
                },
                total_error,
                invalid_letters,
            );
        };

        let delta = expected.abs_diff(entry.count);
        if delta != 0 {
            invalid_letters.push(entry.letter.clone());
            total_error = total_error.saturating_add(delta);
        }
    }

    let missing_letters: Vec<String> = remaining.into_keys().collect();

    let rejection = if policy.strict_completeness && !missing_letters.is_empty() {
        Some(Rejection::IncompleteSubmission {
            missing: missing_letters.clone(),
        })
    } else if total_error > params.max_error_budget {
        Some(Rejection::ErrorBudgetExceeded {
            total_error,
            budget: params.max_error_budget,
        })
    } else {
        None
    };

    Comparison {
        total_error,
        invalid_letters,
        missing_letters,
        rejection,
    }
}

/// Final decision of a grading call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantIndex>,
    pub total_error: u64,
    pub invalid_letters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward_points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    pub diagnostics: Vec<String>,
}

impl Verdict {
    /// Build a verdict from a completed comparison
    pub fn from_comparison(
        variant: VariantIndex,
        comparison: Comparison,
        params: &GradingParams,
        mut diagnostics: Vec<String>,
    ) -> Self {
        diagnostics.push(format!(
            "unique invalid letters cnt={}; sum invalid letters count={}; step threshold={}",
            comparison.invalid_letters.len(),
            comparison.total_error,
            params.max_error_budget
        ));
        if !comparison.invalid_letters.is_empty() {
            diagnostics.push(format!(
                "letters with wrong counts: {}",
                comparison.invalid_letters.join(", ")
            ));
        }

        match comparison.rejection {
            Some(rejection) => {
                diagnostics.push(rejection.to_string());
                Self {
                    accepted: false,
                    variant: Some(variant),
                    total_error: comparison.total_error,
                    invalid_letters: comparison.invalid_letters,
                    reward_points: None,
                    rejection: Some(rejection),
                    diagnostics,
                }
            }
            None => {
                if !comparison.missing_letters.is_empty() {
                    diagnostics.push(format!(
                        "not reported (ignored): {}",
                        comparison.missing_letters.join(", ")
                    ));
                }
                diagnostics.push(format!(
                    "accepted: variant {variant}, step score: {}",
                    params.reward_points
                ));
                Self {
                    accepted: true,
                    variant: Some(variant),
                    total_error: comparison.total_error,
                    invalid_letters: comparison.invalid_letters,
                    reward_points: Some(params.reward_points),
                    rejection: None,
                    diagnostics,
                }
            }
        }
    }

    /// Rejection before any comparison happened
    pub fn rejected(
        variant: Option<VariantIndex>,
        rejection: Rejection,
        mut diagnostics: Vec<String>,
    ) -> Self {
        diagnostics.push(rejection.to_string());
        Self {
            accepted: false,
            variant,
            total_error: 0,
            invalid_letters: Vec::new(),
            reward_points: None,
            rejection: Some(rejection),
            diagnostics,
        }
    }

    /// Human-readable message: every diagnostic on its own line
    pub fn message(&self) -> String {
        self.diagnostics.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::parse_answers;

    fn reference(pairs: &[(&str, i64)]) -> AnswerSet {
        pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect()
    }

    fn params(budget: u64) -> GradingParams {
        GradingParams {
            max_error_budget: budget,
            reward_points: 10,
        }
    }

    fn run(reference: &AnswerSet, submission: &str, budget: u64) -> Comparison {
        let sheet = parse_answers(submission).unwrap();
        compare(reference, &sheet, &params(budget), &GradingPolicy::default())
    }

    #[test]
    fn test_exact_match_accepts() {
        let cmp = run(&reference(&[("A", 3), ("B", 2)]), "A,3\nB,2", 0);
        assert_eq!(cmp.rejection, None);
        assert_eq!(cmp.total_error, 0);
        assert!(cmp.invalid_letters.is_empty());
    }

    #[test]
    fn test_duplicate_rejects_even_when_counts_agree() {
        let cmp = run(&reference(&[("A", 1)]), "A,1\nA,1", 100);
        assert_eq!(
            cmp.rejection,
            Some(Rejection::DuplicateLetter {
                letter: "A".into(),
                line: 2
            })
        );
    }

    #[test]
    fn test_duplicate_detection_is_case_insensitive() {
        let cmp = run(&reference(&[("A", 1)]), "A,1\na,1", 100);
        assert!(matches!(
            cmp.rejection,
            Some(Rejection::DuplicateLetter { .. })
        ));
    }

    #[test]
    fn test_unknown_letter_rejects_regardless_of_budget() {
        let cmp = run(&reference(&[("A", 1)]), "A,1\nZ,0", u64::MAX);
        assert_eq!(
            cmp.rejection,
            Some(Rejection::UnknownLetter {
                letter: "Z".into(),
                line: 2
            })
        );
    }

    #[test]
    fn test_duplicate_checked_before_unknown() {
        let cmp = run(&reference(&[("A", 1)]), "Z,1\nZ,1", 0);
        assert!(matches!(
            cmp.rejection,
            Some(Rejection::UnknownLetter { line: 1, .. })
        ));
    }

    #[test]
    fn test_incomplete_submission_rejects() {
        let cmp = run(&reference(&[("A", 1), ("B", 2)]), "A,1", 100);
        assert_eq!(
            cmp.rejection,
            Some(Rejection::IncompleteSubmission {
                missing: vec!["B".into()]
            })
        );
    }

    #[test]
    fn test_incomplete_checked_before_budget() {
        let cmp = run(&reference(&[("A", 1), ("B", 2)]), "A,50", 0);
        assert!(matches!(
            cmp.rejection,
            Some(Rejection::IncompleteSubmission { .. })
        ));
    }

    #[test]
    fn test_lenient_policy_ignores_missing_letters() {
        let sheet = parse_answers("A,1").unwrap();
        let policy = GradingPolicy {
            strict_completeness: false,
        };
        let cmp = compare(
            &reference(&[("A", 1), ("B", 2)]),
            &sheet,
            &params(0),
            &policy,
        );
        assert_eq!(cmp.rejection, None);
        assert_eq!(cmp.missing_letters, vec!["B".to_string()]);
    }

    #[test]
    fn test_budget_boundary() {
        let reference = reference(&[("A", 5)]);

        let at_boundary = run(&reference, "A,7", 2);
        assert_eq!(at_boundary.rejection, None);
        assert_eq!(at_boundary.total_error, 2);
        assert_eq!(at_boundary.invalid_letters, vec!["A".to_string()]);

        let over = run(&reference, "A,7", 1);
        assert_eq!(
            over.rejection,
            Some(Rejection::ErrorBudgetExceeded {
                total_error: 2,
                budget: 1
            })
        );
    }

    #[test]
    fn test_error_is_sum_of_absolute_deviations() {
        let cmp = run(&reference(&[("A", 5), ("B", 5), ("C", 5)]), "A,2\nB,9\nC,5", 7);
        assert_eq!(cmp.total_error, 7);
        assert_eq!(cmp.invalid_letters, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(cmp.rejection, None);
    }

    #[test]
    fn test_single_letter_can_exhaust_budget() {
        let cmp = run(&reference(&[("A", 0), ("B", 0)]), "A,1000\nB,0", 999);
        assert!(matches!(
            cmp.rejection,
            Some(Rejection::ErrorBudgetExceeded {
                total_error: 1000,
                ..
            })
        ));
    }

    #[test]
    fn test_negative_submitted_counts_are_compared() {
        let cmp = run(&reference(&[("A", 2)]), "A,-2", 4);
        assert_eq!(cmp.total_error, 4);
        assert_eq!(cmp.rejection, None);
    }

    #[test]
    fn test_case_normalization() {
        let cmp = run(&reference(&[("A", 5)]), "a,5", 0);
        assert_eq!(cmp.rejection, None);
    }

    #[test]
    fn test_empty_submission_against_empty_reference() {
        let cmp = run(&AnswerSet::default(), "", 0);
        assert_eq!(cmp.rejection, None);
    }

    #[test]
    fn test_verdict_accept_carries_reward_and_variant() {
        let variant = crate::variant::VariantSelector::new(std::num::NonZeroU32::new(100).unwrap())
            .index(17)
            .unwrap();
        let cmp = run(&reference(&[("A", 3), ("B", 2)]), "A,3\nB,2", 0);
        let verdict = Verdict::from_comparison(variant, cmp, &params(0), Vec::new());

        assert!(verdict.accepted);
        assert_eq!(verdict.reward_points, Some(10));
        assert!(verdict.message().contains("10"));
        assert!(verdict.message().contains("variant 17"));
    }

    #[test]
    fn test_verdict_reject_names_letter() {
        let variant = crate::variant::VariantSelector::new(std::num::NonZeroU32::new(100).unwrap())
            .index(3)
            .unwrap();
        let cmp = run(&reference(&[("A", 1)]), "Q,1", 0);
        let verdict = Verdict::from_comparison(variant, cmp, &params(0), Vec::new());

        assert!(!verdict.accepted);
        assert_eq!(verdict.reward_points, None);
        assert!(verdict.message().contains("invalid letter `Q` (line 1)"));
        assert_eq!(verdict.rejection.as_ref().map(Rejection::kind), Some("unknown_letter"));
    }

    #[test]
    fn test_rejection_fault() {
        assert_eq!(
            Rejection::ReferenceUnavailable {
                reason: "gone".into()
            }
            .fault(),
            Fault::Operator
        );
        assert_eq!(
            Rejection::IncompleteSubmission { missing: vec![] }.fault(),
            Fault::Student
        );
    }

    #[test]
    fn test_rejection_serializes_with_kind_tag() {
        let json = serde_json::to_value(Rejection::DuplicateLetter {
            letter: "A".into(),
            line: 2,
        })
        .unwrap();
        assert_eq!(json["kind"], "duplicate_letter");
        assert_eq!(json["letter"], "A");
        assert_eq!(json["line"], 2);
    }
}
