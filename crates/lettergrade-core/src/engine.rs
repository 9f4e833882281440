//! Grading engine
//!
//! Selects the student's variant, loads and parses its reference answers,
//! parses the submission and folds everything into a [`Verdict`]. Every
//! failure becomes a rejected verdict; grading never returns an error.

use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::answers::{parse_answers, AnswerSet};
use crate::config::GraderConfig;
use crate::error::{LetterError, Result};
use crate::grade::{compare, GradingParams, GradingPolicy, Rejection, Verdict};
use crate::reference::{DirectorySource, ReferenceSource};
use crate::trace_time;
use crate::variant::{VariantIndex, VariantSelector};

#[derive(Debug)]
pub struct Grader<S> {
    selector: VariantSelector,
    source: S,
    policy: GradingPolicy,
}

impl Grader<DirectorySource> {
    /// Grader reading reference files from the configured directory
    pub fn from_config(config: &GraderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            config.selector()?,
            config.directory_source(),
            config.policy(),
        ))
    }
}

impl<S: ReferenceSource> Grader<S> {
    pub fn new(selector: VariantSelector, source: S, policy: GradingPolicy) -> Self {
        Self {
            selector,
            source,
            policy,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn variant_for(&self, identifier: &str) -> VariantIndex {
        self.selector.select(identifier)
    }

    /// Grade one submission for the given student identifier
    #[instrument(level = "debug", skip(self, submission), fields(budget = params.max_error_budget))]
    pub fn grade(&self, identifier: &str, submission: &str, params: &GradingParams) -> Verdict {
        let start = Instant::now();
        let variant = self.variant_for(identifier);
        let key = self.source.key(variant);
        debug!(%variant, key = %key, "select_variant");

        let diagnostics = vec![format!(
            "variant {variant} (identifier `{identifier}`, reference {key})"
        )];

        let reference = match self.load_reference(variant) {
            Ok(reference) => reference,
            Err(e) => {
                warn!(%variant, error = %e, "reference_unavailable");
                let reason = match e {
                    LetterError::ReferenceUnavailable { reason, .. } => reason,
                    other => other.to_string(),
                };
                return Verdict::rejected(
                    Some(variant),
                    Rejection::ReferenceUnavailable { reason },
                    diagnostics,
                );
            }
        };
        trace_time!(start, "load_reference");

        let sheet = match parse_answers(submission) {
            Ok(sheet) => sheet,
            Err(e) => {
                debug!(%variant, error = %e, "submission_parse_failed");
                return Verdict::rejected(Some(variant), e.into(), diagnostics);
            }
        };
        debug!(
            lines = sheet.len(),
            total_count = sheet.total_count(),
            "parse_submission"
        );

        let comparison = compare(&reference, &sheet, params, &self.policy);
        trace_time!(start, "compare");

        info!(
            %variant,
            invalid_letters = comparison.invalid_letters.len(),
            total_error = comparison.total_error,
            budget = params.max_error_budget,
            rejection = comparison.rejection.as_ref().map(Rejection::kind),
            "graded"
        );

        Verdict::from_comparison(variant, comparison, params, diagnostics)
    }

    fn load_reference(&self, variant: VariantIndex) -> Result<AnswerSet> {
        let bytes = self.source.fetch(variant)?;
        let text = std::str::from_utf8(&bytes).map_err(|e| LetterError::ReferenceUnavailable {
            variant: variant.get(),
            key: self.source.key(variant),
            reason: format!("reference is not valid UTF-8: {e}"),
        })?;

        parse_answers(text)
            .map(|sheet| sheet.into_set())
            .map_err(|e| LetterError::ReferenceUnavailable {
                variant: variant.get(),
                key: self.source.key(variant),
                reason: format!("broken reference data: {e}"),
            })
    }
}
