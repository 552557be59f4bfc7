#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The assessment pipeline: syntax check, structural scan, classification,
//! feedback.

use tracing::{debug, warn};

use crate::{
    config::AssessmentConfig,
    grade::{FeedbackInput, SubmissionResult, classify, synthesize},
    python::{self, AnalysisError, FeatureFlags, Parser, StructuralProfile, SyntaxOutcome},
};

/// Runs assessments under one policy. Holds no per-submission state, so one
/// instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assessor {
    /// The policy applied to every submission.
    config: AssessmentConfig,
}

impl Assessor {
    /// Creates an assessor using `config`.
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    /// Returns the active policy.
    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// Assesses one submission. Never fails: parse errors and internal
    /// failures are reported through the result.
    pub fn assess(&self, code: &str) -> SubmissionResult {
        self.assess_with(code, python::analyze)
    }

    /// Assesses one submission, profiling valid code with `analyze`.
    fn assess_with<F>(&self, code: &str, analyze: F) -> SubmissionResult
    where
        F: FnOnce(&Parser) -> Result<(StructuralProfile, FeatureFlags), AnalysisError>,
    {
        let parser = match python::validate(code) {
            Ok(SyntaxOutcome::Valid(parser)) => parser,
            Ok(SyntaxOutcome::Invalid(issue)) => {
                let feedback =
                    synthesize(FeedbackInput::SyntaxError(&issue), &self.config.feedback);
                return SubmissionResult::builder()
                    .syntax_score(0.0)
                    .total_score(self.total(0.0, 0.0, 0.0))
                    .feedback(feedback)
                    .syntax_issue(issue)
                    .build();
            }
            Err(e) => return self.degraded(&e),
        };

        let (profile, flags) = match analyze(&parser) {
            Ok(analysis) => analysis,
            Err(e) => return self.degraded(&e),
        };

        let structure_score = profile.structure_score(&self.config.structure);
        let tier = classify(&profile, &flags, &self.config.tiers);
        let concept_score = tier.concept_score();
        let feedback = synthesize(
            FeedbackInput::Analyzed {
                profile: &profile,
                flags: &flags,
                tier,
            },
            &self.config.feedback,
        );

        debug!(
            constructs = profile.construct_count(),
            max_nesting = profile.max_nesting,
            structure_score,
            %tier,
            "assessed submission"
        );

        SubmissionResult::builder()
            .syntax_score(1.0)
            .structure_score(structure_score)
            .concept_score(concept_score)
            .quality_score(structure_score * concept_score)
            .total_score(self.total(1.0, structure_score, concept_score))
            .feedback(feedback)
            .tier(tier)
            .profile(profile)
            .features(flags)
            .build()
    }

    /// The minimal result for a submission the pipeline itself failed on.
    /// The learner is not blamed, so the syntax score stays at 1.0.
    fn degraded(&self, error: &AnalysisError) -> SubmissionResult {
        warn!(error = %error, "internal failure while assessing, degrading result");
        SubmissionResult::builder()
            .syntax_score(1.0)
            .total_score(self.total(1.0, 0.0, 0.0))
            .feedback(synthesize(FeedbackInput::Degraded, &self.config.feedback))
            .build()
    }

    /// Combines the sub-scores with the configured weights.
    fn total(&self, syntax: f64, structure: f64, concept: f64) -> f64 {
        self.config.weights.combine(syntax, structure, concept)
    }
}

/// Assesses `code` under the default policy.
pub fn assess_code(code: &str) -> SubmissionResult {
    Assessor::default().assess(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ScoreWeights, constants::DEGRADED_FEEDBACK, types::SourcePosition};

    fn unsupported(_: &Parser) -> Result<(StructuralProfile, FeatureFlags), AnalysisError> {
        Err(AnalysisError::UnsupportedNode {
            kind:     String::from("match_statement"),
            position: SourcePosition { line: 1, column: 1 },
        })
    }

    #[test]
    fn analysis_failure_degrades_to_a_minimal_result() {
        let result = Assessor::default().assess_with("def f(x):\n    return x + 1\n", unsupported);

        assert_eq!(result.syntax_score(), 1.0);
        assert_eq!(result.structure_score(), 0.0);
        assert_eq!(result.concept_score(), 0.0);
        assert_eq!(result.quality_score(), 0.0);
        assert!((result.total_score() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(result.feedback(), [DEGRADED_FEEDBACK.to_string()]);
        assert!(result.tier().is_none());
        assert!(result.profile().is_none());
        assert!(result.features().is_none());
        assert!(result.syntax_issue().is_none());
    }

    #[test]
    fn degraded_total_follows_the_weights() {
        let assessor = Assessor::new(AssessmentConfig::default().with_weights(ScoreWeights {
            syntax:    0.0,
            structure: 1.0,
            concept:   1.0,
        }));
        let result = assessor.assess_with("x = 1\n", unsupported);

        assert_eq!(result.total_score(), 0.0);
        assert_eq!(result.feedback().len(), 1);
    }

    #[test]
    fn invalid_code_is_reported_before_analysis_runs() {
        let result = Assessor::default().assess_with("def f(x)\n    return x", unsupported);

        assert_eq!(result.syntax_score(), 0.0);
        assert!(result.syntax_issue().is_some());
        assert_ne!(result.feedback(), [DEGRADED_FEEDBACK.to_string()]);
    }

    #[test]
    fn parse_tree_failure_degrades() {
        let error = AnalysisError::from(anyhow::anyhow!("parsing was cancelled"));
        let result = Assessor::default().degraded(&error);

        assert_eq!(result.syntax_score(), 1.0);
        assert_eq!(result.feedback(), [DEGRADED_FEEDBACK.to_string()]);
        assert!(result.syntax_issue().is_none());
    }
}
