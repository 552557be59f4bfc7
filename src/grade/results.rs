#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use bon::Builder;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use super::tier::SkillTier;
use crate::python::{FeatureFlags, StructuralProfile, SyntaxIssue};

#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
/// The assessment of one submission. Immutable once built.
pub struct SubmissionResult {
    /// * `syntax_score`: 1.0 if the submission parsed, else 0.0
    syntax_score:    f64,
    /// * `structure_score`: saturating measure of structural constructs
    #[builder(default)]
    structure_score: f64,
    /// * `concept_score`: the tier's fixed score, 0.0 without a tier
    #[builder(default)]
    concept_score:   f64,
    /// * `quality_score`: structure score scaled by concept score
    #[builder(default)]
    quality_score:   f64,
    /// * `total_score`: weighted combination of the three sub-scores
    total_score:     f64,
    /// * `feedback`: messages in priority order, never empty
    feedback:        Vec<String>,
    /// * `tier`: classified tier, absent when analysis did not run
    tier:            Option<SkillTier>,
    /// * `profile`: structural counts, absent when analysis did not run
    profile:         Option<StructuralProfile>,
    /// * `features`: feature flags, absent when analysis did not run
    features:        Option<FeatureFlags>,
    /// * `syntax_issue`: why parsing failed, if it did
    syntax_issue:    Option<SyntaxIssue>,
}

impl SubmissionResult {
    /// 1.0 if the submission parsed, else 0.0.
    pub fn syntax_score(&self) -> f64 {
        self.syntax_score
    }

    /// Structure score in `[0, 1]`.
    pub fn structure_score(&self) -> f64 {
        self.structure_score
    }

    /// Concept score: one of 0.25, 0.5, 0.75, 1.0, or 0.0 without a tier.
    pub fn concept_score(&self) -> f64 {
        self.concept_score
    }

    /// Structure score multiplied by concept score.
    pub fn quality_score(&self) -> f64 {
        self.quality_score
    }

    /// Weighted total in `[0, 1]`.
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Ordered feedback messages.
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    /// The classified tier, if analysis ran.
    pub fn tier(&self) -> Option<SkillTier> {
        self.tier
    }

    /// Structural counts, if analysis ran.
    pub fn profile(&self) -> Option<&StructuralProfile> {
        self.profile.as_ref()
    }

    /// Feature flags, if analysis ran.
    pub fn features(&self) -> Option<&FeatureFlags> {
        self.features.as_ref()
    }

    /// Why parsing failed, if it did.
    pub fn syntax_issue(&self) -> Option<&SyntaxIssue> {
        self.syntax_issue.as_ref()
    }
}

#[derive(Tabled, Clone, Debug)]
/// One line of the CLI summary table.
pub struct SummaryRow {
    #[tabled(rename = "Submission")]
    /// * `submission`: where the code came from
    submission: String,
    #[tabled(rename = "Syntax")]
    /// * `syntax`: syntax score
    syntax:     String,
    #[tabled(rename = "Structure")]
    /// * `structure`: structure score
    structure:  String,
    #[tabled(rename = "Concepts")]
    /// * `concepts`: concept score
    concepts:   String,
    #[tabled(rename = "Tier")]
    /// * `tier`: classified tier or a dash
    tier:       String,
    #[tabled(rename = "Overall")]
    /// * `overall`: total score
    overall:    String,
}

impl SummaryRow {
    /// Formats `result` for display under the label `submission`.
    pub fn new(submission: impl Into<String>, result: &SubmissionResult) -> Self {
        Self {
            submission: submission.into(),
            syntax:     format!("{:.2}", result.syntax_score),
            structure:  format!("{:.2}", result.structure_score),
            concepts:   format!("{:.2}", result.concept_score),
            tier:       result
                .tier
                .map(|t| t.to_string())
                .unwrap_or_else(|| String::from("-")),
            overall:    format!("{:.2}", result.total_score),
        }
    }
}
