#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Assessment policy: score weights, saturation curve, tier cut-offs and
//! feedback thresholds, gathered in one overridable structure.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading or validating an [`AssessmentConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Could not read config file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path:   String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("Could not parse config file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path:   String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A numeric field is outside its allowed range.
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted name of the offending field.
        field:  &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Weights combining the three sub-scores into the total score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the syntax score.
    pub syntax:    f64,
    /// Weight of the structure score.
    pub structure: f64,
    /// Weight of the concept score.
    pub concept:   f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            syntax:    DEFAULT_SYNTAX_WEIGHT,
            structure: DEFAULT_STRUCTURE_WEIGHT,
            concept:   DEFAULT_CONCEPT_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Weighted mean of the three sub-scores, clamped to `[0, 1]`.
    pub fn combine(&self, syntax: f64, structure: f64, concept: f64) -> f64 {
        let sum = self.syntax + self.structure + self.concept;
        if sum <= 0.0 {
            return 0.0;
        }
        let total = (self.syntax * syntax + self.structure * structure + self.concept * concept)
            / sum;
        total.clamp(0.0, 1.0)
    }
}

/// Saturating curve mapping construct count and nesting depth to a
/// structure score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureCurve {
    /// Construct count at which the construct term reaches 1.0.
    pub construct_saturation: f64,
    /// Nesting depth at which the depth term reaches 1.0.
    pub depth_saturation:     f64,
    /// Relative weight of the construct term.
    pub construct_weight:     f64,
    /// Relative weight of the depth term.
    pub depth_weight:         f64,
}

impl Default for StructureCurve {
    fn default() -> Self {
        Self {
            construct_saturation: DEFAULT_CONSTRUCT_SATURATION,
            depth_saturation:     DEFAULT_DEPTH_SATURATION,
            construct_weight:     DEFAULT_CONSTRUCT_WEIGHT,
            depth_weight:         DEFAULT_DEPTH_WEIGHT,
        }
    }
}

/// Cut-offs used by the skill classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Loops plus conditionals must exceed this, with exception handling, for
    /// Advanced.
    pub control_flow_for_advanced:  usize,
    /// Function definitions must exceed this for Intermediate.
    pub functions_for_intermediate: usize,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            control_flow_for_advanced:  DEFAULT_CONTROL_FLOW_FOR_ADVANCED,
            functions_for_intermediate: DEFAULT_FUNCTIONS_FOR_INTERMEDIATE,
        }
    }
}

/// Thresholds deciding which structural hints are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackThresholds {
    /// Nesting deeper than this triggers a readability hint.
    pub max_readable_nesting:        usize,
    /// Submissions with at least this many significant lines are expected to
    /// contain a loop or a conditional.
    pub control_flow_expected_lines: usize,
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            max_readable_nesting:        DEFAULT_MAX_READABLE_NESTING,
            control_flow_expected_lines: DEFAULT_CONTROL_FLOW_EXPECTED_LINES,
        }
    }
}

/// The complete assessment policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    /// Total-score weights.
    pub weights:   ScoreWeights,
    /// Structure-score curve.
    pub structure: StructureCurve,
    /// Tier cut-offs.
    pub tiers:     TierThresholds,
    /// Feedback thresholds.
    pub feedback:  FeedbackThresholds,
}

impl AssessmentConfig {
    /// Parses and validates a config from a JSON string. Missing fields take
    /// their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: String::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with different total-score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Returns a copy with a different structure curve.
    pub fn with_structure(mut self, structure: StructureCurve) -> Self {
        self.structure = structure;
        self
    }

    /// Returns a copy with different tier thresholds.
    pub fn with_tiers(mut self, tiers: TierThresholds) -> Self {
        self.tiers = tiers;
        self
    }

    /// Returns a copy with different feedback thresholds.
    pub fn with_feedback(mut self, feedback: FeedbackThresholds) -> Self {
        self.feedback = feedback;
        self
    }

    /// Checks that every numeric parameter keeps scores within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        non_negative("weights.syntax", w.syntax)?;
        non_negative("weights.structure", w.structure)?;
        non_negative("weights.concept", w.concept)?;
        if w.syntax + w.structure + w.concept <= 0.0 {
            return Err(ConfigError::Invalid {
                field:  "weights",
                reason: String::from("weights must not all be zero"),
            });
        }

        let s = &self.structure;
        positive("structure.construct_saturation", s.construct_saturation)?;
        positive("structure.depth_saturation", s.depth_saturation)?;
        non_negative("structure.construct_weight", s.construct_weight)?;
        non_negative("structure.depth_weight", s.depth_weight)?;
        if s.construct_weight <= 0.0 {
            // A zero construct weight would let a construct-free submission
            // tie one with several.
            return Err(ConfigError::Invalid {
                field:  "structure.construct_weight",
                reason: String::from("must be greater than zero"),
            });
        }

        Ok(())
    }
}

/// Rejects negative or non-finite values.
fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite, non-negative number, got {value}"),
        });
    }
    Ok(())
}

/// Rejects zero, negative or non-finite values.
fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite, positive number, got {value}"),
        });
    }
    Ok(())
}
