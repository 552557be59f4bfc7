#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Default weight of the syntax sub-score in the total score.
pub const DEFAULT_SYNTAX_WEIGHT: f64 = 1.0 / 3.0;

/// Default weight of the structure sub-score in the total score.
pub const DEFAULT_STRUCTURE_WEIGHT: f64 = 1.0 / 3.0;

/// Default weight of the concept sub-score in the total score.
pub const DEFAULT_CONCEPT_WEIGHT: f64 = 1.0 / 3.0;

/// Construct count at which the construct half of the structure score
/// saturates.
pub const DEFAULT_CONSTRUCT_SATURATION: f64 = 8.0;

/// Nesting depth at which the depth half of the structure score saturates.
pub const DEFAULT_DEPTH_SATURATION: f64 = 4.0;

/// Share of the structure score driven by construct count.
pub const DEFAULT_CONSTRUCT_WEIGHT: f64 = 0.8;

/// Share of the structure score driven by nesting depth.
pub const DEFAULT_DEPTH_WEIGHT: f64 = 0.2;

/// Loops plus conditionals must exceed this (alongside exception handling)
/// for the Advanced tier.
pub const DEFAULT_CONTROL_FLOW_FOR_ADVANCED: usize = 2;

/// Function definitions must exceed this for the Intermediate tier.
pub const DEFAULT_FUNCTIONS_FOR_INTERMEDIATE: usize = 1;

/// Deepest block nesting that still reads comfortably.
pub const DEFAULT_MAX_READABLE_NESTING: usize = 3;

/// Significant lines after which a submission is expected to branch or loop.
pub const DEFAULT_CONTROL_FLOW_EXPECTED_LINES: usize = 6;

/// Environment variable naming a JSON policy file for the CLI.
pub const CONFIG_ENV_VAR: &str = "SKILLCHECK_CONFIG";

/// Feedback emitted when analysis fails after a successful parse.
pub const DEGRADED_FEEDBACK: &str = "Your code parses correctly, but it could not be analyzed \
                                     in detail. Ask your instructor to take a look at this \
                                     submission.";
