#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Turning analysis into a judgement: tiers, feedback and the result record.

/// Feedback synthesis.
pub mod feedback;
/// The submission result record.
pub mod results;
/// Skill tiers and classification.
pub mod tier;

pub use feedback::{FeedbackInput, synthesize};
pub use results::{SubmissionResult, SummaryRow};
pub use tier::{SkillTier, classify};
