#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Feedback synthesis: an error explanation, scaffolded hints, and one
//! closing remark per tier.

use super::tier::SkillTier;
use crate::{
    config::FeedbackThresholds,
    constants::DEGRADED_FEEDBACK,
    python::{FeatureFlags, StructuralProfile, SyntaxIssue},
};

/// What the feedback synthesizer knows about a submission.
#[derive(Debug, Clone, Copy)]
pub enum FeedbackInput<'a> {
    /// The submission did not parse.
    SyntaxError(&'a SyntaxIssue),
    /// The submission parsed and was fully analyzed.
    Analyzed {
        /// Structural counts.
        profile: &'a StructuralProfile,
        /// Feature presence flags.
        flags:   &'a FeatureFlags,
        /// Classified tier.
        tier:    SkillTier,
    },
    /// The submission parsed but analysis failed.
    Degraded,
}

/// Returns the ordered, non-empty feedback for a submission.
pub fn synthesize(input: FeedbackInput<'_>, thresholds: &FeedbackThresholds) -> Vec<String> {
    match input {
        FeedbackInput::SyntaxError(issue) => vec![issue.explain()],
        FeedbackInput::Degraded => vec![DEGRADED_FEEDBACK.to_string()],
        FeedbackInput::Analyzed {
            profile,
            flags,
            tier,
        } => {
            let mut feedback = structural_hints(profile, flags, thresholds);
            feedback.push(tier_remark(tier).to_string());
            feedback
        }
    }
}

/// One hint per structural weakness, in a fixed detection order. Hints name
/// the gap but never supply the corrected code.
pub fn structural_hints(
    profile: &StructuralProfile,
    flags: &FeatureFlags,
    thresholds: &FeedbackThresholds,
) -> Vec<String> {
    let mut hints = Vec::new();

    if profile.functions == 0 {
        hints.push(String::from(
            "Your code does not define any functions yet. Which part of it does one clear job \
             that you could give a name to?",
        ));
    }

    if profile.max_nesting > thresholds.max_readable_nesting {
        hints.push(format!(
            "Some of your code is nested {} blocks deep. Could part of the innermost logic \
             become its own function, or could an early return remove a level?",
            profile.max_nesting
        ));
    }

    if profile.control_flow() == 0
        && profile.significant_lines >= thresholds.control_flow_expected_lines
    {
        hints.push(String::from(
            "This program runs every line exactly once. Is there a decision it should make, or \
             a step it repeats, that an `if` or a loop could express?",
        ));
    }

    if flags.mutable_defaults {
        hints.push(String::from(
            "One of your functions uses a list, dict or set as a default argument value. What \
             happens to that value the second time the function is called without it?",
        ));
    }

    if flags.eager_comprehensions && !flags.generators {
        hints.push(String::from(
            "You build complete collections with comprehensions. Do you always need every \
             element at once, or could a generator produce them one at a time?",
        ));
    }

    hints
}

/// The closing remark for `tier`.
pub fn tier_remark(tier: SkillTier) -> &'static str {
    match tier {
        SkillTier::Beginner => {
            "Walk through your code with a sample input, line by line. Does each step do what \
             you expect?"
        }
        SkillTier::Intermediate => {
            "What happens if someone gives your program unexpected input? Try explaining each \
             function's job to another student in one sentence."
        }
        SkillTier::Advanced => {
            "Which parts of this design would be hardest for someone else to modify, and how \
             would it behave with much larger inputs?"
        }
        SkillTier::Expert => {
            "Where else could these patterns apply? Consider which well-known design patterns \
             your solution resembles and how it would change to handle 1000x more data."
        }
    }
}
