#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Skill classification.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::TierThresholds,
    python::{FeatureFlags, StructuralProfile},
};

/// Ordered skill tiers, lowest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum SkillTier {
    /// Straight-line code, at most one function.
    #[default]
    Beginner,
    /// Uses control flow or several functions.
    Intermediate,
    /// Organizes code in classes, or guards substantial control flow with
    /// exception handling.
    Advanced,
    /// Combines classes, decorators and exception handling.
    Expert,
}

impl SkillTier {
    /// All tiers in ascending order.
    pub const ALL: [SkillTier; 4] = [
        SkillTier::Beginner,
        SkillTier::Intermediate,
        SkillTier::Advanced,
        SkillTier::Expert,
    ];

    /// The tier's fixed concept score.
    pub fn concept_score(self) -> f64 {
        match self {
            SkillTier::Beginner => 0.25,
            SkillTier::Intermediate => 0.50,
            SkillTier::Advanced => 0.75,
            SkillTier::Expert => 1.00,
        }
    }

    /// Returns the string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SkillTier::Beginner => "Beginner",
            SkillTier::Intermediate => "Intermediate",
            SkillTier::Advanced => "Advanced",
            SkillTier::Expert => "Expert",
        }
    }
}

impl Display for SkillTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Picks the highest tier whose condition holds, checking Expert first.
pub fn classify(
    profile: &StructuralProfile,
    flags: &FeatureFlags,
    thresholds: &TierThresholds,
) -> SkillTier {
    let tier = if flags.decorators && flags.exception_handling && flags.classes {
        SkillTier::Expert
    } else if flags.classes
        || (flags.exception_handling
            && profile.control_flow() > thresholds.control_flow_for_advanced)
    {
        SkillTier::Advanced
    } else if profile.control_flow() > 0
        || profile.functions > thresholds.functions_for_intermediate
    {
        SkillTier::Intermediate
    } else {
        SkillTier::Beginner
    };

    debug!(%tier, features = ?flags.present(), "classified submission");
    tier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(classes: bool, exceptions: bool, decorators: bool) -> FeatureFlags {
        FeatureFlags {
            classes,
            exception_handling: exceptions,
            decorators,
            ..FeatureFlags::default()
        }
    }

    fn profile(functions: usize, loops: usize, conditionals: usize) -> StructuralProfile {
        StructuralProfile {
            functions,
            loops,
            conditionals,
            ..StructuralProfile::default()
        }
    }

    #[test]
    fn tiers_are_totally_ordered() {
        assert!(SkillTier::ALL.windows(2).all(|w| w[0] < w[1]));
        assert!(
            SkillTier::ALL
                .windows(2)
                .all(|w| w[0].concept_score() < w[1].concept_score())
        );
    }

    #[test]
    fn decision_table() {
        let t = TierThresholds::default();
        let cases = [
            (profile(0, 0, 0), flags(false, false, false), SkillTier::Beginner),
            (profile(1, 0, 0), flags(false, false, false), SkillTier::Beginner),
            (profile(2, 0, 0), flags(false, false, false), SkillTier::Intermediate),
            (profile(0, 1, 0), flags(false, false, false), SkillTier::Intermediate),
            (profile(0, 0, 1), flags(false, true, false), SkillTier::Intermediate),
            // exceptions with exactly the threshold of control flow is not enough
            (profile(0, 1, 1), flags(false, true, false), SkillTier::Intermediate),
            (profile(0, 2, 1), flags(false, true, false), SkillTier::Advanced),
            (profile(0, 0, 0), flags(true, false, false), SkillTier::Advanced),
            (profile(0, 0, 0), flags(true, true, false), SkillTier::Advanced),
            (profile(0, 0, 0), flags(false, true, true), SkillTier::Beginner),
            (profile(0, 0, 0), flags(true, true, true), SkillTier::Expert),
        ];

        for (p, f, expected) in cases {
            assert_eq!(classify(&p, &f, &t), expected, "profile {p:?}, flags {f:?}");
        }
    }

    #[test]
    fn expert_wins_over_advanced() {
        // Satisfies both Advanced clauses and the Expert condition.
        let tier = classify(
            &profile(3, 4, 4),
            &flags(true, true, true),
            &TierThresholds::default(),
        );
        assert_eq!(tier, SkillTier::Expert);
    }

    #[test]
    fn thresholds_are_overridable() {
        let strict = TierThresholds {
            control_flow_for_advanced:  10,
            functions_for_intermediate: 3,
        };
        assert_eq!(
            classify(&profile(0, 2, 1), &flags(false, true, false), &strict),
            SkillTier::Intermediate
        );
        assert_eq!(
            classify(&profile(3, 0, 0), &flags(false, false, false), &strict),
            SkillTier::Beginner
        );
    }
}
