#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Structural profiling: counts of definitions, control flow and nesting.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use super::{
    error::AnalysisError,
    node::{NodeKind, Visitor},
};
use crate::{config::StructureCurve, types::SourcePosition};

/// Counts of structural constructs in one submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralProfile {
    /// Function and method definitions.
    pub functions:         usize,
    /// Class definitions.
    pub classes:           usize,
    /// `for` and `while` loops.
    pub loops:             usize,
    /// `if` statements and their `elif` branches.
    pub conditionals:      usize,
    /// Deepest block nesting observed.
    pub max_nesting:       usize,
    /// `try` statements.
    pub try_blocks:        usize,
    /// Comprehensions and generator expressions.
    pub comprehensions:    usize,
    /// Import statements.
    pub imports:           usize,
    /// Decorator lines.
    pub decorators:        usize,
    /// Non-blank lines that are not comments.
    pub significant_lines: usize,
}

impl StructuralProfile {
    /// Functions, classes, loops and conditionals together.
    pub fn construct_count(&self) -> usize {
        self.functions + self.classes + self.loops + self.conditionals
    }

    /// Loops and conditionals together.
    pub fn control_flow(&self) -> usize {
        self.loops + self.conditionals
    }

    /// Maps the profile onto `[0, 1]` with a saturating curve.
    ///
    /// Both terms are non-decreasing in their input and capped at 1.0, so the
    /// score never falls when constructs are added.
    pub fn structure_score(&self, curve: &StructureCurve) -> f64 {
        let constructs = (self.construct_count() as f64 / curve.construct_saturation).min(1.0);
        let depth = (self.max_nesting as f64 / curve.depth_saturation).min(1.0);
        let total_weight = curve.construct_weight + curve.depth_weight;
        if total_weight <= 0.0 {
            return 0.0;
        }

        ((curve.construct_weight * constructs + curve.depth_weight * depth) / total_weight)
            .clamp(0.0, 1.0)
    }
}

/// Visitor that fills in a [`StructuralProfile`].
#[derive(Debug, Default)]
pub struct StructuralProfiler {
    /// The profile built so far.
    profile: StructuralProfile,
}

impl StructuralProfiler {
    /// Creates a profiler for a submission with `significant_lines` lines of
    /// code.
    pub fn new(significant_lines: usize) -> Self {
        Self {
            profile: StructuralProfile {
                significant_lines,
                ..StructuralProfile::default()
            },
        }
    }

    /// Returns the finished profile.
    pub fn finish(self) -> StructuralProfile {
        self.profile
    }
}

impl Visitor for StructuralProfiler {
    fn visit(&mut self, node: Node<'_>, kind: NodeKind, depth: usize) -> Result<(), AnalysisError> {
        let p = &mut self.profile;
        match kind {
            NodeKind::FunctionDef => p.functions += 1,
            NodeKind::ClassDef => p.classes += 1,
            NodeKind::Loop => p.loops += 1,
            NodeKind::Conditional | NodeKind::ElseIf => p.conditionals += 1,
            NodeKind::Try => p.try_blocks += 1,
            NodeKind::EagerComprehension | NodeKind::GeneratorExpression => p.comprehensions += 1,
            NodeKind::Import => p.imports += 1,
            NodeKind::Decorator => p.decorators += 1,
            NodeKind::Error => {
                return Err(AnalysisError::UnsupportedNode {
                    kind:     node.kind().to_string(),
                    position: SourcePosition::from_point(node.start_position()),
                });
            }
            NodeKind::ExceptClause
            | NodeKind::With
            | NodeKind::Yield
            | NodeKind::Lambda
            | NodeKind::DefaultParameter
            | NodeKind::Other => {}
        }
        p.max_nesting = p.max_nesting.max(depth);
        Ok(())
    }
}
