#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Analysis of Python submissions: parsing, syntax validation, structural
//! profiling and feature detection.

/// Internal analysis errors.
pub mod error;
/// Presence flags for skill-relevant language features.
pub mod features;
/// The closed node-kind set and the typed tree walk.
pub mod node;
/// Tree-sitter parser wrapper.
pub mod parser;
/// Structural profile and structure score.
pub mod profile;
/// Python 3 rules the grammar does not enforce.
pub mod strict;
/// Syntax validation.
pub mod syntax;

pub use error::AnalysisError;
pub use features::{FeatureDetector, FeatureFlags};
pub use node::{NodeKind, Visitor, walk};
pub use parser::Parser;
pub use profile::{StructuralProfile, StructuralProfiler};
pub use strict::{StrictChecker, SyntaxRule, Violation};
pub use syntax::{SyntaxIssue, SyntaxOutcome, validate};

/// Profiles a parsed submission and detects its features in a single pass.
pub fn analyze(parser: &Parser) -> Result<(StructuralProfile, FeatureFlags), AnalysisError> {
    let mut visitors = (
        StructuralProfiler::new(parser.significant_lines()),
        FeatureDetector::new(parser),
    );
    walk(parser.root_node(), &mut visitors)?;

    let (profiler, detector) = visitors;
    Ok((profiler.finish(), detector.finish()))
}
