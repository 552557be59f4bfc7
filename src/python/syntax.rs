#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Syntax validation. Invalid Python is an expected outcome and is returned
//! as data; only internal parser failures are errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    Parser,
    error::AnalysisError,
    strict::{self, SyntaxRule},
};
use crate::types::SourcePosition;

/// Where and why a submission failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxIssue {
    /// Technical description of the failure.
    pub message:  String,
    /// Location of the first problem, when known.
    pub position: Option<SourcePosition>,
    /// The token the grammar expected but did not find, if any.
    pub expected: Option<String>,
    /// The Python 3 rule broken by code the grammar itself accepted.
    pub rule:     Option<SyntaxRule>,
}

impl SyntaxIssue {
    /// Describes the issue in learner-facing language.
    pub fn explain(&self) -> String {
        let place = self
            .position
            .map(|p| format!(" near {p}"))
            .unwrap_or_default();

        if let Some(rule) = self.rule {
            return format!("Syntax error{place}: {}", rule.advice());
        }

        match self.expected.as_deref() {
            Some(":") => format!(
                "Syntax error{place}: a colon `:` seems to be missing. Lines that open a block \
                 (def, class, if, for, while, try, with) must end with a colon."
            ),
            Some(token) => format!(
                "Syntax error{place}: Python expected `{token}` here but could not find it. \
                 Check that brackets, quotes and colons are balanced."
            ),
            None => format!(
                "Syntax error{place}: Python could not understand the code starting here. Look \
                 for missing colons, unbalanced brackets or quotes, inconsistent indentation, or \
                 misspelled keywords."
            ),
        }
    }
}

/// Result of validating a submission.
#[derive(Debug)]
pub enum SyntaxOutcome {
    /// The submission parsed; the tree is ready for analysis.
    Valid(Parser),
    /// The submission did not parse.
    Invalid(SyntaxIssue),
}

impl SyntaxOutcome {
    /// 1.0 for valid submissions, 0.0 otherwise.
    pub fn syntax_score(&self) -> f64 {
        match self {
            SyntaxOutcome::Valid(_) => 1.0,
            SyntaxOutcome::Invalid(_) => 0.0,
        }
    }
}

/// Parses `code` and reports whether it is valid Python 3.
///
/// Fails only when no parse tree could be built or read, which says nothing
/// about the submission itself.
pub fn validate(code: &str) -> Result<SyntaxOutcome, AnalysisError> {
    let parser = Parser::new(code.trim().to_string())?;

    let issue = if parser.has_error() {
        grammar_issue(&parser)
    } else {
        let violation = strict::first_violation(&parser)?;
        match violation {
            None => return Ok(SyntaxOutcome::Valid(parser)),
            Some(violation) => SyntaxIssue {
                message:  violation.rule.describe().to_string(),
                position: Some(violation.position),
                expected: None,
                rule:     Some(violation.rule),
            },
        }
    };

    debug!(message = %issue.message, position = ?issue.position, "submission failed to parse");
    Ok(SyntaxOutcome::Invalid(issue))
}

/// Describes the first `ERROR` or `MISSING` node of a tree.
fn grammar_issue(parser: &Parser) -> SyntaxIssue {
    match parser.first_error() {
        None => SyntaxIssue {
            message:  String::from("the parser reported an error it could not locate"),
            position: None,
            expected: None,
            rule:     None,
        },
        Some(node) if node.is_missing() => SyntaxIssue {
            message:  format!("missing `{}`", node.kind()),
            position: Some(SourcePosition::from_point(node.start_position())),
            expected: Some(node.kind().to_string()),
            rule:     None,
        },
        Some(node) => SyntaxIssue {
            message:  String::from("unexpected input"),
            position: Some(SourcePosition::from_point(node.start_position())),
            expected: None,
            rule:     None,
        },
    }
}
