#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Internal errors raised while parsing or analyzing a submission.

use thiserror::Error;

use crate::types::SourcePosition;

/// Internal failures of the parser, the strictness check, the structural
/// profiler or the feature detector. A submission that is simply not valid
/// Python is not one of these.
///
/// These never reach the caller of `assess_code`: the orchestrator turns
/// them into a degraded result.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A node's byte range did not map to valid UTF-8 source text.
    #[error("Cannot read source text of `{kind}` at {position}")]
    NodeText {
        /// Tree-sitter kind of the node.
        kind:     String,
        /// Where the node starts.
        position: SourcePosition,
        /// Underlying decoding error.
        source:   std::str::Utf8Error,
    },

    /// The tree contained a node the analysis cannot interpret, e.g. an error
    /// node in a tree that was reported valid.
    #[error("Unsupported `{kind}` node at {position}")]
    UnsupportedNode {
        /// Tree-sitter kind of the node.
        kind:     String,
        /// Where the node starts.
        position: SourcePosition,
    },

    /// Tree-sitter could not produce a tree at all.
    #[error("Could not build a parse tree: {0}")]
    ParseTree(#[from] anyhow::Error),
}
