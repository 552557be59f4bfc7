#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Tree-sitter parser wrapper for Python source code.

use std::fmt::Formatter;

use anyhow::{Context, Result, anyhow};
use tree_sitter::{Language, Node, Tree};

use super::error::AnalysisError;
use crate::types::SourcePosition;

/// A struct that wraps a parse tree and the source code it was built from.
#[derive(Clone)]
pub struct Parser {
    /// The source code being parsed.
    code: String,
    /// The parse tree.
    tree: Tree,
}

/// Returns the compiled tree-sitter Python language.
fn python_language() -> Language {
    tree_sitter_python::LANGUAGE.into()
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("lines", &self.line_count())
            .field("has_error", &self.has_error())
            .finish()
    }
}

impl Parser {
    /// Parses `source_code` with a parser created for this call only.
    ///
    /// * `source_code`: the source code to be parsed
    pub fn new(source_code: String) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        let language = python_language();

        parser
            .set_language(&language)
            .with_context(|| "Failed to load Python grammar")?;
        let tree = parser
            .parse(source_code.as_str(), None)
            .ok_or_else(|| anyhow!("Error parsing Python code"))?;

        Ok(Self {
            code: source_code,
            tree,
        })
    }

    /// Returns the parse tree's root node.
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Returns true if tree-sitter had to recover from an error anywhere.
    pub fn has_error(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Returns the first `ERROR` or `MISSING` node in document order.
    pub fn first_error(&self) -> Option<Node<'_>> {
        let root = self.tree.root_node();
        if !root.has_error() {
            return None;
        }

        let mut cursor = root.walk();
        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                return Some(node);
            }
            // Only descend into subtrees that contain the error.
            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return None;
                }
            }
        }
    }

    /// Returns the source text covered by `node`.
    pub fn text_of(&self, node: Node<'_>) -> Result<&str, AnalysisError> {
        node.utf8_text(self.code.as_bytes())
            .map_err(|source| AnalysisError::NodeText {
                kind: node.kind().to_string(),
                position: SourcePosition::from_point(node.start_position()),
                source,
            })
    }

    /// Returns the number of non-blank lines that are not comments.
    pub fn significant_lines(&self) -> usize {
        self.code
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .count()
    }

    /// Returns the total number of lines in the source code.
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}
