use serde::{Deserialize, Serialize};

/// A position inside a submission, 1-based like an editor gutter.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Serialize, Deserialize)]
pub struct SourcePosition {
    /// The line number within the submission.
    pub line:   usize,
    /// The column within that line.
    pub column: usize,
}

impl SourcePosition {
    /// Converts a tree-sitter point (0-based row and column) into a position.
    pub fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line:   point.row + 1,
            column: point.column + 1,
        }
    }
}

impl std::fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
