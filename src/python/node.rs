#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The closed set of node kinds the analyzers care about, and a typed
//! traversal over a parse tree.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use super::error::AnalysisError;

/// Every tree-sitter node is mapped to exactly one of these variants before
/// any analyzer looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// `def` (sync or async).
    FunctionDef,
    /// `class`.
    ClassDef,
    /// `for` or `while` (including `async for`).
    Loop,
    /// An `if` statement.
    Conditional,
    /// An `elif` clause of an `if` statement.
    ElseIf,
    /// A `try` statement.
    Try,
    /// An `except` or `except*` clause.
    ExceptClause,
    /// A `with` statement.
    With,
    /// A single `@decorator` line.
    Decorator,
    /// A list, dict or set comprehension.
    EagerComprehension,
    /// A generator expression.
    GeneratorExpression,
    /// A `yield` or `yield from` expression.
    Yield,
    /// A `lambda` expression.
    Lambda,
    /// Any form of import statement.
    Import,
    /// A parameter with a default value, typed or not.
    DefaultParameter,
    /// A node tree-sitter produced while recovering from a syntax error.
    Error,
    /// Everything else.
    Other,
}

impl NodeKind {
    /// Maps a tree-sitter node onto its variant.
    pub fn of(node: Node<'_>) -> Self {
        if node.is_error() || node.is_missing() {
            return NodeKind::Error;
        }
        // Keywords such as `lambda` and `yield` share their kind string with
        // the expression node, so anonymous nodes are never constructs.
        if !node.is_named() {
            return NodeKind::Other;
        }
        match node.kind() {
            "function_definition" => NodeKind::FunctionDef,
            "class_definition" => NodeKind::ClassDef,
            "for_statement" | "while_statement" => NodeKind::Loop,
            "if_statement" => NodeKind::Conditional,
            "elif_clause" => NodeKind::ElseIf,
            "try_statement" => NodeKind::Try,
            "except_clause" | "except_group_clause" => NodeKind::ExceptClause,
            "with_statement" => NodeKind::With,
            "decorator" => NodeKind::Decorator,
            "list_comprehension" | "dictionary_comprehension" | "set_comprehension" => {
                NodeKind::EagerComprehension
            }
            "generator_expression" => NodeKind::GeneratorExpression,
            "yield" => NodeKind::Yield,
            "lambda" => NodeKind::Lambda,
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                NodeKind::Import
            }
            "default_parameter" | "typed_default_parameter" => NodeKind::DefaultParameter,
            _ => NodeKind::Other,
        }
    }

    /// Returns true for constructs that open an indented block and so add a
    /// level of nesting.
    pub fn opens_block(self) -> bool {
        matches!(
            self,
            NodeKind::FunctionDef
                | NodeKind::ClassDef
                | NodeKind::Loop
                | NodeKind::Conditional
                | NodeKind::Try
                | NodeKind::With
        )
    }
}

/// Receives every node of a tree together with its kind and nesting depth.
pub trait Visitor {
    /// Called once per node, parents before children.
    ///
    /// * `node`: the tree-sitter node
    /// * `kind`: its variant in the closed kind set
    /// * `depth`: number of block constructs enclosing or equal to `node`
    fn visit(&mut self, node: Node<'_>, kind: NodeKind, depth: usize) -> Result<(), AnalysisError>;
}

impl<A: Visitor, B: Visitor> Visitor for (A, B) {
    fn visit(&mut self, node: Node<'_>, kind: NodeKind, depth: usize) -> Result<(), AnalysisError> {
        self.0.visit(node, kind, depth)?;
        self.1.visit(node, kind, depth)
    }
}

/// Walks the tree rooted at `root` in document order without recursion, so
/// deeply nested submissions cannot exhaust the stack.
pub fn walk<V: Visitor>(root: Node<'_>, visitor: &mut V) -> Result<(), AnalysisError> {
    let mut cursor = root.walk();
    // Depth of the node enclosing the cursor's current level.
    let mut enclosing = vec![0usize];

    loop {
        let node = cursor.node();
        let kind = NodeKind::of(node);
        let outer = enclosing.last().copied().unwrap_or_default();
        let depth = if kind.opens_block() { outer + 1 } else { outer };

        visitor.visit(node, kind, depth)?;

        if cursor.goto_first_child() {
            enclosing.push(depth);
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(());
            }
            enclosing.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::python::Parser;

    /// Records `(kind, depth)` for every construct.
    #[derive(Default)]
    struct Recorder(Vec<(NodeKind, usize)>);

    impl Visitor for Recorder {
        fn visit(&mut self, _: Node<'_>, kind: NodeKind, depth: usize) -> Result<(), AnalysisError> {
            if kind != NodeKind::Other {
                self.0.push((kind, depth));
            }
            Ok(())
        }
    }

    fn record(code: &str) -> Vec<(NodeKind, usize)> {
        let parser = Parser::new(code.to_string()).expect("parse");
        let mut recorder = Recorder::default();
        walk(parser.root_node(), &mut recorder).expect("walk");
        recorder.0
    }

    #[test]
    fn nesting_depth_counts_enclosing_blocks() {
        let seen = record("def f(xs):\n    for x in xs:\n        if x:\n            pass\n");
        assert_eq!(
            seen,
            vec![(NodeKind::FunctionDef, 1), (NodeKind::Loop, 2), (NodeKind::Conditional, 3)]
        );
    }

    #[test]
    fn elif_does_not_add_depth() {
        let seen = record("if a:\n    pass\nelif b:\n    if c:\n        pass\n");
        assert_eq!(
            seen,
            vec![(NodeKind::Conditional, 1), (NodeKind::ElseIf, 1), (NodeKind::Conditional, 2)]
        );
    }

    #[test]
    fn keywords_are_not_constructs() {
        let seen = record("f = lambda: (yield)\n");
        assert_eq!(seen, vec![(NodeKind::Lambda, 0), (NodeKind::Yield, 0)]);
    }
}
