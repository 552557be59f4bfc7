#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Rejects code the tree-sitter grammar accepts but Python 3 does not.
//!
//! The grammar recovers from bad indentation silently and still understands
//! Python 2 statements, so a tree without `ERROR` nodes can still be a program
//! CPython refuses to parse. Each rule below covers one of those gaps.

use serde::{Deserialize, Serialize};
use tree_sitter::{Node, Point};

use super::{
    Parser,
    error::AnalysisError,
    node::{NodeKind, Visitor, walk},
};
use crate::types::SourcePosition;

/// Words that can never name a variable in Python 3.
const HARD_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Clauses that continue a compound statement and must line up with it.
const TRAILING_CLAUSES: [&str; 5] = [
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
];

/// A construct the grammar accepts that Python 3 rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxRule {
    /// Python 2 `print x` statement.
    PrintStatement,
    /// Python 2 `exec code` statement.
    ExecStatement,
    /// A block header followed by no statements.
    EmptyBlock,
    /// A block body that does not start to the right of its header.
    BlockNotIndented,
    /// A statement indented differently from its neighbours.
    UnexpectedIndent,
    /// `elif`, `else`, `except` or `finally` out of line with its statement.
    MisalignedClause,
    /// A keyword where a name belongs, e.g. a stray `else:`.
    KeywordAsName,
    /// An unparenthesized `:=` used as a statement.
    BareWalrus,
    /// A comma after the iterable of a comprehension or generator.
    UnparenthesizedIterable,
}

impl SyntaxRule {
    /// Short technical description.
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxRule::PrintStatement => "Python 2 print statement",
            SyntaxRule::ExecStatement => "Python 2 exec statement",
            SyntaxRule::EmptyBlock => "expected an indented block",
            SyntaxRule::BlockNotIndented => "block body is not indented",
            SyntaxRule::UnexpectedIndent => "unexpected indent",
            SyntaxRule::MisalignedClause => "clause does not match its statement's indentation",
            SyntaxRule::KeywordAsName => "keyword used as a name",
            SyntaxRule::BareWalrus => "unparenthesized `:=` statement",
            SyntaxRule::UnparenthesizedIterable => "comma after a comprehension iterable",
        }
    }

    /// What to look for, in learner-facing language.
    pub fn advice(self) -> &'static str {
        match self {
            SyntaxRule::PrintStatement => {
                "`print` is a function in Python 3, so what it prints goes inside parentheses."
            }
            SyntaxRule::ExecStatement => {
                "`exec` is a function in Python 3, so its argument goes inside parentheses."
            }
            SyntaxRule::EmptyBlock => {
                "this block has no statements. A line ending in a colon must be followed by at \
                 least one indented line."
            }
            SyntaxRule::BlockNotIndented => {
                "the body of this block is not indented. Lines inside def, class, if, for, while, \
                 try and with must start further right than the line that opens the block."
            }
            SyntaxRule::UnexpectedIndent => {
                "this line is indented differently from the lines around it. Statements in the \
                 same block must start at the same column."
            }
            SyntaxRule::MisalignedClause => {
                "an elif, else, except or finally must line up with the statement it belongs to."
            }
            SyntaxRule::KeywordAsName => {
                "a keyword appears where Python expects a name. Check for an else, elif or except \
                 with no matching if or try above it."
            }
            SyntaxRule::BareWalrus => {
                "`:=` cannot stand alone as a statement. Use `=` to assign, or wrap the \
                 expression in parentheses."
            }
            SyntaxRule::UnparenthesizedIterable => {
                "a generator or comprehension followed by a comma needs its own parentheses."
            }
        }
    }
}

/// A rule broken at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    /// The rule.
    pub rule:     SyntaxRule,
    /// Where the offending construct starts.
    pub position: SourcePosition,
}

/// Visitor that records the earliest [`Violation`] in a tree.
#[derive(Debug)]
pub struct StrictChecker<'p> {
    /// Source of the tree, needed to read identifiers.
    parser:   &'p Parser,
    /// Earliest violation seen so far.
    earliest: Option<Violation>,
}

impl<'p> StrictChecker<'p> {
    /// Creates a checker reading source text from `parser`.
    pub fn new(parser: &'p Parser) -> Self {
        Self {
            parser,
            earliest: None,
        }
    }

    /// Returns the earliest violation, if any.
    pub fn finish(self) -> Option<Violation> {
        self.earliest
    }

    /// Returns the rule `node` breaks and the node to blame for it.
    fn check<'t>(&self, node: Node<'t>) -> Result<Option<(SyntaxRule, Node<'t>)>, AnalysisError> {
        let broken = match node.kind() {
            "print_statement" => Some((SyntaxRule::PrintStatement, node)),
            "exec_statement" => Some((SyntaxRule::ExecStatement, node)),
            "identifier" => {
                let name = self.parser.text_of(node)?;
                HARD_KEYWORDS
                    .iter()
                    .any(|keyword| *keyword == name)
                    .then_some((SyntaxRule::KeywordAsName, node))
            }
            "named_expression" => node
                .parent()
                .is_some_and(|parent| parent.kind() == "expression_statement")
                .then_some((SyntaxRule::BareWalrus, node)),
            "for_in_clause" => {
                let mut cursor = node.walk();
                let has_comma = node
                    .children(&mut cursor)
                    .any(|child| !child.is_named() && child.kind() == ",");
                has_comma.then_some((SyntaxRule::UnparenthesizedIterable, node))
            }
            "module" => first_misaligned(&statements(node), None)
                .map(|statement| (SyntaxRule::UnexpectedIndent, statement)),
            "block" => node.parent().and_then(|header| check_block(node, header)),
            kind if TRAILING_CLAUSES.iter().any(|clause| *clause == kind) => {
                node.parent().and_then(|statement| {
                    let (clause, owner) = (node.start_position(), statement.start_position());
                    (clause.row > owner.row && clause.column != owner.column)
                        .then_some((SyntaxRule::MisalignedClause, node))
                })
            }
            _ => None,
        };
        Ok(broken)
    }
}

impl Visitor for StrictChecker<'_> {
    fn visit(&mut self, node: Node<'_>, _: NodeKind, _: usize) -> Result<(), AnalysisError> {
        let Some((rule, blamed)) = self.check(node)? else {
            return Ok(());
        };

        let position = SourcePosition::from_point(blamed.start_position());
        if self.earliest.is_none_or(|seen| position < seen.position) {
            self.earliest = Some(Violation { rule, position });
        }
        Ok(())
    }
}

/// Checks the body of the compound statement or clause `header`.
fn check_block<'t>(block: Node<'t>, header: Node<'t>) -> Option<(SyntaxRule, Node<'t>)> {
    let statements = statements(block);
    if statements.is_empty() {
        return Some((SyntaxRule::EmptyBlock, header));
    }

    let opened = header.start_position();
    let below = statements
        .iter()
        .find(|statement| statement.start_position().row > opened.row);
    if let Some(&first) = below {
        if first.start_position().column <= opened.column {
            return Some((SyntaxRule::BlockNotIndented, first));
        }
    }

    first_misaligned(&statements, Some(opened))
        .map(|statement| (SyntaxRule::UnexpectedIndent, statement))
}

/// Named children of `node` other than comments.
fn statements(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Returns the first statement that does not start in the same column as the
/// ones before it.
///
/// Statements sharing a line with the previous one (after `;`) and statements
/// on the header's own line are skipped. Module-level statements must start
/// in column 0.
fn first_misaligned<'t>(statements: &[Node<'t>], header: Option<Point>) -> Option<Node<'t>> {
    let mut column = header.is_none().then_some(0);
    let mut previous_end = None;

    for &statement in statements {
        let start = statement.start_position();
        let shares_line = previous_end == Some(start.row);
        previous_end = Some(statement.end_position().row);
        if shares_line || header.is_some_and(|opened| start.row <= opened.row) {
            continue;
        }
        match column {
            None => column = Some(start.column),
            Some(expected) if expected != start.column => return Some(statement),
            Some(_) => {}
        }
    }
    None
}

/// Returns the earliest violation in a tree that tree-sitter parsed without
/// errors.
pub fn first_violation(parser: &Parser) -> Result<Option<Violation>, AnalysisError> {
    let mut checker = StrictChecker::new(parser);
    walk(parser.root_node(), &mut checker)?;
    Ok(checker.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(code: &str) -> Option<SyntaxRule> {
        let parser = Parser::new(code.to_string()).expect("parse");
        assert!(!parser.has_error(), "grammar should accept {code:?}");
        first_violation(&parser)
            .expect("check")
            .map(|violation| violation.rule)
    }

    #[test]
    fn python2_statements_are_rejected() {
        assert_eq!(violation("print \"hello\""), Some(SyntaxRule::PrintStatement));
        assert_eq!(violation("print >>sys.stderr, 'x'"), Some(SyntaxRule::PrintStatement));
        assert_eq!(violation("exec \"x = 1\""), Some(SyntaxRule::ExecStatement));
        assert_eq!(violation("print(\"hello\")\nexec(code)\nprint"), None);
    }

    #[test]
    fn blocks_need_an_indented_body() {
        assert_eq!(violation("def f():\n"), Some(SyntaxRule::EmptyBlock));
        assert_eq!(violation("def f():\n    # later\n"), Some(SyntaxRule::EmptyBlock));
        assert_eq!(
            violation("for i in range(3):\nprint(i)\n"),
            Some(SyntaxRule::EmptyBlock)
        );
        assert_eq!(violation("if x: pass\nelse: pass\n"), None);
        assert_eq!(violation("def f(a,\n      b):\n    return a\n"), None);
    }

    #[test]
    fn indentation_must_match_neighbours() {
        assert_eq!(violation("x = 1\n    y = 2\n"), Some(SyntaxRule::UnexpectedIndent));
        assert_eq!(
            violation("def f(x):\n    return x\n  y = 1\n"),
            Some(SyntaxRule::UnexpectedIndent)
        );
        assert_eq!(
            violation("if x:\n        a = 1\n    b = 2\n"),
            Some(SyntaxRule::UnexpectedIndent)
        );
        assert_eq!(
            violation("if x:\n    pass\n  else:\n    pass\n"),
            Some(SyntaxRule::MisalignedClause)
        );
        assert_eq!(violation("x = 1; y = 2\nz = (1,\n  2)\n"), None);
        assert_eq!(violation("def f():\n    x = 1\n  # note\n    return x\n"), None);
    }

    #[test]
    fn stray_keywords_and_operators_are_rejected() {
        assert_eq!(violation("else:\n    pass\n"), Some(SyntaxRule::KeywordAsName));
        assert_eq!(violation("except:\n    pass\n"), Some(SyntaxRule::KeywordAsName));
        assert_eq!(violation("x := 5\n"), Some(SyntaxRule::BareWalrus));
        assert_eq!(
            violation("f(x for x in y, 1)\n"),
            Some(SyntaxRule::UnparenthesizedIterable)
        );
        assert_eq!(violation("(y := 5)\nmatch = 1\nf(x for x in y)\n"), None);
    }

    #[test]
    fn earliest_violation_wins() {
        let parser = Parser::new("print \"a\"\n  y = 1\n".to_string()).expect("parse");
        let found = first_violation(&parser).expect("check").expect("violation");
        assert_eq!(found.rule, SyntaxRule::PrintStatement);
        assert_eq!(found.position, SourcePosition { line: 1, column: 1 });
    }
}
