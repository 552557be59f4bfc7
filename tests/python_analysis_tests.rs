//! Tests for parsing, syntax validation and structural profiling.

use skillcheck::python::{
    AnalysisError, FeatureFlags, Parser, StructuralProfile, StructuralProfiler, SyntaxOutcome,
    SyntaxRule, analyze, validate, walk,
};
use skillcheck::types::SourcePosition;

fn analyzed(code: &str) -> (StructuralProfile, FeatureFlags) {
    let parser = Parser::new(code.to_string()).expect("parse");
    assert!(!parser.has_error(), "fixture should be valid: {code}");
    analyze(&parser).expect("analyze")
}

#[test]
fn parser_creates_successfully() {
    let code = r#"
def hello():
    print("Hello, World!")
"#;
    let parser = Parser::new(code.to_string()).expect("parse");
    assert!(!parser.has_error());
    assert!(parser.first_error().is_none());
    assert_eq!(parser.root_node().kind(), "module");
}

#[test]
fn parser_locates_first_error() {
    let parser = Parser::new("x = 1\ny = (2,\n".to_string()).expect("parse");
    assert!(parser.has_error());
    let node = parser.first_error().expect("error node");
    assert!(node.is_error() || node.is_missing());
}

#[test]
fn validate_reports_position_of_failure() {
    match validate("def f(x)\n    return x").expect("validate") {
        SyntaxOutcome::Invalid(issue) => {
            let position = issue.position.expect("position");
            assert_eq!(position.line, 1);
            assert!(issue.explain().contains("line 1"));
        }
        SyntaxOutcome::Valid(_) => panic!("missing colon should not parse"),
    }
}

#[test]
fn validate_strips_surrounding_whitespace() {
    let outcome = validate("\n\n    \ndef f():\n    return 1\n\n").expect("validate");
    assert_eq!(outcome.syntax_score(), 1.0);
}

#[test]
fn counts_match_the_calculator_example() {
    let code = r#"
class Calculator:
    def add(self, a, b):
        return a + b

    def process_list(self, numbers):
        result = []
        for num in numbers:
            if num > 0:
                result.append(num * 2)
        return result

calc = Calculator()
try:
    result = calc.process_list([1, -2, 3, 4])
except Exception as e:
    print(f"Error: {e}")
"#;
    let (profile, flags) = analyzed(code);

    assert_eq!(profile.classes, 1);
    assert_eq!(profile.functions, 2);
    assert_eq!(profile.loops, 1);
    assert_eq!(profile.conditionals, 1);
    assert_eq!(profile.try_blocks, 1);
    assert_eq!(profile.max_nesting, 4);
    assert!(flags.classes);
    assert!(flags.exception_handling);
    assert!(!flags.decorators);
}

#[test]
fn async_and_while_loops_are_loops() {
    let code = "async def pump(q):\n    async for item in q:\n        print(item)\n    while q:\n        \
                break\n";
    let (profile, _) = analyzed(code);
    assert_eq!(profile.functions, 1);
    assert_eq!(profile.loops, 2);
}

#[test]
fn comprehensions_and_generators_are_distinguished() {
    let (_, eager) = analyzed("squares = [x * x for x in range(10)]\n");
    assert!(eager.eager_comprehensions);
    assert!(!eager.generators);

    let (_, lazy) = analyzed("total = sum(x * x for x in range(10))\n");
    assert!(lazy.generators);
    assert!(!lazy.eager_comprehensions);

    let (profile, yields) =
        analyzed("def count(n):\n    i = 0\n    while i < n:\n        yield i\n        i += 1\n");
    assert!(yields.generators);
    assert_eq!(profile.comprehensions, 0);
}

#[test]
fn mutable_defaults_are_detected() {
    let flagged = [
        "def f(items=[]):\n    return items\n",
        "def f(lookup={}):\n    return lookup\n",
        "def f(seen: set = set()):\n    return seen\n",
        "def f(buf=list()):\n    return buf\n",
    ];
    for code in flagged {
        let (_, flags) = analyzed(code);
        assert!(flags.mutable_defaults, "{code:?}");
    }

    let clean = [
        "def f(items=None):\n    return items or []\n",
        "def f(limit=5, name='x'):\n    return limit\n",
        "def f(pair=(1, 2)):\n    return pair\n",
    ];
    for code in clean {
        let (_, flags) = analyzed(code);
        assert!(!flags.mutable_defaults, "{code:?}");
    }
}

#[test]
fn decorators_imports_and_context_managers() {
    let code = r#"
from functools import lru_cache
import os

@lru_cache(maxsize=None)
def read(path):
    with open(os.path.join("data", path)) as fh:
        return fh.read()

key = lambda item: item[1]
"#;
    let (profile, flags) = analyzed(code);

    assert_eq!(profile.imports, 2);
    assert_eq!(profile.decorators, 1);
    assert!(flags.decorators);
    assert!(flags.imports);
    assert!(flags.context_managers);
    assert!(flags.lambdas);
    assert_eq!(flags.present().len(), 4);
}

#[test]
fn significant_lines_skip_blanks_and_comments() {
    let parser = Parser::new("# header\n\nx = 1\n   # indented comment\ny = 2\n".to_string())
        .expect("parse");
    assert_eq!(parser.significant_lines(), 2);
    assert_eq!(parser.line_count(), 5);
}

#[test]
fn profiler_rejects_error_nodes() {
    let parser = Parser::new("def f(:\n    pass\n".to_string()).expect("parse");
    let mut profiler = StructuralProfiler::new(parser.significant_lines());

    let err = walk(parser.root_node(), &mut profiler).expect_err("error node should stop walk");
    assert!(matches!(err, AnalysisError::UnsupportedNode { .. }));
}

fn rule_of(code: &str) -> Option<SyntaxRule> {
    match validate(code).expect("validate") {
        SyntaxOutcome::Invalid(issue) => issue.rule,
        SyntaxOutcome::Valid(_) => panic!("{code:?} should be rejected"),
    }
}

#[test]
fn grammar_leniencies_are_rejected() {
    assert_eq!(rule_of("print \"hello\""), Some(SyntaxRule::PrintStatement));
    assert_eq!(rule_of("exec \"x = 1\""), Some(SyntaxRule::ExecStatement));
    assert_eq!(rule_of("def f():\n"), Some(SyntaxRule::EmptyBlock));
    assert_eq!(rule_of("for i in range(3):\nprint(i)\n"), Some(SyntaxRule::EmptyBlock));
    assert_eq!(rule_of("x = 1\n    y = 2\n"), Some(SyntaxRule::UnexpectedIndent));
    assert_eq!(
        rule_of("def f(x):\n    return x\n  y = 1\n"),
        Some(SyntaxRule::UnexpectedIndent)
    );
    assert_eq!(rule_of("else:\n    pass\n"), Some(SyntaxRule::KeywordAsName));
    assert_eq!(rule_of("x := 5\n"), Some(SyntaxRule::BareWalrus));
    assert_eq!(rule_of("f(x for x in y, 1)\n"), Some(SyntaxRule::UnparenthesizedIterable));
}

#[test]
fn grammar_errors_carry_no_rule() {
    assert_eq!(rule_of("while True\n    pass"), None);
    assert_eq!(rule_of("x = [1, 2,, 3]"), None);
}

#[test]
fn rule_violations_are_located_and_explained() {
    match validate("def f(x):\n    return x\n  y = 1\n").expect("validate") {
        SyntaxOutcome::Invalid(issue) => {
            assert_eq!(issue.position, Some(SourcePosition { line: 3, column: 3 }));
            let message = issue.explain();
            assert!(message.starts_with("Syntax error near line 3, column 3"), "{message}");
            assert!(message.contains("indented differently"), "{message}");
        }
        SyntaxOutcome::Valid(_) => panic!("misaligned dedent should not parse"),
    }
}

#[test]
fn python3_forms_stay_valid() {
    let valid = [
        "print(\"hello\")\nexec(code)\n",
        "if x: pass\nelse: pass\n",
        "(y := 5)\n",
        "total = sum(x for x in range(3))\n",
        "match = 1\ntype = 2\n",
        "match command:\n    case \"go\":\n        pass\n    case _:\n        pass\n",
        "def f():\n    x = 1\n  # note\n    return x\n",
    ];
    for code in valid {
        assert_eq!(validate(code).expect("validate").syntax_score(), 1.0, "{code:?}");
    }
}
