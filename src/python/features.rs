#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Presence flags for language features that signal skill, or a known
//! pitfall.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use super::{
    Parser,
    error::AnalysisError,
    node::{NodeKind, Visitor},
};

/// Builtins whose call as a default value creates a shared mutable object.
const MUTABLE_FACTORIES: [&str; 4] = ["list", "dict", "set", "bytearray"];

/// Which language features a submission uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Generator expressions or `yield`.
    pub generators:           bool,
    /// List, dict or set comprehensions.
    pub eager_comprehensions: bool,
    /// A `try` statement.
    pub exception_handling:   bool,
    /// Decorator syntax.
    pub decorators:           bool,
    /// Class-based organization.
    pub classes:              bool,
    /// A default argument evaluated once into a mutable object.
    pub mutable_defaults:     bool,
    /// A `with` statement.
    pub context_managers:     bool,
    /// A `lambda` expression.
    pub lambdas:              bool,
    /// Any import.
    pub imports:              bool,
}

impl FeatureFlags {
    /// Names of the flags that are set, for logging and display.
    pub fn present(&self) -> Vec<&'static str> {
        [
            (self.generators, "generators"),
            (self.eager_comprehensions, "comprehensions"),
            (self.exception_handling, "exceptions"),
            (self.decorators, "decorators"),
            (self.classes, "classes"),
            (self.mutable_defaults, "mutable-defaults"),
            (self.context_managers, "context-managers"),
            (self.lambdas, "lambdas"),
            (self.imports, "imports"),
        ]
        .into_iter()
        .filter_map(|(set, name)| set.then_some(name))
        .collect()
    }
}

/// Visitor that sets [`FeatureFlags`].
#[derive(Debug)]
pub struct FeatureDetector<'p> {
    /// Source of the tree, needed to read callee names.
    parser: &'p Parser,
    /// Flags set so far.
    flags:  FeatureFlags,
}

impl<'p> FeatureDetector<'p> {
    /// Creates a detector reading source text from `parser`.
    pub fn new(parser: &'p Parser) -> Self {
        Self {
            parser,
            flags: FeatureFlags::default(),
        }
    }

    /// Returns the collected flags.
    pub fn finish(self) -> FeatureFlags {
        self.flags
    }

    /// Returns true if a default parameter's value is a mutable literal or a
    /// call to a mutable builtin.
    fn is_mutable_default(&self, param: Node<'_>) -> Result<bool, AnalysisError> {
        let Some(value) = param.child_by_field_name("value") else {
            return Ok(false);
        };

        match value.kind() {
            "list" | "dictionary" | "set" | "list_comprehension" | "dictionary_comprehension"
            | "set_comprehension" => Ok(true),
            "call" => {
                let Some(function) = value.child_by_field_name("function") else {
                    return Ok(false);
                };
                if function.kind() != "identifier" {
                    return Ok(false);
                }
                let name = self.parser.text_of(function)?;
                Ok(MUTABLE_FACTORIES.iter().any(|factory| *factory == name))
            }
            _ => Ok(false),
        }
    }
}

impl Visitor for FeatureDetector<'_> {
    fn visit(&mut self, node: Node<'_>, kind: NodeKind, _: usize) -> Result<(), AnalysisError> {
        match kind {
            NodeKind::GeneratorExpression | NodeKind::Yield => self.flags.generators = true,
            NodeKind::EagerComprehension => self.flags.eager_comprehensions = true,
            NodeKind::Try => self.flags.exception_handling = true,
            NodeKind::Decorator => self.flags.decorators = true,
            NodeKind::ClassDef => self.flags.classes = true,
            NodeKind::With => self.flags.context_managers = true,
            NodeKind::Lambda => self.flags.lambdas = true,
            NodeKind::Import => self.flags.imports = true,
            NodeKind::DefaultParameter => {
                if self.is_mutable_default(node)? {
                    self.flags.mutable_defaults = true;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
