//! Rust patterns.

use crate::catalog::{CommentForm, PatternSpec};
use crate::language::Language;

const FUNCTIONS: &str = r"fn\s+(\w+)\s*\([^)]*\)";
const VARIABLES: &str = r"let\s+(?:mut\s+)?(\w+)";
const LOOPS: &str = r"for\s+\w+\s+in\s+|while\s+|loop\s*\{";
const CONDITIONALS: &str = r"if\s+|match\s+";
const TYPES: &str = r"struct\s+(\w+)";
const IMPORTS: &str = r"use\s+([\w:]+)";
const SEQUENCES: &str = r"Vec\s*<\s*\w+\s*>";

/// Doc comments are line comments too.
static COMMENTS: &[(CommentForm, &str, &str)] = &[
    (CommentForm::Line, r"//.*", ""),
    (CommentForm::Block, r"/\*.*?\*/", ""),
];

static CONTAINERS: &[(&str, &str)] = &[
    ("Vec", r"Vec\s*<\s*\w+\s*>"),
    ("HashMap", r"HashMap\s*<\s*\w+\s*,\s*\w+\s*>"),
    ("BTreeMap", r"BTreeMap\s*<\s*\w+\s*,\s*\w+\s*>"),
];

pub fn spec() -> PatternSpec {
    PatternSpec {
        language: Language::Rust,
        functions: FUNCTIONS,
        variables: VARIABLES,
        loops: LOOPS,
        conditionals: CONDITIONALS,
        types: TYPES,
        imports: IMPORTS,
        sequences: Some(SEQUENCES),
        comments: COMMENTS,
        containers: CONTAINERS,
    }
}
