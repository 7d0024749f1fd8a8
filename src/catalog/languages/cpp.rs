//! C++ patterns.

use crate::catalog::{CommentForm, PatternSpec};
use crate::language::Language;

/// Optional return type, then the function name, then a parameter list
/// and an opening brace on the same line.
const FUNCTIONS: &str = r"(\w+\s+)?(\w+)\s*\([^)]*\)\s*\{";

const VARIABLES: &str = r"(\w+)\s+(\w+)\s*[;=]";

const LOOPS: &str = r"for\s*\([^)]*\)|while\s*\([^)]*\)";

const CONDITIONALS: &str = r"if\s*\([^)]*\)";

const TYPES: &str = r"class\s+(\w+)";

const IMPORTS: &str = r#"#include\s*[<"]([^>"]+)[>"]"#;

const SEQUENCES: &str = r"(\w+)\s+(\w+)\s*\[\s*\d*\s*\]";

static COMMENTS: &[(CommentForm, &str, &str)] = &[
    (CommentForm::Line, r"//.*", ""),
    (CommentForm::Block, r"/\*.*?\*/", ""),
];

static CONTAINERS: &[(&str, &str)] = &[
    ("vector", r"vector\s*<\s*\w+\s*>"),
    ("stack", r"stack\s*<\s*\w+\s*>"),
    ("queue", r"queue\s*<\s*\w+\s*>"),
    ("map", r"map\s*<\s*\w+\s*,\s*\w+\s*>"),
    ("set", r"set\s*<\s*\w+\s*>"),
];

pub fn spec() -> PatternSpec {
    PatternSpec {
        language: Language::Cpp,
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
