//! C patterns. Same signature shapes as C++, with structs instead of
//! classes and no named containers.

use crate::catalog::{CommentForm, PatternSpec};
use crate::language::Language;

const FUNCTIONS: &str = r"(\w+\s+)?(\w+)\s*\([^)]*\)\s*\{";
const VARIABLES: &str = r"(\w+)\s+(\w+)\s*[;=]";
const LOOPS: &str = r"for\s*\([^)]*\)|while\s*\([^)]*\)";
const CONDITIONALS: &str = r"if\s*\([^)]*\)";
const TYPES: &str = r"struct\s+(\w+)";
const IMPORTS: &str = r#"#include\s*[<"]([^>"]+)[>"]"#;
const SEQUENCES: &str = r"(\w+)\s+(\w+)\s*\[\s*\d*\s*\]";

static COMMENTS: &[(CommentForm, &str, &str)] = &[
    (CommentForm::Line, r"//.*", ""),
    (CommentForm::Block, r"/\*.*?\*/", ""),
];

pub fn spec() -> PatternSpec {
    PatternSpec {
        language: Language::C,
        functions: FUNCTIONS,
        variables: VARIABLES,
        loops: LOOPS,
        conditionals: CONDITIONALS,
        types: TYPES,
        imports: IMPORTS,
        sequences: Some(SEQUENCES),
        comments: COMMENTS,
        containers: &[],
    }
}
