//! Java patterns.

use crate::catalog::{CommentForm, PatternSpec};
use crate::language::Language;

const FUNCTIONS: &str =
    r"(?:public|private|protected)?\s*(?:static)?\s*\w+\s+(\w+)\s*\([^)]*\)\s*\{";

const VARIABLES: &str =
    r"(?:public|private|protected)?\s*(?:static|final)?\s*\w+\s+(\w+)\s*[;=]";

const LOOPS: &str = r"for\s*\([^)]*\)|while\s*\([^)]*\)";
const CONDITIONALS: &str = r"if\s*\([^)]*\)";
const TYPES: &str = r"(?:public|private)?\s*class\s+(\w+)";
const IMPORTS: &str = r"import\s+([\w.]+)";
const SEQUENCES: &str = r"(\w+)\s*\[\s*\]\s*(\w+)";

static COMMENTS: &[(CommentForm, &str, &str)] = &[
    (CommentForm::Line, r"//.*", ""),
    (CommentForm::Block, r"/\*.*?\*/", ""),
];

static CONTAINERS: &[(&str, &str)] = &[
    ("ArrayList", r"ArrayList\s*<\s*\w+\s*>"),
    ("HashMap", r"HashMap\s*<\s*\w+\s*,\s*\w+\s*>"),
    ("Stack", r"Stack\s*<\s*\w+\s*>"),
    ("Queue", r"Queue\s*<\s*\w+\s*>"),
];

pub fn spec() -> PatternSpec {
    PatternSpec {
        language: Language::Java,
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
