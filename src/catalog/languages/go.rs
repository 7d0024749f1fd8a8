//! Go patterns.

use crate::catalog::{CommentForm, PatternSpec};
use crate::language::Language;

/// Plain functions and methods with a receiver.
const FUNCTIONS: &str = r"func\s+(?:\(\w+\s+\*?\w+\)\s+)?(\w+)\s*\([^)]*\)";

/// `var x` or `x :=`; only one of the two groups is set per match.
const VARIABLES: &str = r"var\s+(\w+)|(\w+)\s*:=";

const LOOPS: &str = r"for\s+|range\s+";
const CONDITIONALS: &str = r"if\s+";
const TYPES: &str = r"type\s+(\w+)\s+struct";
const IMPORTS: &str = r#"import\s+"([^"]+)"|import\s+(\w+)"#;
const SEQUENCES: &str = r"(\w+)\s+\[\]\w+";

static COMMENTS: &[(CommentForm, &str, &str)] = &[
    (CommentForm::Line, r"//.*", ""),
    (CommentForm::Block, r"/\*.*?\*/", ""),
];

static CONTAINERS: &[(&str, &str)] = &[
    ("slice", r"\[\]\w+"),
    ("map", r"map\s*\[\s*\w+\s*\]\s*\w+"),
    ("channel", r"chan\s+\w+"),
];

pub fn spec() -> PatternSpec {
    PatternSpec {
        language: Language::Go,
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
