//! Python patterns.

use crate::catalog::{CommentForm, PatternSpec};
use crate::language::Language;

const FUNCTIONS: &str = r"def\s+(\w+)\s*\([^)]*\):";

/// Any assignment target. Also matches keyword arguments and comparisons
/// written without spaces, which is accepted noise.
const VARIABLES: &str = r"(\w+)\s*=\s*";

const LOOPS: &str = r"for\s+\w+\s+in\s+|while\s+";
const CONDITIONALS: &str = r"if\s+|elif\s+";
const TYPES: &str = r"class\s+(\w+)";
const IMPORTS: &str = r"import\s+(\w+)|from\s+(\w+)\s+import";
const SEQUENCES: &str = r"(\w+)\s*=\s*\[.*\]";

/// Docstrings count as comments here.
static COMMENTS: &[(CommentForm, &str, &str)] = &[
    (CommentForm::Line, r"#.*", ""),
    (CommentForm::Block, r#"""".*?""""#, ""),
    (CommentForm::Block, r"'''.*?'''", ""),
];

static CONTAINERS: &[(&str, &str)] = &[
    ("list", r"\[.*\]"),
    ("dict", r"\{.*:.*\}"),
    ("set", r"\{.*\}"),
    ("tuple", r"\(.*,.*\)"),
];

pub fn spec() -> PatternSpec {
    PatternSpec {
        language: Language::Python,
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
