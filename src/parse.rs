//! Structural parsing: comment stripping plus pattern extraction.
//!
//! This is not a parser in the grammar sense. It strips comments with the
//! language's comment rules and then runs the catalog's regular
//! expressions over what is left. The result is a bag of lexical facts.

use regex::{Captures, Regex};
use std::borrow::Cow;
use serde::Serialize;

use crate::catalog::{patterns_for, PatternSet};
use crate::language::Language;

/// Lexical facts extracted from one snippet.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedUnit {
    pub language: Language,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub stripped: String,
    /// Lines in the original text, comment-only and blank lines included.
    pub lines: usize,
    pub functions: Vec<String>,
    pub variables: Vec<String>,
    /// Raw loop matches.
    pub loops: Vec<String>,
    /// Raw conditional matches.
    pub conditionals: Vec<String>,
    /// Declared class, struct and type names.
    pub types: Vec<String>,
    pub imports: Vec<String>,
    /// Number of array/list/slice/vector declarations.
    pub sequences: usize,
    /// Named container constructs seen, in catalog order.
    pub containers: Vec<String>,
}

/// Parse `text` with the shared pattern table for `language`.
pub fn parse(text: &str, language: Language) -> ParsedUnit {
    parse_with(text, patterns_for(language))
}

/// Parse `text` with an explicit pattern table.
pub fn parse_with(text: &str, patterns: &PatternSet) -> ParsedUnit {
    let stripped = strip_comments_with(text, patterns);

    let containers = patterns
        .containers
        .iter()
        .filter(|(_, re)| re.is_match(&stripped))
        .map(|(name, _)| name.to_string())
        .collect();

    ParsedUnit {
        language: patterns.language,
        lines: count_lines(text),
        functions: identifiers(&patterns.functions, &stripped),
        variables: identifiers(&patterns.variables, &stripped),
        loops: raw_matches(&patterns.loops, &stripped),
        conditionals: raw_matches(&patterns.conditionals, &stripped),
        types: identifiers(&patterns.types, &stripped),
        imports: identifiers(&patterns.imports, &stripped),
        sequences: patterns
            .sequences
            .as_ref()
            .map(|re| re.find_iter(&stripped).count())
            .unwrap_or(0),
        containers,
        original: text.to_string(),
        stripped,
    }
}

/// Remove comments from `text` using the rules for `language`.
pub fn strip_comments(text: &str, language: Language) -> String {
    strip_comments_with(text, patterns_for(language))
}

/// Apply the rules in order until a full pass removes nothing. Removing one
/// comment can join its neighbours into a fresh match for an earlier rule.
fn strip_comments_with(text: &str, patterns: &PatternSet) -> String {
    let mut cleaned = text.to_string();
    loop {
        let before = cleaned.len();
        for rule in &patterns.comments {
            if let Cow::Owned(next) = rule.pattern.replace_all(&cleaned, rule.replacement) {
                cleaned = next;
            }
        }
        // Replacements only ever shrink the text.
        if cleaned.len() >= before {
            return cleaned;
        }
    }
}

/// Split on `\n` the way a line-oriented author counts: an empty string is
/// one (empty) line and a trailing newline opens one more.
fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Collect the identifier from every match of `re`.
fn identifiers(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| identifier_from(&caps))
        .collect()
}

/// The last non-empty capture group. Signature patterns put an optional
/// return type before the name, and two-alternative patterns set only one
/// group, so the last populated group is always the name.
fn identifier_from(caps: &Captures<'_>) -> Option<String> {
    (1..caps.len())
        .rev()
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn raw_matches(re: &Regex, text: &str) -> Vec<String> {
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_and_block_comments() {
        let src = "int x = 1; // trailing\n/* block\n spanning */int y = 2;\n";
        let stripped = strip_comments(src, Language::C);
        assert_eq!(stripped, "int x = 1; \nint y = 2;\n");
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        let stripped = strip_comments("a // one\nb // two\nc", Language::Go);
        assert_eq!(stripped, "a \nb \nc");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let samples = [
            (Language::Cpp, "int a; // x\n/* y */ int b; /* z\n w */\n"),
            (Language::Python, "x = 1  # note\n\"\"\"doc\nstring\"\"\"\ny = '''a'''\n"),
            (Language::Rust, "/// doc\nfn f() {} /* unterminated\n"),
            (Language::Java, "a //* b */ c\n"),
            (Language::Python, r#"s = ""'''x'''"y""""#),
        ];
        for (lang, src) in samples {
            let once = strip_comments(src, lang);
            let twice = strip_comments(&once, lang);
            assert_eq!(once, twice, "{}", lang);
        }
    }

    #[test]
    fn test_strip_rejoined_python_strings() {
        // Dropping '''x''' leaves """y""" behind.
        let stripped = strip_comments(r#"s = ""'''x'''"y""""#, Language::Python);
        assert_eq!(stripped, "s = ");
    }

    #[test]
    fn test_line_count_uses_original_text() {
        let src = "// only a comment\n\nint main() {\n    return 0;\n}";
        let unit = parse(src, Language::Cpp);
        assert_eq!(unit.lines, 5);
        assert_eq!(parse("", Language::Cpp).lines, 1);
        assert_eq!(parse("a\n", Language::Cpp).lines, 2);
    }

    #[test]
    fn test_cpp_functions_take_name_group() {
        let src = "void bubbleSort(int arr[], int n) {\n}\nint main() {\n}\n";
        let unit = parse(src, Language::Cpp);
        assert_eq!(unit.functions, vec!["bubbleSort", "main"]);
    }

    #[test]
    fn test_commented_code_is_ignored() {
        let src = "// void ghost() {\nvoid real() {\n}\n";
        let unit = parse(src, Language::Cpp);
        assert_eq!(unit.functions, vec!["real"]);
    }

    #[test]
    fn test_python_extraction() {
        let src = "import os\n\ndef walk(root):\n    count = 0\n    for p in os.listdir(root):\n        if p:\n            count += 1\n    return count\n";
        let unit = parse(src, Language::Python);
        assert_eq!(unit.functions, vec!["walk"]);
        assert!(unit.variables.contains(&"count".to_string()));
        assert_eq!(unit.loops.len(), 1);
        assert_eq!(unit.conditionals.len(), 1);
        assert_eq!(unit.imports, vec!["os"]);
    }

    #[test]
    fn test_go_variables_from_either_alternative() {
        let src = "func main() {\n    var total int\n    count := 3\n}\n";
        let unit = parse(src, Language::Go);
        assert_eq!(unit.functions, vec!["main"]);
        assert_eq!(unit.variables, vec!["total", "count"]);
    }

    #[test]
    fn test_rust_extraction() {
        let src = "use std::collections::HashMap;\nstruct Point { x: i32 }\nfn main() {\n    let mut m: HashMap<String, i32> = HashMap::new();\n    for k in 0..3 {}\n    loop { break; }\n}\n";
        let unit = parse(src, Language::Rust);
        assert_eq!(unit.functions, vec!["main"]);
        assert_eq!(unit.variables, vec!["m"]);
        assert_eq!(unit.types, vec!["Point"]);
        assert_eq!(unit.imports, vec!["std::collections::HashMap"]);
        assert_eq!(unit.loops.len(), 2);
        assert_eq!(unit.containers, vec!["HashMap"]);
    }

    #[test]
    fn test_java_extraction() {
        let src = "import java.util.ArrayList;\npublic class Main {\n    public static void main(String[] args) {\n        ArrayList<Integer> xs = new ArrayList<Integer>();\n    }\n}\n";
        let unit = parse(src, Language::Java);
        assert!(unit.functions.contains(&"main".to_string()));
        assert_eq!(unit.types, vec!["Main"]);
        assert_eq!(unit.imports, vec!["java.util.ArrayList"]);
        assert!(unit.containers.contains(&"ArrayList".to_string()));
    }

    #[test]
    fn test_parse_never_fails_on_odd_input() {
        for lang in Language::ALL {
            let unit = parse("\u{0}\u{1}\u{fffd}{{{}}}))((", lang);
            assert_eq!(unit.lines, 1);
        }
    }
}
