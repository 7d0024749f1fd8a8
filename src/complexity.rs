//! Loop and brace counting complexity estimate.
//!
//! The estimate is deliberately coarse. Loops are counted as raw `for` and
//! `while` substrings (identifiers and strings included), and nesting is
//! the deepest `{` level anywhere in the text, whether the braces belong to
//! a loop, a function body or a literal. The result is one of four time
//! buckets and two space buckets; other components rely on exactly these.

use serde::{Serialize, Serializer};

use crate::language::Language;
use crate::parse::ParsedUnit;

/// Brace depth at which two or more loops are treated as nested.
pub const NESTED_LOOP_DEPTH: usize = 3;

/// Variable count up to which space is considered constant.
pub const CONSTANT_SPACE_MAX_VARIABLES: usize = 5;

/// Estimated time complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeComplexity {
    Constant,
    Linear,
    Linearithmic,
    Quadratic,
}

impl TimeComplexity {
    pub fn label(&self) -> &'static str {
        match self {
            TimeComplexity::Constant => "O(1)",
            TimeComplexity::Linear => "O(n)",
            TimeComplexity::Linearithmic => "O(n log n)",
            TimeComplexity::Quadratic => "O(n²)",
        }
    }
}

impl std::fmt::Display for TimeComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for TimeComplexity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Estimated space complexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpaceComplexity {
    Constant,
    Linear,
}

impl SpaceComplexity {
    pub fn label(&self) -> &'static str {
        match self {
            SpaceComplexity::Constant => "O(1)",
            SpaceComplexity::Linear => "O(n)",
        }
    }
}

impl std::fmt::Display for SpaceComplexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for SpaceComplexity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Complexity labels plus the counts they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplexityEstimate {
    pub time: TimeComplexity,
    pub space: SpaceComplexity,
    pub loop_occurrences: usize,
    pub max_nesting: usize,
    pub function_count: usize,
    pub variable_count: usize,
}

impl ComplexityEstimate {
    /// Short block shown in the diagram's info box.
    pub fn summary(&self, language: Language, lines: usize) -> String {
        format!(
            "CODE ANALYSIS SUMMARY\n\
             Language: {}\n\
             Time Complexity: {}\n\
             Space Complexity: {}\n\
             Functions: {}\n\
             Variables: {}\n\
             Lines: {}",
            language.display_name().to_uppercase(),
            self.time,
            self.space,
            self.function_count,
            self.variable_count,
            lines
        )
    }

    /// Longer textual breakdown used in reports.
    pub fn breakdown(&self, lines: usize) -> String {
        format!(
            "COMPLEXITY ANALYSIS:\n\
             ===================\n\
             Time Complexity: {}\n\
             Space Complexity: {}\n\
             \n\
             DETAILED BREAKDOWN:\n\
             - Number of loops: {}\n\
             - Maximum nesting level: {}\n\
             - Functions defined: {}\n\
             - Variables declared: {}\n\
             - Lines of code: {}\n\
             \n\
             EXPLANATION:\n\
             - The time complexity is estimated from loop keywords and brace nesting\n\
             - Space complexity considers the number of declared variables",
            self.time,
            self.space,
            self.loop_occurrences,
            self.max_nesting,
            self.function_count,
            self.variable_count,
            lines
        )
    }
}

/// Estimate complexity for `text` and its parse result.
pub fn estimate(text: &str, unit: &ParsedUnit) -> ComplexityEstimate {
    let loop_occurrences = count_loop_keywords(text);
    let max_nesting = max_brace_depth(text);
    let variable_count = unit.variables.len();

    ComplexityEstimate {
        time: classify_time(loop_occurrences, max_nesting),
        space: classify_space(variable_count),
        loop_occurrences,
        max_nesting,
        function_count: unit.functions.len(),
        variable_count,
    }
}

/// Raw `for` plus `while` substring counts.
pub fn count_loop_keywords(text: &str) -> usize {
    text.matches("for").count() + text.matches("while").count()
}

/// Deepest running `{` depth. Unbalanced `}` may drive the running depth
/// below zero; the maximum is never below zero.
pub fn max_brace_depth(text: &str) -> usize {
    let mut depth: i64 = 0;
    let mut max_depth: i64 = 0;
    for ch in text.chars() {
        match ch {
            '{' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            '}' => depth -= 1,
            _ => {}
        }
    }
    max_depth as usize
}

/// First matching rule wins.
pub fn classify_time(loop_occurrences: usize, max_nesting: usize) -> TimeComplexity {
    match loop_occurrences {
        0 => TimeComplexity::Constant,
        1 => TimeComplexity::Linear,
        _ if max_nesting >= NESTED_LOOP_DEPTH => TimeComplexity::Quadratic,
        _ => TimeComplexity::Linearithmic,
    }
}

pub fn classify_space(variable_count: usize) -> SpaceComplexity {
    if variable_count <= CONSTANT_SPACE_MAX_VARIABLES {
        SpaceComplexity::Constant
    } else {
        SpaceComplexity::Linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn estimate_for(text: &str, lang: Language) -> ComplexityEstimate {
        let unit = parse(text, lang);
        estimate(text, &unit)
    }

    #[test]
    fn test_no_loops_is_constant() {
        let e = estimate_for("int add(int a, int b) { return a + b; }", Language::C);
        assert_eq!(e.time, TimeComplexity::Constant);
        assert_eq!(e.loop_occurrences, 0);
    }

    #[test]
    fn test_single_loop_is_linear() {
        let text = "for (i = 0; i < n; i++) { sum += i; }";
        let e = estimate_for(text, Language::C);
        assert_eq!(e.loop_occurrences, 1);
        assert_eq!(e.max_nesting, 1);
        assert_eq!(e.time, TimeComplexity::Linear);
    }

    #[test]
    fn test_nested_loops_are_quadratic() {
        let text = "void f(int n) {\n  for (int i = 0; i < n; i++) {\n    for (int j = 0; j < n; j++) {\n      g(i, j);\n    }\n  }\n}\n";
        let e = estimate_for(text, Language::Cpp);
        assert_eq!(e.loop_occurrences, 2);
        assert_eq!(e.max_nesting, 3);
        assert_eq!(e.time, TimeComplexity::Quadratic);
    }

    #[test]
    fn test_shallow_double_loop_is_linearithmic() {
        let text = "for x in a:\n    pass\nwhile y:\n    pass\n";
        let e = estimate_for(text, Language::Python);
        assert_eq!(e.loop_occurrences, 2);
        assert_eq!(e.max_nesting, 0);
        assert_eq!(e.time, TimeComplexity::Linearithmic);
    }

    #[test]
    fn test_loop_keywords_count_inside_identifiers() {
        // "format" and "meanwhile" both count.
        assert_eq!(count_loop_keywords("format(meanwhile)"), 2);
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(max_brace_depth("}}}{"), 0);
        assert_eq!(max_brace_depth("{{}"), 2);
        assert_eq!(max_brace_depth(""), 0);
    }

    #[test]
    fn test_space_threshold() {
        assert_eq!(classify_space(0), SpaceComplexity::Constant);
        assert_eq!(classify_space(5), SpaceComplexity::Constant);
        assert_eq!(classify_space(6), SpaceComplexity::Linear);
    }

    #[test]
    fn test_labels() {
        assert_eq!(TimeComplexity::Quadratic.to_string(), "O(n²)");
        assert_eq!(TimeComplexity::Linearithmic.to_string(), "O(n log n)");
        assert_eq!(SpaceComplexity::Linear.to_string(), "O(n)");
    }

    #[test]
    fn test_summary_mentions_labels() {
        let e = estimate_for("for (;;) {}", Language::C);
        let summary = e.summary(Language::C, 1);
        assert!(summary.starts_with("CODE ANALYSIS SUMMARY"));
        assert!(summary.contains("Time Complexity: O(n)"));
        assert!(summary.contains("Language: C"));
    }
}
