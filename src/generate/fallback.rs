//! Deterministic template output used when no model is available.
//!
//! Everything here is a pure function of the snippet and its analysis, so
//! the same input always produces the same text. None of these functions
//! return an empty string.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Write;

use crate::complexity::{ComplexityEstimate, TimeComplexity};
use crate::infer::DataStructureSet;
use crate::language::Language;
use crate::parse::ParsedUnit;

lazy_static! {
    static ref RETURN_KEYWORD: Regex = Regex::new(r"\breturn\b").unwrap();
}

const NO_REFACTORING: &str = "No obvious refactoring opportunities found";
const NO_IMPROVEMENTS: &str = "No obvious issues found";

/// Markdown documentation with the fixed section ladder.
pub fn documentation(
    unit: &ParsedUnit,
    estimate: &ComplexityEstimate,
    structures: &DataStructureSet,
) -> String {
    let lang = unit.language.display_name();
    let has_main = unit.functions.iter().any(|f| f == "main");
    let functions = distinct(&unit.functions);
    let mut doc = String::new();

    let _ = writeln!(doc, "# {} Code Documentation\n", lang);
    let _ = writeln!(doc, "**Lines of Code**: {}", unit.lines);
    let _ = writeln!(doc, "**Functions**: {}", unit.functions.len());
    let _ = writeln!(doc, "**Variables**: {}", unit.variables.len());

    doc.push_str("\n## Purpose\n");
    if has_main {
        let _ = writeln!(doc, "- Executable {} program with a `main` entry point", lang);
    } else if unit.functions.is_empty() {
        let _ = writeln!(doc, "- {} snippet without function definitions", lang);
    } else {
        let _ = writeln!(doc, "- {} code defining {} function(s)", lang, unit.functions.len());
    }
    if !unit.types.is_empty() {
        let _ = writeln!(doc, "- Declares types: {}", code_list(&unit.types));
    }
    if !structures.is_empty() {
        let titles: Vec<&str> = structures.iter().map(|s| s.kind.title()).collect();
        let _ = writeln!(doc, "- Appears to work with: {}", titles.join(", "));
    }

    doc.push_str("\n## Algorithm\n");
    let _ = writeln!(doc, "- **Loops**: {} loop(s) detected", unit.loops.len());
    let _ = writeln!(
        doc,
        "- **Conditionals**: {} conditional(s) detected",
        unit.conditionals.len()
    );
    if !unit.loops.is_empty() {
        doc.push_str("- Contains iterative logic\n");
    }
    if !unit.conditionals.is_empty() {
        doc.push_str("- Contains branching logic\n");
    }
    if unit.loops.is_empty() && unit.conditionals.is_empty() {
        doc.push_str("- Straight-line code\n");
    }

    doc.push_str("\n## Functions\n");
    if unit.functions.is_empty() {
        doc.push_str("- No functions detected\n");
    }
    for name in &functions {
        let role = if *name == "main" {
            "Main entry point"
        } else {
            "Utility function"
        };
        let _ = writeln!(doc, "\n### `{}()`\n- **Purpose**: {}", name, role);
    }

    doc.push_str("\n## Parameters\n");
    if unit.functions.is_empty() {
        doc.push_str("- None\n");
    }
    for name in &functions {
        match parameter_list(&unit.stripped, name) {
            Some(params) if !params.is_empty() => {
                let _ = writeln!(doc, "- `{}`: `{}`", name, params);
            }
            _ => {
                let _ = writeln!(doc, "- `{}`: no parameters", name);
            }
        }
    }

    doc.push_str("\n## Return Values\n");
    let returns = RETURN_KEYWORD.find_iter(&unit.stripped).count();
    let _ = writeln!(doc, "- {} return statement(s) found", returns);
    if has_main && matches!(unit.language, Language::C | Language::Cpp) {
        doc.push_str("- `main` returns an exit status to the operating system\n");
    }

    doc.push_str("\n## Complexity\n");
    let _ = writeln!(doc, "- **Estimated Time Complexity**: {}", estimate.time);
    let _ = writeln!(doc, "- **Estimated Space Complexity**: {}", estimate.space);
    let _ = writeln!(
        doc,
        "- {} loop keyword(s), maximum brace nesting {}",
        estimate.loop_occurrences, estimate.max_nesting
    );

    doc.push_str("\n## Usage\n");
    let _ = writeln!(doc, "```sh\n{}\n```", run_command(unit.language, has_main));

    doc.push_str("\n## Improvements\n");
    for item in improvement_findings(&unit.original) {
        let _ = writeln!(doc, "- {}", item);
    }
    if estimate.time == TimeComplexity::Quadratic {
        doc.push_str("- Nested loops dominate the running time; consider a better algorithm\n");
    }

    doc.push_str("\n---\n*Generated by codelens (template mode)*\n");
    doc
}

/// Bulleted refactoring suggestions.
pub fn refactoring(text: &str) -> String {
    let mut suggestions = Vec::new();

    if text.matches("cout").count() > 3 {
        suggestions.push("Consider wrapping repeated cout statements in a function");
    }
    if text.contains("int main()") && text.matches("return").count() == 1 {
        suggestions.push("Consider adding error handling with different return codes");
    }
    if text.matches("for").count() >= 2 {
        suggestions.push("Consider extracting nested loops into separate functions");
    }
    if !text.contains("const") && !text.contains("auto") {
        suggestions
            .push("Consider using 'const' for immutable variables and 'auto' for type deduction");
    }
    if text.contains("#include <iostream>") && text.contains("using namespace std") {
        suggestions.push("Consider avoiding 'using namespace std' in larger projects");
    }

    if suggestions.is_empty() {
        suggestions.push(NO_REFACTORING);
    }
    bulleted("REFACTORING SUGGESTIONS:", &suggestions)
}

/// Bulleted improvement suggestions.
pub fn improvements(text: &str) -> String {
    bulleted("IMPROVEMENT SUGGESTIONS:", &improvement_findings(text))
}

fn improvement_findings(text: &str) -> Vec<&'static str> {
    let mut found = Vec::new();

    if text.contains("int main()") && !text.contains("const") {
        found.push("Use const for variables that don't change");
    }
    if text.matches("for").count() >= 2 {
        found.push("Consider using range-based for loops where possible");
    }
    if text.contains("cout") && text.matches("endl").count() > 2 {
        found.push("Consider using '\\n' instead of endl for better performance");
    }
    if text.contains("malloc") || text.contains("free") {
        found.push("Use smart pointers instead of manual memory management");
    }

    if found.is_empty() {
        found.push(NO_IMPROVEMENTS);
    }
    found
}

fn bulleted(header: &str, items: &[&str]) -> String {
    let mut out = header.to_string();
    for item in items {
        out.push_str("\n• ");
        out.push_str(item);
    }
    out
}

/// Names in first-seen order without repeats.
fn distinct(names: &[String]) -> Vec<&str> {
    let mut seen = Vec::new();
    for name in names {
        if !seen.contains(&name.as_str()) {
            seen.push(name.as_str());
        }
    }
    seen
}

fn code_list(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("`{}`", n))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text between the parentheses following the first `name(`.
fn parameter_list(text: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(r"\b{}\s*\(([^)]*)\)", regex::escape(name))).ok()?;
    let caps = re.captures(text)?;
    let params = caps.get(1)?.as_str();
    Some(params.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn run_command(language: Language, has_main: bool) -> &'static str {
    if !has_main && language != Language::Python {
        return "# no entry point found; call these functions from your own code";
    }
    match language {
        Language::Cpp => "g++ -o program main.cpp && ./program",
        Language::C => "gcc -o program main.c && ./program",
        Language::Python => "python3 main.py",
        Language::Java => "javac Main.java && java Main",
        Language::Go => "go run main.go",
        Language::Rust => "rustc main.rs && ./main",
    }
}
