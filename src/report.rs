//! Output formatting for analysis results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - Markdown: a report document that can be saved next to the code

use anyhow::Context;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::Analysis;
use crate::complexity::TimeComplexity;
use crate::generate::{Documents, Generated, Origin};

const TERMINAL_WIDTH: usize = 80;

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files_analyzed: usize,
    pub analyses: Vec<JsonAnalysis>,
}

/// One analyzed snippet.
#[derive(Serialize, Deserialize)]
pub struct JsonAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub language: String,
    pub lines: usize,
    pub functions: Vec<String>,
    pub variables: Vec<String>,
    pub loops: usize,
    pub conditionals: usize,
    pub types: Vec<String>,
    pub imports: Vec<String>,
    pub containers: Vec<String>,
    pub structures: Vec<JsonStructure>,
    pub complexity: JsonComplexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<JsonDocuments>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonStructure {
    pub kind: String,
    pub sample: Vec<String>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonComplexity {
    pub time: String,
    pub space: String,
    pub loop_occurrences: usize,
    pub max_nesting: usize,
}

#[derive(Serialize, Deserialize)]
pub struct JsonDocuments {
    pub documentation: JsonGenerated,
    pub refactoring: JsonGenerated,
    pub improvements: JsonGenerated,
}

#[derive(Serialize, Deserialize)]
pub struct JsonGenerated {
    pub text: String,
    /// "model" or "fallback".
    pub origin: String,
}

fn generated_to_json(g: &Generated) -> JsonGenerated {
    JsonGenerated {
        text: g.text.clone(),
        origin: origin_label(g.origin).to_string(),
    }
}

fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Model => "model",
        Origin::Fallback => "fallback",
    }
}

fn analysis_to_json(analysis: &Analysis, documents: Option<&Documents>) -> JsonAnalysis {
    let unit = &analysis.unit;
    JsonAnalysis {
        path: analysis.path.as_ref().map(|p| p.display().to_string()),
        language: analysis.language.name().to_string(),
        lines: unit.lines,
        functions: unit.functions.clone(),
        variables: unit.variables.clone(),
        loops: unit.loops.len(),
        conditionals: unit.conditionals.len(),
        types: unit.types.clone(),
        imports: unit.imports.clone(),
        containers: unit.containers.clone(),
        structures: analysis
            .structures
            .iter()
            .map(|s| JsonStructure {
                kind: s.kind.as_str().to_string(),
                sample: s.sample.labels(),
            })
            .collect(),
        complexity: JsonComplexity {
            time: analysis.complexity.time.label().to_string(),
            space: analysis.complexity.space.label().to_string(),
            loop_occurrences: analysis.complexity.loop_occurrences,
            max_nesting: analysis.complexity.max_nesting,
        },
        documents: documents.map(|d| JsonDocuments {
            documentation: generated_to_json(&d.documentation),
            refactoring: generated_to_json(&d.refactoring),
            improvements: generated_to_json(&d.improvements),
        }),
    }
}

/// Build the JSON report. `documents` is either empty or parallel to `analyses`.
pub fn build_json_report(analyses: &[Analysis], documents: &[Documents]) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_analyzed: analyses.len(),
        analyses: analyses
            .iter()
            .enumerate()
            .map(|(i, a)| analysis_to_json(a, documents.get(i)))
            .collect(),
    }
}

/// Write results in JSON format.
pub fn write_json(analyses: &[Analysis], documents: &[Documents]) -> anyhow::Result<()> {
    let report = build_json_report(analyses, documents);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Markdown Format
// =============================================================================

/// Render one analysis as a markdown document.
pub fn render_markdown(analysis: &Analysis, documents: Option<&Documents>) -> String {
    let unit = &analysis.unit;
    let mut out = String::new();

    let subject = analysis
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "snippet".to_string());
    let _ = writeln!(out, "# codelens report: {}\n", subject);

    out.push_str("| Metric | Value |\n|---|---|\n");
    let _ = writeln!(out, "| Language | {} |", analysis.language.display_name());
    let _ = writeln!(out, "| Lines | {} |", unit.lines);
    let _ = writeln!(out, "| Functions | {} |", unit.functions.len());
    let _ = writeln!(out, "| Variables | {} |", unit.variables.len());
    let _ = writeln!(out, "| Loops | {} |", unit.loops.len());
    let _ = writeln!(out, "| Conditionals | {} |", unit.conditionals.len());
    let _ = writeln!(out, "| Time complexity | {} |", analysis.complexity.time);
    let _ = writeln!(out, "| Space complexity | {} |", analysis.complexity.space);

    out.push_str("\n## Data Structures\n\n");
    if analysis.structures.is_empty() {
        out.push_str("No data structure signals found.\n");
    }
    for s in analysis.structures.iter() {
        let _ = writeln!(out, "- **{}**: {}", s.kind.title(), s.sample.labels().join(", "));
    }
    if !unit.containers.is_empty() {
        let _ = writeln!(out, "\nContainers used: {}", unit.containers.join(", "));
    }

    let _ = writeln!(out, "\n## Complexity Breakdown\n\n```text\n{}\n```", analysis.breakdown());

    if let Some(docs) = documents {
        let _ = writeln!(out, "\n{}", docs.documentation.text.trim_end());
        let _ = writeln!(out, "\n## Refactoring\n\n```text\n{}\n```", docs.refactoring.text.trim_end());
        let _ = writeln!(out, "\n## Suggested Improvements\n\n{}", docs.improvements.text.trim_end());
    }
    out
}

/// Write results in markdown format.
pub fn write_markdown(analyses: &[Analysis], documents: &[Documents]) {
    for (i, analysis) in analyses.iter().enumerate() {
        if i > 0 {
            println!("\n---\n");
        }
        print!("{}", render_markdown(analysis, documents.get(i)));
    }
}

/// Save generated documentation to `path`, creating parent directories.
pub fn save_documentation(text: &str, path: &Path) -> anyhow::Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, text)
        .with_context(|| format!("failed to write documentation to {}", path.display()))?;
    Ok(path.to_path_buf())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(analyses: &[Analysis], documents: &[Documents]) {
    // Header
    println!();
    print!("  ");
    print!("{}", "codelens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if analyses.is_empty() {
        println!("  {}", "No source files found.".dimmed());
        println!();
        return;
    }

    for (i, analysis) in analyses.iter().enumerate() {
        write_analysis(analysis);
        if let Some(docs) = documents.get(i) {
            write_documents(docs);
        }
        println!();
    }

    if analyses.len() > 1 {
        write_totals(analyses);
        println!();
    }
}

fn write_analysis(analysis: &Analysis) {
    let unit = &analysis.unit;

    match &analysis.path {
        Some(p) => println!("  {}", p.display().to_string().blue().bold()),
        None => println!("  {}", "snippet".blue().bold()),
    }

    print!("    {}", "Language:   ".dimmed());
    println!("{}", analysis.language.display_name());
    print!("    {}", "Lines:      ".dimmed());
    println!("{}", unit.lines);
    print!("    {}", "Functions:  ".dimmed());
    if unit.functions.is_empty() {
        println!("{}", "none".dimmed());
    } else {
        println!("{}", unit.functions.join(", "));
    }
    print!("    {}", "Variables:  ".dimmed());
    println!("{}", unit.variables.len());
    print!("    {}", "Control:    ".dimmed());
    println!(
        "{} loop(s), {} conditional(s)",
        unit.loops.len(),
        unit.conditionals.len()
    );

    print!("    {}", "Time:       ".dimmed());
    write_colored_time(analysis.complexity.time);
    println!();
    print!("    {}", "Space:      ".dimmed());
    println!("{}", analysis.complexity.space);

    print!("    {}", "Structures: ".dimmed());
    if analysis.structures.is_empty() {
        println!("{}", "none detected".dimmed());
    } else {
        let titles: Vec<&str> = analysis.structures.iter().map(|s| s.kind.title()).collect();
        println!("{}", titles.join(", "));
    }
    if !unit.containers.is_empty() {
        print!("    {}", "Containers: ".dimmed());
        println!("{}", unit.containers.join(", "));
    }
}

fn write_colored_time(time: TimeComplexity) {
    let label = time.label();
    match time {
        TimeComplexity::Constant => print!("{}", label.green().bold()),
        TimeComplexity::Linear => print!("{}", label.yellow()),
        TimeComplexity::Linearithmic => print!("{}", label.yellow().bold()),
        TimeComplexity::Quadratic => print!("{}", label.red()),
    }
}

fn write_documents(docs: &Documents) {
    display_documentation(&docs.documentation.text, "Code Documentation");
    write_origin(docs.documentation.origin);

    println!();
    for line in docs.refactoring.text.lines() {
        println!("    {}", line);
    }
    println!();
    for line in docs.improvements.text.lines() {
        println!("    {}", line);
    }
}

fn write_origin(origin: Origin) {
    match origin {
        Origin::Model => println!("    {}", "(generated by language model)".dimmed()),
        Origin::Fallback => println!("    {}", "(generated from templates)".dimmed()),
    }
}

fn write_totals(analyses: &[Analysis]) {
    println!("  {}", "Totals:".bold());
    let lines: usize = analyses.iter().map(|a| a.unit.lines).sum();
    let functions: usize = analyses.iter().map(|a| a.unit.functions.len()).sum();
    println!("    {:<12} {}", "files", analyses.len());
    println!("    {:<12} {}", "lines", lines);
    println!("    {:<12} {}", "functions", functions);

    let worst = analyses
        .iter()
        .map(|a| a.complexity.time)
        .max_by_key(|t| time_rank(*t));
    if let Some(t) = worst {
        print!("    {:<12} ", "worst time");
        write_colored_time(t);
        println!();
    }
}

fn time_rank(time: TimeComplexity) -> u8 {
    match time {
        TimeComplexity::Constant => 0,
        TimeComplexity::Linear => 1,
        TimeComplexity::Linearithmic => 2,
        TimeComplexity::Quadratic => 3,
    }
}

/// Print markdown documentation formatted for a terminal.
pub fn display_documentation(documentation: &str, title: &str) {
    println!();
    println!("{}", "=".repeat(TERMINAL_WIDTH));
    println!(" {} ", center(title, TERMINAL_WIDTH - 2).bold());
    println!("{}", "=".repeat(TERMINAL_WIDTH));

    let mut in_code = false;
    for line in documentation.lines() {
        if let Some(header) = line.strip_prefix("# ") {
            println!();
            println!("{}", header.to_uppercase().cyan().bold());
            println!("{}", "─".repeat((header.chars().count() + 3).min(TERMINAL_WIDTH)));
        } else if let Some(sub) = line.strip_prefix("## ") {
            println!();
            println!("{}", sub.cyan());
            println!("{}", "─".repeat((sub.chars().count() + 3).min(TERMINAL_WIDTH / 2)));
        } else if let Some(item) = line.strip_prefix("### ") {
            println!();
            println!("  {}", item.bold());
        } else if line.starts_with("```") {
            if in_code {
                println!("└{}┘", "─".repeat(TERMINAL_WIDTH - 2));
            } else {
                println!("┌{}┐", "─".repeat(TERMINAL_WIDTH - 2));
            }
            in_code = !in_code;
        } else if in_code {
            println!("│ {}", line);
        } else if let Some(item) = line.strip_prefix("- ") {
            println!("   • {}", item);
        } else if line.trim().is_empty() {
            println!();
        } else {
            println!("   {}", line);
        }
    }

    println!();
    println!("{}", "=".repeat(TERMINAL_WIDTH));
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analyzer, Source};
    use crate::config::Config;
    use crate::generate::Generation;
    use tempfile::tempdir;

    fn analyze(text: &str, filename: &str) -> Analysis {
        Analyzer::with_generation(Config::default(), Generation::unavailable("test"))
            .analyze(&Source::new(text).with_filename(filename))
    }

    fn docs() -> Documents {
        let fallback = |text: &str| Generated {
            text: text.to_string(),
            origin: Origin::Fallback,
        };
        Documents {
            documentation: fallback("# Doc\n\n## Purpose\n- demo\n"),
            refactoring: fallback("REFACTORING SUGGESTIONS:\n• a"),
            improvements: fallback("IMPROVEMENT SUGGESTIONS:\n• b"),
        }
    }

    #[test]
    fn test_json_report_structure() {
        let analyses = vec![analyze("def f(xs):\n    for x in xs:\n        pass\n", "f.py")];
        let report = build_json_report(&analyses, &[]);
        assert_eq!(report.files_analyzed, 1);
        let a = &report.analyses[0];
        assert_eq!(a.language, "python");
        assert_eq!(a.functions, vec!["f"]);
        assert_eq!(a.loops, 1);
        assert_eq!(a.complexity.time, "O(n)");
        assert!(a.documents.is_none());
    }

    #[test]
    fn test_json_field_names() {
        let analyses = vec![analyze("stack.push(1)", "s.go")];
        let report = build_json_report(&analyses, &[docs()]);
        let json = serde_json::to_value(&report).unwrap();
        let a = &json["analyses"][0];
        assert_eq!(a["path"], "s.go");
        assert_eq!(a["structures"][0]["kind"], "stack");
        assert_eq!(a["structures"][0]["sample"][0], "1");
        assert_eq!(a["documents"]["documentation"]["origin"], "fallback");
        assert!(a.get("complexity").unwrap().get("max_nesting").is_some());

        let back: JsonReport = serde_json::from_value(json).unwrap();
        assert_eq!(back.analyses.len(), 1);
    }

    #[test]
    fn test_markdown_report() {
        let analysis = analyze("int main() {\n  int arr[] = {3, 1};\n}\n", "main.c");
        let md = render_markdown(&analysis, Some(&docs()));
        assert!(md.starts_with("# codelens report: main.c"));
        assert!(md.contains("| Language | C |"));
        assert!(md.contains("- **Array**: 3, 1"));
        assert!(md.contains("COMPLEXITY ANALYSIS:"));
        assert!(md.contains("## Purpose"));
        assert!(md.contains("## Refactoring"));

        let bare = render_markdown(&analysis, None);
        assert!(!bare.contains("## Refactoring"));
    }

    #[test]
    fn test_save_documentation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docs").join("out.md");
        let written = save_documentation("# Doc\n", &path).unwrap();
        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Doc\n");
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 2), "abc");
    }
}
