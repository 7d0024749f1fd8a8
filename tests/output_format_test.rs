//! Tests for the JSON, markdown and diagram outputs.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tempfile::tempdir;

use codelens::config::Config;
use codelens::generate::{Generation, GenerationError, Origin, TextGenerator};
use codelens::report::{build_json_report, render_markdown, save_documentation, JsonReport};
use codelens::{Analysis, Analyzer, Documents, SvgRenderer};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

struct Canned;

#[async_trait]
impl TextGenerator for Canned {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(format!("canned reply to {} bytes", prompt.len()))
    }

    fn name(&self) -> &str {
        "canned"
    }
}

fn analyze(generation: Generation, names: &[&str]) -> (Analyzer, Vec<Analysis>) {
    codelens::init().expect("catalog should build");
    let analyzer = Analyzer::with_generation(Config::default(), generation);
    let paths: Vec<PathBuf> = names.iter().map(|n| testdata_path().join(n)).collect();
    let analyses = analyzer.analyze_files(&paths);
    (analyzer, analyses)
}

async fn document(analyzer: &Analyzer, analyses: &[Analysis]) -> Vec<Documents> {
    let mut docs = Vec::new();
    for analysis in analyses {
        docs.push(analyzer.document(analysis).await);
    }
    docs
}

/// Serialize and parse back, the way a consumer of `--format json` would.
fn reparse(report: &JsonReport) -> JsonReport {
    let json = serde_json::to_string_pretty(report).expect("report should serialize");
    serde_json::from_str(&json).expect("report should parse")
}

#[test]
fn test_json_report_without_documents() {
    let (_, analyses) = analyze(
        Generation::unavailable("tests"),
        &["word_count.go", "bubble_sort.cpp"],
    );
    let report = reparse(&build_json_report(&analyses, &[]));

    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(report.files_analyzed, 2);

    // Sorted by path.
    let cpp = &report.analyses[0];
    assert!(cpp.path.as_deref().unwrap().ends_with("bubble_sort.cpp"));
    assert_eq!(cpp.language, "cpp");
    assert_eq!(cpp.loops, 3);
    assert_eq!(cpp.complexity.time, "O(n²)");
    assert_eq!(cpp.structures.len(), 1);
    assert_eq!(cpp.structures[0].kind, "array");
    assert_eq!(cpp.structures[0].sample[0], "64");
    assert!(cpp.documents.is_none());

    let go = &report.analyses[1];
    assert_eq!(go.language, "go");
    assert_eq!(go.complexity.time, "O(n)");
    assert_eq!(go.containers, vec!["slice", "map"]);
}

#[test]
fn test_json_omits_missing_fields() {
    let (_, analyses) = analyze(Generation::unavailable("tests"), &["queue.py"]);
    let value = serde_json::to_value(build_json_report(&analyses, &[])).unwrap();
    let entry = &value["analyses"][0];
    assert!(entry.get("documents").is_none());
    assert_eq!(entry["complexity"]["space"], "O(1)");
}

#[tokio::test]
async fn test_json_records_document_origin() {
    let (analyzer, analyses) = analyze(
        Generation::Available(Arc::new(Canned)),
        &["Stack.java"],
    );
    let docs = document(&analyzer, &analyses).await;
    let report = reparse(&build_json_report(&analyses, &docs));

    let documents = report.analyses[0].documents.as_ref().expect("documents present");
    assert_eq!(documents.documentation.origin, "model");
    assert!(documents.documentation.text.starts_with("canned reply"));
    assert_eq!(documents.improvements.origin, "model");
}

#[tokio::test]
async fn test_markdown_report() {
    let (analyzer, analyses) = analyze(Generation::unavailable("tests"), &["linked_list.c"]);
    let docs = document(&analyzer, &analyses).await;
    assert_eq!(docs[0].refactoring.origin, Origin::Fallback);

    let md = render_markdown(&analyses[0], Some(&docs[0]));
    assert!(md.starts_with("# codelens report: "));
    assert!(md.contains("| Language | C |"));
    assert!(md.contains("- **Linked List**"));
    assert!(md.contains("## Complexity Breakdown"));
    assert!(md.contains("# C Code Documentation"));
    assert!(md.contains("## Refactoring"));
    assert!(md.contains("smart pointers"));

    let bare = render_markdown(&analyses[0], None);
    assert!(!bare.contains("## Refactoring"));
}

#[test]
fn test_diagram_and_saved_docs_are_written() {
    let (_, analyses) = analyze(Generation::unavailable("tests"), &["bubble_sort.cpp"]);
    let dir = tempdir().unwrap();

    let path = dir.path().join("diagrams").join("bubble.svg");
    let written = analyses[0].render(&SvgRenderer::new(), &path).unwrap();
    assert_eq!(written, path);

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("C++ - Data Structure Visualization"));
    assert!(svg.contains(">64<"));
    assert!(svg.contains("CODE ANALYSIS SUMMARY"));

    let doc_path = dir.path().join("docs").join("bubble.md");
    let saved = save_documentation("# notes\n", &doc_path).unwrap();
    assert_eq!(std::fs::read_to_string(saved).unwrap(), "# notes\n");
}

#[test]
fn test_complexity_chart_highlights_estimate() {
    let (_, analyses) = analyze(
        Generation::unavailable("tests"),
        &["bubble_sort.cpp", "word_count.go"],
    );
    let dir = tempdir().unwrap();
    let renderer = SvgRenderer::new();

    let cpp_chart = analyses[0]
        .render_complexity_chart(&renderer, &dir.path().join("cpp.svg"))
        .unwrap();
    let svg = std::fs::read_to_string(cpp_chart).unwrap();
    assert!(svg.contains("Detected: O(n²)"));
    assert!(svg.contains("O(2ⁿ)"));
    assert!(svg.contains("• Functions: "));

    let go_svg = renderer.complexity_chart(&analyses[1].complexity);
    assert!(go_svg.contains("Detected: O(n)"));
    assert!(go_svg.contains("• Time Complexity: O(n)"));
}

#[test]
fn test_config_file_drives_extension_mapping() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join(".codelens.yaml");
    std::fs::write(
        &config_path,
        "generation:\n  enabled: false\nextensions:\n  ino: cpp\n",
    )
    .unwrap();
    let sketch = dir.path().join("blink.ino");
    std::fs::write(&sketch, "void loop() {\n  delay(100);\n}\n").unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    assert!(!config.generation.enabled);

    let analyzer = Analyzer::new(config);
    assert!(!analyzer.documenter().generation().is_available());

    let analysis = analyzer.analyze_file(&sketch).unwrap();
    assert_eq!(analysis.language, codelens::Language::Cpp);
    assert_eq!(analysis.unit.functions, vec!["loop"]);
}
