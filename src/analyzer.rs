//! The analysis pipeline.
//!
//! `detect → parse → {infer, estimate}` runs synchronously and cannot
//! fail. Documentation is a separate async step because it may call out to
//! a text-generation backend.

use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::complexity::{estimate, ComplexityEstimate};
use crate::config::Config;
use crate::generate::{Documenter, Documents, Generation};
use crate::infer::{infer, DataStructureSet};
use crate::language::{detect, scores, Language, LanguageScore};
use crate::parse::{parse, ParsedUnit};
use crate::render::{RenderRequest, Renderer};

/// A snippet to analyze.
#[derive(Debug, Clone, Default)]
pub struct Source {
    pub text: String,
    /// Used for extension-based language detection.
    pub filename: Option<String>,
    /// Skips detection entirely when set.
    pub language_override: Option<Language>,
}

impl Source {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language_override = Some(language);
        self
    }
}

/// Result of the synchronous pipeline for one snippet.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub language: Language,
    /// Keyword scores in tie-break order.
    pub scores: Vec<LanguageScore>,
    #[serde(rename = "parsed")]
    pub unit: ParsedUnit,
    pub structures: DataStructureSet,
    pub complexity: ComplexityEstimate,
}

impl Analysis {
    /// Info-box text for diagrams.
    pub fn summary(&self) -> String {
        self.complexity.summary(self.language, self.unit.lines)
    }

    pub fn breakdown(&self) -> String {
        self.complexity.breakdown(self.unit.lines)
    }

    /// Draw the inferred structures with `renderer`.
    pub fn render(&self, renderer: &dyn Renderer, path: &Path) -> anyhow::Result<PathBuf> {
        let summary = self.summary();
        let request = RenderRequest {
            language: self.language,
            structures: &self.structures,
            summary: &summary,
        };
        renderer.render(&request, path)
    }

    /// Chart the time estimate against the common growth rates.
    pub fn render_complexity_chart(
        &self,
        renderer: &dyn Renderer,
        path: &Path,
    ) -> anyhow::Result<PathBuf> {
        renderer.render_complexity_chart(&self.complexity, path)
    }
}

/// Runs the pipeline with a fixed configuration and generation capability.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: Config,
    documenter: Documenter,
}

impl Analyzer {
    /// Build an analyzer, resolving the generation capability from `config`.
    pub fn new(config: Config) -> Self {
        let generation = Generation::from_config(&config.generation);
        Self::with_generation(config, generation)
    }

    /// Build an analyzer with an explicit generation capability.
    pub fn with_generation(config: Config, generation: Generation) -> Self {
        let timeout = Duration::from_millis(config.generation.timeout_ms);
        Self {
            documenter: Documenter::new(generation, timeout),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn documenter(&self) -> &Documenter {
        &self.documenter
    }

    /// Run detection, parsing, inference and estimation on `source`.
    pub fn analyze(&self, source: &Source) -> Analysis {
        let text = source.text.as_str();
        let language = self.resolve_language(source);
        let unit = parse(text, language);
        let structures = infer(text);
        let complexity = estimate(text, &unit);

        debug!(
            language = %language,
            functions = unit.functions.len(),
            time = %complexity.time,
            "analyzed snippet"
        );

        Analysis {
            path: source.filename.as_ref().map(PathBuf::from),
            language,
            scores: scores(text),
            unit,
            structures,
            complexity,
        }
    }

    /// Read and analyze one file.
    pub fn analyze_file(&self, path: &Path) -> anyhow::Result<Analysis> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let source = Source {
            text,
            filename: Some(path.to_string_lossy().into_owned()),
            language_override: None,
        };
        Ok(self.analyze(&source))
    }

    /// Analyze many files in parallel. Unreadable files are logged and
    /// skipped. Results are sorted by path.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> Vec<Analysis> {
        self.analyze_files_with(paths, |_| {})
    }

    /// Like [`Analyzer::analyze_files`], calling `on_done` after each file.
    pub fn analyze_files_with<F>(&self, paths: &[PathBuf], on_done: F) -> Vec<Analysis>
    where
        F: Fn(&Path) + Sync,
    {
        use rayon::prelude::*;

        let results: Vec<_> = paths
            .par_iter()
            .map(|p| {
                let result = self.analyze_file(p);
                on_done(p);
                result
            })
            .collect();

        let mut analyses = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => warn!(error = %format!("{:#}", e), "skipping file"),
            }
        }

        analyses.sort_by(|a, b| a.path.cmp(&b.path));
        analyses
    }

    /// Produce documentation, refactoring and improvement text.
    pub async fn document(&self, analysis: &Analysis) -> Documents {
        self.documenter
            .document_all(&analysis.unit, &analysis.complexity, &analysis.structures)
            .await
    }

    fn resolve_language(&self, source: &Source) -> Language {
        if let Some(language) = source.language_override {
            return language;
        }

        let configured = source
            .filename
            .as_deref()
            .and_then(|f| Path::new(f).extension())
            .and_then(|e| e.to_str())
            .and_then(|e| self.config.language_for_extension(e));

        match configured {
            Some(language) => language,
            None => detect(&source.text, source.filename.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::TimeComplexity;
    use crate::generate::Origin;
    use crate::infer::StructureKind;
    use tempfile::tempdir;

    const BUBBLE_SORT: &str = r#"#include <iostream>
using namespace std;

void bubbleSort(int arr[], int n) {
    for (int i = 0; i < n - 1; i++) {
        for (int j = 0; j < n - i - 1; j++) {
            if (arr[j] > arr[j + 1]) {
                swap(arr[j], arr[j + 1]);
            }
        }
    }
}

int main() {
    int arr[] = {64, 34, 25, 12, 22, 11, 90};
    bubbleSort(arr, 7);
    cout << "Sorted" << endl;
    return 0;
}
"#;

    fn offline() -> Analyzer {
        Analyzer::with_generation(Config::default(), Generation::unavailable("test"))
    }

    #[test]
    fn test_analyze_bubble_sort() {
        let analysis = offline().analyze(&Source::new(BUBBLE_SORT));
        assert_eq!(analysis.language, Language::Cpp);
        assert_eq!(analysis.complexity.time, TimeComplexity::Quadratic);
        assert!(analysis.unit.functions.contains(&"bubbleSort".to_string()));
        assert_eq!(
            analysis.structures.get(StructureKind::Array).map(|s| s.labels()),
            Some(vec!["64", "34", "25", "12", "22", "11"].into_iter().map(String::from).collect())
        );
        assert_eq!(analysis.scores.len(), Language::ALL.len());
    }

    #[test]
    fn test_override_skips_detection() {
        let source = Source::new(BUBBLE_SORT).with_language(Language::Go);
        assert_eq!(offline().analyze(&source).language, Language::Go);
    }

    #[test]
    fn test_configured_extension() {
        let mut config = Config::default();
        config.extensions.insert("ino".to_string(), "c".to_string());
        let analyzer = Analyzer::with_generation(config, Generation::unavailable("test"));

        let source = Source::new("def f(): pass").with_filename("sketch.ino");
        assert_eq!(analyzer.analyze(&source).language, Language::C);

        let source = Source::new("def f(): pass").with_filename("main.go");
        assert_eq!(analyzer.analyze(&source).language, Language::Go);
    }

    #[test]
    fn test_empty_source() {
        let analysis = offline().analyze(&Source::new(""));
        assert_eq!(analysis.language, Language::Cpp);
        assert!(analysis.structures.is_empty());
        assert_eq!(analysis.complexity.time, TimeComplexity::Constant);
        assert!(analysis.summary().contains("Lines: 1"));
    }

    #[test]
    fn test_analyze_files_skips_missing_and_sorts() {
        let dir = tempdir().unwrap();
        let b = dir.path().join("b.py");
        let a = dir.path().join("a.rs");
        std::fs::write(&b, "def main():\n    pass\n").unwrap();
        std::fs::write(&a, "fn main() {}\n").unwrap();
        let missing = dir.path().join("missing.c");

        let analyses = offline().analyze_files(&[b.clone(), missing, a.clone()]);
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].path.as_deref(), Some(a.as_path()));
        assert_eq!(analyses[0].language, Language::Rust);
        assert_eq!(analyses[1].language, Language::Python);
    }

    #[tokio::test]
    async fn test_document_offline_uses_templates() {
        let analyzer = offline();
        let analysis = analyzer.analyze(&Source::new(BUBBLE_SORT));
        let docs = analyzer.document(&analysis).await;
        assert_eq!(docs.documentation.origin, Origin::Fallback);
        assert!(docs.documentation.text.contains("## Complexity"));
        assert!(docs.improvements.text.starts_with("IMPROVEMENT SUGGESTIONS:"));
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = offline().analyze(&Source::new("x = [1, 2]").with_filename("x.py"));
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["language"], "python");
        assert_eq!(json["complexity"]["time"], "O(1)");
        assert_eq!(json["structures"][0]["kind"], "array");
        assert!(json.get("original").is_none());
    }
}
