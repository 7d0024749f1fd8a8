//! Codelens - heuristic code snippet analyzer.
//!
//! Codelens takes a snippet of C++, C, Python, Java, Go or Rust and makes
//! best-effort guesses about it: which language it is, which functions,
//! variables, loops and types it declares, which textbook data structures
//! it probably uses, and roughly how its running time and memory grow.
//! Everything is regex and keyword based; nothing here is a real parser.
//!
//! # Architecture
//!
//! - `language`: the closed language set and keyword-score detection
//! - `catalog`: per-language regex tables, compiled once
//! - `parse`: comment stripping and pattern extraction into a `ParsedUnit`
//! - `infer`: data structure guesses with sample payloads
//! - `complexity`: loop/brace based time and space estimate
//! - `generate`: documentation and suggestions, model-backed or templated
//! - `render`: SVG diagrams of the inferred structures and a complexity chart
//! - `analyzer`: the pipeline tying the above together
//! - `config`: YAML configuration
//! - `report`: output formatting (pretty, JSON, markdown)
//!
//! # Example
//!
//! ```
//! use codelens::{Analyzer, Config, Generation, Source};
//!
//! let analyzer = Analyzer::with_generation(Config::default(), Generation::unavailable("doc"));
//! let analysis = analyzer.analyze(&Source::new("def show(xs):\n    for x in xs:\n        print(x)\n"));
//! assert_eq!(analysis.language, codelens::Language::Python);
//! assert_eq!(analysis.complexity.time.label(), "O(n)");
//! ```

pub mod analyzer;
pub mod catalog;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod generate;
pub mod infer;
pub mod language;
pub mod parse;
pub mod render;
pub mod report;

pub use analyzer::{Analysis, Analyzer, Source};
pub use catalog::{patterns_for, CatalogError, PatternSet};
pub use complexity::{estimate, ComplexityEstimate, SpaceComplexity, TimeComplexity};
pub use config::Config;
pub use generate::{Documenter, Documents, Generation, TextGenerator};
pub use infer::{infer, DataStructureSet, SamplePayload, StructureKind};
pub use language::{detect, Language};
pub use parse::{parse, ParsedUnit};
pub use render::{RenderRequest, Renderer, SvgRenderer};

/// Build the pattern catalog up front.
///
/// Call this once at startup. Analysis builds the catalog lazily if this
/// is skipped, but only `init` reports a broken table as an error.
pub fn init() -> Result<(), CatalogError> {
    catalog::init().map(|_| ())
}
