//! Command-line interface for codelens.

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::analyzer::{Analysis, Analyzer, Source};
use crate::config::{self, Config, DEFAULT_CONFIG_NAMES};
use crate::generate::{Documents, Generation};
use crate::language::Language;
use crate::render::{Renderer, SvgRenderer};
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["target", "node_modules", "vendor", "__pycache__"];

const CONFIG_TEMPLATE: &str = include_str!("templates/codelens.yaml");

/// Heuristic code snippet analyzer.
///
/// Codelens guesses the language of a snippet, extracts functions,
/// variables and control flow with per-language patterns, infers which
/// textbook data structures the code probably uses, estimates time and
/// space complexity, and can draw a diagram and write documentation.
#[derive(Parser)]
#[command(name = "codelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file, a directory, or `-` for stdin
    Analyze(AnalyzeArgs),
    /// List supported languages
    Languages,
    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file, directory, or - for stdin)
    pub path: PathBuf,

    /// Skip detection and treat input as this language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output format: pretty, json, or markdown
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write a data structure diagram (SVG) to this file
    #[arg(long)]
    pub render: Option<PathBuf>,

    /// Write a complexity growth chart (SVG) to this file
    #[arg(long)]
    pub complexity_chart: Option<PathBuf>,

    /// Generate documentation and suggestions
    #[arg(long)]
    pub docs: bool,

    /// Never call the text-generation backend
    #[arg(long)]
    pub offline: bool,

    /// Save generated documentation as markdown (implies --docs)
    #[arg(long)]
    pub save_docs: Option<PathBuf>,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codelens.yaml")]
    pub output: PathBuf,
}

/// Collect analyzable files under `root`.
fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            // Skip hidden and build directories
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if config.is_path_excluded(path) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if config.language_for_extension(ext).is_some() {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files")
    {
        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
    }
    pb
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    let format = args.format.as_str();
    if !matches!(format, "pretty" | "json" | "markdown") {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty', 'json', or 'markdown'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let language = match args.language.as_deref().map(str::parse::<Language>) {
        None => None,
        Some(Ok(lang)) => Some(lang),
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'codelens languages' to see supported languages");
            return Ok(EXIT_ERROR);
        }
    };

    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let analyzer = if args.offline {
        Analyzer::with_generation(config, Generation::unavailable("offline mode"))
    } else {
        Analyzer::new(config)
    };

    let analyses = if args.path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let mut source = Source::new(text);
        source.language_override = language;
        vec![analyzer.analyze(&source)]
    } else {
        match analyze_path(&analyzer, &args.path, language, format == "pretty") {
            Ok(a) => a,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return Ok(EXIT_ERROR);
            }
        }
    };

    if analyses.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let documents = if args.docs || args.save_docs.is_some() {
        document_all(&analyzer, &analyses)?
    } else {
        Vec::new()
    };

    let renderer = SvgRenderer::new();
    let output_dir = analyzer.config().output_dir();
    if let Some(render) = &args.render {
        let paths = diagram_paths(&output_dir.join(render), &analyses, renderer.extension());
        for (analysis, path) in analyses.iter().zip(paths) {
            let written = analysis.render(&renderer, &path)?;
            info!(path = %written.display(), "diagram written");
            if format == "pretty" {
                eprintln!("Diagram written to {}", written.display());
            }
        }
    }

    if let Some(chart) = &args.complexity_chart {
        let paths = diagram_paths(&output_dir.join(chart), &analyses, renderer.extension());
        for (analysis, path) in analyses.iter().zip(paths) {
            let written = analysis.render_complexity_chart(&renderer, &path)?;
            info!(path = %written.display(), "complexity chart written");
            if format == "pretty" {
                eprintln!("Complexity chart written to {}", written.display());
            }
        }
    }

    if let Some(save) = &args.save_docs {
        let path = analyzer.config().output_dir().join(save);
        let markdown: Vec<String> = analyses
            .iter()
            .zip(&documents)
            .map(|(a, d)| report::render_markdown(a, Some(d)))
            .collect();
        let written = report::save_documentation(&markdown.join("\n---\n\n"), &path)?;
        if format == "pretty" {
            eprintln!("Documentation saved to {}", written.display());
        }
    }

    match format {
        "json" => report::write_json(&analyses, &documents)?,
        "markdown" => report::write_markdown(&analyses, &documents),
        _ => report::write_pretty(&analyses, &documents),
    }

    Ok(EXIT_SUCCESS)
}

fn analyze_path(
    analyzer: &Analyzer,
    path: &Path,
    language: Option<Language>,
    show_progress: bool,
) -> anyhow::Result<Vec<Analysis>> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("cannot access path {:?}: {}", path, e))?;

    if !metadata.is_dir() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let source = Source {
            text,
            filename: Some(path.to_string_lossy().into_owned()),
            language_override: language,
        };
        return Ok(vec![analyzer.analyze(&source)]);
    }

    if let Some(lang) = language {
        warn!(language = %lang, "--language is ignored for directories");
    }

    let files = collect_files(path, analyzer.config())?;
    debug!(count = files.len(), root = %path.display(), "collected files");

    let analyses = if show_progress && files.len() > 1 {
        let pb = create_progress_bar(files.len());
        let analyses = analyzer.analyze_files_with(&files, |_| pb.inc(1));
        pb.finish_and_clear();
        analyses
    } else {
        analyzer.analyze_files(&files)
    };
    Ok(analyses)
}

fn document_all(analyzer: &Analyzer, analyses: &[Analysis]) -> anyhow::Result<Vec<Documents>> {
    let runtime = tokio::runtime::Runtime::new()?;
    let documents = runtime.block_on(futures::future::join_all(
        analyses.iter().map(|a| analyzer.document(a)),
    ));
    Ok(documents)
}

/// One diagram path per analysis. A single analysis uses `base` as given;
/// several get an index and the source file stem appended, with the
/// renderer's `extension`.
fn diagram_paths(base: &Path, analyses: &[Analysis], extension: &str) -> Vec<PathBuf> {
    if analyses.len() == 1 {
        return vec![base.to_path_buf()];
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "diagram".to_string());
    analyses
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let source = a
                .path
                .as_ref()
                .and_then(|p| p.file_stem())
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| i.to_string());
            base.with_file_name(format!("{}-{}-{}.{}", stem, i, source, extension))
        })
        .collect()
}

/// Run the languages command.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("Supported languages (detection tie-break order):");
    println!();

    for lang in Language::ALL {
        let exts: Vec<String> = lang.extensions().iter().map(|e| format!(".{}", e)).collect();
        println!("  {:<8} {:<8} {}", lang.name(), lang.display_name(), exts.join(" "));
    }

    println!();
    println!("Usage:");
    println!("  codelens analyze <path> --language <name>");

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    // The template must stay loadable
    let parsed = Config::parse_str(CONFIG_TEMPLATE)?;
    config::validate(&parsed)?;

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize generation and exclusions", args.output.display());
    if !DEFAULT_CONFIG_NAMES
        .iter()
        .any(|n| args.output.file_name().map(|f| f == *n).unwrap_or(false))
    {
        println!("  2. Run: codelens analyze . --config {}", args.output.display());
    } else {
        println!("  2. Run: codelens analyze .");
    }

    Ok(EXIT_SUCCESS)
}
