//! The pattern catalog: one table of regular expressions per language.
//!
//! Each language module under `languages/` declares its patterns as plain
//! string data ([`PatternSpec`]). The catalog compiles them once, stores
//! them in an array indexed by [`Language::index`], and hands out shared
//! references. Nothing mutates the catalog after it is built, so it can be
//! read from any number of threads.
//!
//! Patterns are single-line approximations, not grammars. A C function
//! pattern will happily report `if` as a function name when it sees
//! `if (x) {`; that imprecision is part of the contract.

pub mod languages;

use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::language::Language;

/// Errors raised while building the catalog.
///
/// Any of these means the built-in tables are broken; they are never
/// expected at runtime.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("no pattern table for language {0}")]
    Missing(Language),
    #[error("invalid {feature} pattern for {language}: {source}")]
    InvalidPattern {
        language: Language,
        feature: String,
        #[source]
        source: regex::Error,
    },
}

/// How a comment rule treats line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentForm {
    /// Matches up to the end of the current line.
    Line,
    /// May span several lines.
    Block,
}

/// Uncompiled pattern table for one language.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub language: Language,
    pub functions: &'static str,
    pub variables: &'static str,
    pub loops: &'static str,
    pub conditionals: &'static str,
    pub types: &'static str,
    pub imports: &'static str,
    pub sequences: Option<&'static str>,
    pub comments: &'static [(CommentForm, &'static str, &'static str)],
    pub containers: &'static [(&'static str, &'static str)],
}

/// A compiled comment-removal rule.
#[derive(Debug, Clone)]
pub struct CommentRule {
    pub form: CommentForm,
    pub pattern: Regex,
    pub replacement: &'static str,
}

/// Compiled patterns for one language.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub language: Language,
    pub functions: Regex,
    pub variables: Regex,
    pub loops: Regex,
    pub conditionals: Regex,
    /// Class, struct or type declarations.
    pub types: Regex,
    /// Imports, includes and `use` declarations.
    pub imports: Regex,
    /// Array, list, slice or vector declarations, where the language has them.
    pub sequences: Option<Regex>,
    /// Applied in order before any extraction.
    pub comments: Vec<CommentRule>,
    /// Named container constructs, for reporting only.
    pub containers: Vec<(&'static str, Regex)>,
}

impl PatternSet {
    fn compile(spec: &PatternSpec) -> Result<Self, CatalogError> {
        let lang = spec.language;
        let comments = spec
            .comments
            .iter()
            .map(|&(form, pattern, replacement)| {
                let regex = RegexBuilder::new(pattern)
                    .dot_matches_new_line(form == CommentForm::Block)
                    .build()
                    .map_err(|e| invalid(lang, "comments", e))?;
                Ok(CommentRule {
                    form,
                    pattern: regex,
                    replacement,
                })
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        let containers = spec
            .containers
            .iter()
            .map(|&(name, pattern)| {
                Regex::new(pattern)
                    .map(|r| (name, r))
                    .map_err(|e| invalid(lang, name, e))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Ok(Self {
            language: lang,
            functions: compile(lang, "functions", spec.functions)?,
            variables: compile(lang, "variables", spec.variables)?,
            loops: compile(lang, "loops", spec.loops)?,
            conditionals: compile(lang, "conditionals", spec.conditionals)?,
            types: compile(lang, "types", spec.types)?,
            imports: compile(lang, "imports", spec.imports)?,
            sequences: spec
                .sequences
                .map(|p| compile(lang, "sequences", p))
                .transpose()?,
            comments,
            containers,
        })
    }
}

fn compile(language: Language, feature: &str, pattern: &str) -> Result<Regex, CatalogError> {
    Regex::new(pattern).map_err(|e| invalid(language, feature, e))
}

fn invalid(language: Language, feature: &str, source: regex::Error) -> CatalogError {
    CatalogError::InvalidPattern {
        language,
        feature: feature.to_string(),
        source,
    }
}

/// All compiled pattern tables, indexed by language.
#[derive(Debug)]
pub struct PatternCatalog {
    sets: Vec<PatternSet>,
}

impl PatternCatalog {
    /// Compile the built-in tables.
    pub fn build() -> Result<Self, CatalogError> {
        let mut sets = Vec::with_capacity(Language::ALL.len());
        for lang in Language::ALL {
            let spec = languages::spec_for(lang);
            if spec.language != lang {
                return Err(CatalogError::Missing(lang));
            }
            sets.push(PatternSet::compile(&spec)?);
        }
        Ok(Self { sets })
    }

    /// Get the pattern table for a language.
    pub fn get(&self, language: Language) -> &PatternSet {
        &self.sets[language.index()]
    }
}

static CATALOG: OnceCell<PatternCatalog> = OnceCell::new();

/// Build the shared catalog, surfacing any table defect.
///
/// Call this once at startup. Later calls return the same catalog.
pub fn init() -> Result<&'static PatternCatalog, CatalogError> {
    CATALOG.get_or_try_init(PatternCatalog::build)
}

/// The shared catalog, built on first use.
pub fn catalog() -> &'static PatternCatalog {
    CATALOG.get_or_init(|| {
        PatternCatalog::build().unwrap_or_else(|e| panic!("built-in pattern catalog: {}", e))
    })
}

/// Get the pattern table for a language from the shared catalog.
pub fn patterns_for(language: Language) -> &'static PatternSet {
    catalog().get(language)
}
