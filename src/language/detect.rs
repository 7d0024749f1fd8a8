//! Language detection by raw keyword counting.
//!
//! Scoring counts substring occurrences, not tokens: a keyword inside an
//! identifier or a string literal still counts. Ties go to the language
//! that comes first in [`Language::ALL`], so detection never answers
//! "unknown". Callers that need that outcome check [`scores`] themselves.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use super::Language;

/// Keyword score for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageScore {
    pub language: Language,
    pub score: usize,
}

/// Score `text` against every language's keyword list, in tie-break order.
pub fn scores(text: &str) -> Vec<LanguageScore> {
    Language::ALL
        .iter()
        .map(|&language| LanguageScore {
            language,
            score: language
                .keywords()
                .iter()
                .map(|kw| text.matches(kw).count())
                .sum(),
        })
        .collect()
}

/// Guess the language of `text`.
///
/// A filename whose extension belongs to a language is authoritative and
/// skips scoring entirely.
pub fn detect(text: &str, filename: Option<&str>) -> Language {
    if let Some(lang) = filename.and_then(language_for_filename) {
        debug!(language = %lang, "language taken from file extension");
        return lang;
    }

    let scored = scores(text);
    let mut best = scored[0];
    for candidate in &scored[1..] {
        // Strictly greater keeps the earlier language on ties.
        if candidate.score > best.score {
            best = *candidate;
        }
    }

    debug!(language = %best.language, score = best.score, "language detected by keyword score");
    best.language
}

fn language_for_filename(filename: &str) -> Option<Language> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}
