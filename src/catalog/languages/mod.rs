//! Per-language pattern tables.
//!
//! Each module exposes a `spec()` function returning the uncompiled
//! patterns for its language.

mod c;
mod cpp;
mod go;
mod java;
mod python;
mod rust_lang;

use super::PatternSpec;
use crate::language::Language;

/// Get the pattern table for a language.
pub fn spec_for(language: Language) -> PatternSpec {
    match language {
        Language::Cpp => cpp::spec(),
        Language::C => c::spec(),
        Language::Python => python::spec(),
        Language::Java => java::spec(),
        Language::Go => go::spec(),
        Language::Rust => rust_lang::spec(),
    }
}
