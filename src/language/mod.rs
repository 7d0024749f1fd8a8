//! Supported languages and keyword-scoring language detection.
//!
//! The language set is closed: every [`Language`] has an entry in the
//! pattern catalog, a keyword list and a list of file extensions.

mod detect;

pub use detect::{detect, scores, LanguageScore};

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// A supported source language.
///
/// Declaration order is significant: it is the iteration order of
/// [`Language::ALL`] and therefore the tie-break order of detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Cpp,
    Python,
    Java,
    C,
    Go,
    Rust,
}

/// File extension (lower-case, no dot) to language.
static EXTENSIONS: phf::Map<&'static str, Language> = phf_map! {
    "cpp" => Language::Cpp,
    "cc" => Language::Cpp,
    "cxx" => Language::Cpp,
    "hpp" => Language::Cpp,
    "hh" => Language::Cpp,
    "hxx" => Language::Cpp,
    "c" => Language::C,
    "h" => Language::C,
    "py" => Language::Python,
    "pyw" => Language::Python,
    "java" => Language::Java,
    "go" => Language::Go,
    "rs" => Language::Rust,
};

impl Language {
    /// All languages in tie-break order.
    pub const ALL: [Language; 6] = [
        Language::Cpp,
        Language::Python,
        Language::Java,
        Language::C,
        Language::Go,
        Language::Rust,
    ];

    /// Position of this language in [`Language::ALL`].
    pub fn index(self) -> usize {
        match self {
            Language::Cpp => 0,
            Language::Python => 1,
            Language::Java => 2,
            Language::C => 3,
            Language::Go => 4,
            Language::Rust => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::C => "c",
            Language::Python => "python",
            Language::Java => "java",
            Language::Go => "go",
            Language::Rust => "rust",
        }
    }

    /// Human-readable name used in reports and diagrams.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Cpp => "C++",
            Language::C => "C",
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Go => "Go",
            Language::Rust => "Rust",
        }
    }

    /// Get the file extensions declared for this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
            Language::C => &["c", "h"],
            Language::Python => &["py", "pyw"],
            Language::Java => &["java"],
            Language::Go => &["go"],
            Language::Rust => &["rs"],
        }
    }

    /// Keywords whose raw occurrence counts make up the detection score.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &[
                "def ", "import ", "from ", "class ", "elif", "None", "True", "False",
            ],
            Language::Java => &[
                "public class",
                "private ",
                "public ",
                "import java",
                "System.out",
            ],
            Language::Cpp => &["#include", "using namespace", "cout", "cin", "std::"],
            Language::C => &["#include", "printf", "scanf", "malloc", "free"],
            Language::Go => &["func ", "package ", "import ", "fmt.", "var "],
            Language::Rust => &["fn ", "let ", "mut ", "impl ", "use ", "println!"],
        }
    }

    /// Determine language from a file extension (with or without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        EXTENSIONS.get(ext.as_str()).copied()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpp" | "c++" | "cxx" => Ok(Language::Cpp),
            "c" => Ok(Language::C),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "go" | "golang" => Ok(Language::Go),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(format!("unsupported language: {}", s)),
        }
    }
}
