//! Configuration file schema for codelens.
//!
//! Configuration is optional. Without a file every setting takes its
//! default and the text-generation backend is used only when an API key
//! is present in the environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::language::Language;

/// Default configuration file names, searched in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codelens.yaml", ".codelens.yaml"];

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Problems found while validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("generation.timeout_ms must be greater than zero")]
    ZeroTimeout,
    #[error("invalid excluded path pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("extension {extension:?} maps to unsupported language {language:?}")]
    UnknownLanguage { extension: String, language: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Glob patterns for paths to skip when scanning directories.
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Extra extension to language mappings, e.g. `ino: cpp`.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
    /// Directory for rendered diagrams and saved documentation.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Settings for the external text-generation backend.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Config {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a configuration from YAML text. An empty document yields defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load `path` if given, otherwise the first discovered file, otherwise defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(p) => Self::parse_file(p)?,
            None => match discover() {
                Some(p) => {
                    tracing::debug!(path = %p.display(), "using discovered config");
                    Self::parse_file(&p)?
                }
                None => Self::default(),
            },
        };
        validate(&config)?;
        Ok(config)
    }

    /// Check if a path should be skipped based on `excluded_paths`.
    pub fn is_path_excluded(&self, path: &Path) -> bool {
        if self.excluded_paths.is_empty() {
            return false;
        }

        let path_str = path.to_string_lossy();

        for pattern in &self.excluded_paths {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(&*path_str) {
                    return true;
                }
            }
        }
        false
    }

    /// Resolve the language for a file extension, honoring configured overrides.
    pub fn language_for_extension(&self, ext: &str) -> Option<Language> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        if let Some(name) = self.extensions.get(&ext) {
            return name.parse().ok();
        }
        Language::from_extension(&ext)
    }

    /// Directory for generated artifacts.
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Find a configuration file in the working directory, then in the user
/// configuration directory.
pub fn discover() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    directories::ProjectDirs::from("", "", "codelens")
        .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_NAMES[0]))
        .filter(|p| p.exists())
}

/// Validate a configuration.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.generation.timeout_ms == 0 {
        return Err(ConfigError::ZeroTimeout);
    }

    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;
    }

    for (extension, language) in &config.extensions {
        if language.parse::<Language>().is_err() {
            return Err(ConfigError::UnknownLanguage {
                extension: extension.clone(),
                language: language.clone(),
            });
        }
    }

    Ok(())
}
