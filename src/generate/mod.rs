//! Natural-language documentation and suggestions.
//!
//! Text comes from an external language model when one is configured and
//! reachable, and from deterministic templates otherwise. Whether a model
//! is available is decided once, when the [`Generation`] capability is
//! resolved; every product then goes through [`Documenter`], which always
//! has a fallback and never reports failure to its caller.

pub mod fallback;
mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::complexity::ComplexityEstimate;
use crate::config::GenerationConfig;
use crate::infer::DataStructureSet;
use crate::parse::ParsedUnit;

/// Reasons the text-generation backend could not produce text.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("backend returned HTTP {0}")]
    Status(u16),
    #[error("backend returned no text")]
    EmptyResponse,
    #[error("generation backend not configured: {0}")]
    NotConfigured(String),
}

/// Something that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Short name for logs and reports.
    fn name(&self) -> &str;
}

/// Whether a text-generation backend can be used.
#[derive(Clone)]
pub enum Generation {
    Available(Arc<dyn TextGenerator>),
    Unavailable { reason: String },
}

impl Generation {
    /// Resolve the capability from configuration and the environment.
    pub fn from_config(config: &GenerationConfig) -> Self {
        if !config.enabled {
            return Self::unavailable("generation disabled in configuration");
        }

        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        match GeminiClient::new(config, api_key) {
            Ok(client) => {
                info!(model = %config.model, "text generation backend available");
                Generation::Available(Arc::new(client))
            }
            Err(e) => Self::unavailable(e.to_string()),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        info!(%reason, "text generation unavailable, using templates");
        Generation::Unavailable { reason }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Generation::Available(_))
    }
}

impl std::fmt::Debug for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generation::Available(g) => f.debug_tuple("Available").field(&g.name()).finish(),
            Generation::Unavailable { reason } => {
                f.debug_struct("Unavailable").field("reason", reason).finish()
            }
        }
    }
}

/// Where a piece of generated text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Model,
    Fallback,
}

/// Generated text plus its origin.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub text: String,
    pub origin: Origin,
}

impl Generated {
    fn fallback(text: String) -> Self {
        Self {
            text,
            origin: Origin::Fallback,
        }
    }
}

/// All generated products for one snippet.
#[derive(Debug, Clone, Serialize)]
pub struct Documents {
    pub documentation: Generated,
    pub refactoring: Generated,
    pub improvements: Generated,
}

/// Produces documentation and suggestions with a bounded wait.
#[derive(Debug, Clone)]
pub struct Documenter {
    generation: Generation,
    timeout: Duration,
}

impl Documenter {
    pub fn new(generation: Generation, timeout: Duration) -> Self {
        Self {
            generation,
            timeout,
        }
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Produce all three products concurrently.
    pub async fn document_all(
        &self,
        unit: &ParsedUnit,
        estimate: &ComplexityEstimate,
        structures: &DataStructureSet,
    ) -> Documents {
        let (documentation, refactoring, improvements) = futures::join!(
            self.documentation(unit, estimate, structures),
            self.refactoring(unit),
            self.improvements(unit),
        );
        Documents {
            documentation,
            refactoring,
            improvements,
        }
    }

    pub async fn documentation(
        &self,
        unit: &ParsedUnit,
        estimate: &ComplexityEstimate,
        structures: &DataStructureSet,
    ) -> Generated {
        self.run("documentation", prompts::documentation(unit), || {
            fallback::documentation(unit, estimate, structures)
        })
        .await
    }

    pub async fn refactoring(&self, unit: &ParsedUnit) -> Generated {
        self.run("refactoring", prompts::refactoring(unit), || {
            fallback::refactoring(&unit.original)
        })
        .await
    }

    pub async fn improvements(&self, unit: &ParsedUnit) -> Generated {
        self.run("improvements", prompts::improvements(unit), || {
            fallback::improvements(&unit.original)
        })
        .await
    }

    async fn run<F>(&self, product: &str, prompt: String, fallback: F) -> Generated
    where
        F: FnOnce() -> String,
    {
        let generator = match &self.generation {
            Generation::Available(g) => g,
            Generation::Unavailable { reason } => {
                debug!(product, %reason, "using template fallback");
                return Generated::fallback(fallback());
            }
        };

        let outcome = match tokio::time::timeout(self.timeout, generator.generate(&prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout),
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => Generated {
                text,
                origin: Origin::Model,
            },
            Ok(_) => {
                warn!(product, backend = generator.name(), "empty response, using template fallback");
                Generated::fallback(fallback())
            }
            Err(e) => {
                warn!(product, backend = generator.name(), error = %e, "generation failed, using template fallback");
                Generated::fallback(fallback())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complexity::estimate;
    use crate::infer::infer;
    use crate::language::Language;
    use crate::parse::parse;

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Status(503))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    const SNIPPET: &str = "int main() {\n    for (int i = 0; i < 3; i++) {}\n    return 0;\n}\n";

    async fn run_with(generation: Generation) -> Documents {
        let unit = parse(SNIPPET, Language::Cpp);
        let est = estimate(SNIPPET, &unit);
        let structures = infer(SNIPPET);
        Documenter::new(generation, Duration::from_millis(50))
            .document_all(&unit, &est, &structures)
            .await
    }

    #[tokio::test]
    async fn test_model_output_is_used() {
        let docs = run_with(Generation::Available(Arc::new(FixedGenerator("# Docs")))).await;
        assert_eq!(docs.documentation.origin, Origin::Model);
        assert_eq!(docs.documentation.text, "# Docs");
        assert_eq!(docs.improvements.origin, Origin::Model);
    }

    #[tokio::test]
    async fn test_unavailable_uses_fallback() {
        let docs = run_with(Generation::Unavailable {
            reason: "test".to_string(),
        })
        .await;
        assert_eq!(docs.documentation.origin, Origin::Fallback);
        assert!(docs.documentation.text.contains("## Purpose"));
        assert!(docs.refactoring.text.starts_with("REFACTORING SUGGESTIONS:"));
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let docs = run_with(Generation::Available(Arc::new(FailingGenerator))).await;
        assert_eq!(docs.documentation.origin, Origin::Fallback);
        assert_eq!(docs.refactoring.origin, Origin::Fallback);
    }

    #[tokio::test]
    async fn test_empty_response_falls_back() {
        let docs = run_with(Generation::Available(Arc::new(FixedGenerator("  \n")))).await;
        assert_eq!(docs.documentation.origin, Origin::Fallback);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let docs = run_with(Generation::Available(Arc::new(SlowGenerator))).await;
        assert_eq!(docs.documentation.origin, Origin::Fallback);
        assert!(!docs.documentation.text.is_empty());
    }

    #[test]
    fn test_disabled_config_is_unavailable() {
        let config = GenerationConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(!Generation::from_config(&config).is_available());
    }

    #[test]
    fn test_missing_key_is_unavailable() {
        let config = GenerationConfig {
            api_key_env: "CODELENS_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        match Generation::from_config(&config) {
            Generation::Unavailable { reason } => {
                assert!(reason.contains("CODELENS_TEST_KEY_THAT_IS_NEVER_SET"))
            }
            Generation::Available(_) => panic!("expected unavailable"),
        }
    }
}
