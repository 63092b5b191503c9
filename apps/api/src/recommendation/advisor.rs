//! Advisor: natural-language analysis on top of a recommendation result.
//!
//! The model is optional. Without one, or when a call fails, the advisor
//! answers with the template texts from `fallback`, so callers always get
//! something to show.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError, SamplingOptions};
use crate::matching::profile::Profile;
use crate::recommendation::assembler::RecommendationResult;
use crate::recommendation::fallback::{
    domain_advice_after_failure, domain_advice_without_model, fallback_analysis,
};
use crate::recommendation::prompts::{
    build_analysis_prompt, build_domain_advice_prompt, CONNECTION_CHECK_PROMPT, COUNSELOR_SYSTEM,
};

// ────────────────────────────────────────────────────────────────────────────
// Text generation seam
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: SamplingOptions,
    ) -> Result<String, LlmError>;
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        options: SamplingOptions,
    ) -> Result<String, LlmError> {
        self.complete(system, prompt, options).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub text: String,
    pub source: AdviceSource,
}

impl Advice {
    fn model(text: String) -> Self {
        Self {
            text,
            source: AdviceSource::Model,
        }
    }

    fn fallback(text: String) -> Self {
        Self {
            text,
            source: AdviceSource::Fallback,
        }
    }
}

/// Result of a live round trip to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelCheck {
    pub configured: bool,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Advisor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Advisor {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Advisor {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    pub fn has_model(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn analyze(&self, profile: &Profile, result: &RecommendationResult<'_>) -> Advice {
        let Some(generator) = &self.generator else {
            return Advice::fallback(fallback_analysis(profile, result));
        };

        let prompt = build_analysis_prompt(profile, result);
        match generator
            .generate(COUNSELOR_SYSTEM, &prompt, SamplingOptions::ANALYSIS)
            .await
        {
            Ok(text) => Advice::model(text),
            Err(e) => {
                warn!("Counselling model failed, using template analysis: {e}");
                Advice::fallback(fallback_analysis(profile, result))
            }
        }
    }

    /// Sends a short fixed prompt and reports whether the model answered.
    pub async fn check(&self) -> ModelCheck {
        let Some(generator) = &self.generator else {
            return ModelCheck {
                configured: false,
                success: false,
                message: "Clé API non configurée".to_string(),
                response: None,
            };
        };

        match generator
            .generate(
                COUNSELOR_SYSTEM,
                CONNECTION_CHECK_PROMPT,
                SamplingOptions::CONNECTION_CHECK,
            )
            .await
        {
            Ok(text) => ModelCheck {
                configured: true,
                success: true,
                message: "Connexion réussie".to_string(),
                response: Some(text),
            },
            Err(e) => {
                warn!("Counselling model connection check failed: {e}");
                ModelCheck {
                    configured: true,
                    success: false,
                    message: format!("Erreur de connexion : {e}"),
                    response: None,
                }
            }
        }
    }

    pub async fn domain_advice(&self, domain: &str) -> Advice {
        let Some(generator) = &self.generator else {
            return Advice::fallback(domain_advice_without_model(domain));
        };

        let prompt = build_domain_advice_prompt(domain);
        match generator
            .generate(COUNSELOR_SYSTEM, &prompt, SamplingOptions::DOMAIN_ADVICE)
            .await
        {
            Ok(text) => Advice::model(text),
            Err(e) => {
                warn!("Counselling model failed for domain advice: {e}");
                Advice::fallback(domain_advice_after_failure(domain))
            }
        }
    }
}
