//! Prompt Dispatcher: renders a feature's template for a profile and obtains
//! generated text.
//!
//! Failures are values, never panics or HTTP errors. `DispatchOutcome` turns
//! them into the text shown in the result panel ("Enter API Key First",
//! "Error: ...") while keeping the failure kind.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::coaching::features::Feature;
use crate::coaching::registry::TemplateRegistry;
use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
use crate::models::profile::Profile;

pub const MAX_OUTPUT_TOKENS: u32 = 2048;
pub const TOP_P: f32 = 0.95;
pub const TOP_K: u32 = 40;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Enter API Key First")]
    MissingCredential,

    #[error("Error: {0}")]
    Service(String),

    #[error("Error: {0}")]
    MalformedResponse(String),
}

impl From<LlmError> for DispatchError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(_) | LlmError::EmptyContent => {
                DispatchError::MalformedResponse(err.to_string())
            }
            LlmError::Http(_) | LlmError::Api { .. } => DispatchError::Service(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Generated,
    MissingCredential,
    ServiceError,
    MalformedResponse,
}

/// The text to display for one invocation, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub kind: OutcomeKind,
    pub text: String,
}

impl From<Result<String, DispatchError>> for DispatchOutcome {
    fn from(result: Result<String, DispatchError>) -> Self {
        let kind = match &result {
            Ok(_) => OutcomeKind::Generated,
            Err(DispatchError::MissingCredential) => OutcomeKind::MissingCredential,
            Err(DispatchError::Service(_)) => OutcomeKind::ServiceError,
            Err(DispatchError::MalformedResponse(_)) => OutcomeKind::MalformedResponse,
        };
        let text = match result {
            Ok(text) => text,
            Err(err) => err.to_string(),
        };
        Self { kind, text }
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<TemplateRegistry>,
    generator: Arc<dyn TextGenerator>,
}

impl Dispatcher {
    pub fn new(registry: Arc<TemplateRegistry>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            registry,
            generator,
        }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// The rendered prompt plus the feature's temperature and the fixed sampling caps.
    pub fn build_request(&self, feature: Feature, profile: &Profile) -> GenerationRequest {
        GenerationRequest {
            prompt: self.registry.render(feature, profile),
            temperature: feature.temperature(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
            top_p: TOP_P,
            top_k: TOP_K,
        }
    }

    /// Returns the model's raw text for `feature`. A blank or missing credential
    /// short-circuits before any network call.
    pub async fn invoke(
        &self,
        feature: Feature,
        profile: &Profile,
        credential: Option<&str>,
    ) -> Result<String, DispatchError> {
        let api_key = match credential.map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(DispatchError::MissingCredential),
        };

        let request = self.build_request(feature, profile);
        info!(
            "Invoking {feature} (temperature={}, prompt_len={})",
            request.temperature,
            request.prompt.len()
        );

        match self.generator.generate(api_key, &request).await {
            Ok(text) => {
                info!("{feature} generated {} chars", text.len());
                Ok(text)
            }
            Err(e) => {
                warn!("{feature} generation failed: {e}");
                Err(e.into())
            }
        }
    }
}
