//! Google Gemini implementation of the text generation client.
//!
//! One prompt in, one completion out, matching the
//! [`TextGenerator`] contract: the credential arrives per call (it belongs
//! to the requesting user, not to the process), the timeout is enforced
//! here, and there are no retries and no caching.

use async_trait::async_trait;
use fabula_error::{FabulaResult, GeminiError, GeminiErrorKind};
use fabula_interface::TextGenerator;
use gemini_rust::{Gemini, client::Model};
use std::time::Duration;
use tracing::instrument;

/// Default model for story generation.
const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Gemini-backed text generation client.
///
/// Stateless apart from the configured model name: a fresh SDK client is
/// built per call from the caller's credential, so one process can serve
/// requests on behalf of many users without holding any key material.
///
/// # Example
///
/// ```no_run
/// use fabula_models::GeminiTextGenerator;
/// use fabula_interface::TextGenerator;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let generator = GeminiTextGenerator::new();
/// let key = GeminiTextGenerator::api_key_from_env()?;
/// let text = generator
///     .complete(&key, "Continue the story.", Duration::from_secs(30))
///     .await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiTextGenerator {
    model: String,
}

impl GeminiTextGenerator {
    /// Create a generator using the default model.
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a generator for a specific model name.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Read a credential from the `GEMINI_API_KEY` environment variable.
    ///
    /// Convenience for single-tenant deployments and tests; multi-tenant
    /// callers pass each user's own credential to `complete` directly.
    pub fn api_key_from_env() -> FabulaResult<String> {
        std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey).into())
    }

    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Unrecognized names fall through to `Model::Custom` with the
    /// "models/" prefix the API requires.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => {
                if other.starts_with("models/") {
                    Model::Custom(other.to_string())
                } else {
                    Model::Custom(format!("models/{}", other))
                }
            }
        }
    }
}

impl Default for GeminiTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    #[instrument(
        name = "gemini_complete",
        skip(self, credential, prompt),
        fields(model = %self.model, prompt_len = prompt.len())
    )]
    async fn complete(
        &self,
        credential: &str,
        prompt: &str,
        timeout: Duration,
    ) -> FabulaResult<String> {
        let client = Gemini::with_model(credential, Self::model_name_to_enum(&self.model))
            .map_err(|e| {
                GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string()))
            })?;

        let request = client.generate_content().with_user_message(prompt);

        let response = match tokio::time::timeout(timeout, request.execute()).await {
            Ok(Ok(response)) => response,
            Ok(Err(failure)) => {
                return Err(GeminiError::new(GeminiErrorKind::ApiRequest(
                    failure.to_string(),
                )))?;
            }
            Err(_elapsed) => {
                return Err(GeminiError::new(GeminiErrorKind::ApiRequest(format!(
                    "request timed out after {timeout:?}"
                ))))?;
            }
        };

        let text = response.text();
        if text.is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse))?;
        }
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_map_to_sdk_variants() {
        assert!(matches!(
            GeminiTextGenerator::model_name_to_enum("gemini-2.5-pro"),
            Model::Gemini25Pro
        ));
    }

    #[test]
    fn unknown_models_get_the_models_prefix() {
        match GeminiTextGenerator::model_name_to_enum("gemini-2.0-flash") {
            Model::Custom(name) => assert_eq!(name, "models/gemini-2.0-flash"),
            other => panic!("expected custom model, got {other:?}"),
        }
        match GeminiTextGenerator::model_name_to_enum("models/already-prefixed") {
            Model::Custom(name) => assert_eq!(name, "models/already-prefixed"),
            other => panic!("expected custom model, got {other:?}"),
        }
    }
}
