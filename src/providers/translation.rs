use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::app_config::{Config, CredentialsConfig};
use crate::errors::{PipelineError, ProviderError};
use crate::pipeline::Translate;

/// Translation request body
#[derive(Debug, Serialize)]
pub struct TranslationRequest {
    #[serde(rename = "inputText")]
    input_text: String,
    #[serde(rename = "inputLanguage")]
    input_language: String,
    #[serde(rename = "outputLanguage")]
    output_language: String,
}

impl TranslationRequest {
    /// Build a translation request for one language pair
    pub fn new(text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            input_text: text.to_string(),
            input_language: source_language.to_string(),
            output_language: target_language.to_string(),
        }
    }
}

/// Client for the synchronous Bhashini translation endpoint
///
/// The response body is the translated text itself, not a JSON envelope;
/// errors come back as human-readable text and are carried verbatim.
pub struct Translator {
    /// HTTP client for translation requests
    client: Client,
    /// Translation endpoint URL
    endpoint: String,
    /// ULCA identity and authorization credentials
    credentials: CredentialsConfig,
}

impl Translator {
    /// Create a new translator from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.bhashini.translate_timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: config.bhashini.translate_endpoint.clone(),
            credentials: config.credentials.clone(),
        }
    }

    async fn request_translation(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, PipelineError> {
        let payload = TranslationRequest::new(text, source_language, target_language);

        let response = self
            .client
            .post(&self.endpoint)
            .header("userID", &self.credentials.user_id)
            .header("ulcaApiKey", &self.credentials.api_key)
            .header("Authorization", &self.credentials.auth_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PipelineError::Translation(ProviderError::RequestFailed(e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Translation(ProviderError::RequestFailed(e.to_string())))?;

        if !status.is_success() {
            return Err(PipelineError::Translation(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        Ok(body.trim().to_string())
    }
}

#[async_trait::async_trait]
impl Translate for Translator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, PipelineError> {
        self.request_translation(text, source_language, target_language)
            .await
    }
}
