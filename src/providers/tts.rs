use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::app_config::{Config, CredentialsConfig};
use crate::errors::{PipelineError, ProviderError};
use crate::pipeline::Synthesize;

/// Synthesis request body
#[derive(Debug, Serialize)]
pub struct SynthesisRequest {
    text: String,
    language: String,
    #[serde(rename = "voiceName")]
    voice_name: String,
}

impl SynthesisRequest {
    /// Build a synthesis request with a fixed voice selection
    pub fn new(text: &str, language: &str, voice_name: &str) -> Self {
        Self {
            text: text.to_string(),
            language: language.to_string(),
            voice_name: voice_name.to_string(),
        }
    }
}

/// Client for the synchronous Bhashini speech synthesis endpoint
///
/// The success response body is raw MP3-class audio bytes.
pub struct Synthesizer {
    /// HTTP client for synthesis requests
    client: Client,
    /// Synthesis endpoint URL
    endpoint: String,
    /// ULCA identity and authorization credentials
    credentials: CredentialsConfig,
    /// Voice selection, a configuration constant rather than caller input
    voice_name: String,
}

impl Synthesizer {
    /// Create a new synthesizer from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.bhashini.tts_timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: config.bhashini.tts_endpoint.clone(),
            credentials: config.credentials.clone(),
            voice_name: config.bhashini.voice_name.clone(),
        }
    }

    async fn request_synthesis(
        &self,
        text: &str,
        language: &str,
    ) -> Result<Vec<u8>, PipelineError> {
        let payload = SynthesisRequest::new(text, language, &self.voice_name);

        let response = self
            .client
            .post(&self.endpoint)
            .header("userID", &self.credentials.user_id)
            .header("ulcaApiKey", &self.credentials.api_key)
            .header("Authorization", &self.credentials.auth_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PipelineError::Synthesis(ProviderError::RequestFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(PipelineError::Synthesis(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Synthesis(ProviderError::RequestFailed(e.to_string())))?;

        Ok(audio.to_vec())
    }
}

#[async_trait::async_trait]
impl Synthesize for Synthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, PipelineError> {
        self.request_synthesis(text, language).await
    }
}
