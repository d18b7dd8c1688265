use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::{PipelineError, ProviderError};

/// Resolved inference endpoint for one pipeline task
///
/// Scoped to a single transcription operation; resolution is fresh on every
/// request and nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDescriptor {
    /// Inference callback URL
    pub callback_url: String,
    /// Service id to name in the task config
    pub service_id: String,
    /// Name of the ephemeral credential header
    pub key_name: String,
    /// Value of the ephemeral credential header
    pub key_value: String,
}

/// Discovery request body
#[derive(Debug, Serialize)]
struct DiscoveryRequest<'a> {
    #[serde(rename = "pipelineId")]
    pipeline_id: &'a str,
    #[serde(rename = "taskType")]
    task_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct DiscoveryResponse {
    #[serde(rename = "pipelineInferenceAPIEndPoint")]
    endpoint: InferenceEndpoint,
}

#[derive(Debug, Deserialize)]
struct InferenceEndpoint {
    #[serde(rename = "callbackUrl")]
    callback_url: String,
    #[serde(rename = "serviceId")]
    service_id: String,
    #[serde(rename = "inferenceApiKey")]
    inference_api_key: InferenceApiKey,
}

#[derive(Debug, Deserialize)]
struct InferenceApiKey {
    name: String,
    value: String,
}

/// Parse a discovery response body into a descriptor
///
/// Missing or misshapen fields fail with the parse detail so the operator
/// can see what the provider actually sent.
pub fn parse_discovery_response(body: &str) -> Result<PipelineDescriptor, PipelineError> {
    let parsed: DiscoveryResponse = serde_json::from_str(body)
        .map_err(|e| PipelineError::Resolution(ProviderError::ParseError(e.to_string())))?;

    Ok(PipelineDescriptor {
        callback_url: parsed.endpoint.callback_url,
        service_id: parsed.endpoint.service_id,
        key_name: parsed.endpoint.inference_api_key.name,
        key_value: parsed.endpoint.inference_api_key.value,
    })
}

/// Client for the ULCA pipeline discovery endpoint
pub struct PipelineResolver {
    /// HTTP client for discovery requests
    client: Client,
    /// Discovery endpoint URL
    endpoint: String,
    /// Fixed pipeline id to resolve against
    pipeline_id: String,
    /// ULCA profile user id
    user_id: String,
    /// ULCA profile API key
    api_key: String,
}

impl PipelineResolver {
    /// Create a new resolver from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.bhashini.discovery_timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: config.bhashini.discovery_endpoint.clone(),
            pipeline_id: config.bhashini.asr_pipeline_id.clone(),
            user_id: config.credentials.user_id.clone(),
            api_key: config.credentials.api_key.clone(),
        }
    }

    /// Resolve the live endpoint and ephemeral credential for `task_type`
    ///
    /// Not retried; discovery is expected to be available when configured
    /// correctly, so a failure here is fatal for the enclosing request.
    pub async fn resolve(&self, task_type: &str) -> Result<PipelineDescriptor, PipelineError> {
        let payload = DiscoveryRequest {
            pipeline_id: &self.pipeline_id,
            task_type,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("userID", &self.user_id)
            .header("ulcaApiKey", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PipelineError::Resolution(ProviderError::RequestFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(PipelineError::Resolution(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Resolution(ProviderError::RequestFailed(e.to_string())))?;

        parse_discovery_response(&body)
    }
}
