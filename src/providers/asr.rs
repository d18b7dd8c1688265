use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::app_config::Config;
use crate::errors::{PipelineError, ProviderError};
use crate::pipeline::Transcribe;
use crate::providers::discovery::PipelineResolver;

/// Audio container named in the task config; a protocol constant, never
/// derived from the input
pub const AUDIO_FORMAT: &str = "wav";

/// Sampling rate named in the task config; a protocol constant
pub const SAMPLING_RATE: u32 = 16_000;

/// Inference request envelope for the ULCA pipeline endpoint
#[derive(Debug, Serialize)]
pub struct InferenceRequest {
    #[serde(rename = "pipelineTasks")]
    pipeline_tasks: Vec<PipelineTask>,
    #[serde(rename = "inputData")]
    input_data: InputData,
}

#[derive(Debug, Serialize)]
struct PipelineTask {
    #[serde(rename = "taskType")]
    task_type: &'static str,
    config: TaskConfig,
}

#[derive(Debug, Serialize)]
struct TaskConfig {
    language: TaskLanguage,
    #[serde(rename = "serviceId")]
    service_id: String,
    #[serde(rename = "audioFormat")]
    audio_format: &'static str,
    #[serde(rename = "samplingRate")]
    sampling_rate: u32,
}

#[derive(Debug, Serialize)]
struct TaskLanguage {
    #[serde(rename = "sourceLanguage")]
    source_language: String,
}

#[derive(Debug, Serialize)]
struct InputData {
    audio: Vec<AudioContent>,
}

#[derive(Debug, Serialize)]
struct AudioContent {
    #[serde(rename = "audioContent")]
    audio_content: String,
}

impl InferenceRequest {
    /// Build the single-task ASR envelope
    pub fn new(source_language: &str, service_id: &str, audio_base64: String) -> Self {
        Self {
            pipeline_tasks: vec![PipelineTask {
                task_type: "asr",
                config: TaskConfig {
                    language: TaskLanguage {
                        source_language: source_language.to_string(),
                    },
                    service_id: service_id.to_string(),
                    audio_format: AUDIO_FORMAT,
                    sampling_rate: SAMPLING_RATE,
                },
            }],
            input_data: InputData {
                audio: vec![AudioContent {
                    audio_content: audio_base64,
                }],
            },
        }
    }
}

/// Extract the transcript from an inference response body
///
/// The provider is inconsistent about the shape of `output`: observed
/// variants are a bare string, an object with a `source` field, and arrays
/// of either. Anything else fails with the offending value in the error so
/// the shape can be diagnosed; an unexpected body is never silently turned
/// into empty text.
pub fn extract_transcript(body: &Value) -> Result<String, PipelineError> {
    let output = body
        .get("pipelineResponse")
        .and_then(|r| r.get(0))
        .and_then(|r| r.get("output"))
        .ok_or_else(|| {
            PipelineError::ResponseParse(
                "missing pipelineResponse[0].output in ASR response".to_string(),
            )
        })?;

    transcript_value(output).ok_or_else(|| {
        PipelineError::ResponseParse(format!("unsupported ASR output shape: {output}"))
    })
}

fn transcript_value(output: &Value) -> Option<String> {
    match output {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.first().and_then(transcript_value),
        Value::Object(map) => map.get("source").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Client for Bhashini speech-to-text
///
/// Resolves the inference endpoint freshly for every call, then posts the
/// base64-encoded audio with the discovered credential header.
pub struct Transcriber {
    /// HTTP client for inference requests
    client: Client,
    /// Resolver for the ASR pipeline endpoint
    resolver: PipelineResolver,
}

impl Transcriber {
    /// Create a new transcriber from configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.bhashini.asr_timeout_secs))
                .build()
                .unwrap_or_default(),
            resolver: PipelineResolver::new(config),
        }
    }

    async fn transcribe_audio(
        &self,
        audio: &[u8],
        source_language: &str,
    ) -> Result<String, PipelineError> {
        let descriptor = self.resolver.resolve("asr").await?;

        let payload =
            InferenceRequest::new(source_language, &descriptor.service_id, BASE64.encode(audio));

        let response = self
            .client
            .post(&descriptor.callback_url)
            .header(descriptor.key_name.as_str(), descriptor.key_value.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|e| PipelineError::Inference(ProviderError::RequestFailed(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(PipelineError::Inference(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PipelineError::Inference(ProviderError::ParseError(e.to_string())))?;

        extract_transcript(&body)
    }
}

#[async_trait::async_trait]
impl Transcribe for Transcriber {
    async fn transcribe(&self, audio: &[u8], source_language: &str) -> Result<String, PipelineError> {
        self.transcribe_audio(audio, source_language).await
    }
}
