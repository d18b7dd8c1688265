/*!
 * End-to-end sequencing of the speech round trip.
 *
 * The coordinator owns the ordering of the remote stages: transcription for
 * audio input, a forward translation into the pivot language, the response
 * hook, a reverse translation back to the source language, and speech
 * synthesis of the final text. Stages run strictly in order; the first
 * failure aborts the rest and no stage retries.
 */

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::PipelineError;
use crate::providers::asr::Transcriber;
use crate::providers::translation::Translator;
use crate::providers::tts::Synthesizer;
use crate::scratch::{ScratchAudio, ScratchStore, TempFileStore};

/// Speech-to-text stage
#[async_trait]
pub trait Transcribe: Send + Sync {
    /// Recognize `audio` (16 kHz mono WAV) as text in `source_language`
    async fn transcribe(&self, audio: &[u8], source_language: &str)
    -> Result<String, PipelineError>;
}

/// Text translation stage
#[async_trait]
pub trait Translate: Send + Sync {
    /// Translate `text` between two language codes
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, PipelineError>;
}

/// Speech synthesis stage
#[async_trait]
pub trait Synthesize: Send + Sync {
    /// Synthesize `text` in `language` into audio bytes
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, PipelineError>;
}

/// Hook between the forward and reverse translation passes
///
/// Receives the pivot-language text and returns the pivot-language text to
/// translate back. The extension point for a future response-generation
/// step; the shipped implementation echoes its input.
#[async_trait]
pub trait Respond: Send + Sync {
    async fn respond(&self, pivot_text: &str) -> Result<String, PipelineError>;
}

/// Pass-through responder, returns the pivot text unchanged
pub struct Echo;

#[async_trait]
impl Respond for Echo {
    async fn respond(&self, pivot_text: &str) -> Result<String, PipelineError> {
        Ok(pivot_text.to_string())
    }
}

/// Unified output record of one pipeline run
///
/// All four fields are populated together or the whole operation fails;
/// there is no partial result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PipelineResult {
    /// The text that entered translation, user-supplied or transcribed
    pub original_text: String,
    /// The forward-translated (pivot language) text
    pub translated_text: String,
    /// The reverse-translated text, back in the source language
    pub final_text: String,
    /// Base64 of the synthesized speech for `final_text`
    pub audio_base64: String,
}

/// Coordinator for the speech round trip
pub struct SpeechPipeline {
    transcriber: Arc<dyn Transcribe>,
    translator: Arc<dyn Translate>,
    synthesizer: Arc<dyn Synthesize>,
    responder: Arc<dyn Respond>,
    scratch: Arc<dyn ScratchStore>,
    pivot_language: String,
}

impl SpeechPipeline {
    /// Wire up the pipeline against the real Bhashini clients
    pub fn from_config(config: &Config) -> Self {
        Self {
            transcriber: Arc::new(Transcriber::new(config)),
            translator: Arc::new(Translator::new(config)),
            synthesizer: Arc::new(Synthesizer::new(config)),
            responder: Arc::new(Echo),
            scratch: Arc::new(TempFileStore),
            pivot_language: config.bhashini.pivot_language.clone(),
        }
    }

    /// Wire up the pipeline from explicit stage implementations
    pub fn with_stages(
        transcriber: Arc<dyn Transcribe>,
        translator: Arc<dyn Translate>,
        synthesizer: Arc<dyn Synthesize>,
        responder: Arc<dyn Respond>,
        scratch: Arc<dyn ScratchStore>,
        pivot_language: impl Into<String>,
    ) -> Self {
        Self {
            transcriber,
            translator,
            synthesizer,
            responder,
            scratch,
            pivot_language: pivot_language.into(),
        }
    }

    /// Run the round trip on raw text
    pub async fn run_from_text(
        &self,
        text: &str,
        language: &str,
    ) -> Result<PipelineResult, PipelineError> {
        debug!("translating {} -> {}", language, self.pivot_language);
        let translated = self
            .translator
            .translate(text, language, &self.pivot_language)
            .await?;

        let reply = self.responder.respond(&translated).await?;

        debug!("translating {} -> {}", self.pivot_language, language);
        let final_text = self
            .translator
            .translate(&reply, &self.pivot_language, language)
            .await?;

        let audio = self.synthesizer.synthesize(&final_text, language).await?;

        Ok(PipelineResult {
            original_text: text.to_string(),
            translated_text: translated,
            final_text,
            audio_base64: BASE64.encode(audio),
        })
    }

    /// Run the round trip on an uploaded recording
    ///
    /// The upload is spooled to scratch storage before transcription and the
    /// scratch file is released on every exit path, failures included.
    pub async fn run_from_audio(
        &self,
        audio: &[u8],
        filename_hint: Option<&str>,
        language: &str,
    ) -> Result<PipelineResult, PipelineError> {
        let suffix = scratch_suffix(filename_hint);
        let spooled = self
            .scratch
            .spool(audio, &suffix)
            .await
            .map_err(|e| PipelineError::Resource(e.to_string()))?;

        let result = self.transcribe_and_continue(spooled.as_ref(), language).await;

        if let Err(e) = spooled.release().await {
            warn!("failed to release scratch audio: {}", e);
        }

        result
    }

    async fn transcribe_and_continue(
        &self,
        spooled: &dyn ScratchAudio,
        language: &str,
    ) -> Result<PipelineResult, PipelineError> {
        let bytes = spooled
            .read()
            .await
            .map_err(|e| PipelineError::Resource(e.to_string()))?;

        let text = self.transcriber.transcribe(&bytes, language).await?;
        info!(
            "transcribed {} audio bytes into {} chars",
            bytes.len(),
            text.chars().count()
        );

        self.run_from_text(&text, language).await
    }
}

/// Scratch-file suffix implied by the upload filename, defaulting to WAV
fn scratch_suffix(filename_hint: Option<&str>) -> String {
    filename_hint
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_else(|| ".wav".to_string())
}
