/*!
 * Mock stage implementations for testing
 *
 * This module provides mock implementations of the pipeline stage traits and
 * the scratch store, so the coordinator can be exercised without any remote
 * calls. Each mock records its calls; failures are scripted per call index.
 * A shared event log captures cross-stage ordering.
 */

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use vaani::errors::{PipelineError, ProviderError};
use vaani::pipeline::{Echo, SpeechPipeline, Synthesize, Transcribe, Translate};
use vaani::scratch::{ScratchAudio, ScratchStore, TempFileStore};

/// Shared, ordered record of stage activity across one test
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn push_event(events: &Option<EventLog>, name: &str) {
    if let Some(events) = events {
        events.lock().unwrap().push(name.to_string());
    }
}

fn upstream_unavailable() -> ProviderError {
    ProviderError::ApiError {
        status_code: 503,
        message: "upstream unavailable".to_string(),
    }
}

/// Scripted translator that records every (text, source, target) call
pub struct MockTranslator {
    /// Every call's arguments, in order
    pub calls: Arc<Mutex<Vec<(String, String, String)>>>,
    replies: Mutex<VecDeque<String>>,
    fail_on_call: Option<usize>,
    events: Option<EventLog>,
}

impl MockTranslator {
    /// Translator answering the given replies in order; once the script is
    /// exhausted it echoes the input text
    pub fn scripted(replies: &[&str]) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            fail_on_call: None,
            events: None,
        }
    }

    /// Fail the call with the given zero-based index
    pub fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }
}

#[async_trait]
impl Translate for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, PipelineError> {
        push_event(&self.events, "translate");
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((
                text.to_string(),
                source_language.to_string(),
                target_language.to_string(),
            ));
            calls.len() - 1
        };

        if self.fail_on_call == Some(call_index) {
            return Err(PipelineError::Translation(upstream_unavailable()));
        }

        let reply = self.replies.lock().unwrap().pop_front();
        Ok(reply.unwrap_or_else(|| text.to_string()))
    }
}

/// Transcriber returning one fixed transcript, recording received audio
pub struct MockTranscriber {
    /// Audio bytes received by each call
    pub received: Arc<Mutex<Vec<Vec<u8>>>>,
    transcript: String,
    should_fail: bool,
    events: Option<EventLog>,
}

impl MockTranscriber {
    pub fn returning(transcript: &str) -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            transcript: transcript.to_string(),
            should_fail: false,
            events: None,
        }
    }

    pub fn failing() -> Self {
        let mut mock = Self::returning("");
        mock.should_fail = true;
        mock
    }

    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }
}

#[async_trait]
impl Transcribe for MockTranscriber {
    async fn transcribe(
        &self,
        audio: &[u8],
        _source_language: &str,
    ) -> Result<String, PipelineError> {
        push_event(&self.events, "transcribe");
        self.received.lock().unwrap().push(audio.to_vec());

        if self.should_fail {
            return Err(PipelineError::Inference(upstream_unavailable()));
        }

        Ok(self.transcript.clone())
    }
}

/// Synthesizer returning fixed audio bytes, counting its calls
pub struct MockSynthesizer {
    /// Number of synthesis calls made
    pub call_count: Arc<Mutex<usize>>,
    audio: Vec<u8>,
    should_fail: bool,
    events: Option<EventLog>,
}

impl MockSynthesizer {
    pub fn returning(audio: &[u8]) -> Self {
        Self {
            call_count: Arc::new(Mutex::new(0)),
            audio: audio.to_vec(),
            should_fail: false,
            events: None,
        }
    }

    pub fn failing() -> Self {
        let mut mock = Self::returning(b"");
        mock.should_fail = true;
        mock
    }

    pub fn with_events(mut self, events: EventLog) -> Self {
        self.events = Some(events);
        self
    }
}

#[async_trait]
impl Synthesize for MockSynthesizer {
    async fn synthesize(&self, _text: &str, _language: &str) -> Result<Vec<u8>, PipelineError> {
        push_event(&self.events, "synthesize");
        *self.call_count.lock().unwrap() += 1;

        if self.should_fail {
            return Err(PipelineError::Synthesis(upstream_unavailable()));
        }

        Ok(self.audio.clone())
    }
}

/// In-memory scratch store recording the spool/read/release lifecycle
pub struct RecordingScratchStore {
    events: EventLog,
    /// Suffix passed to each spool call
    pub suffixes: Arc<Mutex<Vec<String>>>,
    /// Number of release calls across all handles
    pub release_count: Arc<Mutex<usize>>,
}

impl RecordingScratchStore {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            suffixes: Arc::new(Mutex::new(Vec::new())),
            release_count: Arc::new(Mutex::new(0)),
        }
    }
}

struct RecordingScratchAudio {
    bytes: Vec<u8>,
    path: PathBuf,
    events: EventLog,
    release_count: Arc<Mutex<usize>>,
}

#[async_trait]
impl ScratchStore for RecordingScratchStore {
    async fn spool(&self, bytes: &[u8], suffix: &str) -> std::io::Result<Box<dyn ScratchAudio>> {
        self.events.lock().unwrap().push("spool".to_string());
        self.suffixes.lock().unwrap().push(suffix.to_string());
        Ok(Box::new(RecordingScratchAudio {
            bytes: bytes.to_vec(),
            path: PathBuf::from(format!("/scratch/fake{}", suffix)),
            events: Arc::clone(&self.events),
            release_count: Arc::clone(&self.release_count),
        }))
    }
}

#[async_trait]
impl ScratchAudio for RecordingScratchAudio {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> std::io::Result<Vec<u8>> {
        self.events.lock().unwrap().push("read".to_string());
        Ok(self.bytes.clone())
    }

    async fn release(self: Box<Self>) -> std::io::Result<()> {
        self.events.lock().unwrap().push("release".to_string());
        *self.release_count.lock().unwrap() += 1;
        Ok(())
    }
}

/// Real temp-file store that remembers where it spooled, so tests can check
/// the file is gone after the pipeline returns
pub struct PathCapturingStore {
    inner: TempFileStore,
    /// Path of the most recent spool
    pub last_path: Arc<Mutex<Option<PathBuf>>>,
}

impl PathCapturingStore {
    pub fn new() -> Self {
        Self {
            inner: TempFileStore,
            last_path: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl ScratchStore for PathCapturingStore {
    async fn spool(&self, bytes: &[u8], suffix: &str) -> std::io::Result<Box<dyn ScratchAudio>> {
        let handle = self.inner.spool(bytes, suffix).await?;
        *self.last_path.lock().unwrap() = Some(handle.path().to_path_buf());
        Ok(handle)
    }
}

/// Assemble a pipeline from mock stages with the default pivot language
pub fn pipeline_with(
    transcriber: MockTranscriber,
    translator: MockTranslator,
    synthesizer: MockSynthesizer,
    scratch: Arc<dyn ScratchStore>,
) -> SpeechPipeline {
    SpeechPipeline::with_stages(
        Arc::new(transcriber),
        Arc::new(translator),
        Arc::new(synthesizer),
        Arc::new(Echo),
        scratch,
        "English",
    )
}
