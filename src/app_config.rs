use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and overriding configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// ULCA identity credentials, usually supplied via environment
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Bhashini endpoints and protocol constants
    #[serde(default)]
    pub bhashini: BhashiniConfig,

    /// HTTP server bind settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// ULCA account credentials
///
/// All three values are required before the pipeline may be constructed.
/// Fields left empty in the config file are filled from the environment
/// (`ULCA_USER_ID`, `ULCA_API_KEY`, `BHASHINI_AUTH`).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CredentialsConfig {
    /// ULCA profile user id
    #[serde(default)]
    pub user_id: String,

    /// ULCA profile API key
    #[serde(default)]
    pub api_key: String,

    /// Pre-issued Bhashini authorization token
    #[serde(default)]
    pub auth_token: String,
}

impl CredentialsConfig {
    /// Fill empty fields from the conventional environment variables
    pub fn overlay_env(&mut self) {
        if self.user_id.is_empty() {
            if let Ok(v) = std::env::var("ULCA_USER_ID") {
                self.user_id = v;
            }
        }
        if self.api_key.is_empty() {
            if let Ok(v) = std::env::var("ULCA_API_KEY") {
                self.api_key = v;
            }
        }
        if self.auth_token.is_empty() {
            if let Ok(v) = std::env::var("BHASHINI_AUTH") {
                self.auth_token = v;
            }
        }
    }
}

/// Bhashini service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BhashiniConfig {
    /// Synchronous translation endpoint
    #[serde(default = "default_translate_endpoint")]
    pub translate_endpoint: String,

    /// Synchronous speech synthesis endpoint
    #[serde(default = "default_tts_endpoint")]
    pub tts_endpoint: String,

    /// Pipeline discovery endpoint (ULCA getModelsPipeline)
    #[serde(default = "default_discovery_endpoint")]
    pub discovery_endpoint: String,

    /// Public pipeline id for MeitY ASR (16 kHz mono wav)
    #[serde(default = "default_asr_pipeline_id")]
    pub asr_pipeline_id: String,

    /// Pivot language for the translation round trip
    #[serde(default = "default_pivot_language")]
    pub pivot_language: String,

    /// Voice selection for synthesis
    #[serde(default = "default_voice_name")]
    pub voice_name: String,

    /// Discovery request timeout in seconds
    #[serde(default = "default_discovery_timeout_secs")]
    pub discovery_timeout_secs: u64,

    /// Translation request timeout in seconds
    #[serde(default = "default_translate_timeout_secs")]
    pub translate_timeout_secs: u64,

    /// Synthesis request timeout in seconds
    #[serde(default = "default_tts_timeout_secs")]
    pub tts_timeout_secs: u64,

    /// Transcription inference timeout in seconds; audio payloads and
    /// provider-side inference need a larger budget than the text calls
    #[serde(default = "default_asr_timeout_secs")]
    pub asr_timeout_secs: u64,
}

impl Default for BhashiniConfig {
    fn default() -> Self {
        Self {
            translate_endpoint: default_translate_endpoint(),
            tts_endpoint: default_tts_endpoint(),
            discovery_endpoint: default_discovery_endpoint(),
            asr_pipeline_id: default_asr_pipeline_id(),
            pivot_language: default_pivot_language(),
            voice_name: default_voice_name(),
            discovery_timeout_secs: default_discovery_timeout_secs(),
            translate_timeout_secs: default_translate_timeout_secs(),
            tts_timeout_secs: default_tts_timeout_secs(),
            asr_timeout_secs: default_asr_timeout_secs(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_translate_endpoint() -> String {
    "https://bhashini.gov.in/ulca/apis/v1/translate".to_string()
}

fn default_tts_endpoint() -> String {
    "https://bhashini.gov.in/ulca/apis/v1/synthesize".to_string()
}

fn default_discovery_endpoint() -> String {
    "https://meity-auth.ulcacontrib.org/ulca/apis/v0/model/getModelsPipeline".to_string()
}

fn default_asr_pipeline_id() -> String {
    "64392f96daac500b55c543cd".to_string()
}

fn default_pivot_language() -> String {
    "English".to_string()
}

fn default_voice_name() -> String {
    "Female1".to_string()
}

fn default_discovery_timeout_secs() -> u64 {
    20
}

fn default_translate_timeout_secs() -> u64 {
    30
}

fn default_tts_timeout_secs() -> u64 {
    60
}

fn default_asr_timeout_secs() -> u64 {
    120
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.credentials.user_id.is_empty()
            || self.credentials.api_key.is_empty()
            || self.credentials.auth_token.is_empty()
        {
            return Err(anyhow!(
                "ULCA_USER_ID, ULCA_API_KEY and BHASHINI_AUTH must be set (config file or environment)"
            ));
        }

        for endpoint in [
            &self.bhashini.translate_endpoint,
            &self.bhashini.tts_endpoint,
            &self.bhashini.discovery_endpoint,
        ] {
            Url::parse(endpoint)
                .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", endpoint, e))?;
        }

        if self.bhashini.asr_pipeline_id.is_empty() {
            return Err(anyhow!("ASR pipeline id must not be empty"));
        }

        if self.bhashini.pivot_language.is_empty() {
            return Err(anyhow!("Pivot language must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            credentials: CredentialsConfig::default(),
            bhashini: BhashiniConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
