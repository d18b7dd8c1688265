/*!
 * Error types for the vaani backend.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a remote Bhashini endpoint
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails (connection, timeout)
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error body from the API, verbatim
        message: String,
    },

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

impl ProviderError {
    /// The upstream HTTP status, when the provider answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Errors that can occur while running the speech pipeline, tagged with the
/// stage that raised them
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Pipeline discovery did not yield a usable inference endpoint
    #[error("pipeline discovery failed: {0}")]
    Resolution(#[source] ProviderError),

    /// The transcription inference call failed
    #[error("transcription failed: {0}")]
    Inference(#[source] ProviderError),

    /// A translation call failed
    #[error("translation failed: {0}")]
    Translation(#[source] ProviderError),

    /// The speech synthesis call failed
    #[error("speech synthesis failed: {0}")]
    Synthesis(#[source] ProviderError),

    /// A remote stage answered success but with an unexpected body shape
    #[error("unexpected provider response: {0}")]
    ResponseParse(String),

    /// Writing, reading or releasing the scratch audio file failed
    #[error("scratch audio storage failed: {0}")]
    Resource(String),
}

impl PipelineError {
    /// Short stage name, used in structured error responses and logs
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Resolution(_) => "discovery",
            Self::Inference(_) => "transcription",
            Self::Translation(_) => "translation",
            Self::Synthesis(_) => "synthesis",
            Self::ResponseParse(_) => "response-parse",
            Self::Resource(_) => "storage",
        }
    }

    /// Upstream HTTP status of the failing stage, if the provider answered
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Resolution(e)
            | Self::Inference(e)
            | Self::Translation(e)
            | Self::Synthesis(e) => e.status_code(),
            _ => None,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration, fatal at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from the speech pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
