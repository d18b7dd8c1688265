/*!
 * # Vaani - speech round-trip backend
 *
 * A Rust backend that turns spoken or written input in a regional language
 * into round-tripped spoken and written output, by chaining the Bhashini
 * remote services.
 *
 * ## Features
 *
 * - Speech-to-text via the ULCA pipeline flow (discovery + inference)
 * - Forward and reverse translation through a pivot language
 * - Speech synthesis of the final text
 * - HTTP API with text and audio entry points
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pipeline`: Stage traits and the round-trip coordinator
 * - `providers`: Client implementations for the Bhashini services:
 *   - `providers::discovery`: ULCA pipeline discovery
 *   - `providers::asr`: Speech-to-text inference
 *   - `providers::translation`: Text translation
 *   - `providers::tts`: Speech synthesis
 * - `scratch`: Request-scoped scratch storage for uploads
 * - `server`: Axum HTTP delivery surface
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod pipeline;
pub mod providers;
pub mod scratch;
pub mod server;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, PipelineError, ProviderError};
pub use pipeline::{PipelineResult, SpeechPipeline};
