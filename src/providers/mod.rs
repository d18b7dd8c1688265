/*!
 * Client implementations for the Bhashini remote services.
 *
 * This module contains one client per remote concern:
 * - discovery: ULCA pipeline discovery (endpoint + ephemeral credential)
 * - asr: speech-to-text inference against a discovered endpoint
 * - translation: synchronous text translation
 * - tts: synchronous speech synthesis
 *
 * Each client owns its own HTTP client with the timeout budget appropriate
 * for its call class; the text calls use short budgets, the audio calls
 * longer ones.
 */

pub mod asr;
pub mod discovery;
pub mod translation;
pub mod tts;
