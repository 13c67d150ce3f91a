/*!
 * # translate-all - one document, every language
 *
 * A Rust library and CLI that translates a text document into every language
 * supported by Google Cloud Translation v3, writing one file per language.
 *
 * ## Features
 *
 * - Lists the service's target languages and detects the source language
 * - Splits large documents into line-preserving, request-sized chunks
 * - Translates languages concurrently over a bounded worker pool
 * - Reports progress as each language finishes
 * - Isolates failures: one failing language never stops the others
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The orchestration engine:
 *   - `translation::chunking`: Line-preserving chunking
 *   - `translation::core`: Sequential chunk translation for one language
 *   - `translation::scheduler`: Bounded concurrent job scheduling
 * - `app_controller`: Run orchestration and summary reporting
 * - `providers`: The translation service port and its clients:
 *   - `providers::google`: Google Cloud Translation v3 REST client
 *   - `providers::mock`: Scriptable in-process service for tests
 * - `file_utils`: File system operations
 * - `language_utils`: Language display names
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use errors::{AppError, ProviderError, TranslationError};
pub use providers::{LanguageCode, SupportedLanguage, TranslationPort};
pub use translation::{chunk_text, ChunkTranslator, JobOutcome, JobProgress, JobScheduler, TranslationJob};
