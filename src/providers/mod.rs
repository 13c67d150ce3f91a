/*!
 * Translation service clients.
 *
 * This module defines the narrow port the orchestration engine consumes and
 * its implementations:
 * - Google: Google Cloud Translation v3 REST API
 * - Mock: in-process stand-in with scriptable failures and latency
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Opaque language identifier; compared by exact string match
pub type LanguageCode = String;

/// Default MIME type for translate and detect requests
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// A language the service can translate into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// Language code as reported by the service
    pub code: LanguageCode,
    /// Human readable name, when the service sends one
    pub display_name: Option<String>,
}

impl SupportedLanguage {
    /// Create a language entry without a display name
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: None,
        }
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Capability consumed from the remote translation service
///
/// One instance is built per run and shared by every job, so implementations
/// must be safe to call concurrently. Implementations never retry; every
/// failure is returned to the caller as is.
#[async_trait]
pub trait TranslationPort: Send + Sync + Debug {
    /// List the languages the service can translate into
    async fn supported_languages(&self) -> Result<Vec<SupportedLanguage>, ProviderError>;

    /// Detect the most likely language of the sample
    async fn detect_language(&self, sample: &str) -> Result<LanguageCode, ProviderError>;

    /// Translate one chunk of text into `target_language`
    ///
    /// # Arguments
    /// * `text` - The chunk to translate
    /// * `target_language` - Code of the language to produce
    /// * `source_language` - Advisory source code; `None` lets the service detect it
    /// * `mime_type` - Content type of `text`, usually `text/plain`
    async fn translate_chunk(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
        mime_type: &str,
    ) -> Result<String, ProviderError>;
}

pub mod google;
pub mod mock;
