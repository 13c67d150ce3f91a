/*!
 * Per-language chunk translation.
 *
 * `ChunkTranslator` turns one `TranslationJob` into a full translated text by
 * sending the job's chunks to the translation service one after another and
 * joining the answers in document order.
 */

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{ProviderError, TranslationError};
use crate::providers::{DEFAULT_MIME_TYPE, LanguageCode, TranslationPort};
use super::chunking::Chunk;

/// Work unit translating one document into one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    /// Language to produce
    pub target_language: LanguageCode,
    /// Name shown in progress output, if known
    pub display_name: Option<String>,
    /// The job's own copy of the document chunks, in order
    pub chunks: Vec<Chunk>,
}

impl TranslationJob {
    pub fn new(target_language: impl Into<String>, chunks: Vec<Chunk>) -> Self {
        Self {
            target_language: target_language.into(),
            display_name: None,
            chunks,
        }
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }
}

/// Retry settings for single chunk requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure; 0 disables retries
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each further one
    pub backoff_ms: u64,
}

impl RetryPolicy {
    /// Single attempt per chunk
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(max_retries: u32, backoff_ms: u64) -> Self {
        Self { max_retries, backoff_ms }
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_ms.saturating_mul(factor))
    }
}

/// Sequential translator for the chunks of one job
#[derive(Debug, Clone)]
pub struct ChunkTranslator {
    /// Service shared by every job of the run
    port: Arc<dyn TranslationPort>,
    /// Detected source language passed with each request
    source_language: Option<LanguageCode>,
    /// Content type of the chunks
    mime_type: String,
    /// Per-chunk retry settings
    retry: RetryPolicy,
}

impl ChunkTranslator {
    /// Create a translator sending plain text without a source hint
    pub fn new(port: Arc<dyn TranslationPort>) -> Self {
        Self {
            port,
            source_language: None,
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_source_language(mut self, source_language: Option<LanguageCode>) -> Self {
        self.source_language = source_language;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Translate every chunk of `job` in order and concatenate the results.
    ///
    /// The first chunk that cannot be translated fails the whole job; no
    /// partial text is returned.
    pub async fn translate(&self, job: &TranslationJob) -> Result<String, TranslationError> {
        let total = job.chunks.len();
        let mut translated = String::new();

        for chunk in &job.chunks {
            debug!(
                "Translating chunk {}/{} into {} ({} chars)",
                chunk.index + 1,
                total,
                job.target_language,
                chunk.char_len()
            );
            let piece = self.translate_with_retry(chunk, &job.target_language).await?;
            translated.push_str(&piece);
        }

        Ok(translated)
    }

    async fn translate_with_retry(&self, chunk: &Chunk, target_language: &str) -> Result<String, ProviderError> {
        let mut attempt = 0;
        loop {
            let result = self
                .port
                .translate_chunk(
                    &chunk.text,
                    target_language,
                    self.source_language.as_deref(),
                    &self.mime_type,
                )
                .await;

            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.retry.max_retries => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    warn!(
                        "Chunk {} for {} failed ({}), retry {}/{} in {:?}",
                        chunk.index + 1,
                        target_language,
                        e,
                        attempt,
                        self.retry.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
