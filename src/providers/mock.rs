/*!
 * Mock translation service for testing.
 *
 * `MockTranslator` answers every chunk with `"<target>:<text>"` and can be
 * scripted to:
 * - fail the language listing or the source detection
 * - fail a chosen language on a chosen chunk call
 * - hold each chunk call for a while, to exercise the worker bound
 *
 * It records peak concurrent chunk calls and per-language call counts.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{LanguageCode, SupportedLanguage, TranslationPort};

/// Counters shared between clones of a mock
#[derive(Debug, Default)]
struct CallStats {
    in_flight: usize,
    peak_in_flight: usize,
    chunk_calls: HashMap<LanguageCode, usize>,
    source_languages: Vec<Option<LanguageCode>>,
    detect_sample_chars: Vec<usize>,
}

/// Scriptable in-process translation service
#[derive(Debug, Clone)]
pub struct MockTranslator {
    languages: Vec<SupportedLanguage>,
    detected: LanguageCode,
    fail_listing: bool,
    fail_detection: bool,
    /// Language -> 1-based chunk call that fails
    chunk_failures: HashMap<LanguageCode, usize>,
    delay: Duration,
    stats: Arc<Mutex<CallStats>>,
}

impl MockTranslator {
    /// Create a mock listing `codes` and detecting `detected` as the source
    pub fn new(codes: &[&str], detected: &str) -> Self {
        Self::with_languages(codes.iter().map(|c| SupportedLanguage::new(*c)).collect(), detected)
    }

    /// Create a mock from full language entries
    pub fn with_languages(languages: Vec<SupportedLanguage>, detected: &str) -> Self {
        Self {
            languages,
            detected: detected.to_string(),
            fail_listing: false,
            fail_detection: false,
            chunk_failures: HashMap::new(),
            delay: Duration::ZERO,
            stats: Arc::new(Mutex::new(CallStats::default())),
        }
    }

    /// Make `supported_languages` fail
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Make `detect_language` fail
    pub fn failing_detection(mut self) -> Self {
        self.fail_detection = true;
        self
    }

    /// Fail the first chunk call for `language`
    pub fn failing_language(self, language: &str) -> Self {
        self.failing_language_at(language, 1)
    }

    /// Fail the `call`-th chunk request (1-based) for `language`
    pub fn failing_language_at(mut self, language: &str, call: usize) -> Self {
        self.chunk_failures.insert(language.to_string(), call.max(1));
        self
    }

    /// Hold every chunk call for `delay_ms` milliseconds
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    /// Highest number of chunk calls seen running at once
    pub fn peak_in_flight(&self) -> usize {
        self.stats.lock().peak_in_flight
    }

    /// Number of chunk calls made for `language`
    pub fn chunk_calls(&self, language: &str) -> usize {
        self.stats.lock().chunk_calls.get(language).copied().unwrap_or(0)
    }

    /// Total number of chunk calls across languages
    pub fn total_chunk_calls(&self) -> usize {
        self.stats.lock().chunk_calls.values().sum()
    }

    /// Source language passed with each chunk call, in call order
    pub fn source_languages(&self) -> Vec<Option<LanguageCode>> {
        self.stats.lock().source_languages.clone()
    }

    /// Length in characters of each detection sample
    pub fn detect_sample_chars(&self) -> Vec<usize> {
        self.stats.lock().detect_sample_chars.clone()
    }
}

#[async_trait]
impl TranslationPort for MockTranslator {
    async fn supported_languages(&self) -> Result<Vec<SupportedLanguage>, ProviderError> {
        if self.fail_listing {
            return Err(ProviderError::ConnectionError("simulated listing failure".to_string()));
        }
        Ok(self.languages.clone())
    }

    async fn detect_language(&self, sample: &str) -> Result<LanguageCode, ProviderError> {
        self.stats.lock().detect_sample_chars.push(sample.chars().count());
        if self.fail_detection {
            return Err(ProviderError::ApiError {
                status_code: 503,
                message: "simulated detection failure".to_string(),
            });
        }
        Ok(self.detected.clone())
    }

    async fn translate_chunk(
        &self,
        text: &str,
        target_language: &str,
        source_language: Option<&str>,
        _mime_type: &str,
    ) -> Result<String, ProviderError> {
        let call = {
            let mut stats = self.stats.lock();
            stats.in_flight += 1;
            stats.peak_in_flight = stats.peak_in_flight.max(stats.in_flight);
            stats.source_languages.push(source_language.map(str::to_string));
            let calls = stats.chunk_calls.entry(target_language.to_string()).or_insert(0);
            *calls += 1;
            *calls
        };

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.stats.lock().in_flight -= 1;

        if self.chunk_failures.get(target_language) == Some(&call) {
            return Err(ProviderError::ApiError {
                status_code: 500,
                message: format!("simulated failure for {} on chunk call {}", target_language, call),
            });
        }

        Ok(format!("{}:{}", target_language, text))
    }
}
